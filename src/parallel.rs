//! Parallel processing utilities.
//!
//! Provides conditional parallel iteration based on configuration and
//! collection size. Uses rayon when the `parallel` feature is enabled.

use crate::types::RiskConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &RiskConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

/// Folds over items with a reduce step, conditionally using parallel
/// iteration.
///
/// # Arguments
///
/// * `items` - The collection to process
/// * `config` - Risk configuration
/// * `identity` - The identity value for the fold
/// * `fold` - The fold function: `(accumulator, item) -> accumulator`
/// * `reduce` - The reduce function: `(acc1, acc2) -> combined`
#[allow(unused_variables)]
pub fn maybe_parallel_fold<T, U, F, R>(
    items: &[T],
    config: &RiskConfig,
    identity: U,
    fold: F,
    reduce: R,
) -> U
where
    T: Sync,
    U: Send + Sync + Clone,
    F: Fn(U, &T) -> U + Sync + Send,
    R: Fn(U, U) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items
                .par_iter()
                .fold(|| identity.clone(), &fold)
                .reduce(|| identity.clone(), reduce);
        }
    }

    items.iter().fold(identity, fold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maybe_parallel_map() {
        let config = RiskConfig::sequential();
        let items = vec![1, 2, 3, 4, 5];
        let results: Vec<i32> = maybe_parallel_map(&items, &config, |x| x * 2);
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_maybe_parallel_fold() {
        let config = RiskConfig::sequential();
        let items: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sum: f64 = maybe_parallel_fold(&items, &config, 0.0, |acc, x| acc + x, |a, b| a + b);
        assert!((sum - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_parallel_threshold() {
        let config = RiskConfig::default().with_parallel_threshold(10);
        assert!(!config.should_parallelize(5));

        #[cfg(feature = "parallel")]
        assert!(config.should_parallelize(100));
    }
}
