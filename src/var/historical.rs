//! Historical (empirical-quantile) VaR and Expected Shortfall.
//!
//! Both estimators use the loss-positive convention: a loss is a negative
//! return in the input, and the reported figure is a non-negative loss
//! magnitude.

/// Empirical quantile with linear interpolation between order statistics.
///
/// `p` is the cumulative probability in `[0, 1]`; the slice is sorted
/// internally. An empty sample yields 0.
#[must_use]
pub fn empirical_quantile(sample: &[f64], p: f64) -> f64 {
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = p * (sorted.len() as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = rank - lo as f64;
        sorted[lo] + w * (sorted[hi] - sorted[lo])
    }
}

/// Historical VaR at the given confidence, as a loss magnitude.
///
/// VaR at confidence `c` is the magnitude of the `(1-c)` quantile of the
/// return distribution (the 5th percentile for 95%). A positive quantile
/// (no losses in the tail) clamps to zero.
#[must_use]
pub fn historical_var(returns: &[f64], confidence: f64) -> f64 {
    let q = empirical_quantile(returns, 1.0 - confidence);
    (-q).max(0.0)
}

/// Historical Expected Shortfall (CVaR) at the given confidence, as a
/// loss magnitude.
///
/// Mean of all returns at or below the empirical VaR threshold. If the
/// tail sample is empty (possible with very short series), falls back to
/// the VaR figure itself.
#[must_use]
pub fn historical_cvar(returns: &[f64], confidence: f64) -> f64 {
    let threshold = empirical_quantile(returns, 1.0 - confidence);

    let mut tail_sum = 0.0;
    let mut tail_count = 0usize;
    for &r in returns {
        if r <= threshold + 1.0e-12 {
            tail_sum += r;
            tail_count += 1;
        }
    }

    if tail_count == 0 {
        historical_var(returns, confidence)
    } else {
        (-(tail_sum / tail_count as f64)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empirical_quantile_interpolation() {
        let sample = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(empirical_quantile(&sample, 0.0), 1.0);
        assert_relative_eq!(empirical_quantile(&sample, 1.0), 5.0);
        assert_relative_eq!(empirical_quantile(&sample, 0.5), 3.0);
        // rank = 0.25 * 4 = 1.0 exactly
        assert_relative_eq!(empirical_quantile(&sample, 0.25), 2.0);
        // rank = 0.1 * 4 = 0.4, between 1.0 and 2.0
        assert_relative_eq!(empirical_quantile(&sample, 0.1), 1.4);
    }

    #[test]
    fn test_var_is_fifth_percentile_magnitude() {
        // 21 points: at p = 0.05 the rank is 0.05 * 20 = 1, exactly the
        // second-smallest observation.
        let mut returns = vec![0.01; 19];
        returns.push(-0.08); // outlier, smallest
        returns.push(-0.015); // second smallest
        assert_eq!(returns.len(), 21);

        let var = historical_var(&returns, 0.95);
        assert_relative_eq!(var, 0.015, epsilon = 1e-12);
    }

    #[test]
    fn test_cvar_at_least_var() {
        let mut returns = vec![0.01; 19];
        returns.push(-0.08);
        returns.push(-0.015);

        let var = historical_var(&returns, 0.95);
        let cvar = historical_cvar(&returns, 0.95);

        // Tail = {-0.08, -0.015}, mean = -0.0475
        assert_relative_eq!(cvar, 0.0475, epsilon = 1e-12);
        assert!(cvar >= var);
    }

    #[test]
    fn test_all_gains_clamps_to_zero() {
        let returns = vec![0.01; 30];
        assert_relative_eq!(historical_var(&returns, 0.95), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let returns: Vec<f64> = (0..100).map(|i| ((i * 7) % 13) as f64 / 100.0 - 0.05).collect();
        let a = historical_var(&returns, 0.99);
        let b = historical_var(&returns, 0.99);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
