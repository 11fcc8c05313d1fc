//! Concentration risk via the normalized Herfindahl-Hirschman index.

use crate::Portfolio;

/// Normalized HHI concentration of a portfolio, in `[0, 1]`.
///
/// ## Formula
///
/// ```text
/// HHI  = sum(w_i^2)
/// norm = (HHI - 1/n) / (1 - 1/n)    for n > 1
/// ```
///
/// 0 means perfectly equal weights, 1 means everything in one position.
/// A single-position portfolio and an empty portfolio both report 0; the
/// single-position case is flagged through the concentration alert
/// thresholds rather than this index.
#[must_use]
pub fn concentration_risk(portfolio: &Portfolio) -> f64 {
    let n = portfolio.position_count();
    if n <= 1 {
        return 0.0;
    }

    let hhi: f64 = portfolio.weights().iter().map(|(_, w)| w * w).sum();
    let floor = 1.0 / n as f64;
    ((hhi - floor) / (1.0 - floor)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetClass, Position};
    use approx::assert_relative_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn portfolio_with_values(values: &[Decimal]) -> Portfolio {
        let mut builder = Portfolio::builder("Conc");
        for (i, &v) in values.iter().enumerate() {
            builder = builder.add_position(
                Position::builder(format!("P{i}"))
                    .quantity(Decimal::ONE)
                    .price(v)
                    .asset_class(AssetClass::EquityLargeCap)
                    .build()
                    .unwrap(),
            );
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_equal_weights_zero() {
        let portfolio = portfolio_with_values(&[dec!(100), dec!(100), dec!(100), dec!(100)]);
        assert_relative_eq!(concentration_risk(&portfolio), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dominant_position_near_one() {
        let portfolio = portfolio_with_values(&[dec!(9999), dec!(0.5), dec!(0.5)]);
        assert!(concentration_risk(&portfolio) > 0.99);
    }

    #[test]
    fn test_single_position_reports_zero() {
        let portfolio = portfolio_with_values(&[dec!(100)]);
        assert_relative_eq!(concentration_risk(&portfolio), 0.0);
    }

    #[test]
    fn test_two_positions_skewed() {
        // Weights 0.8 / 0.2: HHI = 0.68, normalized = (0.68-0.5)/0.5 = 0.36
        let portfolio = portfolio_with_values(&[dec!(80), dec!(20)]);
        assert_relative_eq!(concentration_risk(&portfolio), 0.36, epsilon = 1e-12);
    }
}
