//! Points-based risk-level classification.

use super::RiskLevel;
use crate::types::ScoreBands;

/// Total risk score for a metrics triple against a band configuration.
///
/// VaR contributes up to 40 points, volatility up to 30, concentration up
/// to 30 with the default bands; custom bands may shift the mix.
#[must_use]
pub fn risk_score(bands: &ScoreBands, var_1d_95: f64, volatility: f64, concentration: f64) -> u32 {
    ScoreBands::points(&bands.var_bands, var_1d_95)
        + ScoreBands::points(&bands.volatility_bands, volatility)
        + ScoreBands::points(&bands.concentration_bands, concentration)
}

/// Maps a total score to a [`RiskLevel`] using the band floors.
#[must_use]
pub fn classify(bands: &ScoreBands, score: u32) -> RiskLevel {
    if score >= bands.critical_floor {
        RiskLevel::Critical
    } else if score >= bands.high_floor {
        RiskLevel::High
    } else if score >= bands.medium_floor {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Classifies a metrics triple directly.
#[must_use]
pub fn risk_level(bands: &ScoreBands, var_1d_95: f64, volatility: f64, concentration: f64) -> RiskLevel {
    classify(bands, risk_score(bands, var_1d_95, volatility, concentration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_portfolio_is_low() {
        let bands = ScoreBands::default();
        // VaR 0.5%, vol 10%, concentration 10%: 0 points everywhere.
        assert_eq!(risk_level(&bands, 0.005, 0.10, 0.10), RiskLevel::Low);
    }

    #[test]
    fn test_medium_boundary() {
        let bands = ScoreBands::default();
        // VaR 3% (22) + vol 15% (8) + conc 20% (6) = 36 >= 35
        assert_eq!(risk_score(&bands, 0.03, 0.15, 0.20), 36);
        assert_eq!(classify(&bands, 36), RiskLevel::Medium);
        assert_eq!(classify(&bands, 34), RiskLevel::Low);
    }

    #[test]
    fn test_high_and_critical() {
        let bands = ScoreBands::default();
        // VaR 5% (32) + vol 35% (24) = 56 >= 55
        assert_eq!(risk_level(&bands, 0.05, 0.35, 0.0), RiskLevel::High);
        // VaR 8% (40) + vol 50% (30) + conc 80% (30) = 100
        assert_eq!(risk_level(&bands, 0.08, 0.50, 0.80), RiskLevel::Critical);
    }

    #[test]
    fn test_score_monotone_in_var() {
        let bands = ScoreBands::default();
        let low = risk_score(&bands, 0.01, 0.20, 0.30);
        let high = risk_score(&bands, 0.09, 0.20, 0.30);
        assert!(high > low);
    }
}
