//! Alert threshold configuration.

use serde::{Deserialize, Serialize};

/// Thresholds that trigger risk alerts.
///
/// All maxima are exclusive breaches (`observed > max`); the liquidity
/// minimum breaches on `observed < min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Maximum tolerated 1-day 95% VaR (loss fraction).
    pub max_var_1d_95: f64,
    /// Maximum tolerated annualized volatility.
    pub max_volatility: f64,
    /// Maximum tolerated normalized concentration.
    pub max_concentration: f64,
    /// Minimum tolerated liquidity score.
    pub min_liquidity: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            max_var_1d_95: 0.05,
            max_volatility: 0.35,
            max_concentration: 0.70,
            min_liquidity: 0.30,
        }
    }
}

impl ThresholdConfig {
    /// Creates thresholds with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the VaR ceiling.
    #[must_use]
    pub fn with_max_var(mut self, max: f64) -> Self {
        self.max_var_1d_95 = max;
        self
    }

    /// Sets the volatility ceiling.
    #[must_use]
    pub fn with_max_volatility(mut self, max: f64) -> Self {
        self.max_volatility = max;
        self
    }

    /// Sets the concentration ceiling.
    #[must_use]
    pub fn with_max_concentration(mut self, max: f64) -> Self {
        self.max_concentration = max;
        self
    }

    /// Sets the liquidity floor.
    #[must_use]
    pub fn with_min_liquidity(mut self, min: f64) -> Self {
        self.min_liquidity = min;
        self
    }
}
