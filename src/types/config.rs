//! Configuration for risk computation.
//!
//! Every knob the core recognizes lives here as a named, typed field, so a
//! missing value is a compile-time error rather than a silent default.

use super::AssetClass;
use crate::alerts::ThresholdConfig;
use serde::{Deserialize, Serialize};

/// Trading days per year, used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Configuration for risk metric and stress computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Annualized risk-free rate used for Sharpe ratios.
    pub risk_free_rate: f64,

    /// Minimum return observations required for distributional estimates.
    /// Shorter series fall back to the documented default metrics.
    pub min_observations: usize,

    /// Lookback window, in days, requested from the return-series provider.
    pub lookback_days: usize,

    /// Per-asset-class liquidity scores.
    pub liquidity: LiquidityTable,

    /// Breakpoints for the points-based risk-level classification.
    pub score_bands: ScoreBands,

    /// Alert thresholds.
    pub thresholds: ThresholdConfig,

    /// Enable parallel stress-suite execution (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum scenario count to trigger parallel execution.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.02,
            min_observations: 20,
            lookback_days: 252,
            liquidity: LiquidityTable::default(),
            score_bands: ScoreBands::default(),
            thresholds: ThresholdConfig::default(),
            parallel: true,
            parallel_threshold: 8,
        }
    }
}

impl RiskConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the minimum observation count.
    #[must_use]
    pub fn with_min_observations(mut self, min: usize) -> Self {
        self.min_observations = min;
        self
    }

    /// Sets the lookback window in days.
    #[must_use]
    pub fn with_lookback_days(mut self, days: usize) -> Self {
        self.lookback_days = days;
        self
    }

    /// Sets the liquidity table.
    #[must_use]
    pub fn with_liquidity(mut self, table: LiquidityTable) -> Self {
        self.liquidity = table;
        self
    }

    /// Sets the alert thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

/// Per-asset-class liquidity scores on a 0-1 scale (1 = fully liquid).
///
/// The portfolio liquidity score is the market-value-weighted average of
/// these per-class values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityTable {
    /// Cash and equivalents.
    pub cash: f64,
    /// Government bonds.
    pub government_bond: f64,
    /// Corporate bonds.
    pub corporate_bond: f64,
    /// Large-cap equities.
    pub equity_large_cap: f64,
    /// Small-cap equities.
    pub equity_small_cap: f64,
    /// Real estate.
    pub real_estate: f64,
    /// Commodities.
    pub commodity: f64,
    /// Private equity.
    pub private_equity: f64,
    /// Crypto assets.
    pub crypto: f64,
}

impl Default for LiquidityTable {
    fn default() -> Self {
        Self {
            cash: 1.0,
            government_bond: 0.95,
            corporate_bond: 0.75,
            equity_large_cap: 0.90,
            equity_small_cap: 0.65,
            real_estate: 0.30,
            commodity: 0.60,
            private_equity: 0.10,
            crypto: 0.70,
        }
    }
}

impl LiquidityTable {
    /// Liquidity score for an asset class.
    #[must_use]
    pub fn score(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Cash => self.cash,
            AssetClass::GovernmentBond => self.government_bond,
            AssetClass::CorporateBond => self.corporate_bond,
            AssetClass::EquityLargeCap => self.equity_large_cap,
            AssetClass::EquitySmallCap => self.equity_small_cap,
            AssetClass::RealEstate => self.real_estate,
            AssetClass::Commodity => self.commodity,
            AssetClass::PrivateEquity => self.private_equity,
            AssetClass::Crypto => self.crypto,
        }
    }
}

/// A scoring band: values at or above `threshold` earn `points`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Band {
    /// Lower bound of the band (inclusive).
    pub threshold: f64,
    /// Points awarded when the metric reaches the band.
    pub points: u32,
}

impl Band {
    /// Creates a new band.
    #[must_use]
    pub fn new(threshold: f64, points: u32) -> Self {
        Self { threshold, points }
    }
}

/// Breakpoints for the points-based risk-level score.
///
/// Each metric contributes the points of the highest band it reaches:
/// VaR up to 40, volatility up to 30, concentration up to 30. The total
/// maps to a [`crate::metrics::RiskLevel`] via the `*_floor` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBands {
    /// Bands for 1-day 95% VaR (loss fraction), sorted descending.
    pub var_bands: Vec<Band>,
    /// Bands for annualized volatility, sorted descending.
    pub volatility_bands: Vec<Band>,
    /// Bands for normalized concentration, sorted descending.
    pub concentration_bands: Vec<Band>,
    /// Minimum total score classified as medium risk.
    pub medium_floor: u32,
    /// Minimum total score classified as high risk.
    pub high_floor: u32,
    /// Minimum total score classified as critical risk.
    pub critical_floor: u32,
}

impl Default for ScoreBands {
    fn default() -> Self {
        Self {
            var_bands: vec![
                Band::new(0.08, 40),
                Band::new(0.05, 32),
                Band::new(0.03, 22),
                Band::new(0.02, 12),
                Band::new(0.01, 6),
            ],
            volatility_bands: vec![
                Band::new(0.50, 30),
                Band::new(0.35, 24),
                Band::new(0.25, 16),
                Band::new(0.15, 8),
            ],
            concentration_bands: vec![
                Band::new(0.80, 30),
                Band::new(0.60, 22),
                Band::new(0.40, 14),
                Band::new(0.20, 6),
            ],
            medium_floor: 35,
            high_floor: 55,
            critical_floor: 75,
        }
    }
}

impl ScoreBands {
    /// Points for a value against a descending-sorted band list.
    #[must_use]
    pub fn points(bands: &[Band], value: f64) -> u32 {
        bands
            .iter()
            .find(|b| value >= b.threshold)
            .map_or(0, |b| b.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RiskConfig::default();
        assert!((config.risk_free_rate - 0.02).abs() < 1e-12);
        assert_eq!(config.min_observations, 20);
        assert_eq!(config.lookback_days, 252);
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 8);
    }

    #[test]
    fn test_sequential() {
        let config = RiskConfig::sequential();
        assert!(!config.parallel);
        assert!(!config.should_parallelize(100));
    }

    #[test]
    fn test_builder_pattern() {
        let config = RiskConfig::new()
            .with_risk_free_rate(0.03)
            .with_min_observations(30)
            .with_parallel_threshold(4);

        assert!((config.risk_free_rate - 0.03).abs() < 1e-12);
        assert_eq!(config.min_observations, 30);
        assert_eq!(config.parallel_threshold, 4);
    }

    #[test]
    fn test_liquidity_table_ordering() {
        let table = LiquidityTable::default();
        assert!((table.score(AssetClass::Cash) - 1.0).abs() < 1e-12);
        assert!(table.score(AssetClass::Cash) > table.score(AssetClass::CorporateBond));
        assert!(table.score(AssetClass::CorporateBond) > table.score(AssetClass::PrivateEquity));
        assert!((table.score(AssetClass::PrivateEquity) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_band_points() {
        let bands = ScoreBands::default();
        assert_eq!(ScoreBands::points(&bands.var_bands, 0.10), 40);
        assert_eq!(ScoreBands::points(&bands.var_bands, 0.05), 32);
        assert_eq!(ScoreBands::points(&bands.var_bands, 0.005), 0);
        assert_eq!(ScoreBands::points(&bands.volatility_bands, 0.36), 24);
        assert_eq!(ScoreBands::points(&bands.concentration_bands, 0.41), 14);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = RiskConfig::new().with_lookback_days(500);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RiskConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.lookback_days, 500);
    }
}
