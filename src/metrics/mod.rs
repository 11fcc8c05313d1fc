//! Risk metrics: statistics, concentration, liquidity, scoring, and the
//! metrics engine that assembles them into a snapshot.

mod concentration;
mod engine;
mod liquidity;
mod scoring;
pub mod statistics;

pub use concentration::concentration_risk;
pub use engine::{ReturnsSet, RiskMetricsEngine};
pub use liquidity::liquidity_score;
pub use scoring::{classify, risk_level, risk_score};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall risk classification, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Total score below the medium floor.
    Low,
    /// Elevated but manageable risk.
    Medium,
    /// Risk requiring attention.
    High,
    /// Risk requiring immediate action.
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{name}")
    }
}

/// Whether a snapshot was measured from real return history or filled
/// with documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    /// All distributional figures computed from sufficient history.
    Measured,
    /// History was missing or too short; defaults were substituted.
    Degraded,
}

impl DataQuality {
    /// Returns true for a degraded snapshot.
    #[must_use]
    pub fn is_degraded(self) -> bool {
        matches!(self, Self::Degraded)
    }
}

/// A point-in-time risk snapshot for one portfolio.
///
/// All VaR/CVaR figures are positive loss-magnitude fractions of
/// portfolio value. The snapshot is a plain value: serializable,
/// comparable, and safe to persist as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Portfolio the snapshot describes.
    pub portfolio_id: String,
    /// When the snapshot was computed.
    pub calculated_at: DateTime<Utc>,
    /// 1-day 95% Value-at-Risk (loss fraction).
    pub var_1d_95: f64,
    /// 1-day 99% Value-at-Risk (loss fraction).
    pub var_1d_99: f64,
    /// 10-day 95% Value-at-Risk, square-root-of-time scaled.
    pub var_10d_95: f64,
    /// 1-day 95% Expected Shortfall (loss fraction).
    pub cvar_95: f64,
    /// Annualized portfolio volatility.
    pub volatility: f64,
    /// Beta versus the benchmark (1.0 when no benchmark series).
    pub beta: f64,
    /// Annualized Sharpe ratio.
    pub sharpe_ratio: f64,
    /// Maximum drawdown over the lookback window (positive fraction).
    pub max_drawdown: f64,
    /// Normalized HHI concentration in `[0, 1]`.
    pub concentration_risk: f64,
    /// Weighted liquidity score in `[0, 1]` (1 = fully liquid).
    pub liquidity_score: f64,
    /// Points-based overall classification.
    pub risk_level: RiskLevel,
    /// Provenance of the distributional figures.
    pub data_quality: DataQuality,
}

impl RiskMetrics {
    /// Returns true when the snapshot was filled with defaults.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.data_quality.is_degraded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_serde_snake_case() {
        let json = serde_json::to_string(&RiskLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let parsed: RiskLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, RiskLevel::Medium);
    }

    #[test]
    fn test_data_quality_flag() {
        assert!(DataQuality::Degraded.is_degraded());
        assert!(!DataQuality::Measured.is_degraded());
    }
}
