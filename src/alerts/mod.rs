//! Risk alerts: types, thresholds, and the evaluator that reconciles
//! metric breaches against the prior alert set.

mod evaluator;
mod thresholds;

pub use evaluator::{evaluate, AlertEvaluation};
pub use thresholds::ThresholdConfig;

use crate::metrics::RiskLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The metric condition an alert describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// 1-day 95% VaR above its ceiling.
    VarThreshold,
    /// Annualized volatility above its ceiling.
    VolatilityThreshold,
    /// Normalized concentration above its ceiling.
    ConcentrationRisk,
    /// Liquidity score below its floor.
    LiquidityRisk,
    /// Caller-defined condition outside the standard thresholds.
    Custom,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::VarThreshold => "var_threshold",
            Self::VolatilityThreshold => "volatility_threshold",
            Self::ConcentrationRisk => "concentration_risk",
            Self::LiquidityRisk => "liquidity_risk",
            Self::Custom => "custom",
        };
        write!(f, "{name}")
    }
}

/// Lifecycle state of an alert.
///
/// Alerts are never deleted; a cleared condition transitions the alert to
/// [`AlertStatus::Resolved`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    /// Breach is ongoing and unhandled.
    Active,
    /// Breach is ongoing and a human has seen it.
    Acknowledged,
    /// The condition has cleared.
    Resolved,
}

/// A single risk alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    /// Stable identity; an ongoing breach keeps the same id across
    /// evaluation cycles.
    pub id: Uuid,
    /// Portfolio the alert belongs to.
    pub portfolio_id: String,
    /// Condition that fired.
    pub alert_type: AlertType,
    /// Severity of the breach.
    pub risk_level: RiskLevel,
    /// Configured limit that was crossed.
    pub threshold: f64,
    /// Observed metric value at evaluation time.
    pub observed: f64,
    /// Human-readable description embedding observed vs threshold.
    pub message: String,
    /// When the breach was first detected.
    pub created_at: DateTime<Utc>,
    /// Lifecycle state.
    pub status: AlertStatus,
    /// When the condition cleared, if it has.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl RiskAlert {
    /// Creates a new active alert.
    #[must_use]
    pub fn new(
        portfolio_id: impl Into<String>,
        alert_type: AlertType,
        risk_level: RiskLevel,
        threshold: f64,
        observed: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            portfolio_id: portfolio_id.into(),
            alert_type,
            risk_level,
            threshold,
            observed,
            message: message.into(),
            created_at: Utc::now(),
            status: AlertStatus::Active,
            resolved_at: None,
        }
    }

    /// Returns true while the condition has not cleared (active or
    /// acknowledged).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.status, AlertStatus::Resolved)
    }

    /// Marks the alert acknowledged. A no-op on resolved alerts.
    pub fn acknowledge(&mut self) {
        if self.status == AlertStatus::Active {
            self.status = AlertStatus::Acknowledged;
        }
    }

    /// Marks the alert resolved, recording the resolution time.
    pub fn resolve(&mut self) {
        if self.is_active() {
            self.status = AlertStatus::Resolved;
            self.resolved_at = Some(Utc::now());
        }
    }
}
