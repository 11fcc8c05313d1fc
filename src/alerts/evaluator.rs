//! Threshold evaluation and alert reconciliation.

use super::{AlertType, RiskAlert, ThresholdConfig};
use crate::metrics::{RiskLevel, RiskMetrics};
use tracing::debug;

/// Outcome of one evaluation cycle.
///
/// The three sets are disjoint: `raised` are new breaches, `carried` are
/// ongoing breaches keeping their existing alert (same id), `resolved`
/// are prior alerts whose condition cleared this cycle.
#[derive(Debug, Clone, Default)]
pub struct AlertEvaluation {
    /// Newly created alerts.
    pub raised: Vec<RiskAlert>,
    /// Prior alerts whose breach is still ongoing.
    pub carried: Vec<RiskAlert>,
    /// Prior alerts resolved this cycle.
    pub resolved: Vec<RiskAlert>,
}

impl AlertEvaluation {
    /// All alerts still open after this cycle (raised plus carried).
    #[must_use]
    pub fn open(&self) -> Vec<RiskAlert> {
        let mut open = self.raised.clone();
        open.extend(self.carried.iter().cloned());
        open
    }
}

struct Check {
    alert_type: AlertType,
    breached: bool,
    risk_level: RiskLevel,
    threshold: f64,
    observed: f64,
    message: String,
}

fn standard_checks(metrics: &RiskMetrics, thresholds: &ThresholdConfig) -> Vec<Check> {
    vec![
        Check {
            alert_type: AlertType::VarThreshold,
            breached: metrics.var_1d_95 > thresholds.max_var_1d_95,
            risk_level: RiskLevel::High,
            threshold: thresholds.max_var_1d_95,
            observed: metrics.var_1d_95,
            message: format!(
                "1-day 95% VaR {:.2}% exceeds limit {:.2}%",
                metrics.var_1d_95 * 100.0,
                thresholds.max_var_1d_95 * 100.0
            ),
        },
        Check {
            alert_type: AlertType::VolatilityThreshold,
            breached: metrics.volatility > thresholds.max_volatility,
            risk_level: RiskLevel::Medium,
            threshold: thresholds.max_volatility,
            observed: metrics.volatility,
            message: format!(
                "annualized volatility {:.2}% exceeds limit {:.2}%",
                metrics.volatility * 100.0,
                thresholds.max_volatility * 100.0
            ),
        },
        Check {
            alert_type: AlertType::ConcentrationRisk,
            breached: metrics.concentration_risk > thresholds.max_concentration,
            risk_level: RiskLevel::High,
            threshold: thresholds.max_concentration,
            observed: metrics.concentration_risk,
            message: format!(
                "concentration {:.2} exceeds limit {:.2}",
                metrics.concentration_risk, thresholds.max_concentration
            ),
        },
        Check {
            alert_type: AlertType::LiquidityRisk,
            breached: metrics.liquidity_score < thresholds.min_liquidity,
            risk_level: RiskLevel::Medium,
            threshold: thresholds.min_liquidity,
            observed: metrics.liquidity_score,
            message: format!(
                "liquidity score {:.2} below floor {:.2}",
                metrics.liquidity_score, thresholds.min_liquidity
            ),
        },
    ]
}

/// Evaluates metric thresholds and reconciles against the prior alert
/// set.
///
/// Ongoing breaches carry their existing alert forward unchanged (same
/// id, no duplicate); cleared breaches move the prior alert to resolved
/// with `resolved_at` set. Degraded metrics neither raise nor resolve:
/// the figures are substituted defaults, so every prior open alert is
/// carried untouched. Open [`AlertType::Custom`] alerts are always
/// carried; the standard thresholds do not manage them.
#[must_use]
pub fn evaluate(
    portfolio_id: &str,
    metrics: &RiskMetrics,
    thresholds: &ThresholdConfig,
    prior: &[RiskAlert],
) -> AlertEvaluation {
    let mut outcome = AlertEvaluation::default();

    let open_of = |alert_type: AlertType| {
        prior
            .iter()
            .find(|a| a.portfolio_id == portfolio_id && a.alert_type == alert_type && a.is_active())
    };

    if metrics.is_degraded() {
        debug!(portfolio_id, "degraded metrics, carrying prior alerts");
        outcome.carried = prior
            .iter()
            .filter(|a| a.portfolio_id == portfolio_id && a.is_active())
            .cloned()
            .collect();
        return outcome;
    }

    for check in standard_checks(metrics, thresholds) {
        match (check.breached, open_of(check.alert_type)) {
            (true, Some(existing)) => outcome.carried.push(existing.clone()),
            (true, None) => outcome.raised.push(RiskAlert::new(
                portfolio_id,
                check.alert_type,
                check.risk_level,
                check.threshold,
                check.observed,
                check.message,
            )),
            (false, Some(existing)) => {
                let mut resolved = existing.clone();
                resolved.resolve();
                outcome.resolved.push(resolved);
            }
            (false, None) => {}
        }
    }

    if let Some(custom) = open_of(AlertType::Custom) {
        outcome.carried.push(custom.clone());
    }

    outcome
}
