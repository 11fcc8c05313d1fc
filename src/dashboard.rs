//! Dashboard aggregation: windowed rollups of metrics, stress results,
//! and alerts.

use crate::alerts::RiskAlert;
use crate::metrics::{RiskLevel, RiskMetrics};
use crate::stress::StressTestResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A half-open reporting window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

impl ReportingWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The trailing window of the given number of days, ending now.
    #[must_use]
    pub fn trailing_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// Returns true if the timestamp falls inside the window.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// Suite-level stress rollup: worst, best, and average outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressSummary {
    /// Number of stress results in the window.
    pub scenario_count: usize,
    /// Largest percentage loss.
    pub worst_loss_pct: f64,
    /// Scenario producing the largest loss.
    pub worst_scenario_id: String,
    /// Smallest percentage loss (negative for a gain).
    pub best_loss_pct: f64,
    /// Scenario producing the smallest loss.
    pub best_scenario_id: String,
    /// Mean percentage loss across the window.
    pub avg_loss_pct: f64,
}

/// A windowed risk rollup across portfolios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDashboard {
    /// Window the rollup covers.
    pub window: ReportingWindow,
    /// Latest metrics snapshot per portfolio within the window.
    pub latest_metrics: BTreeMap<String, RiskMetrics>,
    /// Open alerts created in the window, counted by severity.
    pub active_alerts_by_level: BTreeMap<RiskLevel, usize>,
    /// Alerts resolved in the window, counted by severity.
    pub resolved_alerts_by_level: BTreeMap<RiskLevel, usize>,
    /// Stress rollup, absent when no stress result falls in the window.
    pub stress: Option<StressSummary>,
    /// Snapshots in the window that carry substituted defaults.
    pub degraded_count: usize,
    /// When the rollup was assembled.
    pub generated_at: DateTime<Utc>,
}

/// Aggregates raw artifacts into a [`RiskDashboard`] for one window.
///
/// Metrics outside the window are ignored; per portfolio, the newest
/// in-window snapshot wins. Open alerts are counted by `created_at`,
/// resolved alerts by `resolved_at`.
#[must_use]
pub fn aggregate(
    metrics: &[RiskMetrics],
    stress_results: &[StressTestResult],
    alerts: &[RiskAlert],
    window: ReportingWindow,
) -> RiskDashboard {
    let mut latest_metrics: BTreeMap<String, RiskMetrics> = BTreeMap::new();
    let mut degraded_count = 0usize;

    for snapshot in metrics {
        if !window.contains(snapshot.calculated_at) {
            continue;
        }
        if snapshot.is_degraded() {
            degraded_count += 1;
        }
        match latest_metrics.get(&snapshot.portfolio_id) {
            Some(existing) if existing.calculated_at >= snapshot.calculated_at => {}
            _ => {
                latest_metrics.insert(snapshot.portfolio_id.clone(), snapshot.clone());
            }
        }
    }

    let mut active_alerts_by_level: BTreeMap<RiskLevel, usize> = BTreeMap::new();
    let mut resolved_alerts_by_level: BTreeMap<RiskLevel, usize> = BTreeMap::new();
    for alert in alerts {
        if alert.is_active() {
            if window.contains(alert.created_at) {
                *active_alerts_by_level.entry(alert.risk_level).or_default() += 1;
            }
        } else if let Some(resolved_at) = alert.resolved_at {
            if window.contains(resolved_at) {
                *resolved_alerts_by_level.entry(alert.risk_level).or_default() += 1;
            }
        }
    }

    let in_window: Vec<&StressTestResult> = stress_results
        .iter()
        .filter(|r| window.contains(r.calculated_at))
        .collect();
    let stress = summarize_stress(&in_window);

    RiskDashboard {
        window,
        latest_metrics,
        active_alerts_by_level,
        resolved_alerts_by_level,
        stress,
        degraded_count,
        generated_at: Utc::now(),
    }
}

fn summarize_stress(results: &[&StressTestResult]) -> Option<StressSummary> {
    let worst = results.iter().max_by(|a, b| {
        a.percentage_loss
            .partial_cmp(&b.percentage_loss)
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;
    let best = results.iter().min_by(|a, b| {
        a.percentage_loss
            .partial_cmp(&b.percentage_loss)
            .unwrap_or(std::cmp::Ordering::Equal)
    })?;
    let avg = results.iter().map(|r| r.percentage_loss).sum::<f64>() / results.len() as f64;

    Some(StressSummary {
        scenario_count: results.len(),
        worst_loss_pct: worst.percentage_loss,
        worst_scenario_id: worst.scenario_id.clone(),
        best_loss_pct: best.percentage_loss,
        best_scenario_id: best.scenario_id.clone(),
        avg_loss_pct: avg,
    })
}
