//! Boundary traits for the core's external collaborators.
//!
//! The core never fetches market data, persists results, or delivers
//! notifications itself. Callers supply these capabilities through the
//! traits below; the in-memory implementations exist for tests and
//! embedding.

use crate::alerts::RiskAlert;
use crate::metrics::RiskMetrics;
use crate::stress::StressTestResult;
use crate::RiskResult;
use std::collections::HashMap;
use std::sync::Mutex;

/// Source of historical daily return series.
///
/// Returns are chronological daily fractional returns (0.01 = +1%).
/// A short or missing series is a degraded-data case for the engine,
/// never a fatal error.
pub trait ReturnSeriesProvider: Send + Sync {
    /// Fetches up to `lookback_days` of daily returns for a symbol.
    ///
    /// # Errors
    ///
    /// Implementations may return any [`crate::RiskError`]; the engine
    /// treats every failure as an absent series.
    fn get_returns(&self, symbol: &str, lookback_days: usize) -> RiskResult<Vec<f64>>;
}

/// Sink for computed risk artifacts.
///
/// Fire-and-forget from the core's perspective: failures are logged by
/// the engine and never retried.
pub trait RiskCalculationStore: Send + Sync {
    /// Stores a metrics snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact could not be persisted.
    fn store_metrics(&self, metrics: &RiskMetrics) -> RiskResult<()>;

    /// Stores a stress-test result.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact could not be persisted.
    fn store_stress_result(&self, result: &StressTestResult) -> RiskResult<()>;
}

/// Sink for alert transitions.
///
/// The engine emits each transition (new alert, resolution) exactly once
/// per evaluation cycle.
pub trait AlertNotifier: Send + Sync {
    /// Delivers one alert transition.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery failed; the engine logs and moves on.
    fn notify(&self, alert: &RiskAlert) -> RiskResult<()>;
}

/// Static, map-backed return-series provider.
#[derive(Debug, Default)]
pub struct StaticReturns {
    series: HashMap<String, Vec<f64>>,
}

impl StaticReturns {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a return series for a symbol.
    #[must_use]
    pub fn with_series(mut self, symbol: impl Into<String>, returns: Vec<f64>) -> Self {
        self.series.insert(symbol.into(), returns);
        self
    }
}

impl ReturnSeriesProvider for StaticReturns {
    fn get_returns(&self, symbol: &str, lookback_days: usize) -> RiskResult<Vec<f64>> {
        match self.series.get(symbol) {
            Some(returns) => {
                let start = returns.len().saturating_sub(lookback_days);
                Ok(returns[start..].to_vec())
            }
            None => Err(crate::RiskError::insufficient_data(1, 0)),
        }
    }
}

/// In-memory store collecting artifacts for inspection.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    metrics: Mutex<Vec<RiskMetrics>>,
    stress_results: Mutex<Vec<StressTestResult>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored metrics snapshots.
    #[must_use]
    pub fn metrics(&self) -> Vec<RiskMetrics> {
        self.metrics
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Stored stress results.
    #[must_use]
    pub fn stress_results(&self) -> Vec<StressTestResult> {
        self.stress_results
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl RiskCalculationStore for InMemoryStore {
    fn store_metrics(&self, metrics: &RiskMetrics) -> RiskResult<()> {
        self.metrics
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(metrics.clone());
        Ok(())
    }

    fn store_stress_result(&self, result: &StressTestResult) -> RiskResult<()> {
        self.stress_results
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(result.clone());
        Ok(())
    }
}

/// In-memory notifier collecting alert transitions for inspection.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    delivered: Mutex<Vec<RiskAlert>>,
}

impl InMemoryNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts delivered so far, in order.
    #[must_use]
    pub fn delivered(&self) -> Vec<RiskAlert> {
        self.delivered
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl AlertNotifier for InMemoryNotifier {
    fn notify(&self, alert: &RiskAlert) -> RiskResult<()> {
        self.delivered
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(alert.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_returns_lookback_window() {
        let provider =
            StaticReturns::new().with_series("SPY", vec![0.01, -0.02, 0.005, 0.003, -0.001]);

        let all = provider.get_returns("SPY", 252).unwrap();
        assert_eq!(all.len(), 5);

        // Lookback shorter than the series keeps the most recent tail.
        let tail = provider.get_returns("SPY", 2).unwrap();
        assert_eq!(tail, vec![0.003, -0.001]);
    }

    #[test]
    fn test_static_returns_unknown_symbol() {
        let provider = StaticReturns::new();
        assert!(provider.get_returns("MISSING", 252).is_err());
    }
}
