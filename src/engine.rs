//! Composition root wiring providers, engines, and sinks together.

use crate::alerts::{self, AlertEvaluation, RiskAlert};
use crate::metrics::{ReturnsSet, RiskMetrics, RiskMetricsEngine};
use crate::providers::{AlertNotifier, ReturnSeriesProvider, RiskCalculationStore};
use crate::stress::{CancelToken, ScenarioLibrary, StressSuiteOutcome, StressTestExecutor};
use crate::types::RiskConfig;
use crate::{Portfolio, RiskResult};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one assessment cycle: the snapshot plus the alert
/// transitions it produced.
#[derive(Debug, Clone)]
pub struct Assessment {
    /// The computed metrics snapshot.
    pub metrics: RiskMetrics,
    /// Alert transitions relative to the prior alert set.
    pub alerts: AlertEvaluation,
}

/// Dependency-injected risk engine.
///
/// Holds the return-series provider, persistence and notification sinks,
/// the scenario library, and the configuration. Everything is passed in
/// explicitly; the engine owns no global state.
///
/// Store and notify failures are logged and swallowed: a broken sink
/// must not abort a risk computation that already succeeded.
pub struct RiskEngine {
    provider: Arc<dyn ReturnSeriesProvider>,
    store: Arc<dyn RiskCalculationStore>,
    notifier: Arc<dyn AlertNotifier>,
    metrics_engine: RiskMetricsEngine,
    executor: StressTestExecutor,
    config: RiskConfig,
}

impl RiskEngine {
    /// Creates an engine with the standard scenario library and default
    /// configuration.
    #[must_use]
    pub fn new(
        provider: Arc<dyn ReturnSeriesProvider>,
        store: Arc<dyn RiskCalculationStore>,
        notifier: Arc<dyn AlertNotifier>,
    ) -> Self {
        Self::with_config(provider, store, notifier, RiskConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    #[must_use]
    pub fn with_config(
        provider: Arc<dyn ReturnSeriesProvider>,
        store: Arc<dyn RiskCalculationStore>,
        notifier: Arc<dyn AlertNotifier>,
        config: RiskConfig,
    ) -> Self {
        Self {
            provider,
            store,
            notifier,
            metrics_engine: RiskMetricsEngine::new(config.clone()),
            executor: StressTestExecutor::new(config.clone(), ScenarioLibrary::standard()),
            config,
        }
    }

    /// Replaces the scenario library.
    #[must_use]
    pub fn with_library(mut self, library: ScenarioLibrary) -> Self {
        self.executor = StressTestExecutor::new(self.config.clone(), library);
        self
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// The engine's scenario library.
    #[must_use]
    pub fn library(&self) -> &ScenarioLibrary {
        self.executor.library()
    }

    /// Runs one assessment cycle for a portfolio.
    ///
    /// Fetches return history, computes the metrics snapshot, persists
    /// it, reconciles alerts against `prior_alerts`, and notifies each
    /// transition (raised or resolved) exactly once. A provider failure
    /// for a symbol degrades the snapshot rather than failing the cycle.
    ///
    /// # Errors
    ///
    /// Returns an error only when the portfolio itself is invalid.
    pub fn assess(
        &self,
        portfolio: &Portfolio,
        prior_alerts: &[RiskAlert],
    ) -> RiskResult<Assessment> {
        portfolio.validate()?;

        let returns = self.fetch_returns(portfolio);
        let metrics = self.metrics_engine.evaluate(portfolio, &returns);
        info!(
            portfolio_id = %portfolio.id,
            risk_level = %metrics.risk_level,
            degraded = metrics.is_degraded(),
            "assessment complete"
        );

        if let Err(err) = self.store.store_metrics(&metrics) {
            warn!(portfolio_id = %portfolio.id, error = %err, "failed to store metrics");
        }

        let evaluation = alerts::evaluate(&portfolio.id, &metrics, &self.config.thresholds, prior_alerts);
        for alert in evaluation.raised.iter().chain(evaluation.resolved.iter()) {
            if let Err(err) = self.notifier.notify(alert) {
                warn!(alert_id = %alert.id, error = %err, "failed to deliver alert");
            }
        }

        Ok(Assessment {
            metrics,
            alerts: evaluation,
        })
    }

    /// Runs a stress suite, persisting each successful result.
    ///
    /// Per-scenario failures are collected in the outcome rather than
    /// aborting the suite; cancellation is honored between scenarios.
    #[must_use]
    pub fn stress(
        &self,
        portfolio: &Portfolio,
        scenario_ids: &[String],
        cancel: &CancelToken,
    ) -> StressSuiteOutcome {
        let outcome = self.executor.run_suite(portfolio, scenario_ids, cancel);

        for result in outcome.results.values() {
            if let Err(err) = self.store.store_stress_result(result) {
                warn!(
                    scenario_id = %result.scenario_id,
                    error = %err,
                    "failed to store stress result"
                );
            }
        }
        outcome
    }

    fn fetch_returns(&self, portfolio: &Portfolio) -> ReturnsSet {
        let mut returns = ReturnsSet::new();

        for position in &portfolio.positions {
            match self
                .provider
                .get_returns(&position.symbol, self.config.lookback_days)
            {
                Ok(series) => {
                    returns.by_symbol.insert(position.symbol.clone(), series);
                }
                Err(err) => {
                    debug!(symbol = %position.symbol, error = %err, "no return series");
                }
            }
        }

        if let Some(benchmark_id) = &portfolio.benchmark_id {
            match self.provider.get_returns(benchmark_id, self.config.lookback_days) {
                Ok(series) => returns.benchmark = Some(series),
                Err(err) => {
                    debug!(benchmark_id = %benchmark_id, error = %err, "no benchmark series");
                }
            }
        }

        returns
    }
}
