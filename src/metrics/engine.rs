//! Metrics engine: assembles a [`RiskMetrics`] snapshot from a portfolio
//! and its return history.

use super::statistics;
use super::{concentration_risk, liquidity_score, risk_level, DataQuality, RiskLevel, RiskMetrics};
use crate::types::RiskConfig;
use crate::{var, Portfolio};
use chrono::Utc;
use std::collections::HashMap;
use tracing::debug;

/// Return history assembled for one evaluation.
///
/// `portfolio_returns` short-circuits the market-value-weighted
/// aggregation when the caller already holds an aggregate series.
#[derive(Debug, Clone, Default)]
pub struct ReturnsSet {
    /// Daily return series per position symbol.
    pub by_symbol: HashMap<String, Vec<f64>>,
    /// Benchmark series for beta, if available.
    pub benchmark: Option<Vec<f64>>,
    /// Pre-aggregated portfolio series overriding the weighted sum.
    pub portfolio_returns: Option<Vec<f64>>,
}

impl ReturnsSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a per-symbol series.
    #[must_use]
    pub fn with_series(mut self, symbol: impl Into<String>, returns: Vec<f64>) -> Self {
        self.by_symbol.insert(symbol.into(), returns);
        self
    }

    /// Sets the benchmark series.
    #[must_use]
    pub fn with_benchmark(mut self, returns: Vec<f64>) -> Self {
        self.benchmark = Some(returns);
        self
    }

    /// Injects a pre-aggregated portfolio series.
    #[must_use]
    pub fn with_portfolio_returns(mut self, returns: Vec<f64>) -> Self {
        self.portfolio_returns = Some(returns);
        self
    }
}

/// Computes [`RiskMetrics`] snapshots.
///
/// Evaluation is total: a portfolio the engine cannot measure (empty, or
/// without enough return history) yields the documented conservative
/// defaults flagged [`DataQuality::Degraded`] instead of an error.
#[derive(Debug, Clone, Default)]
pub struct RiskMetricsEngine {
    config: RiskConfig,
}

impl RiskMetricsEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Evaluates a full metrics snapshot.
    ///
    /// The portfolio series is the market-value-weighted aggregation of
    /// the per-symbol series over their shortest trailing window, unless
    /// `returns.portfolio_returns` overrides it. When the series is
    /// absent or shorter than `min_observations`, the snapshot falls back
    /// to [`RiskMetricsEngine::default_metrics`].
    #[must_use]
    pub fn evaluate(&self, portfolio: &Portfolio, returns: &ReturnsSet) -> RiskMetrics {
        let series = match &returns.portfolio_returns {
            Some(override_series) => Some(override_series.clone()),
            None => statistics::weighted_portfolio_returns(portfolio, &returns.by_symbol),
        };

        let series = match series {
            Some(s) if s.len() >= self.config.min_observations => s,
            _ => {
                debug!(
                    portfolio_id = %portfolio.id,
                    min_observations = self.config.min_observations,
                    "insufficient return history, using degraded defaults"
                );
                return self.default_metrics(&portfolio.id);
            }
        };

        // min_observations >= MIN_OBSERVATIONS is enforced by construction
        // of the default config; a custom config below the floor still
        // degrades rather than erroring.
        let (var_1d_95, cvar_95) = match var::compute(&series, 1, 0.95) {
            Ok(r) => (r.var, r.cvar),
            Err(_) => return self.default_metrics(&portfolio.id),
        };
        let var_1d_99 = var::compute(&series, 1, 0.99).map_or(var_1d_95, |r| r.var);
        let var_10d_95 = var::compute(&series, 10, 0.95).map_or(var_1d_95, |r| r.var);

        let volatility = statistics::annualized_volatility(&series);
        let beta = returns
            .benchmark
            .as_deref()
            .and_then(|bench| statistics::beta(&series, bench))
            .unwrap_or(1.0);
        let sharpe_ratio = statistics::sharpe_ratio(&series, self.config.risk_free_rate);
        let max_drawdown = statistics::max_drawdown(&series);

        let concentration = concentration_risk(portfolio);
        let liquidity = liquidity_score(portfolio, &self.config.liquidity).unwrap_or(0.5);

        RiskMetrics {
            portfolio_id: portfolio.id.clone(),
            calculated_at: Utc::now(),
            var_1d_95,
            var_1d_99,
            var_10d_95,
            cvar_95,
            volatility,
            beta,
            sharpe_ratio,
            max_drawdown,
            concentration_risk: concentration,
            liquidity_score: liquidity,
            risk_level: risk_level(
                &self.config.score_bands,
                var_1d_95,
                volatility,
                concentration,
            ),
            data_quality: DataQuality::Measured,
        }
    }

    /// Conservative default snapshot for a portfolio the engine cannot
    /// measure.
    ///
    /// The figures deliberately overstate a typical diversified
    /// portfolio's risk so a missing data feed reads as elevated, not
    /// calm.
    #[must_use]
    pub fn default_metrics(&self, portfolio_id: &str) -> RiskMetrics {
        RiskMetrics {
            portfolio_id: portfolio_id.to_string(),
            calculated_at: Utc::now(),
            var_1d_95: 0.02,
            var_1d_99: 0.03,
            var_10d_95: 0.02 * 10.0_f64.sqrt(),
            cvar_95: 0.025,
            volatility: 0.15,
            beta: 1.0,
            sharpe_ratio: 0.0,
            max_drawdown: 0.10,
            concentration_risk: 0.5,
            liquidity_score: 0.5,
            risk_level: RiskLevel::Medium,
            data_quality: DataQuality::Degraded,
        }
    }
}
