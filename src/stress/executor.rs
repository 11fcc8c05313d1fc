//! Scenario execution: shock repricing, suite runs, and cancellation.

use super::{ScenarioLibrary, StressScenario};
use crate::parallel::{maybe_parallel_fold, maybe_parallel_map};
use crate::types::RiskConfig;
use crate::{Portfolio, RiskError, RiskResult};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Floor for a stressed price when the original price was positive. A
/// shock models a drawdown, not delisting to zero.
const MIN_STRESSED_PRICE: Decimal = dec!(0.0001);

/// Recovery-day ceiling (about three years).
const MAX_RECOVERY_DAYS: u32 = 1095;

/// Ratio of Expected Shortfall to VaR for a normal tail at 95%.
const NORMAL_ES_TO_VAR_95: f64 = 1.254;

/// Cooperative cancellation handle for suite runs.
///
/// Cancellation is checked between scenarios, never mid-scenario, so a
/// cancelled run still yields complete results for finished scenarios.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Per-position outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionImpact {
    /// Position symbol.
    pub symbol: String,
    /// Shock applied (fractional return).
    pub shock: f64,
    /// Market value before the shock.
    pub pre_stress_value: Decimal,
    /// Market value after the shock.
    pub post_stress_value: Decimal,
    /// Value lost (positive for a loss, negative for a gain).
    pub loss: Decimal,
    /// Position volatility scaled by the scenario multiplier, when the
    /// position carries one. Reporting only; it does not feed the
    /// repricing.
    pub stressed_volatility: Option<f64>,
}

/// Outcome of running one scenario against one portfolio.
///
/// Monetary figures are exact decimals; the VaR/CVaR impacts are
/// fractional estimates of the post-stress risk profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressTestResult {
    /// Scenario that was run.
    pub scenario_id: String,
    /// Portfolio it was run against.
    pub portfolio_id: String,
    /// Total value before the shock.
    pub pre_stress_value: Decimal,
    /// Total value after the shock.
    pub post_stress_value: Decimal,
    /// Total value lost (positive for a loss).
    pub absolute_loss: Decimal,
    /// Loss as a fraction of pre-stress value (0 when that value is 0).
    pub percentage_loss: f64,
    /// Per-position breakdown, in portfolio order.
    pub position_impacts: Vec<PositionImpact>,
    /// Estimated stressed 1-day 95% VaR (loss fraction).
    pub var_impact: f64,
    /// Estimated stressed 1-day 95% Expected Shortfall (loss fraction).
    pub cvar_impact: f64,
    /// Estimated calendar days to recover the loss.
    pub estimated_recovery_days: u32,
    /// When the scenario was run.
    pub calculated_at: DateTime<Utc>,
}

/// Outcome of a suite run over several scenarios.
///
/// Successes and failures partition the attempted scenario ids; ids not
/// attempted because of cancellation appear in neither, with `cancelled`
/// set.
#[derive(Debug, Clone, Default)]
pub struct StressSuiteOutcome {
    /// Successful results, keyed by scenario id.
    pub results: BTreeMap<String, StressTestResult>,
    /// Failed scenarios and why, keyed by scenario id.
    pub failures: BTreeMap<String, RiskError>,
    /// True when the run was cut short by cancellation.
    pub cancelled: bool,
}

impl StressSuiteOutcome {
    /// Converts the outcome into a strict result.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::PartialSuiteFailure`] listing the failed
    /// scenario ids when any scenario failed.
    pub fn into_result(self) -> RiskResult<BTreeMap<String, StressTestResult>> {
        if self.failures.is_empty() {
            Ok(self.results)
        } else {
            Err(RiskError::PartialSuiteFailure {
                failed: self.failures.keys().cloned().collect(),
            })
        }
    }
}

/// Runs stress scenarios against portfolios.
#[derive(Debug, Clone)]
pub struct StressTestExecutor {
    config: RiskConfig,
    library: ScenarioLibrary,
}

impl Default for StressTestExecutor {
    fn default() -> Self {
        Self::new(RiskConfig::default(), ScenarioLibrary::standard())
    }
}

impl StressTestExecutor {
    /// Creates an executor over a scenario library.
    #[must_use]
    pub fn new(config: RiskConfig, library: ScenarioLibrary) -> Self {
        Self { config, library }
    }

    /// The executor's scenario library.
    #[must_use]
    pub fn library(&self) -> &ScenarioLibrary {
        &self.library
    }

    /// Runs one scenario (library or custom) against a portfolio.
    ///
    /// Every position is repriced at `price × (1 + shock)` with the shock
    /// taken from the scenario's map by asset class. A positive price
    /// never shocks to zero or below; it floors at a minimal positive
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidPortfolio`] or
    /// [`RiskError::InvalidPosition`] if the portfolio fails validation.
    pub fn run(
        &self,
        portfolio: &Portfolio,
        scenario: &StressScenario,
    ) -> RiskResult<StressTestResult> {
        portfolio.validate()?;

        let impacts = maybe_parallel_map(&portfolio.positions, &self.config, |position| {
            let shock = scenario.shocks.shock_for(position.asset_class);
            let multiplier = Decimal::from_f64(1.0 + shock).unwrap_or(Decimal::ONE);

            let mut stressed_price = position.price * multiplier;
            if position.price > Decimal::ZERO && stressed_price < MIN_STRESSED_PRICE {
                stressed_price = MIN_STRESSED_PRICE;
            }

            let pre = position.market_value();
            let post = position.quantity * stressed_price;

            PositionImpact {
                symbol: position.symbol.clone(),
                shock,
                pre_stress_value: pre,
                post_stress_value: post,
                loss: pre - post,
                stressed_volatility: position
                    .annualized_volatility
                    .map(|v| v * scenario.volatility_multiplier),
            }
        });

        let (pre_total, post_total) = maybe_parallel_fold(
            &impacts,
            &self.config,
            (Decimal::ZERO, Decimal::ZERO),
            |(pre, post), impact| (pre + impact.pre_stress_value, post + impact.post_stress_value),
            |(pre_a, post_a), (pre_b, post_b)| (pre_a + pre_b, post_a + post_b),
        );

        let absolute_loss = pre_total - post_total;
        let percentage_loss = if pre_total > Decimal::ZERO {
            (absolute_loss / pre_total).to_f64().unwrap_or(0.0)
        } else {
            0.0
        };

        // Stressed-risk estimate: the realized loss fraction amplified by
        // the scenario's volatility and correlation effects, with the
        // normal-tail ES/VaR ratio lifting CVaR above VaR.
        let var_impact = percentage_loss.abs()
            * scenario.volatility_multiplier
            * scenario.correlation_increase;
        let cvar_impact = var_impact * NORMAL_ES_TO_VAR_95;

        let recovery_multiplier = (percentage_loss / 0.20).max(1.0);
        let estimated_recovery_days = (f64::from(scenario.severity.base_recovery_days())
            * recovery_multiplier)
            .round()
            .min(f64::from(MAX_RECOVERY_DAYS)) as u32;

        debug!(
            scenario_id = %scenario.id,
            portfolio_id = %portfolio.id,
            percentage_loss,
            "scenario run complete"
        );

        Ok(StressTestResult {
            scenario_id: scenario.id.clone(),
            portfolio_id: portfolio.id.clone(),
            pre_stress_value: pre_total,
            post_stress_value: post_total,
            absolute_loss,
            percentage_loss,
            position_impacts: impacts,
            var_impact,
            cvar_impact,
            estimated_recovery_days,
            calculated_at: Utc::now(),
        })
    }

    /// Runs a library scenario by id.
    ///
    /// # Errors
    ///
    /// [`RiskError::ScenarioNotFound`] for an unknown id, plus the errors
    /// of [`StressTestExecutor::run`].
    pub fn run_scenario(&self, portfolio: &Portfolio, id: &str) -> RiskResult<StressTestResult> {
        let scenario = self.library.get(id)?;
        self.run(portfolio, scenario)
    }

    /// Runs a suite of library scenarios, continuing past failures.
    ///
    /// Cancellation is honored between scenarios; scenarios already
    /// finished keep their results. With the `parallel` feature enabled
    /// and enough scenarios, runs use rayon (scenarios are independent).
    #[must_use]
    pub fn run_suite(
        &self,
        portfolio: &Portfolio,
        scenario_ids: &[String],
        cancel: &CancelToken,
    ) -> StressSuiteOutcome {
        enum Attempt {
            Done(StressTestResult),
            Failed(String, RiskError),
            Skipped,
        }

        let attempts = maybe_parallel_map(scenario_ids, &self.config, |id| {
            if cancel.is_cancelled() {
                return Attempt::Skipped;
            }
            match self.run_scenario(portfolio, id) {
                Ok(result) => Attempt::Done(result),
                Err(err) => Attempt::Failed(id.clone(), err),
            }
        });

        let mut outcome = StressSuiteOutcome::default();
        for attempt in attempts {
            match attempt {
                Attempt::Done(result) => {
                    outcome.results.insert(result.scenario_id.clone(), result);
                }
                Attempt::Failed(id, err) => {
                    warn!(scenario_id = %id, error = %err, "scenario failed");
                    outcome.failures.insert(id, err);
                }
                Attempt::Skipped => outcome.cancelled = true,
            }
        }
        outcome
    }
}
