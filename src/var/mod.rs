//! Value-at-Risk and Expected Shortfall estimation.
//!
//! Combines historical (empirical-quantile) and parametric (normal)
//! estimates, reporting the more conservative of the two.
//!
//! ## Sign convention
//!
//! Losses enter as negative returns; VaR and CVaR are always reported as
//! non-negative loss-magnitude fractions. This convention is enforced at
//! the [`VaRResult`] boundary and holds everywhere in the crate.

mod historical;
mod parametric;

pub use historical::{empirical_quantile, historical_cvar, historical_var};
pub use parametric::{parametric_var, z_score_for_confidence, Z_SCORE_90, Z_SCORE_95, Z_SCORE_99};

use crate::metrics::statistics::{mean, sample_std_dev};
use crate::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};

/// Minimum observations required for a distributional estimate.
pub const MIN_OBSERVATIONS: usize = 20;

/// Estimation method that produced a VaR figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaRMethod {
    /// Empirical quantile of the observed distribution.
    Historical,
    /// Normal approximation from sample mean and standard deviation.
    Parametric,
}

/// A VaR/CVaR estimate for one horizon and confidence level.
///
/// All figures are non-negative loss-magnitude fractions of portfolio
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// Value-at-Risk (loss fraction).
    pub var: f64,
    /// Expected Shortfall / CVaR (loss fraction).
    pub cvar: f64,
    /// Confidence level (e.g. 0.95).
    pub confidence: f64,
    /// Horizon in days.
    pub horizon_days: u32,
    /// Method that supplied the reported (more conservative) VaR.
    pub method: VaRMethod,
}

/// Computes VaR and CVaR from a daily return series.
///
/// The reported VaR is the larger (more conservative) of the historical
/// and parametric estimates. Horizons beyond one day are scaled by the
/// square-root-of-time rule - an approximation, not a multi-day
/// simulation. CVaR is the historical expected shortfall, floored at the
/// reported VaR so the tail mean never understates the quantile it
/// conditions on.
///
/// # Errors
///
/// * [`RiskError::InsufficientData`] with fewer than
///   [`MIN_OBSERVATIONS`] observations.
/// * [`RiskError::InvalidInput`] for a confidence outside `(0, 1)` or a
///   zero horizon.
pub fn compute(returns: &[f64], horizon_days: u32, confidence: f64) -> RiskResult<VaRResult> {
    if !(0.0..1.0).contains(&confidence) || confidence == 0.0 {
        return Err(RiskError::invalid_input(format!(
            "confidence must be in (0, 1), got {confidence}"
        )));
    }
    if horizon_days == 0 {
        return Err(RiskError::invalid_input("horizon must be at least 1 day"));
    }
    if returns.len() < MIN_OBSERVATIONS {
        return Err(RiskError::insufficient_data(MIN_OBSERVATIONS, returns.len()));
    }

    let hist = historical_var(returns, confidence);
    let param = parametric_var(mean(returns), sample_std_dev(returns), confidence);

    let (var_1d, method) = if param > hist {
        (param, VaRMethod::Parametric)
    } else {
        (hist, VaRMethod::Historical)
    };

    let scale = f64::from(horizon_days).sqrt();
    let var = var_1d * scale;
    let cvar = historical_cvar(returns, confidence).max(var_1d) * scale;

    Ok(VaRResult {
        var,
        cvar,
        confidence,
        horizon_days,
        method,
    })
}
