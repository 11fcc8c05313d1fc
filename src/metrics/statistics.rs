//! Return-series statistics: moments, beta, Sharpe, drawdown, aggregation.

use crate::types::TRADING_DAYS_PER_YEAR;
use crate::Portfolio;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;

/// Arithmetic mean. Zero for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator). Zero for fewer than two
/// observations.
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Sample covariance over the trailing overlap of two series (n-1
/// denominator). Zero when the overlap has fewer than two points.
#[must_use]
pub fn covariance(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return 0.0;
    }
    let a = &a[a.len() - n..];
    let b = &b[b.len() - n..];

    let mean_a = mean(a);
    let mean_b = mean(b);
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();
    sum / (n - 1) as f64
}

/// Annualized volatility: daily standard deviation scaled by sqrt(252).
#[must_use]
pub fn annualized_volatility(daily_returns: &[f64]) -> f64 {
    sample_std_dev(daily_returns) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Beta of a series versus a benchmark over their trailing overlap.
///
/// Returns `None` when the benchmark variance is zero or the overlap is
/// too short; the caller substitutes the documented default of 1.0.
#[must_use]
pub fn beta(returns: &[f64], benchmark: &[f64]) -> Option<f64> {
    let n = returns.len().min(benchmark.len());
    if n < 2 {
        return None;
    }
    let bench_tail = &benchmark[benchmark.len() - n..];
    let bench_var = {
        let sd = sample_std_dev(bench_tail);
        sd * sd
    };
    if bench_var <= f64::EPSILON {
        return None;
    }
    Some(covariance(returns, benchmark) / bench_var)
}

/// Annualized Sharpe ratio.
///
/// `(mean daily return * 252 - risk_free_rate) / annualized volatility`,
/// zero when volatility is zero.
#[must_use]
pub fn sharpe_ratio(daily_returns: &[f64], risk_free_rate: f64) -> f64 {
    let vol = annualized_volatility(daily_returns);
    if vol <= f64::EPSILON {
        return 0.0;
    }
    (mean(daily_returns) * TRADING_DAYS_PER_YEAR - risk_free_rate) / vol
}

/// Maximum drawdown of the cumulative wealth index, as a positive
/// fraction.
///
/// The wealth index starts at 1.0 and compounds `(1 + r)` per day; the
/// drawdown at each point is `(peak - wealth) / peak`.
#[must_use]
pub fn max_drawdown(daily_returns: &[f64]) -> f64 {
    let mut wealth = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut max_dd = 0.0_f64;

    for &r in daily_returns {
        wealth *= 1.0 + r;
        if wealth > peak {
            peak = wealth;
        }
        if peak > 0.0 {
            let dd = (peak - wealth) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd.min(1.0)
}

/// Market-value-weighted portfolio return series.
///
/// Aggregates per-position daily returns over the trailing overlapping
/// window (the shortest series defines the window). Returns `None` when
/// any position lacks a series, the overlap is empty, or the portfolio
/// has no value - the caller treats that as the degraded-data case. The
/// core never synthesizes return history.
#[must_use]
pub fn weighted_portfolio_returns(
    portfolio: &Portfolio,
    series: &HashMap<String, Vec<f64>>,
) -> Option<Vec<f64>> {
    let total = portfolio.total_value().to_f64().unwrap_or(0.0);
    if portfolio.is_empty() || total <= 0.0 {
        return None;
    }

    let mut window = usize::MAX;
    for position in &portfolio.positions {
        let s = series.get(&position.symbol)?;
        window = window.min(s.len());
    }
    if window == 0 || window == usize::MAX {
        return None;
    }

    let mut aggregated = vec![0.0_f64; window];
    for position in &portfolio.positions {
        let weight = position.market_value().to_f64().unwrap_or(0.0) / total;
        let s = &series[&position.symbol];
        let tail = &s[s.len() - window..];
        for (agg, r) in aggregated.iter_mut().zip(tail.iter()) {
            *agg += weight * r;
        }
    }
    Some(aggregated)
}
