//! Portfolio liquidity scoring.

use crate::types::LiquidityTable;
use crate::Portfolio;

/// Market-value-weighted liquidity score of a portfolio, in `[0, 1]`.
///
/// Each position contributes its asset class's score from the table,
/// weighted by market value. Returns `None` for a portfolio with no
/// positive value; the caller substitutes the degraded default.
#[must_use]
pub fn liquidity_score(portfolio: &Portfolio, table: &LiquidityTable) -> Option<f64> {
    if portfolio.is_empty() {
        return None;
    }

    let weights = portfolio.weights();
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }

    let score = portfolio
        .positions
        .iter()
        .zip(weights.iter())
        .map(|(position, (_, w))| w * table.score(position.asset_class))
        .sum::<f64>();
    Some(score.clamp(0.0, 1.0))
}
