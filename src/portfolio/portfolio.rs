//! Portfolio struct and core methods.

use crate::types::{AssetClass, Position};
use crate::{RiskError, RiskResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A portfolio of positions.
///
/// Positions are owned by the portfolio (composition). Total value is
/// always derived from the positions, so it stays consistent by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Unique identifier for the portfolio.
    pub id: String,

    /// Portfolio name.
    pub name: String,

    /// Base currency code for reporting (e.g. "USD").
    pub base_currency: String,

    /// Optional benchmark identifier for beta calculation.
    pub benchmark_id: Option<String>,

    /// Positions held.
    pub positions: Vec<Position>,
}

impl Portfolio {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> super::PortfolioBuilder {
        super::PortfolioBuilder::new().name(name)
    }

    /// Returns the number of positions.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the portfolio has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Total market value of all positions (in base currency).
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.positions.iter().map(Position::market_value).sum()
    }

    /// Market-value weight of each position.
    ///
    /// Returns (symbol, weight) pairs. All weights are zero when the total
    /// value is zero; otherwise they sum to 1 within floating tolerance.
    #[must_use]
    pub fn weights(&self) -> Vec<(&str, f64)> {
        let total = self.total_value().to_f64().unwrap_or(0.0);
        if total <= 0.0 {
            return self
                .positions
                .iter()
                .map(|p| (p.symbol.as_str(), 0.0))
                .collect();
        }

        self.positions
            .iter()
            .map(|p| {
                let mv = p.market_value().to_f64().unwrap_or(0.0);
                (p.symbol.as_str(), mv / total)
            })
            .collect()
    }

    /// Market value held in each asset class.
    ///
    /// Classes with no positions are absent from the map.
    #[must_use]
    pub fn exposure_by_class(&self) -> BTreeMap<AssetClass, Decimal> {
        let mut exposures = BTreeMap::new();
        for position in &self.positions {
            *exposures.entry(position.asset_class).or_insert(Decimal::ZERO) +=
                position.market_value();
        }
        exposures
    }

    /// Looks up a position by symbol.
    #[must_use]
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.symbol == symbol)
    }

    /// Validates the portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error if any position carries a negative quantity or
    /// price, or if two positions share a symbol.
    pub fn validate(&self) -> RiskResult<()> {
        for position in &self.positions {
            position.validate()?;
        }

        let mut symbols: Vec<&str> = self.positions.iter().map(|p| p.symbol.as_str()).collect();
        symbols.sort_unstable();
        if let Some(w) = symbols.windows(2).find(|w| w[0] == w[1]) {
            return Err(RiskError::invalid_portfolio(format!(
                "duplicate position symbol '{}'",
                w[0]
            )));
        }

        Ok(())
    }

    /// Ensures the portfolio is usable as a divisor: at least one position
    /// and a strictly positive total value.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidPortfolio`] otherwise.
    pub fn require_positive_value(&self) -> RiskResult<()> {
        if self.is_empty() {
            return Err(RiskError::invalid_portfolio("no positions"));
        }
        if self.total_value() <= Decimal::ZERO {
            return Err(RiskError::invalid_portfolio("non-positive total value"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetClass;
    use rust_decimal_macros::dec;

    fn position(symbol: &str, qty: Decimal, price: Decimal, class: AssetClass) -> Position {
        Position::builder(symbol)
            .quantity(qty)
            .price(price)
            .asset_class(class)
            .build()
            .unwrap()
    }

    fn test_portfolio() -> Portfolio {
        Portfolio::builder("Balanced")
            .id("PORT-001")
            .add_position(position(
                "SPY",
                dec!(100),
                dec!(400),
                AssetClass::EquityLargeCap,
            ))
            .add_position(position(
                "TLT",
                dec!(200),
                dec!(100),
                AssetClass::GovernmentBond,
            ))
            .add_position(position("USD", dec!(20000), dec!(1), AssetClass::Cash))
            .build()
            .unwrap()
    }

    #[test]
    fn test_total_value() {
        let portfolio = test_portfolio();
        // 40,000 + 20,000 + 20,000
        assert_eq!(portfolio.total_value(), dec!(80000));
        assert_eq!(portfolio.position_count(), 3);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let portfolio = test_portfolio();
        let weights = portfolio.weights();

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);

        let spy = weights.iter().find(|(s, _)| *s == "SPY").unwrap().1;
        assert!((spy - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_weights_zero_total() {
        let portfolio = Portfolio::builder("Empty-Value")
            .add_position(position(
                "X",
                dec!(0),
                dec!(100),
                AssetClass::EquityLargeCap,
            ))
            .build()
            .unwrap();

        let weights = portfolio.weights();
        assert_eq!(weights, vec![("X", 0.0)]);
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let portfolio = Portfolio {
            id: "P".into(),
            name: "P".into(),
            base_currency: "USD".into(),
            benchmark_id: None,
            positions: vec![
                position("SPY", dec!(1), dec!(1), AssetClass::EquityLargeCap),
                position("SPY", dec!(2), dec!(1), AssetClass::EquityLargeCap),
            ],
        };

        assert!(portfolio.validate().is_err());
    }

    #[test]
    fn test_require_positive_value() {
        let portfolio = test_portfolio();
        assert!(portfolio.require_positive_value().is_ok());

        let empty = Portfolio::builder("Empty").build().unwrap();
        assert!(matches!(
            empty.require_positive_value(),
            Err(RiskError::InvalidPortfolio { .. })
        ));
    }

    #[test]
    fn test_exposure_by_class() {
        let portfolio = test_portfolio();
        let exposures = portfolio.exposure_by_class();

        assert_eq!(exposures.len(), 3);
        assert_eq!(exposures[&AssetClass::EquityLargeCap], dec!(40000));
        assert_eq!(exposures[&AssetClass::GovernmentBond], dec!(20000));
        assert_eq!(exposures[&AssetClass::Cash], dec!(20000));
        assert!(!exposures.contains_key(&AssetClass::Crypto));
    }

    #[test]
    fn test_position_lookup() {
        let portfolio = test_portfolio();
        assert!(portfolio.position("TLT").is_some());
        assert!(portfolio.position("MISSING").is_none());
    }
}
