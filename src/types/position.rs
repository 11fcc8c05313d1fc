//! Position representation with derived market value.

use super::AssetClass;
use crate::{RiskError, RiskResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single position in a portfolio.
///
/// Market value is always derived from quantity and price, never stored,
/// so it cannot drift out of sync with either. Quantity must be
/// non-negative and price must be non-negative; the builder and
/// [`Position::validate`] enforce both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Instrument symbol (unique within a portfolio).
    pub symbol: String,

    /// Number of units held. Never negative.
    pub quantity: Decimal,

    /// Current price per unit, in the portfolio's base currency.
    pub price: Decimal,

    /// Asset class of the instrument.
    pub asset_class: AssetClass,

    /// Annualized volatility of the instrument, if known (reporting only).
    pub annualized_volatility: Option<f64>,

    /// Beta versus the portfolio benchmark, if known (reporting only).
    pub beta: Option<f64>,
}

impl Position {
    /// Creates a new position builder.
    #[must_use]
    pub fn builder(symbol: impl Into<String>) -> PositionBuilder {
        PositionBuilder::new().symbol(symbol)
    }

    /// Market value of the position (quantity × price).
    #[must_use]
    pub fn market_value(&self) -> Decimal {
        self.quantity * self.price
    }

    /// Validates the position invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidPosition`] for a negative quantity or a
    /// negative price.
    pub fn validate(&self) -> RiskResult<()> {
        if self.quantity < Decimal::ZERO {
            return Err(RiskError::invalid_position(
                &self.symbol,
                format!("negative quantity {}", self.quantity),
            ));
        }
        if self.price < Decimal::ZERO {
            return Err(RiskError::invalid_position(
                &self.symbol,
                format!("negative price {}", self.price),
            ));
        }
        Ok(())
    }
}

/// Builder for constructing a [`Position`].
///
/// # Example
///
/// ```rust
/// use tailrisk::types::{AssetClass, Position};
/// use rust_decimal_macros::dec;
///
/// let position = Position::builder("AAPL")
///     .quantity(dec!(100))
///     .price(dec!(185.50))
///     .asset_class(AssetClass::EquityLargeCap)
///     .build()
///     .unwrap();
///
/// assert_eq!(position.market_value(), dec!(18550.00));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PositionBuilder {
    symbol: Option<String>,
    quantity: Decimal,
    price: Decimal,
    asset_class: Option<AssetClass>,
    annualized_volatility: Option<f64>,
    beta: Option<f64>,
}

impl PositionBuilder {
    /// Creates a new position builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the symbol.
    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the current price.
    #[must_use]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Sets the asset class.
    #[must_use]
    pub fn asset_class(mut self, asset_class: AssetClass) -> Self {
        self.asset_class = Some(asset_class);
        self
    }

    /// Sets the annualized volatility.
    #[must_use]
    pub fn annualized_volatility(mut self, volatility: f64) -> Self {
        self.annualized_volatility = Some(volatility);
        self
    }

    /// Sets the beta.
    #[must_use]
    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Builds the position.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol or asset class is missing, or if the
    /// quantity or price is negative.
    pub fn build(self) -> RiskResult<Position> {
        let symbol = self
            .symbol
            .ok_or_else(|| RiskError::missing_field("symbol"))?;
        let asset_class = self
            .asset_class
            .ok_or_else(|| RiskError::missing_field("asset_class"))?;

        let position = Position {
            symbol,
            quantity: self.quantity,
            price: self.price,
            asset_class,
            annualized_volatility: self.annualized_volatility,
            beta: self.beta,
        };
        position.validate()?;
        Ok(position)
    }
}
