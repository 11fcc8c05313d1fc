//! Portfolio builder for fluent construction.

use crate::types::Position;
use crate::{Portfolio, RiskError, RiskResult};

/// Builder for constructing a [`Portfolio`].
///
/// # Example
///
/// ```rust
/// use tailrisk::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let portfolio = PortfolioBuilder::new()
///     .id("PORT-001")
///     .name("Growth")
///     .benchmark_id("SPX")
///     .add_position(
///         Position::builder("QQQ")
///             .quantity(dec!(50))
///             .price(dec!(380))
///             .asset_class(AssetClass::EquityLargeCap)
///             .build()?,
///     )
///     .build()?;
/// # Ok::<(), tailrisk::RiskError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    id: Option<String>,
    name: Option<String>,
    base_currency: Option<String>,
    benchmark_id: Option<String>,
    positions: Vec<Position>,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the base currency (defaults to "USD").
    #[must_use]
    pub fn base_currency(mut self, currency: impl Into<String>) -> Self {
        self.base_currency = Some(currency.into());
        self
    }

    /// Sets the benchmark identifier.
    #[must_use]
    pub fn benchmark_id(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark_id = Some(benchmark.into());
        self
    }

    /// Adds a position to the portfolio.
    #[must_use]
    pub fn add_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Adds multiple positions to the portfolio.
    #[must_use]
    pub fn add_positions(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.positions.extend(positions);
        self
    }

    /// Sets all positions (replacing any existing).
    #[must_use]
    pub fn positions(mut self, positions: Vec<Position>) -> Self {
        self.positions = positions;
        self
    }

    /// Builds the portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is missing or validation fails.
    pub fn build(self) -> RiskResult<Portfolio> {
        let name = self
            .name
            .ok_or_else(|| RiskError::missing_field("name"))?;

        // Generate ID from name if not provided
        let id = self.id.unwrap_or_else(|| {
            name.chars()
                .filter(|c| c.is_alphanumeric())
                .take(20)
                .collect::<String>()
                .to_uppercase()
        });

        let portfolio = Portfolio {
            id,
            name,
            base_currency: self.base_currency.unwrap_or_else(|| "USD".to_string()),
            benchmark_id: self.benchmark_id,
            positions: self.positions,
        };

        portfolio.validate()?;
        Ok(portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetClass;
    use rust_decimal_macros::dec;

    fn test_position(symbol: &str) -> Position {
        Position::builder(symbol)
            .quantity(dec!(10))
            .price(dec!(100))
            .asset_class(AssetClass::EquityLargeCap)
            .build()
            .unwrap()
    }

    #[test]
    fn test_basic_build() {
        let portfolio = PortfolioBuilder::new()
            .id("TEST")
            .name("Test Portfolio")
            .build()
            .unwrap();

        assert_eq!(portfolio.id, "TEST");
        assert_eq!(portfolio.name, "Test Portfolio");
        assert_eq!(portfolio.base_currency, "USD");
        assert!(portfolio.positions.is_empty());
    }

    #[test]
    fn test_with_positions() {
        let portfolio = PortfolioBuilder::new()
            .name("Test")
            .add_position(test_position("AAA"))
            .add_positions(vec![test_position("BBB"), test_position("CCC")])
            .build()
            .unwrap();

        assert_eq!(portfolio.position_count(), 3);
    }

    #[test]
    fn test_missing_name() {
        let result = PortfolioBuilder::new().build();
        assert!(result.unwrap_err().to_string().contains("name"));
    }

    #[test]
    fn test_auto_generated_id() {
        let portfolio = PortfolioBuilder::new()
            .name("My Test Portfolio 123")
            .build()
            .unwrap();

        assert_eq!(portfolio.id, "MYTESTPORTFOLIO123");
    }

    #[test]
    fn test_invalid_position_rejected_at_build() {
        let mut bad = test_position("BAD");
        bad.quantity = dec!(-5);

        let result = PortfolioBuilder::new().name("Test").add_position(bad).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_benchmark() {
        let portfolio = PortfolioBuilder::new()
            .name("Test")
            .benchmark_id("SPX")
            .build()
            .unwrap();

        assert_eq!(portfolio.benchmark_id.as_deref(), Some("SPX"));
    }
}
