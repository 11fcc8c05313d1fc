//! Stress scenario definition: severity, shock maps, and the scenario
//! builder.

use crate::types::AssetClass;
use crate::{RiskError, RiskResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scenario severity, driving the recovery-time estimate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Routine drawdown.
    Mild,
    /// Meaningful correction.
    Moderate,
    /// Crisis-grade shock.
    Severe,
    /// Generational event.
    Extreme,
}

impl Severity {
    /// Baseline recovery estimate in calendar days, before scaling by the
    /// realized loss.
    #[must_use]
    pub fn base_recovery_days(self) -> u32 {
        match self {
            Self::Mild => 30,
            Self::Moderate => 90,
            Self::Severe => 365,
            Self::Extreme => 730,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Extreme => "extreme",
        };
        write!(f, "{name}")
    }
}

/// Per-asset-class price shocks as fractional returns (-0.30 = -30%).
///
/// A class without an explicit shock falls back to `default_shock`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockMap {
    /// Shock applied when a class has no explicit entry.
    pub default_shock: f64,
    /// Cash and equivalents.
    pub cash: Option<f64>,
    /// Government bonds.
    pub government_bond: Option<f64>,
    /// Corporate bonds.
    pub corporate_bond: Option<f64>,
    /// Large-cap equities.
    pub equity_large_cap: Option<f64>,
    /// Small-cap equities.
    pub equity_small_cap: Option<f64>,
    /// Real estate.
    pub real_estate: Option<f64>,
    /// Commodities.
    pub commodity: Option<f64>,
    /// Private equity.
    pub private_equity: Option<f64>,
    /// Crypto assets.
    pub crypto: Option<f64>,
}

impl ShockMap {
    /// Creates a map where every class falls back to `default_shock`.
    #[must_use]
    pub fn uniform(default_shock: f64) -> Self {
        Self {
            default_shock,
            cash: None,
            government_bond: None,
            corporate_bond: None,
            equity_large_cap: None,
            equity_small_cap: None,
            real_estate: None,
            commodity: None,
            private_equity: None,
            crypto: None,
        }
    }

    /// Sets the shock for one asset class.
    #[must_use]
    pub fn with(mut self, class: AssetClass, shock: f64) -> Self {
        let slot = match class {
            AssetClass::Cash => &mut self.cash,
            AssetClass::GovernmentBond => &mut self.government_bond,
            AssetClass::CorporateBond => &mut self.corporate_bond,
            AssetClass::EquityLargeCap => &mut self.equity_large_cap,
            AssetClass::EquitySmallCap => &mut self.equity_small_cap,
            AssetClass::RealEstate => &mut self.real_estate,
            AssetClass::Commodity => &mut self.commodity,
            AssetClass::PrivateEquity => &mut self.private_equity,
            AssetClass::Crypto => &mut self.crypto,
        };
        *slot = Some(shock);
        self
    }

    /// True when the default and every explicit shock are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        let explicit = [
            self.cash,
            self.government_bond,
            self.corporate_bond,
            self.equity_large_cap,
            self.equity_small_cap,
            self.real_estate,
            self.commodity,
            self.private_equity,
            self.crypto,
        ];
        self.default_shock.is_finite() && explicit.iter().flatten().all(|s| s.is_finite())
    }

    /// Shock for an asset class, falling back to the default.
    #[must_use]
    pub fn shock_for(&self, class: AssetClass) -> f64 {
        let explicit = match class {
            AssetClass::Cash => self.cash,
            AssetClass::GovernmentBond => self.government_bond,
            AssetClass::CorporateBond => self.corporate_bond,
            AssetClass::EquityLargeCap => self.equity_large_cap,
            AssetClass::EquitySmallCap => self.equity_small_cap,
            AssetClass::RealEstate => self.real_estate,
            AssetClass::Commodity => self.commodity,
            AssetClass::PrivateEquity => self.private_equity,
            AssetClass::Crypto => self.crypto,
        };
        explicit.unwrap_or(self.default_shock)
    }
}

/// A stress scenario: shocks plus second-order market effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenario {
    /// Stable identifier (kebab-case for library scenarios).
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the scenario models.
    pub description: String,
    /// Severity classification.
    pub severity: Severity,
    /// Per-asset-class price shocks.
    pub shocks: ShockMap,
    /// Multiplier applied to volatility under stress (>= 1).
    pub volatility_multiplier: f64,
    /// Correlation breakdown factor (>= 1; correlations rise in crises).
    pub correlation_increase: f64,
    /// Fractional loss of liquidity under stress, in `[0, 1]`.
    pub liquidity_impact: f64,
    /// Length of the modelled shock period, in days.
    pub duration_days: u32,
}

impl StressScenario {
    /// Creates a scenario builder.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> StressScenarioBuilder {
        StressScenarioBuilder::new(id)
    }
}

/// Builder for custom [`StressScenario`]s.
#[derive(Debug, Clone)]
pub struct StressScenarioBuilder {
    id: String,
    name: Option<String>,
    description: String,
    severity: Severity,
    shocks: ShockMap,
    volatility_multiplier: f64,
    correlation_increase: f64,
    liquidity_impact: f64,
    duration_days: u32,
}

impl StressScenarioBuilder {
    /// Creates a builder with neutral defaults (no shock, no second-order
    /// effects).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: String::new(),
            severity: Severity::Moderate,
            shocks: ShockMap::uniform(0.0),
            volatility_multiplier: 1.0,
            correlation_increase: 1.0,
            liquidity_impact: 0.0,
            duration_days: 30,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the shock map.
    #[must_use]
    pub fn shocks(mut self, shocks: ShockMap) -> Self {
        self.shocks = shocks;
        self
    }

    /// Sets the volatility multiplier.
    #[must_use]
    pub fn volatility_multiplier(mut self, multiplier: f64) -> Self {
        self.volatility_multiplier = multiplier;
        self
    }

    /// Sets the correlation factor.
    #[must_use]
    pub fn correlation_increase(mut self, factor: f64) -> Self {
        self.correlation_increase = factor;
        self
    }

    /// Sets the liquidity impact.
    #[must_use]
    pub fn liquidity_impact(mut self, impact: f64) -> Self {
        self.liquidity_impact = impact;
        self
    }

    /// Sets the shock duration.
    #[must_use]
    pub fn duration_days(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    /// Builds the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing name, a non-finite shock, a
    /// multiplier or correlation factor below 1, or a liquidity impact
    /// outside `[0, 1]`.
    pub fn build(self) -> RiskResult<StressScenario> {
        let name = self.name.ok_or_else(|| RiskError::missing_field("name"))?;
        if !self.shocks.is_finite() {
            return Err(RiskError::invalid_input("shocks must be finite"));
        }
        if self.volatility_multiplier < 1.0 {
            return Err(RiskError::invalid_input(
                "volatility multiplier must be at least 1",
            ));
        }
        if self.correlation_increase < 1.0 {
            return Err(RiskError::invalid_input(
                "correlation factor must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.liquidity_impact) {
            return Err(RiskError::invalid_input(
                "liquidity impact must be in [0, 1]",
            ));
        }

        Ok(StressScenario {
            id: self.id,
            name,
            description: self.description,
            severity: self.severity,
            shocks: self.shocks,
            volatility_multiplier: self.volatility_multiplier,
            correlation_increase: self.correlation_increase,
            liquidity_impact: self.liquidity_impact,
            duration_days: self.duration_days,
        })
    }
}
