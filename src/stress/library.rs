//! Read-only catalog of standard stress scenarios.

use super::{Severity, ShockMap, StressScenario};
use crate::types::AssetClass;
use crate::{RiskError, RiskResult};
use std::collections::BTreeMap;

/// Catalog of stress scenarios, keyed by id.
///
/// Built once and read-only thereafter; custom scenarios are passed to
/// the executor directly rather than inserted here.
#[derive(Debug, Clone)]
pub struct ScenarioLibrary {
    scenarios: BTreeMap<String, StressScenario>,
}

impl ScenarioLibrary {
    /// The standard catalog of historical and hypothetical scenarios.
    ///
    /// Shock magnitudes are stylized calibrations of each episode, fixed
    /// here so results are reproducible across runs and versions.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_scenarios(vec![
            StressScenario {
                id: "black-monday-1987".into(),
                name: "Black Monday 1987".into(),
                description: "One-session global equity crash with a flight to government paper"
                    .into(),
                severity: Severity::Severe,
                shocks: ShockMap::uniform(-0.08)
                    .with(AssetClass::Cash, 0.0)
                    .with(AssetClass::GovernmentBond, 0.02)
                    .with(AssetClass::CorporateBond, -0.04)
                    .with(AssetClass::EquityLargeCap, -0.22)
                    .with(AssetClass::EquitySmallCap, -0.26)
                    .with(AssetClass::Commodity, -0.05),
                volatility_multiplier: 3.0,
                correlation_increase: 1.8,
                liquidity_impact: 0.40,
                duration_days: 5,
            },
            StressScenario {
                id: "dotcom-bust".into(),
                name: "Dot-Com Bust".into(),
                description: "Protracted unwind of growth-equity valuations, 2000-2002".into(),
                severity: Severity::Severe,
                shocks: ShockMap::uniform(-0.10)
                    .with(AssetClass::Cash, 0.0)
                    .with(AssetClass::GovernmentBond, 0.05)
                    .with(AssetClass::CorporateBond, -0.05)
                    .with(AssetClass::EquityLargeCap, -0.35)
                    .with(AssetClass::EquitySmallCap, -0.45)
                    .with(AssetClass::RealEstate, -0.05)
                    .with(AssetClass::PrivateEquity, -0.40),
                volatility_multiplier: 1.8,
                correlation_increase: 1.3,
                liquidity_impact: 0.20,
                duration_days: 365,
            },
            StressScenario {
                id: "credit-crisis-2008".into(),
                name: "Credit Crisis 2008".into(),
                description: "Systemic credit freeze with forced deleveraging across assets"
                    .into(),
                severity: Severity::Extreme,
                shocks: ShockMap::uniform(-0.25)
                    .with(AssetClass::Cash, 0.0)
                    .with(AssetClass::GovernmentBond, 0.08)
                    .with(AssetClass::CorporateBond, -0.20)
                    .with(AssetClass::EquityLargeCap, -0.40)
                    .with(AssetClass::EquitySmallCap, -0.45)
                    .with(AssetClass::RealEstate, -0.35)
                    .with(AssetClass::Commodity, -0.30)
                    .with(AssetClass::PrivateEquity, -0.40)
                    .with(AssetClass::Crypto, -0.50),
                volatility_multiplier: 2.5,
                correlation_increase: 1.7,
                liquidity_impact: 0.60,
                duration_days: 365,
            },
            StressScenario {
                id: "pandemic-shock".into(),
                name: "Pandemic Shock".into(),
                description: "Sudden demand stop and volatility spike, March-2020 style".into(),
                severity: Severity::Severe,
                shocks: ShockMap::uniform(-0.20)
                    .with(AssetClass::Cash, 0.0)
                    .with(AssetClass::GovernmentBond, 0.04)
                    .with(AssetClass::CorporateBond, -0.12)
                    .with(AssetClass::EquityLargeCap, -0.30)
                    .with(AssetClass::EquitySmallCap, -0.35)
                    .with(AssetClass::RealEstate, -0.20)
                    .with(AssetClass::Commodity, -0.40)
                    .with(AssetClass::Crypto, -0.45),
                volatility_multiplier: 2.8,
                correlation_increase: 1.6,
                liquidity_impact: 0.50,
                duration_days: 30,
            },
            StressScenario {
                id: "rate-shock".into(),
                name: "Rate Shock +300bp".into(),
                description: "Parallel 300bp rise in the yield curve over two quarters".into(),
                severity: Severity::Moderate,
                shocks: ShockMap::uniform(-0.10)
                    .with(AssetClass::Cash, 0.0)
                    .with(AssetClass::GovernmentBond, -0.12)
                    .with(AssetClass::CorporateBond, -0.15)
                    .with(AssetClass::EquityLargeCap, -0.12)
                    .with(AssetClass::EquitySmallCap, -0.15)
                    .with(AssetClass::RealEstate, -0.18)
                    .with(AssetClass::Commodity, -0.05)
                    .with(AssetClass::Crypto, -0.20),
                volatility_multiplier: 1.5,
                correlation_increase: 1.2,
                liquidity_impact: 0.20,
                duration_days: 180,
            },
            StressScenario {
                id: "geopolitical-shock".into(),
                name: "Geopolitical Shock".into(),
                description: "Regional conflict: equities sell off while commodities rally"
                    .into(),
                severity: Severity::Moderate,
                shocks: ShockMap::uniform(-0.08)
                    .with(AssetClass::Cash, 0.0)
                    .with(AssetClass::GovernmentBond, 0.03)
                    .with(AssetClass::EquityLargeCap, -0.12)
                    .with(AssetClass::EquitySmallCap, -0.15)
                    .with(AssetClass::Commodity, 0.20)
                    .with(AssetClass::Crypto, -0.15),
                volatility_multiplier: 1.8,
                correlation_increase: 1.4,
                liquidity_impact: 0.25,
                duration_days: 90,
            },
        ])
    }

    /// Builds a library from an explicit scenario list. Later duplicates
    /// of an id replace earlier ones.
    #[must_use]
    pub fn from_scenarios(scenarios: Vec<StressScenario>) -> Self {
        Self {
            scenarios: scenarios
                .into_iter()
                .map(|s| (s.id.clone(), s))
                .collect(),
        }
    }

    /// Looks up a scenario by id.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::ScenarioNotFound`] for an unknown id.
    pub fn get(&self, id: &str) -> RiskResult<&StressScenario> {
        self.scenarios
            .get(id)
            .ok_or_else(|| RiskError::scenario_not_found(id))
    }

    /// Scenario ids in deterministic (sorted) order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    /// All scenarios in id order.
    pub fn scenarios(&self) -> impl Iterator<Item = &StressScenario> {
        self.scenarios.values()
    }

    /// Number of scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns true if the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
