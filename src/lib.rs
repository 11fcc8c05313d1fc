//! # Tailrisk
//!
//! Portfolio risk and stress-testing core: VaR/CVaR, risk metrics,
//! scenario stress tests, threshold alerts, and dashboard rollups.
//!
//! ## Design Philosophy
//!
//! - **Pure core**: calculations are deterministic with explicit inputs;
//!   no RNG, no clocks in the math (only `calculated_at` stamps)
//! - **Injected boundaries**: market data, persistence, and notification
//!   live behind traits; the core never does I/O on its own
//! - **Exact money, float statistics**: `Decimal` for quantities, prices,
//!   and losses; `f64` for returns and distributional figures
//! - **Degrade, don't guess**: missing return history yields documented
//!   conservative defaults flagged `Degraded`, never synthetic data
//! - **Config-driven parallelism**: optional rayon support with
//!   threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use tailrisk::prelude::*;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let portfolio = Portfolio::builder("Balanced")
//!     .add_position(
//!         Position::builder("SPY")
//!             .quantity(dec!(100))
//!             .price(dec!(400))
//!             .asset_class(AssetClass::EquityLargeCap)
//!             .build()?,
//!     )
//!     .build()?;
//!
//! let engine = RiskEngine::new(
//!     Arc::new(StaticReturns::new()),
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(InMemoryNotifier::new()),
//! );
//!
//! // No return history: a degraded snapshot, not an error.
//! let assessment = engine.assess(&portfolio, &[])?;
//! assert!(assessment.metrics.is_degraded());
//!
//! let outcome = engine.stress(
//!     &portfolio,
//!     &["credit-crisis-2008".to_string()],
//!     &CancelToken::new(),
//! );
//! assert_eq!(outcome.results.len(), 1);
//! # Ok::<(), tailrisk::RiskError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`types`] - Core types (Position, AssetClass, RiskConfig)
//! - [`portfolio`] - Portfolio and builder
//! - [`providers`] - Boundary traits plus in-memory implementations
//! - [`var`] - Historical and parametric VaR/CVaR
//! - [`metrics`] - Statistics, concentration, liquidity, and the metrics
//!   engine
//! - [`stress`] - Scenario library and stress executor
//! - [`alerts`] - Thresholds and alert reconciliation
//! - [`dashboard`] - Windowed rollups
//! - [`engine`] - Dependency-injected composition root
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel stress-suite execution

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod alerts;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod parallel;
pub mod portfolio;
pub mod providers;
pub mod stress;
pub mod types;
pub mod var;

// Re-export error types at crate root
pub use error::{RiskError, RiskResult};

// Re-export main types
pub use types::{AssetClass, Band, LiquidityTable, Position, PositionBuilder, RiskConfig, ScoreBands};

// Re-export portfolio types
pub use portfolio::{Portfolio, PortfolioBuilder};

// Re-export metrics types
pub use metrics::{DataQuality, ReturnsSet, RiskLevel, RiskMetrics, RiskMetricsEngine};

// Re-export VaR functions
pub use var::{VaRMethod, VaRResult};

// Re-export stress types
pub use stress::{
    CancelToken, PositionImpact, ScenarioLibrary, Severity, ShockMap, StressScenario,
    StressSuiteOutcome, StressTestExecutor, StressTestResult,
};

// Re-export alert types
pub use alerts::{AlertEvaluation, AlertStatus, AlertType, RiskAlert, ThresholdConfig};

// Re-export dashboard types
pub use dashboard::{ReportingWindow, RiskDashboard, StressSummary};

// Re-export engine types
pub use engine::{Assessment, RiskEngine};

/// Commonly used types and functions.
///
/// ```rust
/// use tailrisk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::alerts::{AlertStatus, AlertType, RiskAlert, ThresholdConfig};
    pub use crate::dashboard::{aggregate, ReportingWindow, RiskDashboard, StressSummary};
    pub use crate::engine::{Assessment, RiskEngine};
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::metrics::{
        DataQuality, ReturnsSet, RiskLevel, RiskMetrics, RiskMetricsEngine,
    };
    pub use crate::portfolio::{Portfolio, PortfolioBuilder};
    pub use crate::providers::{
        AlertNotifier, InMemoryNotifier, InMemoryStore, ReturnSeriesProvider,
        RiskCalculationStore, StaticReturns,
    };
    pub use crate::stress::{
        CancelToken, ScenarioLibrary, Severity, ShockMap, StressScenario, StressSuiteOutcome,
        StressTestExecutor, StressTestResult,
    };
    pub use crate::types::{AssetClass, LiquidityTable, Position, PositionBuilder, RiskConfig};
    pub use crate::var::{VaRMethod, VaRResult};
}
