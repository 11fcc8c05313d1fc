//! Stress testing: scenario definitions, the standard scenario library,
//! and the executor that reprices portfolios under shock.

mod executor;
mod library;
mod scenario;

pub use executor::{
    CancelToken, PositionImpact, StressSuiteOutcome, StressTestExecutor, StressTestResult,
};
pub use library::ScenarioLibrary;
pub use scenario::{Severity, ShockMap, StressScenario, StressScenarioBuilder};
