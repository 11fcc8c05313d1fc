//! Error types for risk and stress-test computation.
//!
//! Numeric edge cases (division by zero, empty tail samples) are guarded
//! and recovered locally with documented fallbacks; the variants here cover
//! structural and input-contract violations that must reach the caller.

use thiserror::Error;

/// Result type for risk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk and stress-test operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Not enough return observations to estimate a distribution.
    ///
    /// Callers recover from this with the documented default metrics; it is
    /// never treated as fatal inside the engine.
    #[error("Insufficient data: {observed} observations, {required} required")]
    InsufficientData {
        /// Minimum observations required.
        required: usize,
        /// Observations actually supplied.
        observed: usize,
    },

    /// Unknown stress-scenario id. Indicates a configuration or usage bug
    /// and is propagated to the caller.
    #[error("Unknown stress scenario: '{id}'")]
    ScenarioNotFound {
        /// The scenario id that was requested.
        id: String,
    },

    /// Structurally invalid portfolio (zero positions where required,
    /// negative quantities, non-positive total value where division is
    /// required).
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// The reason the portfolio is invalid.
        reason: String,
    },

    /// Invalid position data.
    #[error("Invalid position '{symbol}': {reason}")]
    InvalidPosition {
        /// The position symbol.
        symbol: String,
        /// The reason the position is invalid.
        reason: String,
    },

    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Invalid computation input (confidence level out of range, negative
    /// horizon, and similar contract violations).
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// The reason the input is invalid.
        reason: String,
    },

    /// One or more scenarios in a stress suite failed. The suite continues
    /// past individual failures; this variant reports which scenarios did
    /// not produce a result.
    #[error("Stress suite partially failed: {} scenario(s): {}", failed.len(), failed.join(", "))]
    PartialSuiteFailure {
        /// Ids of the scenarios that failed.
        failed: Vec<String>,
    },

    /// Downstream collaborator (store, notifier) rejected an artifact.
    /// Logged by the caller, never retried by the core.
    #[error("Collaborator failure in {operation}: {reason}")]
    CollaboratorFailure {
        /// The operation that failed.
        operation: String,
        /// The reason reported by the collaborator.
        reason: String,
    },
}

impl RiskError {
    /// Create an insufficient-data error.
    #[must_use]
    pub fn insufficient_data(required: usize, observed: usize) -> Self {
        Self::InsufficientData { required, observed }
    }

    /// Create a scenario-not-found error.
    #[must_use]
    pub fn scenario_not_found(id: impl Into<String>) -> Self {
        Self::ScenarioNotFound { id: id.into() }
    }

    /// Create an invalid-portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }

    /// Create an invalid-position error.
    #[must_use]
    pub fn invalid_position(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing-field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a collaborator-failure error.
    #[must_use]
    pub fn collaborator(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CollaboratorFailure {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiskError::insufficient_data(20, 5);
        assert!(err.to_string().contains("5 observations"));
        assert!(err.to_string().contains("20 required"));

        let err = RiskError::scenario_not_found("lunar-eclipse");
        assert!(err.to_string().contains("lunar-eclipse"));

        let err = RiskError::invalid_position("AAPL", "negative quantity");
        assert!(err.to_string().contains("AAPL"));
        assert!(err.to_string().contains("negative quantity"));
    }

    #[test]
    fn test_partial_suite_failure_lists_scenarios() {
        let err = RiskError::PartialSuiteFailure {
            failed: vec!["rate-shock".to_string(), "dotcom-bust".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 scenario(s)"));
        assert!(msg.contains("rate-shock"));
        assert!(msg.contains("dotcom-bust"));
    }

    #[test]
    fn test_error_clone_eq() {
        let err = RiskError::missing_field("symbol");
        assert_eq!(err.clone(), err);
    }
}
