//! Error type shared by the validator, the quantile engine and the aggregator.

use thiserror::Error;

/// Broad classification of a [`VarError`].
///
/// Every precondition failure in the core is an invalid argument; there is
/// no retryable or transient kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
}

/// Precondition violations raised before or during a VaR calculation.
///
/// All variants abort the calculation with no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VarError {
    #[error("trade list cannot be empty")]
    EmptyTrades,

    #[error("historical values cannot be empty")]
    EmptyHistoricalValues,

    #[error("confidence level must be between 0 and 1, got {0}")]
    ConfidenceOutOfRange(f64),

    #[error(
        "P&L vector sizes are inconsistent: trade '{trade_id}' has {found} scenarios, expected {expected}"
    )]
    InconsistentScenarioLengths {
        trade_id: String,
        expected: usize,
        found: usize,
    },

    #[error("P&L value {target} must be included in the historical values")]
    TargetNotInDistribution { target: f64 },

    #[error(
        "percentile index {index} is outside a distribution of {len} values (confidence level {confidence_level})"
    )]
    PercentileOutOfRange {
        index: usize,
        len: usize,
        confidence_level: f64,
    },
}

impl VarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VarError::EmptyTrades
            | VarError::EmptyHistoricalValues
            | VarError::ConfidenceOutOfRange(_)
            | VarError::InconsistentScenarioLengths { .. }
            | VarError::TargetNotInDistribution { .. }
            | VarError::PercentileOutOfRange { .. } => ErrorKind::InvalidArgument,
        }
    }
}
