//! Error types for the fasting tracker core
//!
//! The engine and estimator are total and never fail; errors only arise
//! when turning loosely typed input into core types.

use thiserror::Error;

/// Failure to parse a wire tag into a core enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown goal: {0}. Must be one of: WEIGHT_LOSS, MAINTENANCE, MUSCLE_GAIN")]
    UnknownGoal(String),

    #[error("Invalid timestamp: {0} ms since epoch")]
    InvalidTimestamp(i64),

    #[error("Invalid timestamp: not a finite number")]
    NonFiniteTimestamp,
}
