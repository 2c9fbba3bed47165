//! Property and stream input errors.

use thiserror::Error;

/// Result type for property-layer operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors raised when stream or composition input is rejected at the boundary.
///
/// Property estimation itself never fails; these only come out of explicit
/// validation and checked constructors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Non-physical values (negative flow, non-finite fraction, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: String },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}
