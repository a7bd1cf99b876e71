//! Error types for the forecast-components library.

use thiserror::Error;

/// Result type alias for decomposition and plotting operations.
pub type Result<T> = std::result::Result<T, DiagnosticsError>;

/// Errors that can occur while decomposing or plotting model components.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticsError {
    /// Feature matrix has no columns or no rows.
    #[error("empty input: feature matrix must be non-empty")]
    EmptyInput,

    /// Target series and feature matrix disagree on the number of rows.
    #[error("row mismatch: expected {expected} rows, got {got}")]
    RowMismatch { expected: usize, got: usize },

    /// None of the requested component names exist in the table.
    #[error("no matching components: none of the requested components are present in the model")]
    NoMatchingComponents,

    /// `set_params` has not been called yet.
    #[error("parameters not set: call `set_params` before plotting components")]
    ParamsNotSet,

    /// The fitted model carries no coefficients.
    #[error("not implemented for this model type: {0}")]
    UnsupportedModel(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A column name occurs twice where names must be unique.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// A referenced column does not exist.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A naming-convention pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

impl From<regex::Error> for DiagnosticsError {
    fn from(err: regex::Error) -> Self {
        DiagnosticsError::InvalidPattern(err.to_string())
    }
}
