//! Error types for sprocgen

use thiserror::Error;

/// Result type alias for sprocgen operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that can occur during artifact generation
#[derive(Error, Debug)]
pub enum GenError {
    /// The table exists but carries no columns; generating empty-bodied
    /// procedures would be worse than failing.
    #[error("table '{0}' has no columns")]
    EmptySchema(String),

    #[error("metadata unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("failed to parse schema DDL: {0}")]
    ParseError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlparser::parser::ParserError> for GenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        GenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::ConfigError(err.to_string())
    }
}
