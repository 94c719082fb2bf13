//! Error types for rql operations.
//!
//! These are operational failures (bad source text, malformed declarations,
//! catalog snapshots, analyzer configuration). Semantic violations found
//! while checking a query are never raised as errors; they are collected by
//! [`Diagnostics`](crate::checker::Diagnostics) instead.

use thiserror::Error;

/// Result type alias using [`RqlError`].
pub type Result<T> = std::result::Result<T, RqlError>;

/// Error types for rql operations.
#[derive(Debug, Error)]
pub enum RqlError {
    /// Parse error with location information.
    #[error("Parse error at line {line}, column {col}: {message}")]
    ParseError {
        line: usize,
        col: usize,
        message: String,
    },

    /// Schema declaration errors (duplicate attribute, empty name, etc.).
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Catalog snapshot errors.
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Invalid analyzer configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
