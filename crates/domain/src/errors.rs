//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A linked-resource reference could not be resolved to a known kind
    #[error("Unroutable resource reference: {0}")]
    UnroutableResource(String),

    /// Invalid URI format
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Invalid identifier format
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
