//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Recipient id is blank or malformed
    #[error("Invalid recipient: {0:?}")]
    InvalidRecipient(String),

    /// Document link or media id is unusable
    #[error("Invalid document source: {0:?}")]
    InvalidDocumentSource(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
