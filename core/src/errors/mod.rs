//! Domain-specific error types and error handling.
//!
//! Every business violation is raised as a distinct [`DomainError`] variant at
//! the point of detection and translated into an HTTP response at a single
//! boundary in the api crate. Services never map errors to transport shapes
//! themselves.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced entity does not exist
    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// A uniqueness constraint was violated, e.g. an email collision
    #[error("{message}")]
    Duplicate { message: String },

    /// Malformed input or a business-rule violation attributable to the caller
    #[error("{message}")]
    Validation { message: String },

    /// The caller lacks permission for the requested operation
    #[error("{message}")]
    Forbidden { message: String },

    /// Unexpected storage-layer failure
    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    /// A referenced entity was not found
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    /// A uniqueness violation
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    /// A caller-attributable validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// A permission failure
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// A storage-layer fault
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
