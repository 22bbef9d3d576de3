//! Error types for codekeeper.
//!
//! This module defines all error types used throughout the codekeeper crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// The main error type for codekeeper operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Repository Errors ===
    /// A required field was missing or empty.
    #[error("missing required field: {field}")]
    Validation {
        /// Name of the field that failed validation.
        field: &'static str,
    },

    /// The targeted entry does not exist.
    #[error("no entry with id {id}")]
    NotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// Writing the collection to storage failed; the in-memory state was
    /// rolled back to the last known-good collection.
    #[error("failed to persist entries: {message}")]
    Persistence {
        /// Description of the storage failure.
        message: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    // === Geolocation Errors ===
    /// The platform could not produce a position.
    #[error("location unavailable: {message}")]
    LocationUnavailable {
        /// Description of why no position was available.
        message: String,
    },

    /// The user or platform denied access to location data.
    #[error("location permission denied: {message}")]
    PermissionDenied {
        /// Description of the denial.
        message: String,
    },

    /// An operation timed out.
    #[error("operation timed out: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for codekeeper operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the named field.
    #[must_use]
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Create a not-found error for the given entry id.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Create a persistence error.
    #[must_use]
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create a location-unavailable error.
    #[must_use]
    pub fn location_unavailable(message: impl Into<String>) -> Self {
        Self::LocationUnavailable {
            message: message.into(),
        }
    }

    /// Create a permission-denied error.
    #[must_use]
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Check if this error is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error is a missing-entry failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a storage-write failure.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }

    /// Check if this error came from the geolocation provider.
    #[must_use]
    pub fn is_location_error(&self) -> bool {
        matches!(
            self,
            Self::LocationUnavailable { .. } | Self::PermissionDenied { .. } | Self::Timeout { .. }
        )
    }
}
