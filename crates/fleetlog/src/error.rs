//! Error types for fleetlog.
//!
//! This module defines all error types used throughout the fleetlog crate.
//! Two variants are domain rejections (`Validation` and
//! `ReferentialIntegrity`); the rest are infrastructure failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fleetlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// A required field was missing or invalid at submission.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A vehicle cannot be removed while interventions still reference it.
    #[error(
        "vehicle {vehicle_id} has {interventions} associated intervention(s); remove them first"
    )]
    ReferentialIntegrity {
        /// Id of the vehicle whose removal was refused.
        vehicle_id: String,
        /// Number of interventions referencing the vehicle.
        interventions: usize,
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

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A stored slot could not be decoded.
    #[error("slot '{slot}' is corrupt: {source}")]
    CorruptSlot {
        /// Key of the slot.
        slot: &'static str,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
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

/// A specialized Result type for fleetlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given field.
    #[must_use]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create a referential integrity error for a vehicle.
    #[must_use]
    pub fn referential_integrity(vehicle_id: impl Into<String>, interventions: usize) -> Self {
        Self::ReferentialIntegrity {
            vehicle_id: vehicle_id.into(),
            interventions,
        }
    }

    /// Check if this error rejected a submission.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error blocked a vehicle removal.
    #[must_use]
    pub fn is_referential_integrity(&self) -> bool {
        matches!(self, Self::ReferentialIntegrity { .. })
    }
}
