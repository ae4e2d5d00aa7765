// ABOUTME: Unified error handling for the Memo seeding toolkit
// ABOUTME: Defines ErrorCode, AppError and the AppResult alias shared by every seeder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. Errors carry a
//! stable [`ErrorCode`], a human-readable message, optional context and an optional
//! source error for chaining.
//!
//! Missing upstream rows are *not* errors for a seeding run: seeders report them as
//! skipped outcomes.

/// Coefficient resolution errors
pub mod coefficient;

pub use coefficient::{CoefficientError, CoefficientOrigin};

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied an invalid value
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A JSON payload does not match the shape its discriminator requires
    #[serde(rename = "INVALID_PAYLOAD")]
    InvalidPayload = 3001,
    /// A coefficient is zero or negative
    #[serde(rename = "INVALID_COEFFICIENT")]
    InvalidCoefficient = 3002,
    /// No coefficient exists for a subject/stream pair
    #[serde(rename = "COEFFICIENT_UNDEFINED")]
    CoefficientUndefined = 3003,

    // Resource Management (4000-4999)
    /// The requested row was not found
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// A row with the same natural key already exists
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,

    // Configuration (6000-6999)
    /// A configuration value could not be parsed
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Database operation failed
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// JSON encoding or decoding failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidPayload => "The payload shape does not match its declared type",
            Self::InvalidCoefficient => "Coefficient must be a positive integer",
            Self::CoefficientUndefined => "No coefficient is defined for this subject and stream",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Seeding step that produced the error, if any
    pub step: Option<String>,
    /// Natural key or id of the row involved
    pub resource_id: Option<String>,
}

/// Unified error type for the toolkit
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach the seeding step name
    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.context.step = Some(step.into());
        self
    }

    /// Attach the natural key or id of the row involved
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Payload shape mismatch
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPayload, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Invalid configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        let code = match &error {
            sqlx::Error::RowNotFound => ErrorCode::ResourceNotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ErrorCode::ResourceAlreadyExists
            }
            _ => ErrorCode::DatabaseError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::not_found("stream 'sciences-exp'");
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(
            error.to_string(),
            "The requested resource was not found: stream 'sciences-exp' not found"
        );
    }

    #[test]
    fn test_context_builders() {
        let error = AppError::invalid_input("bad slug")
            .with_step("academic-structure")
            .with_resource_id("sciences-exp");

        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(error.context.step.as_deref(), Some("academic-structure"));
        assert_eq!(error.context.resource_id.as_deref(), Some("sciences-exp"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::CoefficientUndefined).unwrap_or_default();
        assert_eq!(json, "\"COEFFICIENT_UNDEFINED\"");
    }
}
