// ABOUTME: Unified error handling for the Ladle data layer
// ABOUTME: Defines error codes, the AppError type, and sqlx error classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Ladle Kitchen

//! # Unified Error Handling System
//!
//! This module provides a centralized error handling system for the Ladle
//! data layer. It defines standard error types and error codes so that every
//! store surfaces the same three recoverable conditions to the API layer:
//! validation failures, constraint violations, and missing resources.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the data layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3001,

    // Resource Management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,
    #[serde(rename = "CONSTRAINT_VIOLATION")]
    ConstraintViolation = 4002,
    #[serde(rename = "HASH_SPACE_EXHAUSTED")]
    HashSpaceExhausted = 4003,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput | Self::ValueOutOfRange => 400,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 409 Conflict
            Self::ResourceAlreadyExists | Self::ConstraintViolation => 409,

            // 503 Service Unavailable
            Self::HashSpaceExhausted => 503,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError
            | Self::ConfigError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ConstraintViolation => "A data integrity rule was violated",
            Self::HashSpaceExhausted => "Could not generate a unique short link hash",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::ConfigError => "Configuration error encountered",
        }
    }
}

/// Unified error type for the data layer
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// True if this error reports a failed field or range check
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::InvalidInput | ErrorCode::ValueOutOfRange
        )
    }

    /// True if this error reports a violated uniqueness or check constraint
    #[must_use]
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ResourceAlreadyExists | ErrorCode::ConstraintViolation
        )
    }

    /// True if this error reports a missing resource
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.code, ErrorCode::ResourceNotFound)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Error response format handed to the API layer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetails,
}

/// Payload of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: ErrorCode,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside its configured bounds
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Duplicate of an existing unique resource
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Violated check or referential constraint
    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConstraintViolation, message)
    }

    /// Short link hash generation gave up after the configured attempts
    #[must_use]
    pub fn hash_space_exhausted(attempts: u32) -> Self {
        Self::new(
            ErrorCode::HashSpaceExhausted,
            format!("no unique hash found after {attempts} attempts"),
        )
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

/// Classify a sqlx error raised during `context`.
///
/// SQLite reports constraint failures only through its message text, so the
/// engine outcome is recovered by sniffing it: unique violations become
/// `ResourceAlreadyExists`, check violations become `ConstraintViolation`,
/// and foreign-key violations (a referenced row is missing) become
/// `ResourceNotFound`. Everything else stays a `DatabaseError`.
#[must_use]
pub fn classify_sqlx_error(error: sqlx::Error, context: &str) -> AppError {
    let text = error.to_string();
    if text.contains("UNIQUE constraint failed") {
        AppError::already_exists(format!("{context}: duplicate of an existing record"))
            .with_source(error)
    } else if text.contains("CHECK constraint failed") {
        AppError::constraint_violation(format!("{context}: check constraint rejected the record"))
            .with_source(error)
    } else if text.contains("FOREIGN KEY constraint failed") {
        AppError::not_found(format!("{context}: referenced record")).with_source(error)
    } else {
        AppError::database(format!("{context}: {text}")).with_source(error)
    }
}

/// Conversion from serde_json errors (model field serialization)
impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ResourceAlreadyExists.http_status(), 409);
        assert_eq!(ErrorCode::ConstraintViolation.http_status(), 409);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_error_kind_helpers() {
        assert!(AppError::out_of_range("cooking time").is_validation());
        assert!(AppError::already_exists("tag").is_constraint_violation());
        assert!(AppError::constraint_violation("self subscription").is_constraint_violation());
        assert!(AppError::not_found("Recipe 7").is_not_found());
        assert!(!AppError::database("oops").is_validation());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::already_exists("ingredient (Salt, g) already exists");
        let response = ErrorResponse::from(error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("RESOURCE_ALREADY_EXISTS"));
        assert!(json.contains("Salt"));
    }
}
