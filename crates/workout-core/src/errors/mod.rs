// ABOUTME: Unified error type, error codes, and result alias for the workout engine
// ABOUTME: Every fallible engine operation returns AppResult so `?` works across layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Defines the standard error codes and the `AppError` type used by every
//! component of the session engine. Invalid transitions are described in
//! detail by [`SessionError`] and folded into `AppError` at the boundary.

/// Typed invalid-transition errors raised by the session store
pub mod session;

pub use session::SessionError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Operation is not allowed in the current session state
    #[serde(rename = "INVALID_TRANSITION")]
    InvalidTransition = 3001,

    // Resource Management (4000-4999)
    /// Requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Resource exists but is held by someone else
    #[serde(rename = "RESOURCE_LOCKED")]
    ResourceLocked = 4002,
    /// Resource did not become available in time
    #[serde(rename = "RESOURCE_UNAVAILABLE")]
    ResourceUnavailable = 4003,

    // External Services (5000-5999)
    /// Backend rejected or failed the request
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Backend could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Configuration (6000-6999)
    /// Configuration value is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Local durable store failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Snapshot or payload could not be (de)serialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidTransition => "This action is not allowed right now",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceLocked => "Another workout session is already in progress",
            Self::ResourceUnavailable => "The resource is temporarily unavailable",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the UI is expected to show this error to the user
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::InvalidTransition
                | Self::ResourceNotFound
                | Self::ResourceLocked
                | Self::ResourceUnavailable
        )
    }
}

/// Unified error type for the engine
#[derive(Debug, thiserror::Error)]
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

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Local store error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Resource not ready within the allowed time
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceUnavailable, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// The typed session error behind this `AppError`, if any
    #[must_use]
    pub fn session_error(&self) -> Option<&SessionError> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<SessionError>())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        let code = error.code();
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string()).with_source(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        // Alternate formatting keeps the whole context chain in the message
        Self::internal(format!("{error:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_keeps_typed_source() {
        let error: AppError = SessionError::AlreadyLogged {
            exercise_id: "squat".to_owned(),
        }
        .into();

        assert_eq!(error.code, ErrorCode::InvalidTransition);
        assert!(matches!(
            error.session_error(),
            Some(SessionError::AlreadyLogged { exercise_id }) if exercise_id == "squat"
        ));
    }

    #[test]
    fn test_error_code_serialized_names() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&ErrorCode::InvalidTransition)?;
        assert_eq!(json, "\"INVALID_TRANSITION\"");
        Ok(())
    }

    #[test]
    fn test_user_facing_codes() {
        assert!(ErrorCode::ResourceLocked.is_user_facing());
        assert!(!ErrorCode::StorageError.is_user_facing());
    }
}
