// ABOUTME: Unified error handling for the Horario booking engine
// ABOUTME: Defines error codes, the AppError type, and HTTP status mapping for transport adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

//! # Unified Error Handling
//!
//! Every fallible operation in the crate returns [`AppResult`]. Business-rule
//! rejections, lookup misses, authorization failures, and infrastructure
//! failures all share the [`AppError`] type but carry distinct [`ErrorCode`]s,
//! so transport adapters can map outcomes without string matching.
//!
//! No error in this core is transient: results are deterministic for a given
//! store state, so the propagation policy is compute once, fail fast, no
//! internal retry.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authorization (1000-1999)
    #[serde(rename = "NOT_OWNER")]
    NotOwner = 1000,

    // Validation / business-rule rejections (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "PAST_DATE")]
    PastDate = 3001,
    #[serde(rename = "SELF_BOOKING")]
    SelfBooking = 3002,
    #[serde(rename = "INVALID_PROVIDER")]
    InvalidProvider = 3003,
    #[serde(rename = "INVALID_CLIENT")]
    InvalidClient = 3004,
    #[serde(rename = "SLOT_UNAVAILABLE")]
    SlotUnavailable = 3005,
    #[serde(rename = "SLOT_TAKEN")]
    SlotTaken = 3006,
    #[serde(rename = "SLOT_HAS_APPOINTMENT")]
    SlotHasAppointment = 3007,

    // Resource Management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6000,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput
            | Self::PastDate
            | Self::SelfBooking
            | Self::InvalidProvider
            | Self::InvalidClient
            | Self::SlotUnavailable
            | Self::SlotHasAppointment => 400,

            // 403 Forbidden
            Self::NotOwner => 403,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 409 Conflict
            Self::SlotTaken | Self::ResourceAlreadyExists => 409,

            // 500 Internal Server Error
            Self::ConfigInvalid
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NotOwner => "You do not own this resource",
            Self::InvalidInput => "The provided input is invalid",
            Self::PastDate => "The requested date is in the past",
            Self::SelfBooking => "An appointment cannot be booked with yourself",
            Self::InvalidProvider => "The selected provider cannot take appointments",
            Self::InvalidClient => "The requesting user cannot book appointments",
            Self::SlotUnavailable => "The requested time slot is not open for booking",
            Self::SlotTaken => "The requested time slot is already booked",
            Self::SlotHasAppointment => "The time slot already has an appointment",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identity already exists",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Store operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this code represents a deterministic business-rule rejection
    /// rather than an infrastructure failure
    #[must_use]
    pub const fn is_validation(self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::PastDate
                | Self::SelfBooking
                | Self::InvalidProvider
                | Self::InvalidClient
                | Self::SlotUnavailable
                | Self::SlotTaken
                | Self::SlotHasAppointment
        )
    }
}

/// Unified error type for the engine
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
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Whether this error is a deterministic business-rule rejection
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.code.is_validation()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors for common errors
impl AppError {
    /// Caller is not the owner of the targeted resource
    pub fn not_owner(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotOwner, message)
    }

    /// Malformed or out-of-range input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Operation targets an hour that is not in the future
    pub fn past_date(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PastDate, message)
    }

    /// Client and provider are the same user
    pub fn self_booking(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SelfBooking, message)
    }

    /// Provider is missing or does not hold the provider role
    pub fn invalid_provider(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidProvider, message)
    }

    /// User is missing or does not hold the client role
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidClient, message)
    }

    /// The hour is closed per template and overrides
    pub fn slot_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SlotUnavailable, message)
    }

    /// An appointment already occupies the slot
    pub fn slot_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SlotTaken, message)
    }

    /// A booked slot cannot be closed
    pub fn slot_has_appointment(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SlotHasAppointment, message)
    }

    /// Lookup miss for the named resource
    pub fn resource_not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Uniqueness constraint violation
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Invalid environment or construction-time configuration
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Unclassified internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Opaque store-layer failure, distinct from business-rule rejections
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, "JSON serialization failed").with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_codes_map_to_client_errors() {
        assert_eq!(ErrorCode::PastDate.http_status(), 400);
        assert_eq!(ErrorCode::SlotTaken.http_status(), 409);
        assert_eq!(ErrorCode::NotOwner.http_status(), 403);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn business_rejections_are_validation_errors() {
        assert!(AppError::slot_taken("booked").is_validation());
        assert!(AppError::past_date("too late").is_validation());
        assert!(!AppError::not_owner("someone else's").is_validation());
        assert!(!AppError::database("connection reset").is_validation());
    }

    #[test]
    fn display_includes_description_and_message() {
        let err = AppError::slot_unavailable("hour 9 is closed");
        let rendered = err.to_string();
        assert!(rendered.contains("not open for booking"));
        assert!(rendered.contains("hour 9 is closed"));
    }
}
