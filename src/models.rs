// ABOUTME: Core data models for the Horario booking engine
// ABOUTME: Defines User, Appointment, ScheduleOverride, Notification and their status enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

//! # Data Models
//!
//! Core data structures shared by the scheduling services and the store
//! interfaces. All models serialize to JSON so transport adapters can render
//! them directly.
//!
//! ## Design Principles
//!
//! - **Tagged roles**: client vs. provider dispatch is an enum, never a
//!   structural check
//! - **Hour-grid dates**: appointment and override timestamps are truncated
//!   to the top of the hour before they reach a store
//! - **Store-agnostic**: nothing here knows how records are persisted

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Role a user acts under
///
/// Operations presented with the wrong role are rejected outright; there is
/// no structural fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Books appointments with providers
    Client,
    /// Offers hourly appointment slots and accepts bookings
    Provider,
}

impl UserRole {
    /// Stable string form used by store adapters and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Provider => "provider",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "provider" => Ok(Self::Provider),
            other => Err(AppError::invalid_input(format!(
                "unknown user role: {other}"
            ))),
        }
    }
}

/// A user account, as far as the scheduling engine needs to know it
///
/// Accounts are owned by an external identity system; the engine only reads
/// them through [`crate::store::UserStore`] to enforce role constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Email address (used for identification)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Role this user acts under
    pub role: UserRole,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this user can offer appointment slots
    #[must_use]
    pub fn is_provider(&self) -> bool {
        self.role == UserRole::Provider
    }

    /// Whether this user can book appointments
    #[must_use]
    pub fn is_client(&self) -> bool {
        self.role == UserRole::Client
    }
}

/// Lifecycle state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Booked by a client, awaiting the provider's confirmation
    Pending,
    /// Confirmed by the owning provider
    Accepted,
}

impl AppointmentStatus {
    /// Stable string form used by store adapters and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            other => Err(AppError::invalid_input(format!(
                "unknown appointment status: {other}"
            ))),
        }
    }
}

/// A booked hour slot between a client and a provider
///
/// The (`provider_id`, `date`) pair is exclusive: stores enforce at most one
/// appointment per provider per hour. `date` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique appointment identifier
    pub id: Uuid,
    /// The client who booked the slot
    pub user_id: Uuid,
    /// The provider whose hour is booked
    pub provider_id: Uuid,
    /// Slot timestamp, truncated to the top of the hour (UTC)
    pub date: DateTime<Utc>,
    /// Lifecycle state
    pub status: AppointmentStatus,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

/// Explicit availability state of one hour slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// The hour is open for booking, even outside the default template
    Available,
    /// The hour is closed, even inside the default template
    Unavailable,
}

impl SlotStatus {
    /// Stable string form used by store adapters and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl Display for SlotStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(AppError::invalid_input(format!(
                "unknown slot status: {other}"
            ))),
        }
    }
}

/// A provider's explicit override of the default template for one hour
///
/// At most one override exists per (`provider_id`, `date`); later changes
/// mutate the record's `status` in place. Overrides are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOverride {
    /// Unique override identifier
    pub id: Uuid,
    /// The provider whose slot this override controls
    pub provider_id: Uuid,
    /// Slot timestamp, truncated to the top of the hour (UTC)
    pub date: DateTime<Utc>,
    /// Explicit availability state for the slot
    pub status: SlotStatus,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

/// A message queued for a user, e.g. "you have a new booking"
///
/// Delivery is owned by an external system; the engine only appends records
/// through [`crate::store::NotificationStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier
    pub id: Uuid,
    /// The user this notification is addressed to
    pub recipient_id: Uuid,
    /// Human-readable message body
    pub content: String,
    /// Whether the recipient has seen the notification
    pub read: bool,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("provider".parse::<UserRole>().unwrap(), UserRole::Provider);
        assert_eq!(UserRole::Client.as_str(), "client");
        assert!("barber".parse::<UserRole>().is_err());
    }

    #[test]
    fn status_enums_serialize_lowercase() {
        let json = serde_json::to_string(&AppointmentStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let json = serde_json::to_string(&SlotStatus::Unavailable).unwrap();
        assert_eq!(json, "\"unavailable\"");
    }

    #[test]
    fn role_predicates_follow_the_tag() {
        let user = User {
            id: Uuid::new_v4(),
            email: "ana@example.com".into(),
            display_name: Some("Ana".into()),
            role: UserRole::Provider,
            created_at: Utc::now(),
        };
        assert!(user.is_provider());
        assert!(!user.is_client());
    }
}
