// ABOUTME: Store abstraction layer for the Horario booking engine
// ABOUTME: Async repository traits for appointments, overrides, users and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

//! # Store Interfaces
//!
//! The engine owns no persistence. Every service receives its stores as
//! `Arc<dyn Trait>` constructor parameters, so any backend that implements
//! these traits plugs in; [`MemoryStore`] is the reference implementation and
//! the substitutable fake the test suite runs against.
//!
//! Adapters translate backend failures into [`crate::errors::AppError`]:
//! a uniqueness violation on appointment insert becomes `SlotTaken`, on
//! override insert `ResourceAlreadyExists`, and anything non-deterministic
//! (connection loss, corrupt rows) becomes an opaque `DatabaseError` distinct
//! from business-rule rejections.

/// In-memory reference backend
pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{
    Appointment, AppointmentStatus, Notification, ScheduleOverride, SlotStatus, User,
};

/// Record handed to [`AppointmentStore::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    /// The booking client
    pub user_id: Uuid,
    /// The provider whose hour is being booked
    pub provider_id: Uuid,
    /// Slot timestamp, already truncated to the hour
    pub date: DateTime<Utc>,
    /// Initial lifecycle state
    pub status: AppointmentStatus,
}

/// Record handed to [`ScheduleOverrideStore::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleOverride {
    /// The provider whose slot is overridden
    pub provider_id: Uuid,
    /// Slot timestamp, already truncated to the hour
    pub date: DateTime<Utc>,
    /// Explicit availability state
    pub status: SlotStatus,
}

/// Record handed to [`NotificationStore::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// The user the notification is addressed to
    pub recipient_id: Uuid,
    /// Human-readable message body
    pub content: String,
}

/// Appointment records keyed by provider and hour slot
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Look up an appointment by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>>;

    /// The at-most-one appointment occupying a provider's hour slot
    async fn find_by_date(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> AppResult<Option<Appointment>>;

    /// All of a provider's appointments on one calendar day
    async fn find_all_in_day(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
        day: u32,
    ) -> AppResult<Vec<Appointment>>;

    /// All of a provider's appointments in one calendar month
    async fn find_all_in_month(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<Appointment>>;

    /// Persist a new appointment
    ///
    /// # Errors
    ///
    /// Returns `SlotTaken` when the (provider, date) slot is already booked;
    /// the slot is exclusive and implementations must enforce it atomically.
    async fn create(&self, appointment: NewAppointment) -> AppResult<Appointment>;

    /// Persist changes to an existing appointment
    async fn save(&self, appointment: Appointment) -> AppResult<Appointment>;
}

/// Schedule override records keyed by provider and hour slot
#[async_trait]
pub trait ScheduleOverrideStore: Send + Sync {
    /// The at-most-one override controlling a provider's hour slot
    async fn find_by_date(
        &self,
        provider_id: Uuid,
        date: DateTime<Utc>,
    ) -> AppResult<Option<ScheduleOverride>>;

    /// All of a provider's overrides on one calendar day
    async fn find_all_in_day(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
        day: u32,
    ) -> AppResult<Vec<ScheduleOverride>>;

    /// All of a provider's overrides in one calendar month
    async fn find_all_in_month(
        &self,
        provider_id: Uuid,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<ScheduleOverride>>;

    /// Persist a new override
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the (provider, date) slot already
    /// carries an override; callers mutate the existing record instead.
    async fn create(&self, schedule_override: NewScheduleOverride) -> AppResult<ScheduleOverride>;

    /// Persist changes to an existing override
    async fn save(&self, schedule_override: ScheduleOverride) -> AppResult<ScheduleOverride>;
}

/// Read access to user accounts, for role enforcement
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
}

/// Append-only notification sink
///
/// Delivery transport is external; from the engine's point of view a created
/// record is fire-and-forget and its failure never fails the surrounding
/// operation.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Queue a notification for a user
    async fn create(&self, notification: NewNotification) -> AppResult<Notification>;
}
