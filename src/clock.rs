// ABOUTME: Clock abstraction and calendar arithmetic for the hourly booking grid
// ABOUTME: Provides injectable current-instant plus start-of-hour, slot, end-of-day and month helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

//! Time is an injected collaborator: every service that enforces a
//! past/future rule reads the current instant through [`Clock`], so the rules
//! stay testable. The free functions below are the pure calendar arithmetic
//! the grid is built on. All instants are UTC; timezone presentation belongs
//! to the transport layer.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// The current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// System clock using actual wall time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a chosen instant, for tests and deterministic replay
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Create a clock frozen at the given instant
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to a new instant
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock poisoned") = now;
    }

    /// Advance the clock by a duration
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = *now + delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Truncate an instant to the top of its hour
#[must_use]
pub fn start_of_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_hms_opt(instant.hour(), 0, 0)
        .map_or(instant, |naive| naive.and_utc())
}

/// The instant an hour slot begins on a given calendar day
///
/// Returns `None` for a nonexistent calendar date or an hour outside 0..=23.
#[must_use]
pub fn slot_instant(year: i32, month: u32, day: u32, hour: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, 0, 0)
        .map(|naive| naive.and_utc())
}

/// The last second of a calendar day, 23:59:59
///
/// Returns `None` for a nonexistent calendar date.
#[must_use]
pub fn end_of_day(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(23, 59, 59)
        .map(|naive| naive.and_utc())
}

/// Number of days in a calendar month
///
/// Returns `None` for a month outside 1..=12.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next_first - first).num_days()).ok()
}
