// ABOUTME: Cache invalidation contract for rendered schedule views
// ABOUTME: Defines the CacheProvider trait and day-schedule cache key composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

//! The engine does not own a cache; transports may cache rendered
//! day-schedule views, and the booking path tells them when a view went
//! stale. That is the whole contract: invalidation is advisory, best-effort,
//! and never fails the operation that triggered it. Schedule reads stay
//! correct without any cache because they recompute per call.

/// In-memory cache implementation
pub mod memory;

pub use memory::MemoryCache;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppResult;

/// Cache backend the engine can ask to drop a stale entry
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Drop the entry stored under `key`, if any
    async fn invalidate(&self, key: &str) -> AppResult<()>;
}

/// Cache key of the rendered day-schedule view for one provider-day
///
/// Composed as `provider-appointments:{provider_id}:{year-month-day}` with
/// non-padded month and day, e.g. `provider-appointments:<uuid>:2026-8-6`.
/// Every writer and reader of the day view must agree on this composition.
#[must_use]
pub fn day_schedule_key(provider_id: Uuid, date: DateTime<Utc>) -> String {
    format!(
        "provider-appointments:{provider_id}:{}",
        date.format("%Y-%-m-%-d")
    )
}
