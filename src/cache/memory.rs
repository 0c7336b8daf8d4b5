// ABOUTME: In-memory cache implementation for tests and embedded deployments
// ABOUTME: HashMap of JSON values behind a tokio RwLock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Horario Contributors

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::CacheProvider;
use crate::errors::AppResult;

/// In-memory cache of rendered views, keyed by string
///
/// Entries are JSON values so any serializable view fits. There is no TTL or
/// eviction: the engine only relies on explicit invalidation, and embedders
/// with real capacity requirements bring their own backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, replacing any previous entry
    pub async fn set(&self, key: impl Into<String>, value: Value) {
        self.entries.write().await.insert(key.into(), value);
    }

    /// The value stored under `key`, if any
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).cloned()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheProvider for MemoryCache {
    async fn invalidate(&self, key: &str) -> AppResult<()> {
        if self.entries.write().await.remove(key).is_some() {
            debug!(key, "cache entry invalidated");
        }
        Ok(())
    }
}
