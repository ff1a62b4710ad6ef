// ABOUTME: Progress persistence for crash-safe resume of workout sessions
// ABOUTME: Pluggable key-value backends plus an ordered, fire-and-forget save queue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// File-backed store, one JSON file per key
pub mod file;
/// In-memory store
pub mod memory;
/// Ordered save queue in front of a store
pub mod queue;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use queue::ProgressPersistence;

use crate::constants::storage::SESSION_KEY_PREFIX;
use crate::errors::AppResult;

/// Local durable key-value store for serialized session snapshots
///
/// # Examples
///
/// ```rust,no_run
/// use workout_engine::persistence::{InMemoryStore, KeyValueStore};
/// # async fn example() -> workout_engine::errors::AppResult<()> {
/// let store = InMemoryStore::new();
/// store.set("workout_session:push-day", "{}".to_owned()).await?;
/// assert_eq!(store.get("workout_session:push-day").await?, Some("{}".to_owned()));
/// store.delete("workout_session:push-day").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one atomically
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Delete a value; deleting a missing key succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Verify the backend is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails
    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Storage key of a session snapshot
#[must_use]
pub fn session_key(session_id: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{session_id}")
}
