// ABOUTME: Workout definition provider boundary and an in-memory catalog implementation
// ABOUTME: Callers await an explicit readiness signal instead of polling for definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Read-only workout definitions.
//!
//! Definitions are immutable for the lifetime of a session. The in-memory
//! [`WorkoutCatalog`] lets `open` wait for a definition that is still being
//! loaded elsewhere, bounded by a timeout.

use crate::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;
use workout_core::models::WorkoutDefinition;

/// Source of workout definitions
#[async_trait::async_trait]
pub trait WorkoutProvider: Send + Sync {
    /// Resolve a workout definition, waiting until it is ready
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` if the definition does not become ready in time
    async fn definition(&self, workout_id: &str) -> AppResult<Arc<WorkoutDefinition>>;
}

type Definitions = HashMap<String, Arc<WorkoutDefinition>>;

/// In-memory definition catalog with readiness notification
#[derive(Debug, Clone)]
pub struct WorkoutCatalog {
    definitions: Arc<watch::Sender<Definitions>>,
    ready_timeout: Duration,
}

impl WorkoutCatalog {
    /// Empty catalog; lookups wait at most `ready_timeout`
    #[must_use]
    pub fn new(ready_timeout: Duration) -> Self {
        let (tx, _rx) = watch::channel(Definitions::new());
        Self {
            definitions: Arc::new(tx),
            ready_timeout,
        }
    }

    /// Publish or replace a definition, waking any waiting lookup
    pub fn publish(&self, definition: WorkoutDefinition) {
        debug!(workout.id = %definition.id, exercises = definition.exercises.len(), "Publishing workout definition");
        self.definitions.send_modify(|defs| {
            defs.insert(definition.id.clone(), Arc::new(definition));
        });
    }

    /// Whether the definition is already available
    #[must_use]
    pub fn is_ready(&self, workout_id: &str) -> bool {
        self.definitions.borrow().contains_key(workout_id)
    }
}

#[async_trait::async_trait]
impl WorkoutProvider for WorkoutCatalog {
    async fn definition(&self, workout_id: &str) -> AppResult<Arc<WorkoutDefinition>> {
        let mut rx = self.definitions.subscribe();

        let wait = async {
            loop {
                let found = rx.borrow_and_update().get(workout_id).cloned();
                if let Some(definition) = found {
                    return Ok(definition);
                }
                if let Err(e) = rx.changed().await {
                    return Err(AppError::internal(format!("Workout catalog closed: {e}")));
                }
            }
        };

        tokio::time::timeout(self.ready_timeout, wait)
            .await
            .map_err(|_| {
                AppError::unavailable(format!(
                    "Workout '{workout_id}' was not ready within {}s",
                    self.ready_timeout.as_secs()
                ))
            })?
    }
}
