// ABOUTME: Backend sync gateway boundary for completed sessions
// ABOUTME: At-most-once, fire-and-forget submission that never blocks the completion view
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Backend Sync
//!
//! Local completion is authoritative. Once a session is finalized the result
//! is handed to a [`SyncGateway`] on a background task; the caller never
//! awaits it and failures are only logged.

/// HTTP gateway posting completions to the backend
pub mod http;

pub use http::{CompletionPayload, HttpSyncGateway};

use crate::errors::AppResult;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use workout_core::models::CompletionResult;

/// Destination for completed sessions
#[async_trait::async_trait]
pub trait SyncGateway: Send + Sync {
    /// Submit a completed session once
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or rejects the payload
    async fn submit(&self, result: &CompletionResult) -> AppResult<()>;

    /// Gateway name for logs
    fn name(&self) -> &'static str;
}

/// Gateway used when no backend is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSyncGateway;

#[async_trait::async_trait]
impl SyncGateway for DisabledSyncGateway {
    async fn submit(&self, result: &CompletionResult) -> AppResult<()> {
        info!(
            session.id = %result.session_id,
            workout.id = %result.workout_id,
            "Backend sync disabled; completion kept locally"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Submit `result` on a background task, without retry.
///
/// The returned handle is only useful to tests and shutdown paths that want
/// to wait for the attempt; dropping it does not cancel the submission.
pub fn submit_in_background(
    gateway: Arc<dyn SyncGateway>,
    result: CompletionResult,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match gateway.submit(&result).await {
            Ok(()) => info!(
                gateway = gateway.name(),
                session.id = %result.session_id,
                workout.id = %result.workout_id,
                volume = result.total_volume,
                "Workout completion synced"
            ),
            Err(e) => error!(
                gateway = gateway.name(),
                session.id = %result.session_id,
                workout.id = %result.workout_id,
                error = %e,
                "Failed to sync workout completion"
            ),
        }
    })
}
