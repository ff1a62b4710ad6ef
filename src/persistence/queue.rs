// ABOUTME: Ordered save queue applying session snapshots to the local store in the background
// ABOUTME: Saves are fire-and-forget; failures are logged and the in-memory session stays authoritative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{session_key, KeyValueStore};
use crate::session::store::clamp_cursor;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use workout_core::models::Session;

enum PersistCommand {
    Save { key: String, payload: String },
    Clear { key: String },
    Flush(oneshot::Sender<()>),
}

/// Background persistence for session snapshots.
///
/// `save` serializes the snapshot synchronously, so it always reflects every
/// transition applied before the call, then queues the write. One writer task
/// applies commands in order, which makes overlapping saves last-write-wins
/// and never interleaved.
#[derive(Clone)]
pub struct ProgressPersistence {
    tx: mpsc::UnboundedSender<PersistCommand>,
    store: Arc<dyn KeyValueStore>,
}

impl ProgressPersistence {
    /// Spawn the writer task for `store`. Must be called inside a tokio runtime.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<PersistCommand>();
        let writer_store = Arc::clone(&store);

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    PersistCommand::Save { key, payload } => {
                        if let Err(e) = writer_store.set(&key, payload).await {
                            warn!(key = %key, error = %e, "Failed to save session progress");
                        } else {
                            debug!(key = %key, "Session progress saved");
                        }
                    }
                    PersistCommand::Clear { key } => {
                        if let Err(e) = writer_store.delete(&key).await {
                            warn!(key = %key, error = %e, "Failed to clear session progress");
                        }
                    }
                    PersistCommand::Flush(done) => {
                        // Receiver may have given up waiting
                        drop(done.send(()));
                    }
                }
            }
            debug!("Progress writer stopped");
        });

        Self { tx, store }
    }

    /// Queue a snapshot of `session`
    pub fn save(&self, session: &Session) {
        let payload = match serde_json::to_string(session) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(session.id = %session.session_id, error = %e, "Failed to serialize session");
                return;
            }
        };
        self.send(PersistCommand::Save {
            key: session_key(&session.session_id),
            payload,
        });
    }

    /// Queue deletion of a saved snapshot
    pub fn clear(&self, session_id: &str) {
        self.send(PersistCommand::Clear {
            key: session_key(session_id),
        });
    }

    /// Wait until every previously queued command was applied
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.send(PersistCommand::Flush(done_tx));
        if done_rx.await.is_err() {
            warn!("Progress writer dropped a flush request");
        }
    }

    /// Load a saved snapshot, re-validated against the workout's current
    /// exercise count.
    ///
    /// The cursor is clamped rather than rejected when the definition shrank.
    /// Unreadable or corrupt snapshots are logged and treated as absent.
    pub async fn load(&self, session_id: &str, exercise_count: usize) -> Option<Session> {
        self.flush().await;

        let key = session_key(session_id);
        let raw = match self.store.get(&key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read session progress");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(mut session) => {
                if session.exercise_count != exercise_count {
                    debug!(
                        session.id = %session_id,
                        saved = session.exercise_count,
                        current = exercise_count,
                        "Workout definition changed since snapshot"
                    );
                    session.exercise_count = exercise_count;
                }
                clamp_cursor(&mut session);
                Some(session)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding corrupt session snapshot");
                None
            }
        }
    }

    fn send(&self, command: PersistCommand) {
        if self.tx.send(command).is_err() {
            warn!("Progress writer is not running; command dropped");
        }
    }
}
