// ABOUTME: reqwest-based sync gateway posting completion payloads to the backend
// ABOUTME: Maps transport failures and non-success statuses onto external service errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::SyncGateway;
use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use workout_core::models::{CompletionResult, Difficulty, FeedbackTier};

/// One set as sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSet {
    /// 1-based set number
    pub set_number: u32,
    /// Weight, never negative
    pub weight: f64,
    /// Repetitions
    pub reps: u32,
    /// Whether the set counts towards volume
    pub completed: bool,
}

/// One exercise log as sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadExercise {
    /// Exercise id
    pub exercise_id: String,
    /// Name of the variant performed
    pub exercise_name: String,
    /// Sets ordered by number
    pub sets: Vec<PayloadSet>,
    /// Exercise notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Perceived difficulty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Form check score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_check_score: Option<u8>,
}

/// Body of the completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionPayload {
    /// Session id
    pub session_id: String,
    /// Start of the session
    pub start_time: Option<DateTime<Utc>>,
    /// Completion time
    pub completed_at: DateTime<Utc>,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Valid-set volume
    pub total_volume: f64,
    /// Feedback tier
    pub feedback: FeedbackTier,
    /// XP earned
    pub xp_earned: u32,
    /// Skipped exercise ids
    pub skipped_exercises: Vec<String>,
    /// Fatigued body parts
    pub body_parts_fatigued: Vec<String>,
    /// Exercise logs with normalized set data
    pub exercises: Vec<PayloadExercise>,
}

impl From<&CompletionResult> for CompletionPayload {
    fn from(result: &CompletionResult) -> Self {
        let exercises = result
            .exercise_logs
            .iter()
            .map(|log| PayloadExercise {
                exercise_id: log.exercise_id.clone(),
                exercise_name: log.exercise_name.clone(),
                sets: log
                    .sets
                    .iter()
                    .map(|set| PayloadSet {
                        set_number: set.set_number,
                        weight: set.weight.max(0.0),
                        reps: set.reps,
                        completed: set.is_valid(),
                    })
                    .collect(),
                notes: log.notes.clone(),
                difficulty: log.difficulty,
                form_check_score: log.form_check_score,
            })
            .collect();

        Self {
            session_id: result.session_id.clone(),
            start_time: result.started_at,
            completed_at: result.finished_at,
            duration_minutes: result.duration_minutes,
            total_volume: result.total_volume,
            feedback: result.feedback,
            xp_earned: result.xp_earned,
            skipped_exercises: result.skipped_exercises.clone(),
            body_parts_fatigued: result.body_parts_fatigued.clone(),
            exercises,
        }
    }
}

/// Gateway posting to `{base_url}/workouts/{workout_id}/complete`
#[derive(Debug, Clone)]
pub struct HttpSyncGateway {
    client: Client,
    base_url: String,
}

impl HttpSyncGateway {
    /// Create a gateway for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Endpoint for a workout
    #[must_use]
    pub fn completion_url(&self, workout_id: &str) -> String {
        format!("{}/workouts/{workout_id}/complete", self.base_url)
    }
}

#[async_trait::async_trait]
impl SyncGateway for HttpSyncGateway {
    async fn submit(&self, result: &CompletionResult) -> AppResult<()> {
        let url = self.completion_url(&result.workout_id);
        debug!(url = %url, session.id = %result.session_id, "Posting workout completion");

        let response = self
            .client
            .post(&url)
            .json(&CompletionPayload::from(result))
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("Workout backend unreachable at {url}"),
                )
                .with_source(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                "workout backend",
                format!("completion rejected with status {status}: {text}"),
            ));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
