// ABOUTME: Completion result produced once when a session is finalized
// ABOUTME: Shown to the user immediately and uploaded best-effort to the backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::session::ExerciseLog;

/// Qualitative feedback for a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTier {
    /// Nearly everything done, with real load
    Excellent,
    /// Most exercises done
    Good,
    /// About half done
    Fair,
    /// Less than half done
    Poor,
}

impl fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

/// Aggregate statistics of a finished session.
///
/// Never stored as session state; it is the payload for the sync gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Finalized session
    pub session_id: String,
    /// Workout the session ran
    pub workout_id: String,
    /// Session start, if known
    pub started_at: Option<DateTime<Utc>>,
    /// Finalization time
    pub finished_at: DateTime<Utc>,
    /// Whole minutes between start and finish
    pub duration_minutes: u32,
    /// Sum of valid-set volume
    pub total_volume: f64,
    /// Feedback tier
    pub feedback: FeedbackTier,
    /// XP accumulated during the session
    pub xp_earned: u32,
    /// Exercises with a log
    pub exercises_completed: usize,
    /// Exercises in the session, including synthetic cardio
    pub exercise_count: usize,
    /// Skipped exercise ids, in skip order
    pub skipped_exercises: Vec<String>,
    /// Muscle groups worked by logged exercises, sorted
    pub body_parts_fatigued: Vec<String>,
    /// Logs with normalized set data
    pub exercise_logs: Vec<ExerciseLog>,
}
