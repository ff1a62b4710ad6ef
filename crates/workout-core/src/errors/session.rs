// ABOUTME: Typed invalid-transition errors for the workout session store
// ABOUTME: Converts into AppError so callers can match on the exact failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ErrorCode;

/// Errors raised when a session transition is rejected.
///
/// These are the only failures that cross into the UI layer; persistence and
/// sync problems are logged instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A different session is active and was not explicitly replaced
    #[error("session '{active}' is already active; cannot start '{requested}'")]
    AlreadyActive {
        /// Identifier of the session currently held by the store
        active: String,
        /// Identifier the caller tried to start
        requested: String,
    },
    /// The exercise already has a log, so it cannot be skipped
    #[error("exercise '{exercise_id}' already has logged sets and cannot be skipped")]
    AlreadyLogged {
        /// Exercise that was logged
        exercise_id: String,
    },
    /// No session is active in the store
    #[error("no workout session is active")]
    NoActiveSession,
    /// The session was already finalized
    #[error("session '{session_id}' is already finished")]
    AlreadyFinished {
        /// Finished session
        session_id: String,
    },
    /// A workout without exercises cannot be started
    #[error("workout '{workout_id}' has no exercises")]
    EmptyWorkout {
        /// Workout that was opened
        workout_id: String,
    },
    /// Annotation requested for an exercise without a log
    #[error("exercise '{exercise_id}' has no logged sets yet")]
    NotLogged {
        /// Exercise without a log
        exercise_id: String,
    },
    /// Set data failed validation
    #[error("invalid set for exercise '{exercise_id}': {reason}")]
    InvalidSet {
        /// Exercise the set was recorded against
        exercise_id: String,
        /// Why the set was rejected
        reason: String,
    },
    /// Exercise id is not part of the active session's exercise list
    #[error("exercise '{exercise_id}' is not part of this workout")]
    UnknownExercise {
        /// Unknown exercise id
        exercise_id: String,
    },
    /// Alternative id is not offered for the exercise
    #[error("alternative '{alternative_id}' is not available for exercise '{exercise_id}'")]
    UnknownAlternative {
        /// Exercise whose alternatives were searched
        exercise_id: String,
        /// Unknown alternative id
        alternative_id: String,
    },
    /// A cardio-only action was requested on a strength exercise
    #[error("exercise '{exercise_id}' is not a cardio exercise")]
    NotCardio {
        /// Exercise at the cursor
        exercise_id: String,
    },
}

impl SessionError {
    /// Create an "invalid set" error
    #[must_use]
    pub fn invalid_set(exercise_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSet {
            exercise_id: exercise_id.into(),
            reason: reason.into(),
        }
    }

    /// Create an "unknown exercise" error
    #[must_use]
    pub fn unknown_exercise(exercise_id: impl Into<String>) -> Self {
        Self::UnknownExercise {
            exercise_id: exercise_id.into(),
        }
    }

    /// Error code used when folding into `AppError`
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::AlreadyActive { .. } => ErrorCode::ResourceLocked,
            Self::AlreadyLogged { .. }
            | Self::NoActiveSession
            | Self::AlreadyFinished { .. }
            | Self::NotLogged { .. }
            | Self::NotCardio { .. } => ErrorCode::InvalidTransition,
            Self::InvalidSet { .. } | Self::EmptyWorkout { .. } => ErrorCode::InvalidInput,
            Self::UnknownExercise { .. } | Self::UnknownAlternative { .. } => {
                ErrorCode::ResourceNotFound
            }
        }
    }
}
