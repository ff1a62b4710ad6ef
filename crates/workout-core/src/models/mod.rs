// ABOUTME: Data model for workout sessions, definitions, and completion results
// ABOUTME: Re-exports the session, workout, cardio, and completion types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Fixed catalog of cardio activities used for synthetic exercises
pub mod cardio;
/// Finalized session statistics handed to the backend
pub mod completion;
/// Mutable session state and per-exercise logs
pub mod session;
/// Read-only workout and exercise definitions
pub mod workout;

pub use cardio::{CardioProfile, CardioType};
pub use completion::{CompletionResult, FeedbackTier};
pub use session::{CardioPlacement, Difficulty, ExerciseLog, Session, SetLog};
pub use workout::{ExerciseAlternative, ExerciseDefinition, Modality, WorkoutDefinition, WorkoutKind};
