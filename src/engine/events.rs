// ABOUTME: UI events accepted by the workout engine and the updates it reports back
// ABOUTME: JSON-tagged so front ends and the replay CLI can drive the engine from plain data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cardio::CardioStats;
use crate::sequencer::{self, ExerciseSequence, ExerciseVariant};
use serde::{Deserialize, Serialize};
use workout_core::models::{
    CardioPlacement, CardioType, CompletionResult, Difficulty, Modality, Session,
    WorkoutDefinition,
};

/// User action. Exercise ids default to the exercise under the cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Open a workout, resuming saved progress
    Open {
        /// Workout to open
        workout_id: String,
    },
    /// Clear saved progress and start over
    Restart {
        /// Workout to restart
        workout_id: String,
    },
    /// Record a set
    CompleteSet {
        /// Target exercise
        #[serde(default)]
        exercise_id: Option<String>,
        /// 1-based set number
        set_number: u32,
        /// Weight
        #[serde(default)]
        weight: f64,
        /// Repetitions
        #[serde(default)]
        reps: u32,
        /// Set notes
        #[serde(default)]
        notes: Option<String>,
    },
    /// Skip an exercise
    Skip {
        /// Target exercise
        #[serde(default)]
        exercise_id: Option<String>,
    },
    /// Previous exercise
    GoBack,
    /// Next exercise, or finish on the last one
    GoForward,
    /// Pick or clear an alternative
    SelectAlternative {
        /// Target exercise
        #[serde(default)]
        exercise_id: Option<String>,
        /// Alternative to use, `None` for the primary exercise
        #[serde(default)]
        alternative_id: Option<String>,
    },
    /// Configure cardio placement once
    SetCardioPreference {
        /// Where the cardio block goes
        placement: CardioPlacement,
        /// Minutes of cardio
        #[serde(default)]
        duration_minutes: Option<u32>,
        /// Cardio activity
        #[serde(default)]
        cardio_type: Option<CardioType>,
    },
    /// Annotate a logged exercise
    Annotate {
        /// Target exercise
        #[serde(default)]
        exercise_id: Option<String>,
        /// Notes
        #[serde(default)]
        notes: Option<String>,
        /// Perceived difficulty
        #[serde(default)]
        difficulty: Option<Difficulty>,
        /// Form check score
        #[serde(default)]
        form_check_score: Option<u8>,
    },
    /// Start the cardio timer
    StartCardio,
    /// Pause the cardio timer
    PauseCardio,
    /// Finish now, even with pending exercises
    Finish,
    /// Leave without finishing
    Close,
}

impl UiEvent {
    /// Event name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Restart { .. } => "restart",
            Self::CompleteSet { .. } => "complete_set",
            Self::Skip { .. } => "skip",
            Self::GoBack => "go_back",
            Self::GoForward => "go_forward",
            Self::SelectAlternative { .. } => "select_alternative",
            Self::SetCardioPreference { .. } => "set_cardio_preference",
            Self::Annotate { .. } => "annotate",
            Self::StartCardio => "start_cardio",
            Self::PauseCardio => "pause_cardio",
            Self::Finish => "finish",
            Self::Close => "close",
        }
    }
}

/// What changed after an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EngineUpdate {
    /// Session state after the transition
    Updated(SessionView),
    /// Forward navigation on the last exercise with exercises still pending
    Incomplete {
        /// Unchanged session state
        view: SessionView,
        /// Exercises neither logged nor skipped
        remaining: Vec<String>,
    },
    /// Cardio timer state
    Cardio {
        /// Session state
        view: SessionView,
        /// Timer readings
        stats: CardioStats,
    },
    /// Session finished; the result is final locally
    Completed(CompletionResult),
    /// Session closed without finishing
    Closed,
}

/// Read model of the active session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// Session id
    pub session_id: String,
    /// Workout id
    pub workout_id: String,
    /// Workout display name
    pub workout_name: String,
    /// Cursor position
    pub current_index: usize,
    /// Exercises including synthetic cardio
    pub exercise_count: usize,
    /// Exercise under the cursor
    pub current_exercise_id: Option<String>,
    /// Display name of the variant in use
    pub current_exercise_name: Option<String>,
    /// Variant in use
    pub current_variant: Option<ExerciseVariant>,
    /// Strength or cardio
    pub current_modality: Option<Modality>,
    /// Progress in percent
    pub completion_percentage: f64,
    /// XP so far
    pub xp_earned: u32,
    /// Valid-set volume so far
    pub total_volume: f64,
    /// Exercises with a log
    pub logged_exercises: usize,
    /// Skipped exercise ids
    pub skipped_exercise_ids: Vec<String>,
    /// Every exercise logged or skipped with the cursor on the last one
    pub is_complete: bool,
    /// Session was finished and only accepts a restart
    pub finished: bool,
    /// Cardio timer readings, when a timer exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardio: Option<CardioStats>,
}

impl SessionView {
    pub(crate) fn build(
        session: &Session,
        definition: &WorkoutDefinition,
        sequence: &ExerciseSequence,
        cardio: Option<CardioStats>,
    ) -> Self {
        let current = sequence
            .current(session)
            .map(|exercise| sequence.resolve(session, exercise));

        Self {
            session_id: session.session_id.clone(),
            workout_id: session.workout_id.clone(),
            workout_name: definition.name.clone(),
            current_index: session.current_exercise_index,
            exercise_count: sequence.len(),
            current_exercise_id: current.as_ref().map(|ex| ex.definition.id.clone()),
            current_exercise_name: current.as_ref().map(|ex| ex.name.to_owned()),
            current_variant: current.as_ref().map(|ex| ex.variant.clone()),
            current_modality: sequencer::current_modality(sequence, session),
            completion_percentage: session.completion_percentage,
            xp_earned: session.xp_earned,
            total_volume: session.total_volume,
            logged_exercises: session.exercise_logs.len(),
            skipped_exercise_ids: session.skipped_exercise_ids.clone(),
            is_complete: sequencer::is_session_complete(session, sequence.len()),
            finished: session.finished_at.is_some(),
            cardio,
        }
    }
}
