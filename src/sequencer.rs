// ABOUTME: Exercise sequencer deciding ordering, progress, completion, and the current variant
// ABOUTME: Inserts the synthetic cardio exercise that every other component then consumes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Sequencer
//!
//! Pure functions over a [`Session`] snapshot. The sequencer never mutates
//! session state; the store calls back into it to refresh derived progress.

use serde::Serialize;
use workout_core::models::{
    CardioPlacement, ExerciseDefinition, Modality, Session, WorkoutDefinition,
};

/// Which version of an exercise is in use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseVariant {
    /// The exercise as defined by the workout
    Primary,
    /// A substitute picked by the user
    Alternative {
        /// Chosen alternative
        alternative_id: String,
    },
    /// Cardio exercise inserted from the cardio preference
    SyntheticCardio,
}

/// Exercise after alternative resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExercise<'a> {
    /// Definition the resolution started from
    pub definition: &'a ExerciseDefinition,
    /// Variant in use
    pub variant: ExerciseVariant,
    /// Display name of the variant in use
    pub name: &'a str,
    /// Muscle groups of the variant in use
    pub muscle_groups: &'a [String],
}

/// Ordered exercise list of a session, synthetic cardio included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSequence {
    exercises: Vec<ExerciseDefinition>,
    synthetic_index: Option<usize>,
}

impl ExerciseSequence {
    /// Build the exercise list for a session.
    ///
    /// Strength sessions with a cardio preference get one synthetic cardio
    /// exercise, first for `before` and last for `after`.
    #[must_use]
    pub fn build(definition: &WorkoutDefinition, session: &Session) -> Self {
        let mut exercises = definition.exercises.clone();
        let mut synthetic_index = None;

        if session.has_synthetic_cardio() {
            let cardio = session
                .selected_cardio_type
                .unwrap_or_default()
                .synthetic_exercise(session.cardio_duration);
            match session.cardio_preference {
                CardioPlacement::Before => {
                    exercises.insert(0, cardio);
                    synthetic_index = Some(0);
                }
                CardioPlacement::After => {
                    exercises.push(cardio);
                    synthetic_index = Some(exercises.len() - 1);
                }
                CardioPlacement::None => {}
            }
        }

        Self {
            exercises,
            synthetic_index,
        }
    }

    /// Number of exercises
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Exercise at position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ExerciseDefinition> {
        self.exercises.get(index)
    }

    /// Exercise by id
    #[must_use]
    pub fn find(&self, exercise_id: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|ex| ex.id == exercise_id)
    }

    /// Position of an exercise
    #[must_use]
    pub fn index_of(&self, exercise_id: &str) -> Option<usize> {
        self.exercises.iter().position(|ex| ex.id == exercise_id)
    }

    /// Exercise under the session cursor
    #[must_use]
    pub fn current(&self, session: &Session) -> Option<&ExerciseDefinition> {
        self.get(session.current_exercise_index)
    }

    /// Whether the exercise at `index` was synthesized from the cardio preference
    #[must_use]
    pub fn is_synthetic(&self, index: usize) -> bool {
        self.synthetic_index == Some(index)
    }

    /// Resolve the variant in use for an exercise of this sequence
    #[must_use]
    pub fn resolve<'a>(
        &'a self,
        session: &Session,
        exercise: &'a ExerciseDefinition,
    ) -> ResolvedExercise<'a> {
        let synthetic = self
            .synthetic_index
            .and_then(|i| self.exercises.get(i))
            .is_some_and(|ex| ex.id == exercise.id);
        if synthetic {
            return ResolvedExercise {
                definition: exercise,
                variant: ExerciseVariant::SyntheticCardio,
                name: &exercise.name,
                muscle_groups: &exercise.muscle_groups,
            };
        }

        match selected_alternative(session, exercise) {
            Some(alt) => ResolvedExercise {
                definition: exercise,
                variant: ExerciseVariant::Alternative {
                    alternative_id: alt.id.clone(),
                },
                name: &alt.name,
                muscle_groups: if alt.muscle_groups.is_empty() {
                    &exercise.muscle_groups
                } else {
                    &alt.muscle_groups
                },
            },
            None => ResolvedExercise {
                definition: exercise,
                variant: ExerciseVariant::Primary,
                name: &exercise.name,
                muscle_groups: &exercise.muscle_groups,
            },
        }
    }

    /// Ids of exercises neither logged nor skipped, in order
    #[must_use]
    pub fn pending_exercise_ids(&self, session: &Session) -> Vec<String> {
        self.exercises
            .iter()
            .filter(|ex| !session.is_logged(&ex.id) && !session.is_skipped(&ex.id))
            .map(|ex| ex.id.clone())
            .collect()
    }
}

fn selected_alternative<'a>(
    session: &Session,
    exercise: &'a ExerciseDefinition,
) -> Option<&'a workout_core::models::ExerciseAlternative> {
    session
        .selected_alternatives
        .get(&exercise.id)
        .and_then(|alt_id| exercise.alternative(alt_id))
}

/// Progress in percent.
///
/// Uses the larger of the cursor position and the number of resolved
/// exercises, so progress does not regress on back-navigation.
#[must_use]
pub fn completion_percentage(session: &Session, exercise_count: usize) -> f64 {
    if exercise_count == 0 {
        return 0.0;
    }
    let seen = session
        .current_exercise_index
        .max(session.resolved_count());
    (seen as f64 / exercise_count as f64 * 100.0).min(100.0)
}

/// Display name of the exercise, alternative-aware
#[must_use]
pub fn current_exercise_name<'a>(session: &Session, exercise: &'a ExerciseDefinition) -> &'a str {
    selected_alternative(session, exercise).map_or(exercise.name.as_str(), |alt| alt.name.as_str())
}

/// A session is complete only when the cursor is on the last exercise and
/// every exercise was logged or skipped
#[must_use]
pub fn is_session_complete(session: &Session, exercise_count: usize) -> bool {
    session.current_exercise_index + 1 >= exercise_count
        && session.resolved_count() >= exercise_count
}

/// Modality of the exercise under the cursor
#[must_use]
pub fn current_modality(sequence: &ExerciseSequence, session: &Session) -> Option<Modality> {
    sequence.current(session).map(|ex| ex.modality)
}
