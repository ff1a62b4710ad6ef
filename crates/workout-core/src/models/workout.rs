// ABOUTME: Read-only workout and exercise definitions served by the definition provider
// ABOUTME: Immutable for the lifetime of a session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::cardio::CardioType;

/// Training modality of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Sets of weight × reps
    #[default]
    Strength,
    /// Timed activity tracked by the cardio timer
    Cardio,
}

/// Kind of workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    /// Strength workout, may add a synthetic cardio exercise
    #[default]
    Strength,
    /// Cardio-only workout
    Cardio,
}

/// Substitute for a primary exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseAlternative {
    /// Alternative identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Muscle groups worked; falls back to the primary's when empty
    #[serde(default)]
    pub muscle_groups: Vec<String>,
}

/// One exercise of a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Exercise identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Strength or cardio
    #[serde(default)]
    pub modality: Modality,
    /// Prescribed number of sets
    pub target_sets: u32,
    /// Prescribed reps, e.g. "8-12" or "10 min"
    pub target_reps: String,
    /// Prescribed rest between sets
    #[serde(default)]
    pub rest_seconds: u32,
    /// Muscle groups worked
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    /// Substitutes the user may pick instead
    #[serde(default)]
    pub alternatives: Vec<ExerciseAlternative>,
    /// Cross-reference into the educational content catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_ref: Option<String>,
    /// Planned duration for cardio exercises
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Cardio activity for cardio exercises
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardio_type: Option<CardioType>,
}

impl ExerciseDefinition {
    /// Strength exercise with no alternatives
    #[must_use]
    pub fn strength(id: &str, name: &str, target_sets: u32, target_reps: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            modality: Modality::Strength,
            target_sets,
            target_reps: target_reps.to_owned(),
            rest_seconds: 90,
            muscle_groups: Vec::new(),
            alternatives: Vec::new(),
            educational_ref: None,
            duration_minutes: None,
            cardio_type: None,
        }
    }

    /// Builder: set muscle groups
    #[must_use]
    pub fn with_muscle_groups(mut self, groups: &[&str]) -> Self {
        self.muscle_groups = groups.iter().map(|g| (*g).to_owned()).collect();
        self
    }

    /// Builder: add an alternative
    #[must_use]
    pub fn with_alternative(mut self, id: &str, name: &str) -> Self {
        self.alternatives.push(ExerciseAlternative {
            id: id.to_owned(),
            name: name.to_owned(),
            muscle_groups: Vec::new(),
        });
        self
    }

    /// Look up an alternative by id
    #[must_use]
    pub fn alternative(&self, alternative_id: &str) -> Option<&ExerciseAlternative> {
        self.alternatives.iter().find(|alt| alt.id == alternative_id)
    }

    /// Whether the cardio timer applies
    #[must_use]
    pub fn is_cardio(&self) -> bool {
        self.modality == Modality::Cardio
    }
}

/// A workout as served by the definition provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDefinition {
    /// Workout identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Strength or cardio workout
    #[serde(default)]
    pub kind: WorkoutKind,
    /// Ordered exercises
    pub exercises: Vec<ExerciseDefinition>,
    /// XP for completing every exercise
    #[serde(default)]
    pub xp_reward: u32,
    /// Used for duration when a session has no start time
    #[serde(default)]
    pub estimated_duration_minutes: u32,
}

impl WorkoutDefinition {
    /// Only strength workouts accept a cardio preference
    #[must_use]
    pub fn is_cardio_capable(&self) -> bool {
        self.kind == WorkoutKind::Strength
    }
}
