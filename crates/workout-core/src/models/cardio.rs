// ABOUTME: Fixed cardio catalog backing synthetic cardio exercises and the cardio timer
// ABOUTME: Maps each cardio type to display name, energy cost, and target heart rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::workout::{ExerciseDefinition, Modality};

/// Default synthetic cardio duration when the user does not pick one
pub const DEFAULT_CARDIO_MINUTES: u32 = 10;

/// Prefix of synthetic cardio exercise ids
pub const SYNTHETIC_CARDIO_PREFIX: &str = "cardio-";

/// Cardio activities offered before or after a strength session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardioType {
    /// Treadmill walk or run
    #[default]
    Treadmill,
    /// Stationary bike
    StationaryBike,
    /// Rowing machine
    Rowing,
    /// Elliptical trainer
    Elliptical,
    /// Stair climber
    StairClimber,
    /// Jump rope
    JumpRope,
}

/// Static catalog entry for a cardio type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardioProfile {
    /// Catalog key
    pub kind: CardioType,
    /// Display name
    pub name: &'static str,
    /// Energy cost at moderate intensity
    pub kcal_per_minute: f64,
    /// Steady-state heart rate the simulation ramps toward
    pub target_heart_rate: u32,
    /// Muscle groups worked
    pub muscle_groups: &'static [&'static str],
}

impl CardioType {
    /// Catalog entry
    #[must_use]
    pub const fn profile(self) -> CardioProfile {
        match self {
            Self::Treadmill => CardioProfile {
                kind: self,
                name: "Treadmill",
                kcal_per_minute: 10.0,
                target_heart_rate: 140,
                muscle_groups: &["quads", "hamstrings", "calves"],
            },
            Self::StationaryBike => CardioProfile {
                kind: self,
                name: "Stationary Bike",
                kcal_per_minute: 8.0,
                target_heart_rate: 130,
                muscle_groups: &["quads", "glutes"],
            },
            Self::Rowing => CardioProfile {
                kind: self,
                name: "Rowing Machine",
                kcal_per_minute: 9.0,
                target_heart_rate: 135,
                muscle_groups: &["back", "quads", "biceps"],
            },
            Self::Elliptical => CardioProfile {
                kind: self,
                name: "Elliptical",
                kcal_per_minute: 8.5,
                target_heart_rate: 130,
                muscle_groups: &["quads", "glutes", "shoulders"],
            },
            Self::StairClimber => CardioProfile {
                kind: self,
                name: "Stair Climber",
                kcal_per_minute: 11.0,
                target_heart_rate: 145,
                muscle_groups: &["glutes", "quads", "calves"],
            },
            Self::JumpRope => CardioProfile {
                kind: self,
                name: "Jump Rope",
                kcal_per_minute: 12.0,
                target_heart_rate: 155,
                muscle_groups: &["calves", "shoulders"],
            },
        }
    }

    /// Id of the synthetic exercise built from this type
    #[must_use]
    pub fn exercise_id(self) -> String {
        format!("{SYNTHETIC_CARDIO_PREFIX}{self}")
    }

    /// Synthetic exercise inserted into a strength session
    #[must_use]
    pub fn synthetic_exercise(self, duration_minutes: Option<u32>) -> ExerciseDefinition {
        let profile = self.profile();
        let minutes = duration_minutes.unwrap_or(DEFAULT_CARDIO_MINUTES);
        ExerciseDefinition {
            id: self.exercise_id(),
            name: profile.name.to_owned(),
            modality: Modality::Cardio,
            target_sets: 1,
            target_reps: format!("{minutes} min"),
            rest_seconds: 0,
            muscle_groups: profile
                .muscle_groups
                .iter()
                .map(|g| (*g).to_owned())
                .collect(),
            alternatives: Vec::new(),
            educational_ref: None,
            duration_minutes: Some(minutes),
            cardio_type: Some(self),
        }
    }
}

impl fmt::Display for CardioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Treadmill => "treadmill",
            Self::StationaryBike => "stationary_bike",
            Self::Rowing => "rowing",
            Self::Elliptical => "elliptical",
            Self::StairClimber => "stair_climber",
            Self::JumpRope => "jump_rope",
        };
        write!(f, "{s}")
    }
}
