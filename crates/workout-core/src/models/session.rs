// ABOUTME: Session state owned by the session store while a workout is active
// ABOUTME: Includes exercise logs, set logs, skip tracking, and cardio placement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::cardio::CardioType;

/// Where the synthetic cardio exercise goes in a strength session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardioPlacement {
    /// No cardio added
    #[default]
    None,
    /// Cardio is the first exercise
    Before,
    /// Cardio is the last exercise
    After,
}

impl fmt::Display for CardioPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// Perceived difficulty of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Could have done much more
    Easy,
    /// Challenging but comfortable
    Moderate,
    /// Close to the limit
    Hard,
    /// Nothing left
    Max,
}

/// One performed set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLog {
    /// 1-based set number within the exercise
    pub set_number: u32,
    /// Load in kilograms
    pub weight: f64,
    /// Repetitions performed
    pub reps: u32,
    /// Whether the user marked the set done
    pub completed: bool,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SetLog {
    /// Completed set with the given load and reps
    #[must_use]
    pub const fn new(set_number: u32, weight: f64, reps: u32) -> Self {
        Self {
            set_number,
            weight,
            reps,
            completed: true,
            notes: None,
        }
    }

    /// A set counts toward volume only with both weight and reps above zero
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weight > 0.0 && self.reps > 0
    }

    /// `weight × reps` for valid sets, zero otherwise
    #[must_use]
    pub fn volume(&self) -> f64 {
        if self.is_valid() {
            self.weight * f64::from(self.reps)
        } else {
            0.0
        }
    }
}

/// Recorded performance for one exercise within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Log identifier
    pub id: String,
    /// Exercise this log belongs to
    pub exercise_id: String,
    /// Display name at the time of logging (alternative-aware)
    pub exercise_name: String,
    /// Owning session
    pub session_id: String,
    /// When the first set was recorded
    pub date: DateTime<Utc>,
    /// Sets ordered by insertion
    pub sets: Vec<SetLog>,
    /// Exercise-level notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Perceived difficulty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Form check score, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_check_score: Option<u8>,
}

impl ExerciseLog {
    /// Sum of valid set volume
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(SetLog::volume).sum()
    }

    /// Insert or overwrite the set with the same set number
    pub fn upsert_set(&mut self, set: SetLog) {
        match self
            .sets
            .iter_mut()
            .find(|existing| existing.set_number == set.set_number)
        {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }
}

/// The single active workout session.
///
/// Mutated only by the session store; everything else reads snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier, also the persistence key
    pub session_id: String,
    /// Workout definition this session runs
    pub workout_id: String,
    /// Exercise count of the workout definition, excluding synthetic cardio
    pub exercise_count: usize,
    /// Cursor, always within `[0, effective_exercise_count - 1]`
    pub current_exercise_index: usize,
    /// Logs unique by exercise id, in insertion order
    pub exercise_logs: Vec<ExerciseLog>,
    /// Skipped exercise ids, in skip order, disjoint from logged ids
    pub skipped_exercise_ids: Vec<String>,
    /// XP accumulated so far
    pub xp_earned: u32,
    /// XP for completing every exercise of the workout
    pub xp_reward: u32,
    /// Running valid-set volume.
    ///
    /// Recomputed from the logs on every transition, so overwriting a set
    /// with a lighter one lowers it.
    pub total_volume: f64,
    /// Derived progress, 0-100
    pub completion_percentage: f64,
    /// Set once when the session starts
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Touched by every mutation
    pub last_updated: DateTime<Utc>,
    /// Exercise id to chosen alternative id
    #[serde(default)]
    pub selected_alternatives: BTreeMap<String, String>,
    /// Strength sessions may add a synthetic cardio exercise
    pub cardio_capable: bool,
    /// Cardio preference was already configured
    #[serde(default)]
    pub cardio_configured: bool,
    /// Cardio placement
    #[serde(default)]
    pub cardio_preference: CardioPlacement,
    /// Cardio duration in minutes
    #[serde(default)]
    pub cardio_duration: Option<u32>,
    /// Cardio activity used for the synthetic exercise
    #[serde(default)]
    pub selected_cardio_type: Option<CardioType>,
    /// Set when the session was finalized
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Number of exercises including the synthetic cardio exercise, if any
    #[must_use]
    pub fn effective_exercise_count(&self) -> usize {
        if self.has_synthetic_cardio() {
            self.exercise_count + 1
        } else {
            self.exercise_count
        }
    }

    /// XP awarded for each completed exercise, `⌊xp_reward / exercise count⌋`
    #[must_use]
    pub fn xp_per_exercise(&self) -> u32 {
        match u32::try_from(self.effective_exercise_count()) {
            Ok(count) if count > 0 => self.xp_reward / count,
            _ => 0,
        }
    }

    /// Whether the sequencer inserts a cardio exercise
    #[must_use]
    pub fn has_synthetic_cardio(&self) -> bool {
        self.cardio_capable && self.cardio_preference != CardioPlacement::None
    }

    /// Log for the exercise, if any
    #[must_use]
    pub fn log_for(&self, exercise_id: &str) -> Option<&ExerciseLog> {
        self.exercise_logs
            .iter()
            .find(|log| log.exercise_id == exercise_id)
    }

    /// Whether the exercise has a log
    #[must_use]
    pub fn is_logged(&self, exercise_id: &str) -> bool {
        self.log_for(exercise_id).is_some()
    }

    /// Whether the exercise was skipped
    #[must_use]
    pub fn is_skipped(&self, exercise_id: &str) -> bool {
        self.skipped_exercise_ids.iter().any(|id| id == exercise_id)
    }

    /// Exercises either logged or skipped
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.exercise_logs.len() + self.skipped_exercise_ids.len()
    }
}
