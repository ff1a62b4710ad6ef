// ABOUTME: Completion aggregator computing final statistics when a session ends
// ABOUTME: Duration, valid-set volume, feedback tier, XP, skipped and fatigued body parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Completion Aggregator
//!
//! Runs once per session, either when the sequencer reports completion or
//! when the user finishes early. Exercises neither logged nor skipped are
//! simply absent from the result.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use workout_core::models::{
    CompletionResult, ExerciseLog, FeedbackTier, Session, SetLog, WorkoutDefinition,
};

use crate::constants::feedback;
use crate::sequencer::ExerciseSequence;

/// Finalize a session into its completion result
#[must_use]
pub fn finalize(
    session: &Session,
    sequence: &ExerciseSequence,
    definition: &WorkoutDefinition,
    now: DateTime<Utc>,
) -> CompletionResult {
    let exercise_count = sequence.len();
    let volume = total_volume(&session.exercise_logs);

    CompletionResult {
        session_id: session.session_id.clone(),
        workout_id: session.workout_id.clone(),
        started_at: session.start_time,
        finished_at: now,
        duration_minutes: duration_minutes(
            session.start_time,
            now,
            definition.estimated_duration_minutes,
        ),
        total_volume: volume,
        feedback: feedback_tier(session.exercise_logs.len(), exercise_count, volume),
        xp_earned: session.xp_earned,
        exercises_completed: session.exercise_logs.len(),
        exercise_count,
        skipped_exercises: session.skipped_exercise_ids.clone(),
        body_parts_fatigued: body_parts_fatigued(session, sequence),
        exercise_logs: session.exercise_logs.iter().map(normalize_log).collect(),
    }
}

/// Whole minutes since the start, or the workout estimate without a start time
#[must_use]
pub fn duration_minutes(
    start_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    estimated_minutes: u32,
) -> u32 {
    start_time.map_or(estimated_minutes, |start| {
        u32::try_from((now - start).num_minutes().max(0)).unwrap_or(u32::MAX)
    })
}

/// Sum of `weight × reps` over valid sets only
#[must_use]
pub fn total_volume(logs: &[ExerciseLog]) -> f64 {
    logs.iter().map(ExerciseLog::volume).sum()
}

/// Feedback tier from the share of exercises with a log.
///
/// The rate is rounded to tenths before comparing, so two of three
/// exercises (0.67) counts as 0.7. Every threshold therefore sits 0.05 lower
/// than its nominal value: six of seven (0.857) is excellent and nine of
/// twenty (0.45) is fair.
#[must_use]
pub fn feedback_tier(completed: usize, exercise_count: usize, volume: f64) -> FeedbackTier {
    if exercise_count == 0 {
        return FeedbackTier::Poor;
    }
    let rate = (completed as f64 / exercise_count as f64 * 10.0).round() / 10.0;

    if rate >= feedback::EXCELLENT_RATE && volume > 0.0 {
        FeedbackTier::Excellent
    } else if rate >= feedback::GOOD_RATE {
        FeedbackTier::Good
    } else if rate >= feedback::FAIR_RATE {
        FeedbackTier::Fair
    } else {
        FeedbackTier::Poor
    }
}

/// Muscle groups of every logged exercise, variant-aware, sorted and deduplicated
#[must_use]
pub fn body_parts_fatigued(session: &Session, sequence: &ExerciseSequence) -> Vec<String> {
    session
        .exercise_logs
        .iter()
        .filter_map(|log| sequence.find(&log.exercise_id))
        .flat_map(|exercise| sequence.resolve(session, exercise).muscle_groups.iter())
        .map(|group| group.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sets ordered by set number, blank notes dropped
fn normalize_log(log: &ExerciseLog) -> ExerciseLog {
    let mut sets: Vec<SetLog> = log
        .sets
        .iter()
        .map(|set| SetLog {
            notes: normalize_note(set.notes.as_deref()),
            ..set.clone()
        })
        .collect();
    sets.sort_by_key(|set| set.set_number);

    ExerciseLog {
        sets,
        notes: normalize_note(log.notes.as_deref()),
        ..log.clone()
    }
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToOwned::to_owned)
}
