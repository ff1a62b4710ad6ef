// ABOUTME: Session store holding the single active workout session
// ABOUTME: Exposes synchronous transitions; the only code allowed to mutate session state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;
use workout_core::errors::SessionError;
use workout_core::models::{
    CardioPlacement, CardioType, Difficulty, ExerciseLog, Session, SetLog,
};

use crate::sequencer;

/// Parameters for starting a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    /// Session identifier, also the persistence key
    pub session_id: String,
    /// Workout being run
    pub workout_id: String,
    /// Exercises in the workout definition
    pub exercise_count: usize,
    /// Strength workouts accept a cardio preference
    pub cardio_capable: bool,
    /// XP for completing the whole workout
    pub xp_reward: u32,
}

/// Outcome of moving the cursor forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Cursor moved to this index
    Moved(usize),
    /// Cursor is already on the last exercise
    AtEnd,
}

/// Optional exercise-level annotations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseAnnotation {
    /// Exercise notes
    pub notes: Option<String>,
    /// Perceived difficulty
    pub difficulty: Option<Difficulty>,
    /// Form check score, 0-100
    pub form_check_score: Option<u8>,
}

/// Owner of the single active session.
///
/// Callers hold the store explicitly; there is no global instance. All
/// transitions are synchronous and only touch in-memory state.
#[derive(Debug, Default)]
pub struct SessionStore {
    active: Option<Session>,
}

impl SessionStore {
    /// Empty store
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// The active session, if any
    #[must_use]
    pub const fn active(&self) -> Option<&Session> {
        self.active.as_ref()
    }

    /// Whether a session is active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start a new session.
    ///
    /// Starting the id that is already active returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActive` when a different session is active, and
    /// `EmptyWorkout` for a workout without exercises
    pub fn start(&mut self, params: SessionParams, now: DateTime<Utc>) -> Result<&Session, SessionError> {
        self.ensure_replaceable(&params.session_id)?;
        if params.exercise_count == 0 {
            return Err(SessionError::EmptyWorkout {
                workout_id: params.workout_id,
            });
        }

        if self.active.is_none() {
            debug!(session.id = %params.session_id, workout.id = %params.workout_id, "Starting session");
            self.active = Some(Session {
                session_id: params.session_id,
                workout_id: params.workout_id,
                exercise_count: params.exercise_count,
                current_exercise_index: 0,
                exercise_logs: Vec::new(),
                skipped_exercise_ids: Vec::new(),
                xp_earned: 0,
                xp_reward: params.xp_reward,
                total_volume: 0.0,
                completion_percentage: 0.0,
                start_time: Some(now),
                last_updated: now,
                selected_alternatives: BTreeMap::new(),
                cardio_capable: params.cardio_capable,
                cardio_configured: false,
                cardio_preference: CardioPlacement::None,
                cardio_duration: None,
                selected_cardio_type: None,
                finished_at: None,
            });
        }
        self.active.as_ref().ok_or(SessionError::NoActiveSession)
    }

    /// Install a previously saved snapshot as the active session.
    ///
    /// The cursor is clamped into range and derived progress recomputed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActive` when a different session is active, or
    /// `EmptyWorkout` when the workout no longer has any exercises
    pub fn resume(&mut self, mut snapshot: Session) -> Result<&Session, SessionError> {
        self.ensure_replaceable(&snapshot.session_id)?;
        if snapshot.exercise_count == 0 {
            return Err(SessionError::EmptyWorkout {
                workout_id: snapshot.workout_id,
            });
        }
        clamp_cursor(&mut snapshot);
        refresh_derived(&mut snapshot);
        debug!(
            session.id = %snapshot.session_id,
            index = snapshot.current_exercise_index,
            logged = snapshot.exercise_logs.len(),
            "Resuming session"
        );
        self.active = Some(snapshot);
        self.active.as_ref().ok_or(SessionError::NoActiveSession)
    }

    /// Explicitly replace the active session, returning the outgoing one
    pub fn replace(&mut self, session: Session) -> Option<Session> {
        self.active.replace(session)
    }

    /// Remove the active session from memory
    pub fn close(&mut self) -> Option<Session> {
        let closed = self.active.take();
        if let Some(session) = &closed {
            debug!(session.id = %session.session_id, "Closing session");
        }
        closed
    }

    /// Record or overwrite a set.
    ///
    /// Creates the exercise log on the first set and awards the per-exercise
    /// XP. Re-recording a set number overwrites it. Recording against a
    /// skipped exercise un-skips it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSet` for a zero set number or a negative or non-finite weight
    pub fn record_set(
        &mut self,
        exercise_id: &str,
        exercise_name: &str,
        set: SetLog,
        now: DateTime<Utc>,
    ) -> Result<&ExerciseLog, SessionError> {
        validate_set(exercise_id, &set)?;
        let session = self.active_mut()?;

        session.skipped_exercise_ids.retain(|id| id != exercise_id);

        let position = match session
            .exercise_logs
            .iter()
            .position(|log| log.exercise_id == exercise_id)
        {
            Some(position) => position,
            None => {
                session.exercise_logs.push(ExerciseLog {
                    id: Uuid::new_v4().to_string(),
                    exercise_id: exercise_id.to_owned(),
                    exercise_name: exercise_name.to_owned(),
                    session_id: session.session_id.clone(),
                    date: now,
                    sets: Vec::new(),
                    notes: None,
                    difficulty: None,
                    form_check_score: None,
                });
                session.xp_earned = session
                    .xp_earned
                    .saturating_add(session.xp_per_exercise());
                session.exercise_logs.len() - 1
            }
        };

        debug!(
            session.id = %session.session_id,
            exercise.id = %exercise_id,
            set = set.set_number,
            "Recording set"
        );
        session.exercise_logs[position].upsert_set(set);
        touch(session, now);
        Ok(&session.exercise_logs[position])
    }

    /// Attach notes, difficulty, or a form score to a logged exercise
    ///
    /// # Errors
    ///
    /// Returns `NotLogged` when the exercise has no log yet
    pub fn annotate_exercise(
        &mut self,
        exercise_id: &str,
        annotation: ExerciseAnnotation,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let session = self.active_mut()?;
        let log = session
            .exercise_logs
            .iter_mut()
            .find(|log| log.exercise_id == exercise_id)
            .ok_or_else(|| SessionError::NotLogged {
                exercise_id: exercise_id.to_owned(),
            })?;

        if annotation.notes.is_some() {
            log.notes = annotation.notes;
        }
        if annotation.difficulty.is_some() {
            log.difficulty = annotation.difficulty;
        }
        if let Some(score) = annotation.form_check_score {
            log.form_check_score = Some(score.min(100));
        }
        touch(session, now);
        Ok(())
    }

    /// Skip an exercise. Returns `false` when it was already skipped.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyLogged` when the exercise has a log
    pub fn skip(&mut self, exercise_id: &str, now: DateTime<Utc>) -> Result<bool, SessionError> {
        let session = self.active_mut()?;
        if session.is_logged(exercise_id) {
            return Err(SessionError::AlreadyLogged {
                exercise_id: exercise_id.to_owned(),
            });
        }
        if session.is_skipped(exercise_id) {
            return Ok(false);
        }

        debug!(session.id = %session.session_id, exercise.id = %exercise_id, "Skipping exercise");
        session.skipped_exercise_ids.push(exercise_id.to_owned());
        touch(session, now);
        Ok(true)
    }

    /// Select an alternative, or revert to the primary with `None`
    ///
    /// # Errors
    ///
    /// Returns an error when no session is active or it is finished
    pub fn select_alternative(
        &mut self,
        exercise_id: &str,
        alternative_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let session = self.active_mut()?;
        match alternative_id {
            Some(alt) => {
                session
                    .selected_alternatives
                    .insert(exercise_id.to_owned(), alt);
            }
            None => {
                session.selected_alternatives.remove(exercise_id);
            }
        }
        touch(session, now);
        Ok(())
    }

    /// Configure cardio once, before anything is logged or skipped.
    ///
    /// Returns `false` and changes nothing when cardio was already configured,
    /// the session is not cardio capable, or progress was already made.
    /// A `Before` placement shifts the cursor so it stays on the same exercise.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is active or it is finished
    pub fn set_cardio_preference(
        &mut self,
        placement: CardioPlacement,
        duration_minutes: Option<u32>,
        cardio_type: Option<CardioType>,
        now: DateTime<Utc>,
    ) -> Result<bool, SessionError> {
        let session = self.active_mut()?;
        if session.cardio_configured || !session.cardio_capable || session.resolved_count() > 0 {
            debug!(session.id = %session.session_id, "Ignoring repeated cardio preference");
            return Ok(false);
        }

        session.cardio_configured = true;
        session.cardio_preference = placement;
        if placement != CardioPlacement::None {
            session.cardio_duration = duration_minutes;
            session.selected_cardio_type = Some(cardio_type.unwrap_or_default());
        }
        if placement == CardioPlacement::Before && session.current_exercise_index > 0 {
            session.current_exercise_index += 1;
        }
        touch(session, now);
        Ok(true)
    }

    /// Move the cursor forward; at the last exercise the cursor stays and
    /// `AtEnd` is returned
    ///
    /// # Errors
    ///
    /// Returns an error when no session is active or it is finished
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        let session = self.active_mut()?;
        if session.current_exercise_index + 1 >= session.effective_exercise_count() {
            return Ok(AdvanceOutcome::AtEnd);
        }
        session.current_exercise_index += 1;
        touch(session, now);
        Ok(AdvanceOutcome::Moved(session.current_exercise_index))
    }

    /// Move the cursor back, stopping at the first exercise
    ///
    /// # Errors
    ///
    /// Returns an error when no session is active or it is finished
    pub fn retreat(&mut self, now: DateTime<Utc>) -> Result<usize, SessionError> {
        let session = self.active_mut()?;
        if session.current_exercise_index > 0 {
            session.current_exercise_index -= 1;
            touch(session, now);
        }
        Ok(session.current_exercise_index)
    }

    /// Stamp the session as finished; later transitions are rejected
    ///
    /// # Errors
    ///
    /// Returns an error when no session is active or it is already finished
    pub fn mark_finished(&mut self, now: DateTime<Utc>) -> Result<&Session, SessionError> {
        let session = self.active_mut()?;
        session.finished_at = Some(now);
        touch(session, now);
        Ok(session)
    }

    fn active_mut(&mut self) -> Result<&mut Session, SessionError> {
        let session = self.active.as_mut().ok_or(SessionError::NoActiveSession)?;
        if session.finished_at.is_some() {
            return Err(SessionError::AlreadyFinished {
                session_id: session.session_id.clone(),
            });
        }
        Ok(session)
    }

    fn ensure_replaceable(&self, requested: &str) -> Result<(), SessionError> {
        match &self.active {
            Some(active) if active.session_id != requested => Err(SessionError::AlreadyActive {
                active: active.session_id.clone(),
                requested: requested.to_owned(),
            }),
            _ => Ok(()),
        }
    }
}

fn validate_set(exercise_id: &str, set: &SetLog) -> Result<(), SessionError> {
    if set.set_number == 0 {
        return Err(SessionError::invalid_set(exercise_id, "set numbers start at 1"));
    }
    if !set.weight.is_finite() || set.weight < 0.0 {
        return Err(SessionError::invalid_set(
            exercise_id,
            format!("weight must be a non-negative number, got {}", set.weight),
        ));
    }
    Ok(())
}

/// Keep the cursor within `[0, effective_exercise_count - 1]`
pub(crate) fn clamp_cursor(session: &mut Session) {
    let last = session.effective_exercise_count().saturating_sub(1);
    if session.current_exercise_index > last {
        session.current_exercise_index = last;
    }
}

fn refresh_derived(session: &mut Session) {
    session.total_volume = session.exercise_logs.iter().map(ExerciseLog::volume).sum();
    session.completion_percentage =
        sequencer::completion_percentage(session, session.effective_exercise_count());
}

fn touch(session: &mut Session, now: DateTime<Utc>) {
    refresh_derived(session);
    session.last_updated = now;
}
