// ABOUTME: Workout engine facade wiring the session store to sequencing, persistence, and sync
// ABOUTME: Owns the single active session plus its definition, exercise sequence, and cardio timer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Engine
//!
//! Every UI action becomes one synchronous store transition. Progress is then
//! queued for saving in the background, and completion is handed to the sync
//! gateway without waiting for it. Collaborators are injected at
//! construction; nothing is looked up globally.

/// UI event surface and view types
pub mod events;

pub use events::{EngineUpdate, SessionView, UiEvent};

use crate::cardio::{CardioStats, CardioTimer};
use crate::catalog::WorkoutProvider;
use crate::completion;
use crate::config::EngineConfig;
use crate::errors::{AppError, AppResult, SessionError};
use crate::persistence::{FileStore, KeyValueStore, ProgressPersistence};
use crate::sequencer::{self, ExerciseSequence};
use crate::session::{AdvanceOutcome, ExerciseAnnotation, SessionParams, SessionStore};
use crate::sync::{self, DisabledSyncGateway, HttpSyncGateway, SyncGateway};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use workout_core::models::{
    CardioPlacement, CardioType, CompletionResult, Session, SetLog, WorkoutDefinition,
};

/// Per-session state that lives beside the store
#[derive(Debug)]
struct ActiveWorkout {
    definition: Arc<WorkoutDefinition>,
    sequence: ExerciseSequence,
    timer: Option<ExerciseTimer>,
    /// A state-changing transition happened since the session was opened
    progressed: bool,
    /// In-memory state differs from the last queued snapshot
    dirty: bool,
}

#[derive(Debug)]
struct ExerciseTimer {
    exercise_id: String,
    timer: CardioTimer,
}

/// Drives one workout session at a time
pub struct WorkoutEngine {
    provider: Arc<dyn WorkoutProvider>,
    persistence: ProgressPersistence,
    gateway: Arc<dyn SyncGateway>,
    store: SessionStore,
    active: Option<ActiveWorkout>,
    cardio_tick: Duration,
    last_sync: Option<JoinHandle<()>>,
}

impl WorkoutEngine {
    /// Engine over injected collaborators
    #[must_use]
    pub fn new(
        provider: Arc<dyn WorkoutProvider>,
        persistence: ProgressPersistence,
        gateway: Arc<dyn SyncGateway>,
        cardio_tick: Duration,
    ) -> Self {
        Self {
            provider,
            persistence,
            gateway,
            store: SessionStore::new(),
            active: None,
            cardio_tick,
            last_sync: None,
        }
    }

    /// Engine with a file store and, when a sync URL is configured, the HTTP gateway.
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn from_config(config: &EngineConfig, provider: Arc<dyn WorkoutProvider>) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage_dir));
        let gateway: Arc<dyn SyncGateway> = match &config.sync_url {
            Some(url) => Arc::new(HttpSyncGateway::new(url.clone(), config.sync_timeout)?),
            None => Arc::new(DisabledSyncGateway),
        };
        info!(
            storage = %config.storage_dir.display(),
            gateway = gateway.name(),
            "Workout engine configured"
        );
        Ok(Self::new(
            provider,
            ProgressPersistence::new(store),
            gateway,
            config.cardio_tick,
        ))
    }

    /// The active session, if any
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.store.active()
    }

    /// Exercise list of the active session
    #[must_use]
    pub fn sequence(&self) -> Option<&ExerciseSequence> {
        self.active.as_ref().map(|active| &active.sequence)
    }

    /// Open a workout, resuming saved progress when there is any.
    ///
    /// Waits for the definition to become ready. A different active session
    /// is closed first, saving it if it has unsaved progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition is not ready in time or has no exercises
    pub async fn open(&mut self, workout_id: &str) -> AppResult<SessionView> {
        let definition = self.provider.definition(workout_id).await?;

        if let Some(session) = self.store.active() {
            if session.session_id == workout_id {
                return self.view();
            }
            self.close().await;
        }

        let exercise_count = definition.exercises.len();
        let session = match self.persistence.load(workout_id, exercise_count).await {
            Some(snapshot) => {
                info!(workout.id = %workout_id, "Resuming saved workout progress");
                self.store.resume(snapshot)?
            }
            None => {
                info!(workout.id = %workout_id, exercises = exercise_count, "Starting workout session");
                self.store.start(
                    SessionParams {
                        session_id: workout_id.to_owned(),
                        workout_id: workout_id.to_owned(),
                        exercise_count,
                        cardio_capable: definition.is_cardio_capable(),
                        xp_reward: definition.xp_reward,
                    },
                    Utc::now(),
                )?
            }
        };

        let sequence = ExerciseSequence::build(&definition, session);
        self.active = Some(ActiveWorkout {
            definition,
            sequence,
            timer: None,
            progressed: false,
            dirty: false,
        });
        self.view()
    }

    /// Discard saved progress and start the workout from scratch
    ///
    /// # Errors
    ///
    /// Returns an error if the workout cannot be opened
    pub async fn restart(&mut self, workout_id: &str) -> AppResult<SessionView> {
        if self
            .store
            .active()
            .is_some_and(|session| session.session_id == workout_id)
        {
            debug!(workout.id = %workout_id, "Discarding active session for restart");
            self.active = None;
            self.store.close();
        }
        self.persistence.clear(workout_id);
        self.open(workout_id).await
    }

    /// Current progress of the active session
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` when nothing is open
    pub fn view(&self) -> AppResult<SessionView> {
        let (session, active) = self.context()?;
        Ok(SessionView::build(
            session,
            &active.definition,
            &active.sequence,
            active
                .timer
                .as_ref()
                .map(|timer| timer.timer.stats()),
        ))
    }

    /// Record or overwrite a set of an exercise of this session
    ///
    /// # Errors
    ///
    /// Returns `UnknownExercise` for an id outside the sequence and `InvalidSet`
    /// for a malformed set
    pub fn record_set(&mut self, exercise_id: &str, set: SetLog) -> AppResult<SessionView> {
        let name = {
            let (session, active) = self.context()?;
            let exercise = active
                .sequence
                .find(exercise_id)
                .ok_or_else(|| SessionError::unknown_exercise(exercise_id))?;
            active.sequence.resolve(session, exercise).name.to_owned()
        };

        self.store
            .record_set(exercise_id, &name, set, Utc::now())?;
        self.commit_progress();
        self.view()
    }

    /// Record a set of the exercise under the cursor
    ///
    /// # Errors
    ///
    /// Same as [`Self::record_set`]
    pub fn complete_set(&mut self, set: SetLog) -> AppResult<SessionView> {
        let exercise_id = self.current_exercise_id()?;
        self.record_set(&exercise_id, set)
    }

    /// Skip an exercise; skipping twice changes nothing
    ///
    /// # Errors
    ///
    /// Returns `AlreadyLogged` when the exercise has a log
    pub fn skip(&mut self, exercise_id: &str) -> AppResult<SessionView> {
        self.ensure_in_sequence(exercise_id)?;
        if self.store.skip(exercise_id, Utc::now())? {
            self.commit_progress();
        }
        self.view()
    }

    /// Select an alternative for an exercise, or revert to the primary with `None`
    ///
    /// # Errors
    ///
    /// Returns `UnknownAlternative` when the exercise does not offer the alternative
    pub fn select_alternative(
        &mut self,
        exercise_id: &str,
        alternative_id: Option<String>,
    ) -> AppResult<SessionView> {
        {
            let (_, active) = self.context()?;
            let exercise = active
                .sequence
                .find(exercise_id)
                .ok_or_else(|| SessionError::unknown_exercise(exercise_id))?;
            if let Some(alt) = alternative_id.as_deref() {
                if exercise.alternative(alt).is_none() {
                    return Err(SessionError::UnknownAlternative {
                        exercise_id: exercise_id.to_owned(),
                        alternative_id: alt.to_owned(),
                    }
                    .into());
                }
            }
        }

        self.store
            .select_alternative(exercise_id, alternative_id, Utc::now())?;
        self.commit_progress();
        self.view()
    }

    /// Configure cardio placement once; later calls are ignored
    ///
    /// # Errors
    ///
    /// Returns an error when no session is open or it is finished
    pub fn set_cardio_preference(
        &mut self,
        placement: CardioPlacement,
        duration_minutes: Option<u32>,
        cardio_type: Option<CardioType>,
    ) -> AppResult<SessionView> {
        let applied = self.store.set_cardio_preference(
            placement,
            duration_minutes,
            cardio_type,
            Utc::now(),
        )?;

        if applied {
            if let (Some(session), Some(active)) = (self.store.active(), self.active.as_mut()) {
                active.sequence = ExerciseSequence::build(&active.definition, session);
                debug!(
                    session.id = %session.session_id,
                    placement = %placement,
                    exercises = active.sequence.len(),
                    "Cardio preference applied"
                );
            }
            self.commit_progress();
        }
        self.view()
    }

    /// Attach notes, difficulty, or a form score to a logged exercise
    ///
    /// # Errors
    ///
    /// Returns `NotLogged` when the exercise has no log yet
    pub fn annotate(
        &mut self,
        exercise_id: &str,
        annotation: ExerciseAnnotation,
    ) -> AppResult<SessionView> {
        self.store
            .annotate_exercise(exercise_id, annotation, Utc::now())?;
        self.commit_progress();
        self.view()
    }

    /// Move back one exercise. Navigation is not saved on its own.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is open or it is finished
    pub fn go_back(&mut self) -> AppResult<SessionView> {
        self.store.retreat(Utc::now())?;
        self.mark_dirty();
        self.view()
    }

    /// Move forward one exercise.
    ///
    /// On the last exercise this finishes the session when every exercise was
    /// logged or skipped, and otherwise reports what is still pending.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is open or it is finished
    pub fn go_forward(&mut self) -> AppResult<EngineUpdate> {
        match self.store.advance(Utc::now())? {
            AdvanceOutcome::Moved(_) => {
                self.mark_dirty();
                Ok(EngineUpdate::Updated(self.view()?))
            }
            AdvanceOutcome::AtEnd => {
                let (session, active) = self.context()?;
                if sequencer::is_session_complete(session, active.sequence.len()) {
                    return Ok(EngineUpdate::Completed(self.finish()?));
                }
                let remaining = active.sequence.pending_exercise_ids(session);
                debug!(
                    session.id = %session.session_id,
                    pending = remaining.len(),
                    "Cannot complete session with pending exercises"
                );
                Ok(EngineUpdate::Incomplete {
                    view: self.view()?,
                    remaining,
                })
            }
        }
    }

    /// Start the cardio timer for the cardio exercise under the cursor
    ///
    /// # Errors
    ///
    /// Returns `NotCardio` when the current exercise is a strength exercise
    pub fn start_cardio(&mut self) -> AppResult<CardioStats> {
        let tick = self.cardio_tick;
        let (exercise_id, cardio_type) = {
            let (session, active) = self.context()?;
            if session.finished_at.is_some() {
                return Err(SessionError::AlreadyFinished {
                    session_id: session.session_id.clone(),
                }
                .into());
            }
            let exercise = active
                .sequence
                .current(session)
                .ok_or(SessionError::NoActiveSession)?;
            if !exercise.is_cardio() {
                return Err(SessionError::NotCardio {
                    exercise_id: exercise.id.clone(),
                }
                .into());
            }
            (exercise.id.clone(), exercise.cardio_type.unwrap_or_default())
        };

        let active = self
            .active
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        let reuse = active
            .timer
            .as_ref()
            .is_some_and(|timer| timer.exercise_id == exercise_id);
        if !reuse {
            active.timer = Some(ExerciseTimer {
                exercise_id,
                timer: CardioTimer::new(cardio_type.profile(), tick),
            });
        }

        let timer = active
            .timer
            .as_mut()
            .ok_or_else(|| AppError::internal("Cardio timer missing after start"))?;
        timer.timer.start();
        Ok(timer.timer.stats())
    }

    /// Pause the cardio timer, returning its stats if one exists
    pub fn pause_cardio(&mut self) -> Option<CardioStats> {
        let timer = self.active.as_mut()?.timer.as_mut()?;
        timer.timer.pause();
        Some(timer.timer.stats())
    }

    /// Stats of the current cardio timer
    #[must_use]
    pub fn cardio_stats(&self) -> Option<CardioStats> {
        self.active
            .as_ref()?
            .timer
            .as_ref()
            .map(|timer| timer.timer.stats())
    }

    /// Finish the session, possibly early.
    ///
    /// The result is computed and returned immediately. The final snapshot is
    /// queued for saving and the result is submitted to the backend on a
    /// background task that is never awaited here.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` or `AlreadyFinished`
    pub fn finish(&mut self) -> AppResult<CompletionResult> {
        let now = Utc::now();
        if let Some(active) = self.active.as_mut() {
            if let Some(timer) = active.timer.as_mut() {
                timer.timer.pause();
            }
        }

        let session = self.store.mark_finished(now)?;
        let active = self
            .active
            .as_ref()
            .ok_or(SessionError::NoActiveSession)?;
        let result = completion::finalize(session, &active.sequence, &active.definition, now);
        self.persistence.save(session);

        info!(
            session.id = %result.session_id,
            feedback = %result.feedback,
            volume = result.total_volume,
            xp = result.xp_earned,
            duration_minutes = result.duration_minutes,
            "Workout finished"
        );

        self.last_sync = Some(sync::submit_in_background(
            Arc::clone(&self.gateway),
            result.clone(),
        ));
        self.active = None;
        self.store.close();
        Ok(result)
    }

    /// Close the active session without finishing it.
    ///
    /// Pauses any cardio timer, saves unsaved progress, and waits until
    /// queued saves were applied.
    pub async fn close(&mut self) {
        if let Some(mut active) = self.active.take() {
            if let Some(timer) = active.timer.as_mut() {
                timer.timer.pause();
            }
            if active.progressed && active.dirty {
                if let Some(session) = self.store.active() {
                    self.persistence.save(session);
                }
            }
        }
        self.store.close();
        self.persistence.flush().await;
    }

    /// Wait for the most recent background sync to finish
    pub async fn wait_for_sync(&mut self) {
        if let Some(handle) = self.last_sync.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Background sync task failed");
            }
        }
    }

    /// Apply one UI event
    ///
    /// # Errors
    ///
    /// Returns the error of the operation the event maps to
    pub async fn dispatch(&mut self, event: UiEvent) -> AppResult<EngineUpdate> {
        debug!(event = event.name(), "Dispatching UI event");
        match event {
            UiEvent::Open { workout_id } => self.open(&workout_id).await.map(EngineUpdate::Updated),
            UiEvent::Restart { workout_id } => {
                self.restart(&workout_id).await.map(EngineUpdate::Updated)
            }
            UiEvent::CompleteSet {
                exercise_id,
                set_number,
                weight,
                reps,
                notes,
            } => {
                let set = SetLog {
                    notes,
                    ..SetLog::new(set_number, weight, reps)
                };
                let exercise_id = self.target_exercise(exercise_id)?;
                self.record_set(&exercise_id, set).map(EngineUpdate::Updated)
            }
            UiEvent::Skip { exercise_id } => {
                let exercise_id = self.target_exercise(exercise_id)?;
                self.skip(&exercise_id).map(EngineUpdate::Updated)
            }
            UiEvent::GoBack => self.go_back().map(EngineUpdate::Updated),
            UiEvent::GoForward => self.go_forward(),
            UiEvent::SelectAlternative {
                exercise_id,
                alternative_id,
            } => {
                let exercise_id = self.target_exercise(exercise_id)?;
                self.select_alternative(&exercise_id, alternative_id)
                    .map(EngineUpdate::Updated)
            }
            UiEvent::SetCardioPreference {
                placement,
                duration_minutes,
                cardio_type,
            } => self
                .set_cardio_preference(placement, duration_minutes, cardio_type)
                .map(EngineUpdate::Updated),
            UiEvent::Annotate {
                exercise_id,
                notes,
                difficulty,
                form_check_score,
            } => {
                let exercise_id = self.target_exercise(exercise_id)?;
                self.annotate(
                    &exercise_id,
                    ExerciseAnnotation {
                        notes,
                        difficulty,
                        form_check_score,
                    },
                )
                .map(EngineUpdate::Updated)
            }
            UiEvent::StartCardio => {
                let stats = self.start_cardio()?;
                Ok(EngineUpdate::Cardio {
                    view: self.view()?,
                    stats,
                })
            }
            UiEvent::PauseCardio => {
                let view = self.view()?;
                Ok(match self.pause_cardio() {
                    Some(stats) => EngineUpdate::Cardio { view, stats },
                    None => EngineUpdate::Updated(view),
                })
            }
            UiEvent::Finish => self.finish().map(EngineUpdate::Completed),
            UiEvent::Close => {
                self.close().await;
                Ok(EngineUpdate::Closed)
            }
        }
    }

    fn context(&self) -> AppResult<(&Session, &ActiveWorkout)> {
        match (self.store.active(), self.active.as_ref()) {
            (Some(session), Some(active)) => Ok((session, active)),
            _ => Err(SessionError::NoActiveSession.into()),
        }
    }

    fn current_exercise_id(&self) -> AppResult<String> {
        let (session, active) = self.context()?;
        active
            .sequence
            .current(session)
            .map(|exercise| exercise.id.clone())
            .ok_or_else(|| SessionError::NoActiveSession.into())
    }

    fn target_exercise(&self, exercise_id: Option<String>) -> AppResult<String> {
        match exercise_id {
            Some(id) => Ok(id),
            None => self.current_exercise_id(),
        }
    }

    fn ensure_in_sequence(&self, exercise_id: &str) -> AppResult<()> {
        let (_, active) = self.context()?;
        if active.sequence.find(exercise_id).is_none() {
            return Err(SessionError::unknown_exercise(exercise_id).into());
        }
        Ok(())
    }

    fn mark_dirty(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.dirty = true;
        }
    }

    /// Queue a snapshot after a state-changing transition
    fn commit_progress(&mut self) {
        if let (Some(session), Some(active)) = (self.store.active(), self.active.as_mut()) {
            self.persistence.save(session);
            active.progressed = true;
            active.dirty = false;
        }
    }
}

impl std::fmt::Debug for WorkoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutEngine")
            .field("gateway", &self.gateway.name())
            .field("session", &self.store.active().map(|s| &s.session_id))
            .field("cardio_tick", &self.cardio_tick)
            .finish_non_exhaustive()
    }
}
