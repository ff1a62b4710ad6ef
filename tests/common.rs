// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides logging setup, workout fixtures, engine wiring, and scripted sync gateways
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `workout_engine`

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use workout_engine::catalog::WorkoutCatalog;
use workout_engine::engine::WorkoutEngine;
use workout_engine::errors::{AppError, AppResult};
use workout_engine::models::{
    CardioType, CompletionResult, ExerciseDefinition, WorkoutDefinition, WorkoutKind,
};
use workout_engine::persistence::{InMemoryStore, KeyValueStore, ProgressPersistence};
use workout_engine::session::SessionParams;
use workout_engine::sync::SyncGateway;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Three strength exercises; bench press offers a dumbbell alternative
pub fn push_day() -> WorkoutDefinition {
    WorkoutDefinition {
        id: "push-day".to_owned(),
        name: "Push Day".to_owned(),
        kind: WorkoutKind::Strength,
        exercises: vec![
            ExerciseDefinition::strength("bench-press", "Bench Press", 3, "8-10")
                .with_muscle_groups(&["Chest", "Triceps"])
                .with_alternative("db-bench", "Dumbbell Bench Press"),
            ExerciseDefinition::strength("overhead-press", "Overhead Press", 3, "8")
                .with_muscle_groups(&["Shoulders", "Triceps"]),
            ExerciseDefinition::strength("dips", "Tricep Dips", 2, "12")
                .with_muscle_groups(&["Triceps"]),
        ],
        xp_reward: 90,
        estimated_duration_minutes: 45,
    }
}

/// Two strength exercises
pub fn leg_day() -> WorkoutDefinition {
    WorkoutDefinition {
        id: "leg-day".to_owned(),
        name: "Leg Day".to_owned(),
        kind: WorkoutKind::Strength,
        exercises: vec![
            ExerciseDefinition::strength("squat", "Back Squat", 4, "6")
                .with_muscle_groups(&["Quads", "Glutes"]),
            ExerciseDefinition::strength("lunge", "Walking Lunge", 3, "10")
                .with_muscle_groups(&["Quads", "Hamstrings"]),
        ],
        xp_reward: 100,
        estimated_duration_minutes: 40,
    }
}

/// Cardio-only workout with one rowing block
pub fn rowing_session() -> WorkoutDefinition {
    let mut row = CardioType::Rowing.synthetic_exercise(Some(20));
    row.id = "row-intervals".to_owned();
    WorkoutDefinition {
        id: "rowing".to_owned(),
        name: "Rowing Intervals".to_owned(),
        kind: WorkoutKind::Cardio,
        exercises: vec![row],
        xp_reward: 50,
        estimated_duration_minutes: 20,
    }
}

/// Store parameters for a definition, keyed by the workout id
pub fn params_for(definition: &WorkoutDefinition) -> SessionParams {
    SessionParams {
        session_id: definition.id.clone(),
        workout_id: definition.id.clone(),
        exercise_count: definition.exercises.len(),
        cardio_capable: definition.is_cardio_capable(),
        xp_reward: definition.xp_reward,
    }
}

/// Gateway remembering every submission, optionally failing each one
#[derive(Default)]
pub struct RecordingGateway {
    pub submitted: Mutex<Vec<CompletionResult>>,
    pub fail: bool,
}

impl RecordingGateway {
    pub fn failing() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl SyncGateway for RecordingGateway {
    async fn submit(&self, result: &CompletionResult) -> AppResult<()> {
        self.submitted.lock().unwrap().push(result.clone());
        if self.fail {
            return Err(AppError::external_service("test backend", "rejected"));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Engine wired to in-memory collaborators
pub struct TestEngine {
    pub engine: WorkoutEngine,
    pub catalog: WorkoutCatalog,
    pub store: InMemoryStore,
    pub gateway: Arc<RecordingGateway>,
}

/// Engine over a fresh in-memory store with every fixture published
pub fn test_engine() -> TestEngine {
    test_engine_with(InMemoryStore::new(), Arc::new(RecordingGateway::default()))
}

/// Engine over the given store and gateway with every fixture published
pub fn test_engine_with(store: InMemoryStore, gateway: Arc<RecordingGateway>) -> TestEngine {
    init_test_logging();
    let catalog = WorkoutCatalog::new(Duration::from_millis(200));
    catalog.publish(push_day());
    catalog.publish(leg_day());
    catalog.publish(rowing_session());

    let kv: Arc<dyn KeyValueStore> = Arc::new(store.clone());
    let engine = WorkoutEngine::new(
        Arc::new(catalog.clone()),
        ProgressPersistence::new(kv),
        Arc::clone(&gateway) as Arc<dyn SyncGateway>,
        Duration::from_millis(100),
    );

    TestEngine {
        engine,
        catalog,
        store,
        gateway,
    }
}
