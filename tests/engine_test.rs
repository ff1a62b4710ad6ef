// ABOUTME: End-to-end tests for the workout engine facade over in-memory collaborators
// ABOUTME: Resume after close, replacement, optimistic finish, restart, readiness, and cardio control
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::float_cmp,
    clippy::too_many_lines
)]

mod common;

use anyhow::Result;
use common::{test_engine, test_engine_with, RecordingGateway, TestEngine};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use workout_engine::errors::{ErrorCode, SessionError};
use workout_engine::engine::{EngineUpdate, UiEvent};
use workout_engine::models::{
    CardioPlacement, ExerciseDefinition, FeedbackTier, Modality, Session, SetLog,
    WorkoutDefinition, WorkoutKind,
};
use workout_engine::persistence::{session_key, InMemoryStore, KeyValueStore};
use workout_engine::sequencer::ExerciseVariant;

fn events(value: serde_json::Value) -> Vec<UiEvent> {
    serde_json::from_value(value).unwrap()
}

async fn saved_session(store: &InMemoryStore, id: &str) -> Option<Session> {
    let raw = store.get(&session_key(id)).await.unwrap()?;
    Some(serde_json::from_str(&raw).unwrap())
}

#[tokio::test]
async fn test_scenario_a_through_ui_events() -> Result<()> {
    let TestEngine {
        mut engine,
        gateway,
        ..
    } = test_engine();
    engine.open("push-day").await?;

    let script = events(json!([
        { "type": "complete_set", "set_number": 1, "weight": 10.0, "reps": 10 },
        { "type": "complete_set", "set_number": 2, "weight": 12.0, "reps": 8 },
        { "type": "go_forward" },
        { "type": "skip" },
        { "type": "go_forward" },
        { "type": "complete_set", "set_number": 1, "weight": 20.0, "reps": 5 },
    ]));
    for event in script {
        assert!(matches!(engine.dispatch(event).await?, EngineUpdate::Updated(_)));
    }

    let view = engine.view()?;
    assert!(view.is_complete);
    assert_eq!(view.total_volume, 296.0);
    assert_eq!(view.completion_percentage, 100.0);

    let EngineUpdate::Completed(result) = engine.dispatch(UiEvent::GoForward).await? else {
        panic!("expected completion on the last exercise");
    };
    assert_eq!(result.total_volume, 296.0);
    assert_eq!(result.feedback, FeedbackTier::Good);
    assert_eq!(result.xp_earned, 60);
    assert_eq!(result.skipped_exercises, vec!["overhead-press".to_owned()]);
    assert!(engine.session().is_none());

    engine.wait_for_sync().await;
    assert_eq!(gateway.count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_scenario_b_cardio_after_appends_exercise() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("leg-day").await?;

    let view = engine.set_cardio_preference(CardioPlacement::After, Some(10), None)?;
    assert_eq!(view.exercise_count, 3);

    let sequence = engine.sequence().unwrap();
    let last = sequence.get(2).unwrap();
    assert_eq!(last.modality, Modality::Cardio);
    assert_eq!(last.duration_minutes, Some(10));

    let ignored = engine.set_cardio_preference(CardioPlacement::Before, Some(30), None)?;
    assert_eq!(ignored.exercise_count, 3);
    let sequence = engine.sequence().unwrap();
    assert_eq!(sequence.index_of("cardio-treadmill"), Some(2));
    assert_eq!(sequence.get(2).unwrap().duration_minutes, Some(10));
    Ok(())
}

#[tokio::test]
async fn test_scenario_c_close_and_reopen_restores_progress() -> Result<()> {
    let store = InMemoryStore::new();
    let TestEngine { mut engine, .. } =
        test_engine_with(store.clone(), Arc::new(RecordingGateway::default()));

    engine.open("push-day").await?;
    engine.complete_set(SetLog::new(1, 60.0, 8))?;
    engine.go_forward()?;
    engine.close().await;
    assert!(engine.session().is_none());

    let reopened = engine.open("push-day").await?;
    assert_eq!(reopened.current_index, 1);
    assert_eq!(reopened.logged_exercises, 1);
    assert_eq!(reopened.current_exercise_id.as_deref(), Some("overhead-press"));

    let TestEngine {
        engine: mut fresh, ..
    } = test_engine_with(store, Arc::new(RecordingGateway::default()));
    let resumed = fresh.open("push-day").await?;
    assert_eq!(resumed.current_index, 1);
    assert_eq!(
        fresh.session().unwrap().log_for("bench-press").unwrap().sets[0].weight,
        60.0
    );
    Ok(())
}

#[tokio::test]
async fn test_scenario_d_double_skip_is_idempotent() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("push-day").await?;

    engine.skip("dips")?;
    let view = engine.skip("dips")?;
    assert_eq!(view.skipped_exercise_ids, vec!["dips".to_owned()]);
    Ok(())
}

#[tokio::test]
async fn test_navigation_alone_is_not_persisted() -> Result<()> {
    let TestEngine {
        mut engine, store, ..
    } = test_engine();
    engine.open("push-day").await?;
    engine.go_forward()?;
    engine.go_forward()?;
    engine.close().await;

    assert!(saved_session(&store, "push-day").await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_opening_another_workout_persists_outgoing_progress() -> Result<()> {
    let TestEngine {
        mut engine, store, ..
    } = test_engine();
    engine.open("push-day").await?;
    engine.skip("bench-press")?;
    engine.go_forward()?;

    let view = engine.open("leg-day").await?;
    assert_eq!(view.session_id, "leg-day");

    let saved = saved_session(&store, "push-day").await.unwrap();
    assert_eq!(saved.current_exercise_index, 1);
    assert_eq!(saved.skipped_exercise_ids, vec!["bench-press".to_owned()]);
    Ok(())
}

#[tokio::test]
async fn test_go_forward_reports_pending_exercises() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("push-day").await?;
    engine.go_forward()?;
    engine.go_forward()?;
    engine.complete_set(SetLog::new(1, 0.0, 12))?;

    let EngineUpdate::Incomplete { view, remaining } = engine.go_forward()? else {
        panic!("session must not complete with pending exercises");
    };
    assert_eq!(view.current_index, 2);
    assert_eq!(remaining, vec!["bench-press".to_owned(), "overhead-press".to_owned()]);
    assert!(engine.session().is_some());
    Ok(())
}

#[tokio::test]
async fn test_finish_is_optimistic_when_sync_fails() -> Result<()> {
    let gateway = Arc::new(RecordingGateway::failing());
    let TestEngine {
        mut engine, store, ..
    } = test_engine_with(InMemoryStore::new(), gateway.clone());
    engine.open("push-day").await?;
    engine.complete_set(SetLog::new(1, 50.0, 10))?;

    let result = engine.finish()?;
    assert_eq!(result.total_volume, 500.0);
    assert_eq!(result.feedback, FeedbackTier::Poor);
    assert!(engine.session().is_none());

    engine.wait_for_sync().await;
    assert_eq!(gateway.count(), 1);

    engine.close().await;
    let saved = saved_session(&store, "push-day").await.unwrap();
    assert!(saved.finished_at.is_some());
    Ok(())
}

#[tokio::test]
async fn test_finished_session_requires_restart() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("leg-day").await?;
    engine.complete_set(SetLog::new(1, 100.0, 5))?;
    engine.finish()?;

    let view = engine.open("leg-day").await?;
    assert!(view.finished);
    let err = engine.go_forward().unwrap_err();
    assert!(matches!(
        err.session_error(),
        Some(SessionError::AlreadyFinished { .. })
    ));

    let fresh = engine.restart("leg-day").await?;
    assert!(!fresh.finished);
    assert_eq!(fresh.logged_exercises, 0);
    assert_eq!(fresh.xp_earned, 0);
    Ok(())
}

#[tokio::test]
async fn test_restart_discards_active_progress() -> Result<()> {
    let TestEngine {
        mut engine, store, ..
    } = test_engine();
    engine.open("push-day").await?;
    engine.complete_set(SetLog::new(1, 60.0, 8))?;

    let view = engine.restart("push-day").await?;
    assert_eq!(view.logged_exercises, 0);
    assert_eq!(view.current_index, 0);

    engine.close().await;
    assert!(saved_session(&store, "push-day").await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_open_waits_for_definition_readiness() -> Result<()> {
    let TestEngine {
        mut engine,
        catalog,
        ..
    } = test_engine();

    let publisher = catalog.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        publisher.publish(WorkoutDefinition {
            id: "late".to_owned(),
            name: "Late Arrival".to_owned(),
            kind: WorkoutKind::Strength,
            exercises: vec![ExerciseDefinition::strength("row", "Barbell Row", 3, "8")],
            xp_reward: 10,
            estimated_duration_minutes: 20,
        });
    });

    assert!(!catalog.is_ready("late"));
    let view = engine.open("late").await?;
    assert_eq!(view.workout_name, "Late Arrival");
    Ok(())
}

#[tokio::test]
async fn test_open_times_out_for_unknown_workout() {
    let TestEngine { mut engine, .. } = test_engine();
    let err = engine.open("never-published").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceUnavailable);
    assert!(engine.session().is_none());
}

#[tokio::test]
async fn test_select_alternative_validates_and_renames() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("push-day").await?;

    let err = engine
        .select_alternative("bench-press", Some("cable-fly".to_owned()))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(matches!(
        err.session_error(),
        Some(SessionError::UnknownAlternative { .. })
    ));

    let view = engine.select_alternative("bench-press", Some("db-bench".to_owned()))?;
    assert_eq!(view.current_exercise_name.as_deref(), Some("Dumbbell Bench Press"));
    assert_eq!(
        view.current_variant,
        Some(ExerciseVariant::Alternative {
            alternative_id: "db-bench".to_owned()
        })
    );

    engine.complete_set(SetLog::new(1, 24.0, 10))?;
    let log = engine.session().unwrap().log_for("bench-press").unwrap();
    assert_eq!(log.exercise_name, "Dumbbell Bench Press");
    Ok(())
}

#[tokio::test]
async fn test_unknown_exercise_is_rejected() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("push-day").await?;

    let err = engine.record_set("deadlift", SetLog::new(1, 100.0, 5)).unwrap_err();
    assert!(matches!(
        err.session_error(),
        Some(SessionError::UnknownExercise { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_skip_after_log_surfaces_typed_error() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("push-day").await?;
    engine.complete_set(SetLog::new(1, 60.0, 8))?;

    let err = engine.dispatch(UiEvent::Skip { exercise_id: None }).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidTransition);
    assert!(matches!(
        err.session_error(),
        Some(SessionError::AlreadyLogged { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_cardio_controls_follow_current_exercise() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("push-day").await?;

    let err = engine.start_cardio().unwrap_err();
    assert!(matches!(err.session_error(), Some(SessionError::NotCardio { .. })));
    assert!(engine.pause_cardio().is_none());

    engine.open("rowing").await?;
    let EngineUpdate::Cardio { view, stats } = engine.dispatch(UiEvent::StartCardio).await? else {
        panic!("expected cardio stats");
    };
    assert_eq!(view.current_modality, Some(Modality::Cardio));
    assert_eq!(stats.elapsed_seconds, 0);
    assert!(engine.cardio_stats().is_some());

    let paused = engine.pause_cardio().unwrap();
    assert_eq!(engine.cardio_stats(), Some(paused));

    engine.close().await;
    assert!(engine.cardio_stats().is_none());
    Ok(())
}

#[tokio::test]
async fn test_synthetic_cardio_before_strength() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("leg-day").await?;

    let view = engine.set_cardio_preference(CardioPlacement::Before, Some(5), None)?;
    assert_eq!(view.current_exercise_id.as_deref(), Some("cardio-treadmill"));
    assert_eq!(view.current_variant, Some(ExerciseVariant::SyntheticCardio));

    engine.start_cardio()?;
    engine.complete_set(SetLog::new(1, 0.0, 0))?;
    let view = engine.view()?;
    assert_eq!(view.logged_exercises, 1);
    assert_eq!(view.xp_earned, 33);
    Ok(())
}

#[tokio::test]
async fn test_cardio_before_after_navigation_keeps_current_exercise() -> Result<()> {
    let TestEngine { mut engine, .. } = test_engine();
    engine.open("leg-day").await?;
    engine.go_forward()?;
    assert_eq!(engine.view()?.current_exercise_id.as_deref(), Some("lunge"));

    let view = engine.set_cardio_preference(CardioPlacement::Before, Some(5), None)?;
    assert_eq!(view.exercise_count, 3);
    assert_eq!(view.current_index, 2);
    assert_eq!(view.current_exercise_id.as_deref(), Some("lunge"));
    Ok(())
}

#[tokio::test]
async fn test_operations_without_session_fail() {
    let TestEngine { mut engine, .. } = test_engine();

    let err = engine.view().unwrap_err();
    assert!(matches!(err.session_error(), Some(SessionError::NoActiveSession)));
    assert!(engine.finish().is_err());
    assert!(matches!(
        engine.dispatch(UiEvent::Close).await.unwrap(),
        EngineUpdate::Closed
    ));
}
