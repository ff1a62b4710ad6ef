// ABOUTME: Tests for exercise sequencing, progress, completion detection, and variant resolution
// ABOUTME: Includes synthetic cardio insertion before and after strength exercises
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used, clippy::float_cmp)]

mod common;

use anyhow::Result;
use chrono::Utc;
use common::{leg_day, params_for, push_day};
use workout_engine::models::{CardioPlacement, CardioType, Modality, SetLog};
use workout_engine::sequencer::{
    completion_percentage, current_exercise_name, is_session_complete, ExerciseSequence,
    ExerciseVariant,
};
use workout_engine::session::SessionStore;

#[test]
fn test_cardio_after_is_appended() -> Result<()> {
    common::init_test_logging();
    let definition = leg_day();
    let mut store = SessionStore::new();
    store.start(params_for(&definition), Utc::now())?;
    store.set_cardio_preference(CardioPlacement::After, Some(10), None, Utc::now())?;

    let session = store.active().unwrap();
    let sequence = ExerciseSequence::build(&definition, session);

    assert_eq!(sequence.len(), 3);
    assert_eq!(session.effective_exercise_count(), 3);
    let last = sequence.get(2).unwrap();
    assert_eq!(last.id, "cardio-treadmill");
    assert_eq!(last.modality, Modality::Cardio);
    assert_eq!(last.duration_minutes, Some(10));
    assert!(sequence.is_synthetic(2));
    assert_eq!(
        sequence.resolve(session, last).variant,
        ExerciseVariant::SyntheticCardio
    );
    Ok(())
}

#[test]
fn test_cardio_before_is_prepended() -> Result<()> {
    let definition = leg_day();
    let mut store = SessionStore::new();
    store.start(params_for(&definition), Utc::now())?;
    store.set_cardio_preference(
        CardioPlacement::Before,
        None,
        Some(CardioType::StairClimber),
        Utc::now(),
    )?;

    let session = store.active().unwrap();
    let sequence = ExerciseSequence::build(&definition, session);

    assert_eq!(sequence.index_of("cardio-stair_climber"), Some(0));
    assert_eq!(sequence.index_of("squat"), Some(1));
    assert_eq!(sequence.get(0).unwrap().target_reps, "10 min");
    Ok(())
}

#[test]
fn test_no_cardio_without_preference() -> Result<()> {
    let definition = push_day();
    let mut store = SessionStore::new();
    store.start(params_for(&definition), Utc::now())?;
    store.set_cardio_preference(CardioPlacement::None, Some(20), None, Utc::now())?;

    let sequence = ExerciseSequence::build(&definition, store.active().unwrap());
    assert_eq!(sequence.len(), 3);
    assert!(!sequence.is_synthetic(0));
    Ok(())
}

#[test]
fn test_synthetic_cardio_can_be_logged_and_skipped() -> Result<()> {
    let definition = leg_day();
    let mut store = SessionStore::new();
    store.start(params_for(&definition), Utc::now())?;
    store.set_cardio_preference(CardioPlacement::After, None, None, Utc::now())?;

    store.record_set("squat", "Back Squat", SetLog::new(1, 100.0, 5), Utc::now())?;
    store.skip("lunge", Utc::now())?;
    store.advance(Utc::now())?;
    store.advance(Utc::now())?;
    assert!(!is_session_complete(store.active().unwrap(), 3));

    store.skip("cardio-treadmill", Utc::now())?;
    assert!(is_session_complete(store.active().unwrap(), 3));
    Ok(())
}

#[test]
fn test_completion_percentage_uses_larger_of_cursor_and_resolved() -> Result<()> {
    let mut store = SessionStore::new();
    store.start(params_for(&push_day()), Utc::now())?;

    store.advance(Utc::now())?;
    store.advance(Utc::now())?;
    let session = store.active().unwrap();
    assert!((completion_percentage(session, 3) - 200.0 / 3.0).abs() < 1e-9);

    assert_eq!(completion_percentage(session, 0), 0.0);
    Ok(())
}

#[test]
fn test_completion_percentage_monotonic_on_forward_operations() -> Result<()> {
    let mut store = SessionStore::new();
    store.start(params_for(&push_day()), Utc::now())?;
    let mut last = 0.0;

    let mut check = |store: &SessionStore| {
        let pct = completion_percentage(store.active().unwrap(), 3);
        assert!(pct >= last, "progress regressed from {last} to {pct}");
        last = pct;
    };

    store.record_set("bench-press", "Bench Press", SetLog::new(1, 60.0, 8), Utc::now())?;
    check(&store);
    store.advance(Utc::now())?;
    check(&store);
    store.skip("overhead-press", Utc::now())?;
    check(&store);
    store.advance(Utc::now())?;
    check(&store);
    store.record_set("dips", "Tricep Dips", SetLog::new(1, 0.0, 10), Utc::now())?;
    check(&store);
    assert_eq!(last, 100.0);
    Ok(())
}

#[test]
fn test_session_not_complete_when_cursor_at_end_only() -> Result<()> {
    let mut store = SessionStore::new();
    store.start(params_for(&push_day()), Utc::now())?;
    store.advance(Utc::now())?;
    store.advance(Utc::now())?;
    store.record_set("dips", "Tricep Dips", SetLog::new(1, 0.0, 10), Utc::now())?;

    assert!(!is_session_complete(store.active().unwrap(), 3));
    Ok(())
}

#[test]
fn test_current_exercise_name_follows_alternative() -> Result<()> {
    let definition = push_day();
    let bench = &definition.exercises[0];
    let mut store = SessionStore::new();
    store.start(params_for(&definition), Utc::now())?;

    assert_eq!(current_exercise_name(store.active().unwrap(), bench), "Bench Press");

    store.select_alternative("bench-press", Some("db-bench".to_owned()), Utc::now())?;
    let session = store.active().unwrap();
    assert_eq!(current_exercise_name(session, bench), "Dumbbell Bench Press");

    let sequence = ExerciseSequence::build(&definition, session);
    let resolved = sequence.resolve(session, sequence.current(session).unwrap());
    assert_eq!(
        resolved.variant,
        ExerciseVariant::Alternative {
            alternative_id: "db-bench".to_owned()
        }
    );
    assert_eq!(resolved.muscle_groups, ["Chest", "Triceps"]);
    Ok(())
}

#[test]
fn test_unknown_alternative_falls_back_to_primary() -> Result<()> {
    let definition = push_day();
    let mut store = SessionStore::new();
    store.start(params_for(&definition), Utc::now())?;
    store.select_alternative("bench-press", Some("cable-fly".to_owned()), Utc::now())?;

    assert_eq!(
        current_exercise_name(store.active().unwrap(), &definition.exercises[0]),
        "Bench Press"
    );
    Ok(())
}

#[test]
fn test_pending_exercise_ids_in_order() -> Result<()> {
    let definition = push_day();
    let mut store = SessionStore::new();
    store.start(params_for(&definition), Utc::now())?;
    store.skip("overhead-press", Utc::now())?;

    let session = store.active().unwrap();
    let sequence = ExerciseSequence::build(&definition, session);
    assert_eq!(
        sequence.pending_exercise_ids(session),
        vec!["bench-press".to_owned(), "dips".to_owned()]
    );
    Ok(())
}
