// ABOUTME: Tests for environment-driven engine and logging configuration
// ABOUTME: Runs serially because every test mutates process environment variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used)]

use anyhow::Result;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use workout_engine::config::{EngineConfig, Environment};
use workout_engine::errors::ErrorCode;
use workout_engine::logging::{LogFormat, LoggingConfig};

const VARS: [&str; 6] = [
    "ENVIRONMENT",
    "WORKOUT_STORAGE_DIR",
    "WORKOUT_SYNC_URL",
    "WORKOUT_SYNC_TIMEOUT_SECS",
    "WORKOUT_CARDIO_TICK_MS",
    "WORKOUT_DEFINITION_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
    env::remove_var("LOG_FORMAT");
}

#[test]
#[serial]
fn test_defaults_without_environment() -> Result<()> {
    clear_env();
    let config = EngineConfig::from_env()?;

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.sync_url, None);
    assert_eq!(config.sync_timeout, Duration::from_secs(10));
    assert_eq!(config.cardio_tick, Duration::from_millis(1000));
    assert_eq!(config.definition_timeout, Duration::from_secs(10));
    assert!(config.storage_dir.ends_with("workout-engine"));
    assert!(config.summary().contains("Backend Sync: Disabled"));
    Ok(())
}

#[test]
#[serial]
fn test_values_from_environment() -> Result<()> {
    clear_env();
    env::set_var("ENVIRONMENT", "production");
    env::set_var("WORKOUT_STORAGE_DIR", "/var/lib/workouts");
    env::set_var("WORKOUT_SYNC_URL", " https://api.example.com/v2/ ");
    env::set_var("WORKOUT_SYNC_TIMEOUT_SECS", "3");
    env::set_var("WORKOUT_CARDIO_TICK_MS", "250");

    let config = EngineConfig::from_env()?;
    clear_env();

    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.storage_dir, PathBuf::from("/var/lib/workouts"));
    assert_eq!(config.sync_url.as_deref(), Some("https://api.example.com/v2"));
    assert_eq!(config.sync_timeout, Duration::from_secs(3));
    assert_eq!(config.cardio_tick, Duration::from_millis(250));
    Ok(())
}

#[test]
#[serial]
fn test_garbage_numbers_fall_back_to_defaults() -> Result<()> {
    clear_env();
    env::set_var("WORKOUT_SYNC_TIMEOUT_SECS", "soon");
    env::set_var("WORKOUT_DEFINITION_TIMEOUT_SECS", "-4");

    let config = EngineConfig::from_env()?;
    clear_env();

    assert_eq!(config.sync_timeout, Duration::from_secs(10));
    assert_eq!(config.definition_timeout, Duration::from_secs(10));
    Ok(())
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("WORKOUT_CARDIO_TICK_MS", "0");
    let err = EngineConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    clear_env();
    env::set_var("WORKOUT_SYNC_URL", "ftp://backup.example.com");
    let err = EngineConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    clear_env();
}

#[test]
#[serial]
fn test_logging_config_from_environment() {
    clear_env();
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert_eq!(config.service_name, "workout-engine");
}
