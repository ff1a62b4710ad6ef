// ABOUTME: Engine-wide constants and environment variable names
// ABOUTME: Storage keys, configuration defaults, and cardio simulation parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded constants and the names of the environment variables read by
//! [`crate::config::environment::EngineConfig`].

/// Service naming for structured logs
pub mod service_names {
    /// Name reported in startup logs
    pub const WORKOUT_ENGINE: &str = "workout-engine";
}

/// Local durable store layout
pub mod storage {
    /// Prefix of session snapshot keys
    pub const SESSION_KEY_PREFIX: &str = "workout_session:";
    /// Directory name under the platform data dir
    pub const DEFAULT_DIR_NAME: &str = "workout-engine";
    /// Extension of snapshot files in the file store
    pub const SNAPSHOT_EXTENSION: &str = "json";
}

/// Environment variable names
pub mod env_config {
    /// Directory for the file-backed progress store
    pub const STORAGE_DIR: &str = "WORKOUT_STORAGE_DIR";
    /// Backend base URL
    pub const SYNC_URL: &str = "WORKOUT_SYNC_URL";
    /// Backend request timeout in seconds
    pub const SYNC_TIMEOUT_SECS: &str = "WORKOUT_SYNC_TIMEOUT_SECS";
    /// Cardio timer tick in milliseconds
    pub const CARDIO_TICK_MS: &str = "WORKOUT_CARDIO_TICK_MS";
    /// Workout definition readiness timeout in seconds
    pub const DEFINITION_TIMEOUT_SECS: &str = "WORKOUT_DEFINITION_TIMEOUT_SECS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Configuration defaults
pub mod defaults {
    /// Backend request timeout
    pub const SYNC_TIMEOUT_SECS: u64 = 10;
    /// Cardio timer tick
    pub const CARDIO_TICK_MS: u64 = 1000;
    /// Workout definition readiness timeout
    pub const DEFINITION_TIMEOUT_SECS: u64 = 10;
}

/// Cardio simulation parameters
pub mod cardio {
    /// Heart rate at the start of a cardio block
    pub const RESTING_HEART_RATE: u32 = 70;
    /// Seconds to ramp from resting to target heart rate
    pub const WARMUP_SECS: f64 = 120.0;
    /// Maximum random deviation per reading, in bpm
    pub const HEART_RATE_JITTER: i32 = 3;
}

/// Completion feedback thresholds on the completion rate
pub mod feedback {
    /// Minimum rate for "excellent" (also needs volume)
    pub const EXCELLENT_RATE: f64 = 0.9;
    /// Minimum rate for "good"
    pub const GOOD_RATE: f64 = 0.7;
    /// Minimum rate for "fair"
    pub const FAIR_RATE: f64 = 0.5;
}
