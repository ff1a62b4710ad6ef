// ABOUTME: Main library entry point for the workout session engine
// ABOUTME: Drives multi-exercise training sessions with crash-safe progress and best-effort sync
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Workout Session Engine
//!
//! Drives a user through a multi-exercise training session: per-set logging,
//! skipping and substituting exercises, strength and cardio modalities,
//! progress that survives interruption, and completion statistics that are
//! shown locally before they are synchronized to a backend.
//!
//! ## Architecture
//!
//! - **Session store**: the only owner of mutable session state
//! - **Sequencer**: exercise order, progress, completion, current variant
//! - **Persistence**: ordered background saves to a key-value store
//! - **Completion**: duration, volume, feedback tier, and XP at session end
//! - **Sync**: at-most-once, fire-and-forget backend submission
//! - **Cardio**: elapsed time, heart rate, and calorie simulation
//! - **Engine**: facade mapping UI events onto the pieces above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use workout_engine::catalog::WorkoutCatalog;
//! use workout_engine::config::EngineConfig;
//! use workout_engine::engine::WorkoutEngine;
//! use workout_engine::errors::AppResult;
//! use workout_engine::models::SetLog;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = EngineConfig::from_env()?;
//!     let catalog = WorkoutCatalog::new(config.definition_timeout);
//!     let mut engine = WorkoutEngine::from_config(&config, Arc::new(catalog))?;
//!
//!     engine.open("push-day").await?;
//!     engine.complete_set(SetLog::new(1, 60.0, 8))?;
//!     engine.close().await;
//!     Ok(())
//! }
//! ```

/// Cardio timer simulation
pub mod cardio;

/// Workout definition provider and readiness-aware catalog
pub mod catalog;

/// Completion aggregation
pub mod completion;

/// Environment-based configuration
pub mod config;

/// Engine-wide constants
pub mod constants;

/// Engine facade and UI event surface
pub mod engine;

/// Error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Local progress persistence
pub mod persistence;

/// Exercise ordering and progress
pub mod sequencer;

/// Session store
pub mod session;

/// Backend sync gateway
pub mod sync;

/// Shared data model
pub use workout_core::models;
