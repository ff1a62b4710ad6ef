// ABOUTME: Core types for the workout session engine
// ABOUTME: Foundation crate with error handling, the session data model, and workout definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Workout Core
//!
//! Foundation crate shared by the session engine and its binaries. It changes
//! rarely, which keeps incremental builds of the engine crate cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the typed `SessionError`
//! - **models**: Session state, exercise logs, workout definitions, and the cardio catalog

/// Unified error handling system with standard error codes
pub mod errors;

/// Session data model, workout definitions, and the cardio catalog
pub mod models;
