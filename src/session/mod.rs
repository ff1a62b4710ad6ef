// ABOUTME: Session store module owning the active workout session
// ABOUTME: Re-exports the store, its start parameters, and transition outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Single-active-session store and its transitions
pub mod store;

pub use store::{AdvanceOutcome, ExerciseAnnotation, SessionParams, SessionStore};
