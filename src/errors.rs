// ABOUTME: Re-exports the unified error system from workout-core
// ABOUTME: Keeps `crate::errors::AppResult` paths stable inside the engine crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use workout_core::errors::{AppError, AppResult, ErrorCode, SessionError};
