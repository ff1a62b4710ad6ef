// ABOUTME: Configuration management for the workout session engine
// ABOUTME: Environment-only configuration for storage, sync, timers, and readiness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the workout engine.
//!
//! All settings come from environment variables; there is no config file.

/// Environment-based engine configuration
pub mod environment;

pub use environment::{EngineConfig, Environment};
