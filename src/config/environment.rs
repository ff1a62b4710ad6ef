// ABOUTME: Environment configuration for deployment-specific engine settings
// ABOUTME: Parses storage location, sync endpoint, and timing parameters from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::{defaults, env_config, storage};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Directory of the file-backed progress store
    pub storage_dir: PathBuf,
    /// Backend base URL; `None` disables sync
    pub sync_url: Option<String>,
    /// Backend request timeout
    pub sync_timeout: Duration,
    /// Cardio timer tick interval
    pub cardio_tick: Duration,
    /// How long `open` waits for a workout definition
    pub definition_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            storage_dir: default_storage_dir(),
            sync_url: None,
            sync_timeout: Duration::from_secs(defaults::SYNC_TIMEOUT_SECS),
            cardio_tick: Duration::from_millis(defaults::CARDIO_TICK_MS),
            definition_timeout: Duration::from_secs(defaults::DEFINITION_TIMEOUT_SECS),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading engine configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(
                &env::var(env_config::ENVIRONMENT).unwrap_or_default(),
            ),
            storage_dir: env::var(env_config::STORAGE_DIR)
                .map_or_else(|_| default_storage_dir(), PathBuf::from),
            sync_url: env::var(env_config::SYNC_URL)
                .ok()
                .map(|url| url.trim().trim_end_matches('/').to_owned())
                .filter(|url| !url.is_empty()),
            sync_timeout: Duration::from_secs(env_u64_or(
                env_config::SYNC_TIMEOUT_SECS,
                defaults::SYNC_TIMEOUT_SECS,
            )),
            cardio_tick: Duration::from_millis(env_u64_or(
                env_config::CARDIO_TICK_MS,
                defaults::CARDIO_TICK_MS,
            )),
            definition_timeout: Duration::from_secs(env_u64_or(
                env_config::DEFINITION_TIMEOUT_SECS,
                defaults::DEFINITION_TIMEOUT_SECS,
            )),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error for a zero tick interval or a non-HTTP sync URL
    pub fn validate(&self) -> AppResult<()> {
        if self.cardio_tick.is_zero() {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                env_config::CARDIO_TICK_MS
            )));
        }

        if let Some(url) = &self.sync_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::config(format!(
                    "{} must be an http(s) URL, got '{url}'",
                    env_config::SYNC_URL
                )));
            }
            if self.environment.is_production() && url.starts_with("http://") {
                warn!("Backend sync uses plain HTTP in production");
            }
        }

        Ok(())
    }

    /// Human-readable configuration summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Workout Engine Configuration:\n\
             - Environment: {}\n\
             - Storage: {}\n\
             - Backend Sync: {}\n\
             - Sync Timeout: {}s\n\
             - Cardio Tick: {}ms\n\
             - Definition Timeout: {}s",
            self.environment,
            self.storage_dir.display(),
            self.sync_url.as_deref().unwrap_or("Disabled"),
            self.sync_timeout.as_secs(),
            self.cardio_tick.as_millis(),
            self.definition_timeout.as_secs(),
        )
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join(storage::DEFAULT_DIR_NAME)
}

/// Parse a numeric variable, falling back to the default on absence or garbage
fn env_u64_or(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{raw}' for {key}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
