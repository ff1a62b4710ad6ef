// ABOUTME: Workout session CLI for replaying UI events and inspecting saved progress
// ABOUTME: Drives the engine from JSON files and prints every update as a JSON line on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Replay a list of UI events against a workout definition
//! workout-session replay --definition push_day.json --events events.json
//!
//! # Start over instead of resuming saved progress
//! workout-session replay --definition push_day.json --events events.json --restart
//!
//! # Print the saved snapshot of a session
//! workout-session show --session push-day
//!
//! # Delete the saved snapshot of a session
//! workout-session clear --session push-day
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use workout_engine::catalog::WorkoutCatalog;
use workout_engine::config::EngineConfig;
use workout_engine::engine::{UiEvent, WorkoutEngine};
use workout_engine::logging::LoggingConfig;
use workout_engine::models::WorkoutDefinition;
use workout_engine::persistence::{session_key, FileStore, KeyValueStore};

#[derive(Parser)]
#[command(
    name = "workout-session",
    about = "Workout session engine CLI",
    long_about = "Replay UI events against a workout and inspect locally saved session progress."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Progress storage directory override
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Replay UI events from a JSON array
    Replay {
        /// Workout definition JSON file
        #[arg(long)]
        definition: PathBuf,
        /// UI events JSON file
        #[arg(long)]
        events: PathBuf,
        /// Discard saved progress first
        #[arg(long)]
        restart: bool,
    },
    /// Print a saved session snapshot
    Show {
        /// Session id
        #[arg(long)]
        session: String,
    },
    /// Delete a saved session snapshot
    Clear {
        /// Session id
        #[arg(long)]
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = EngineConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    info!("{}", config.summary());

    match cli.command {
        Command::Replay {
            definition,
            events,
            restart,
        } => replay(&config, &definition, &events, restart).await,
        Command::Show { session } => show(&config, &session).await,
        Command::Clear { session } => {
            FileStore::new(&config.storage_dir)
                .delete(&session_key(&session))
                .await?;
            info!(session.id = %session, "Saved progress cleared");
            Ok(())
        }
    }
}

async fn replay(
    config: &EngineConfig,
    definition_path: &Path,
    events_path: &Path,
    restart: bool,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(definition_path)
        .await
        .with_context(|| format!("Failed to read {}", definition_path.display()))?;
    let definition: WorkoutDefinition =
        serde_json::from_str(&raw).context("Invalid workout definition")?;

    let raw = tokio::fs::read_to_string(events_path)
        .await
        .with_context(|| format!("Failed to read {}", events_path.display()))?;
    let events: Vec<UiEvent> = serde_json::from_str(&raw).context("Invalid event list")?;

    let workout_id = definition.id.clone();
    let catalog = WorkoutCatalog::new(config.definition_timeout);
    catalog.publish(definition);

    let mut engine = WorkoutEngine::from_config(config, Arc::new(catalog))?;
    let opened = if restart {
        engine.restart(&workout_id).await?
    } else {
        engine.open(&workout_id).await?
    };
    println!("{}", json!({ "status": "opened", "view": opened }));

    for event in events {
        let name = event.name();
        match engine.dispatch(event).await {
            Ok(update) => println!("{}", serde_json::to_string(&update)?),
            Err(e) => {
                warn!(event = name, error = %e, "Event rejected");
                println!(
                    "{}",
                    json!({
                        "status": "rejected",
                        "event": name,
                        "code": e.code,
                        "message": e.message,
                    })
                );
            }
        }
    }

    engine.close().await;
    engine.wait_for_sync().await;
    Ok(())
}

async fn show(config: &EngineConfig, session_id: &str) -> Result<()> {
    let store = FileStore::new(&config.storage_dir);
    match store.get(&session_key(session_id)).await? {
        Some(raw) => {
            let snapshot: serde_json::Value =
                serde_json::from_str(&raw).context("Saved snapshot is not valid JSON")?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        None => println!("{}", json!({ "status": "not_found", "session_id": session_id })),
    }
    Ok(())
}
