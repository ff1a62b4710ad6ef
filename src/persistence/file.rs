// ABOUTME: File-backed key-value store writing one JSON snapshot per key
// ABOUTME: Writes go through a temp file and rename so readers never see partial data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::KeyValueStore;
use crate::constants::storage::SNAPSHOT_EXTENSION;
use crate::errors::{AppError, AppResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

/// Store keeping each key in its own file under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path for a key; characters outside `[A-Za-z0-9_-]` become `_`
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.{SNAPSHOT_EXTENSION}"))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!("Failed to read '{key}'")).with_source(e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        fs::create_dir_all(&self.dir).await?;
        let target = self.path_for(key);
        let temp = target.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        fs::write(&temp, value).await?;
        if let Err(e) = fs::rename(&temp, &target).await {
            if let Err(cleanup) = fs::remove_file(&temp).await {
                tracing::debug!(error = %cleanup, path = %temp.display(), "Temp snapshot cleanup failed");
            }
            return Err(AppError::storage(format!("Failed to replace '{key}'")).with_source(e));
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!("Failed to delete '{key}'")).with_source(e)),
        }
    }

    async fn health_check(&self) -> AppResult<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }
}
