use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::settings::Settings;
use crate::error::Result;
use crate::models::{IcebergHistory, IcebergRecord};

/// Persists the date-keyed history as pretty-printed JSON, optionally
/// keeping timestamped backups of the previous file.
pub struct HistoryStore {
    path: PathBuf,
    backup: Option<BackupPolicy>,
}

struct BackupPolicy {
    directory: PathBuf,
    max_backups: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup: None,
        }
    }

    pub fn with_backups(mut self, directory: impl Into<PathBuf>, max_backups: usize) -> Self {
        self.backup = Some(BackupPolicy {
            directory: directory.into(),
            max_backups,
        });
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let store = Self::new(settings.output_file.clone());
        if settings.backup_enabled {
            store.with_backups(settings.backup_directory.clone(), settings.max_backups)
        } else {
            store
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history; a missing or empty file is an empty history.
    pub fn load(&self) -> Result<IcebergHistory> {
        if !self.path.exists() {
            return Ok(IcebergHistory::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(IcebergHistory::default());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, history: &IcebergHistory) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Append one scrape to the stored history: load, back up the existing
    /// file, insert (replacing a same-day snapshot), save. Returns the
    /// updated history for reporting.
    pub fn record_snapshot(
        &self,
        date: &str,
        records: Vec<IcebergRecord>,
    ) -> Result<IcebergHistory> {
        let mut history = self.load()?;
        self.backup_existing()?;

        history.insert_snapshot(date.to_string(), records);
        self.save(&history)?;
        Ok(history)
    }

    fn backup_existing(&self) -> Result<()> {
        let Some(policy) = &self.backup else {
            return Ok(());
        };
        if !self.path.exists() {
            return Ok(());
        }

        fs::create_dir_all(&policy.directory)?;

        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("history");
        let stamp = Local::now().format("%Y%m%d%H%M%S");
        let backup_path = policy.directory.join(format!("{}-{}.json", stem, stamp));

        debug!(path = %backup_path.display(), "backing up history file");
        fs::copy(&self.path, &backup_path)?;

        self.prune_backups(policy, stem)
    }

    /// Keep only the newest `max_backups` copies. Timestamped names sort
    /// chronologically, so plain name order is age order.
    fn prune_backups(&self, policy: &BackupPolicy, stem: &str) -> Result<()> {
        let mut backups: Vec<PathBuf> = fs::read_dir(&policy.directory)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(stem) && n.ends_with(".json"))
            })
            .collect();

        if backups.len() <= policy.max_backups {
            return Ok(());
        }

        backups.sort();
        let excess = backups.len() - policy.max_backups;
        for old in backups.into_iter().take(excess) {
            debug!(path = %old.display(), "pruning old backup");
            fs::remove_file(old)?;
        }
        Ok(())
    }
}
