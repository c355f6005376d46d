//! Durable per-title execution records.
//!
//! The gate keeps one last-run timestamp per candidate title. Records for
//! one discovery task live in their own store; [`JsonFileStore`] persists
//! them to `~/.config/discover/<task>.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{DiscoverError, Result};

/// Key-value store of last-run timestamps, keyed by candidate title.
///
/// Not safe for concurrent writers; callers serialize passes that share a
/// store.
pub trait ExecutionStore {
    /// Timestamp of the last accepted run for `title`, if any.
    fn get(&self, title: &str) -> Result<Option<DateTime<Utc>>>;

    /// Record that `title` was accepted for processing at `at`.
    fn set(&mut self, title: &str, at: DateTime<Utc>) -> Result<()>;
}

/// In-process store; records vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, DateTime<Utc>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded titles.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ExecutionStore for MemoryStore {
    fn get(&self, title: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.records.get(title).copied())
    }

    fn set(&mut self, title: &str, at: DateTime<Utc>) -> Result<()> {
        self.records.insert(title.to_owned(), at);
        Ok(())
    }
}

/// Persisted store document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    /// Schema version.
    #[serde(default = "default_state_version")]
    version: u8,
    /// Last-run timestamps by title.
    #[serde(default)]
    last_run: BTreeMap<String, DateTime<Utc>>,
}

fn default_state_version() -> u8 {
    1
}

/// File-backed store. Loaded once on open, written through on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: BTreeMap<String, DateTime<Utc>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoverError::Store`] if the file exists but cannot be
    /// read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = load_state_from_path(&path)?.last_run;
        Ok(Self { path, records })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default store path for a task: `dirs::config_dir()/discover/<task>.json`.
    ///
    /// Override the directory with the `DISCOVER_STATE_DIR` environment
    /// variable.
    #[must_use]
    pub fn default_path(task: &str) -> PathBuf {
        let dir = std::env::var_os("DISCOVER_STATE_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("discover")))
            .unwrap_or_else(|| std::env::temp_dir().join("discover"));
        dir.join(format!("{task}.json"))
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DiscoverError::Store(format!("cannot create state dir: {e}")))?;
        }

        let state = StoreState {
            version: default_state_version(),
            last_run: self.records.clone(),
        };
        let json = serde_json::to_string_pretty(&state)
            .map_err(|e| DiscoverError::Store(format!("cannot serialize state: {e}")))?;

        std::fs::write(&self.path, json)
            .map_err(|e| DiscoverError::Store(format!("cannot write state: {e}")))
    }
}

impl ExecutionStore for JsonFileStore {
    fn get(&self, title: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.records.get(title).copied())
    }

    fn set(&mut self, title: &str, at: DateTime<Utc>) -> Result<()> {
        let previous = self.records.insert(title.to_owned(), at);
        if let Err(err) = self.save() {
            // Keep memory in step with the file on disk.
            match previous {
                Some(last) => self.records.insert(title.to_owned(), last),
                None => self.records.remove(title),
            };
            return Err(err);
        }
        Ok(())
    }
}

fn load_state_from_path(path: &Path) -> Result<StoreState> {
    let bytes = match std::fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StoreState::default());
        }
        Err(e) => {
            return Err(DiscoverError::Store(format!("cannot read state: {e}")));
        }
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| DiscoverError::Store(format!("cannot parse state: {e}")))
}
