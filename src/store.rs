// persistent store: the group/session document as JSON under the user config dir

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const APP_DIR: &str = "claude-session-manager";
pub const DATA_FILE: &str = "data.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("write {path} failed: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

/// One Claude CLI conversation pinned to a project directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    /// Conversation id handed to `claude -r` on launch. Stored under the
    /// historical field name so existing data files keep loading.
    #[serde(rename = "session_id")]
    pub resume_token: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

/// A named collection of sessions, ordered by insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
    pub created_at: DateTime<Utc>,
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl AppData {
    /// Append a new empty group; returns its index.
    pub fn add_group(&mut self, name: &str) -> usize {
        self.groups.push(Group {
            id: gen_id(),
            name: name.to_string(),
            sessions: Vec::new(),
            created_at: Utc::now(),
        });
        self.groups.len() - 1
    }

    /// Append a session to a group; returns its index within the group,
    /// or None when the group does not exist.
    pub fn add_session(
        &mut self,
        group_idx: usize,
        name: &str,
        resume_token: &str,
        path: &str,
    ) -> Option<usize> {
        let group = self.groups.get_mut(group_idx)?;
        group.sessions.push(Session {
            id: gen_id(),
            name: name.to_string(),
            resume_token: resume_token.to_string(),
            path: path.to_string(),
            created_at: Utc::now(),
        });
        Some(group.sessions.len() - 1)
    }

    /// Remove a group and everything in it. Out of range is a no-op.
    pub fn delete_group(&mut self, group_idx: usize) {
        if group_idx < self.groups.len() {
            self.groups.remove(group_idx);
        }
    }

    /// Remove a session from a group. Out of range is a no-op.
    pub fn delete_session(&mut self, group_idx: usize, session_idx: usize) {
        if let Some(group) = self.groups.get_mut(group_idx) {
            if session_idx < group.sessions.len() {
                group.sessions.remove(session_idx);
            }
        }
    }
}

fn gen_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The document plus the file it round-trips through.
pub struct Store {
    pub data: AppData,
    path: PathBuf,
}

impl Store {
    /// Default location: `<config_dir>/claude-session-manager/data.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(DATA_FILE))
    }

    /// Open the store at the default location, creating parent directories.
    pub fn open() -> Result<Self> {
        let path = Self::default_path().context("could not determine config directory")?;
        Self::open_at(path)
    }

    /// Open a store file, loading existing data if present. A missing file
    /// is an empty document; an unreadable or corrupt one is an error.
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("could not create {}", dir.display()))?;
        }
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("could not read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("could not parse {}", path.display()))?
        } else {
            AppData::default()
        };
        let mut store = Store { data, path };
        store.cleanup_default_groups();
        Ok(store)
    }

    /// Drop empty groups named "Default" left behind by earlier releases,
    /// but only while at least one other group exists.
    fn cleanup_default_groups(&mut self) {
        if self.data.groups.len() <= 1 {
            return;
        }
        let before = self.data.groups.len();
        self.data
            .groups
            .retain(|g| g.name != "Default" || !g.sessions.is_empty());
        if self.data.groups.len() != before {
            let _ = self.save();
        }
    }

    /// Write the document back to disk, pretty-printed.
    pub fn save(&self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, encoded).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
