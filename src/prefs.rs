//! On-device key-value storage for the signed-in session and UI theme.
//!
//! Values live in one JSON object file. Every write replaces the file
//! atomically, so a crash never leaves a half-written store behind.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const ACTIVE_SESSION_EMAIL: &str = "activeSessionEmail";
pub const THEME: &str = "theme";
pub const ADMIN_AVATAR: &str = "adminAvatar";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Preferences file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not replace preferences file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug)]
pub struct Prefs {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Prefs {
    /// Loads the store. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No preferences file yet");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), PrefsError> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    pub fn active_session_email(&self) -> Option<&str> {
        self.get(ACTIVE_SESSION_EMAIL)
    }

    pub fn theme(&self) -> Theme {
        match self.get(THEME) {
            Some("dark") => Theme::Dark,
            Some("light") | None => Theme::Light,
            Some(other) => {
                warn!(theme = other, "Unknown theme in preferences, using light");
                Theme::Light
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PrefsError> {
        self.set(THEME, theme.as_str())
    }

    fn save(&self) -> Result<(), PrefsError> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(serde_json::to_string_pretty(&self.values)?.as_bytes())?;
        temp_file.persist(&self.path)?;
        Ok(())
    }
}
