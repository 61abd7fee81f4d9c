//! Application settings persisted as JSON.
//!
//! # Responsibility
//! - Hold startup/exit behavior toggles and store locations.
//! - Resolve store paths relative to the data directory.
//!
//! # Invariants
//! - A missing settings file means defaults, not an error.
//! - `database_path = None` selects local-file-only persistence.

use crate::store::json_file::write_replacing;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default settings file name inside the data directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";
/// Default snapshot file name inside the data directory.
pub const DEFAULT_DATA_FILE: &str = "data.json";

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "settings file error: {err}"),
            Self::Json(err) => write!(f, "settings format error: {err}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// User-editable application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Persist settings and catalog when the menu exits.
    pub save_on_exit: bool,
    /// Load the catalog snapshot at startup.
    pub load_on_startup: bool,
    /// JSON snapshot file, relative to the data directory unless absolute.
    pub data_file: String,
    /// SQLite document database, relative to the data directory unless
    /// absolute. `None` disables the document store.
    pub database_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_on_exit: true,
            load_on_startup: true,
            data_file: DEFAULT_DATA_FILE.to_string(),
            database_path: None,
        }
    }
}

impl Settings {
    /// Reads settings from `path`. Returns `Ok(None)` when the file is missing.
    pub fn load(path: &Path) -> SettingsResult<Option<Self>> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Reads settings from `path`, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(settings)) => {
                info!("event=settings_load module=settings status=ok");
                settings
            }
            Ok(None) => {
                info!("event=settings_load module=settings status=default reason=missing");
                Self::default()
            }
            Err(err) => {
                error!("event=settings_load module=settings status=error error={err}");
                Self::default()
            }
        }
    }

    /// Writes settings as pretty JSON, creating parent directories. The old
    /// file is replaced only once the new one is fully written.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        write_replacing(path, &serde_json::to_string_pretty(self)?)?;
        info!("event=settings_save module=settings status=ok");
        Ok(())
    }

    /// Whether the document database backend is configured.
    pub fn document_store_enabled(&self) -> bool {
        self.database_path
            .as_deref()
            .is_some_and(|path| !path.trim().is_empty())
    }

    pub fn resolve_data_file(&self, data_dir: &Path) -> PathBuf {
        resolve_in(data_dir, &self.data_file)
    }

    pub fn resolve_database_path(&self, data_dir: &Path) -> Option<PathBuf> {
        if !self.document_store_enabled() {
            return None;
        }
        self.database_path
            .as_deref()
            .map(|path| resolve_in(data_dir, path.trim()))
    }
}

fn resolve_in(data_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
