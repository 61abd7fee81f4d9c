//! Local JSON file snapshot store.
//!
//! The file holds one JSON array of items, each tagged with `kind`.
//! A missing file loads as an empty catalog.

use super::{SnapshotStore, StoreResult};
use crate::model::item::Item;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

const STORE_NAME: &str = "json_file";
const TEMP_SUFFIX: &str = "tmp";

/// Snapshot store backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn load_snapshot(&self) -> StoreResult<Vec<Item>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&json)?)
    }

    fn save_snapshot(&self, items: &[Item]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(items)?;
        write_replacing(&self.path, &json)?;
        Ok(())
    }
}

/// Writes `contents` to a sibling temp file, then renames it over `path`.
/// Parent directories are created as needed. A crash mid-write leaves the
/// previous file intact.
pub(crate) fn write_replacing(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path(path);
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
