//! billcheck-storage-json
//!
//! Filesystem-backed slot storage: every slot key maps to one JSON file.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use billcheck_config::atomic::write_atomic;
use billcheck_core::{storage::SlotStorage, CoreError};

const SLOT_EXTENSION: &str = "json";

/// Stores each slot as `<root>/<canonical key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSlots {
    root: PathBuf,
}

impl JsonFileSlots {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(key), SLOT_EXTENSION))
    }

    /// Lists the keys (in canonical form) that currently have a file.
    pub fn list_slots(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(SLOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn remove_slot(&self, key: &str) -> Result<(), CoreError> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl SlotStorage for JsonFileSlots {
    fn read_slot(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_slot(&self, key: &str, data: &str) -> Result<(), CoreError> {
        let path = self.slot_path(key);
        write_atomic(&path, data)?;
        tracing::trace!(path = %path.display(), bytes = data.len(), "slot written");
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "bills".into()
    } else {
        sanitized
    }
}
