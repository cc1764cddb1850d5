//! Directory-backed blueprint store.
//!
//! Each blueprint is one `<id>.json` file holding its name and nested cells.
//! Saves write a temporary file and rename it over the old one, so readers
//! see either the previous cell set or the new one.

use super::wire::{to_nested, BlueprintDocument, StoredBlueprint};
use super::{BlueprintSummary, GridStore};
use crate::error::{DrafterError, Result};
use crate::types::{Blueprint, Cell};
use std::path::{Path, PathBuf};

/// A [`GridStore`] backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Ids of all stored blueprints, ascending.
    fn ids(&self) -> Result<Vec<u64>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok());
            if let Some(id) = id {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    fn read(&self, id: u64) -> Result<BlueprintDocument> {
        let contents = match std::fs::read_to_string(self.path_for(id)) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DrafterError::BlueprintNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&contents)?)
    }
}

impl GridStore for JsonFileStore {
    fn list(&self) -> Result<Vec<BlueprintSummary>> {
        let mut summaries = Vec::new();
        for id in self.ids()? {
            match self.read(id) {
                Ok(doc) => summaries.push(BlueprintSummary { id, name: doc.name }),
                Err(e) => log::warn!("Skipping unreadable blueprint file {}: {}", id, e),
            }
        }
        Ok(summaries)
    }

    fn fetch_blueprint(&self, id: u64) -> Result<Blueprint> {
        Ok(self.read(id)?.into_blueprint())
    }

    fn save(&mut self, name: &str, cells: Vec<Cell>) -> Result<u64> {
        let id = match self.find_by_name(name)? {
            Some(id) => id,
            None => self.ids()?.last().map(|last| last + 1).unwrap_or(1),
        };

        let blueprint = Blueprint::with_cells(name, cells);
        let stored = StoredBlueprint {
            name: blueprint.name.clone(),
            cells: to_nested(&blueprint),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        let target = self.path_for(id);
        let staging = target.with_extension("json.tmp");
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, &target)?;

        log::debug!("Saved blueprint '{}' as {} ({} cells)", name, id, blueprint.len());
        Ok(id)
    }
}
