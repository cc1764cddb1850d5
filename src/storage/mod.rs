//! Blueprint persistence boundary.
//!
//! The drafter only reads through [`GridStore`]; saving is provided so that
//! tools built on this crate can round-trip editor data.

mod file;
mod memory;
pub mod wire;

pub use file::JsonFileStore;
pub use memory::MemoryGridStore;
pub use wire::{parse_blueprint, to_nested, BlueprintDocument, CellsWire, LoadResponse, NestedCells};

use crate::error::Result;
use crate::types::{Blueprint, Cell};
use serde::{Deserialize, Serialize};

/// Id and name of a stored blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintSummary {
    pub id: u64,
    pub name: String,
}

/// Trait for blueprint storage backends.
pub trait GridStore {
    /// All stored blueprints, ordered by id.
    fn list(&self) -> Result<Vec<BlueprintSummary>>;

    /// Read a blueprint snapshot.
    ///
    /// Fails with [`DrafterError::BlueprintNotFound`](crate::DrafterError::BlueprintNotFound)
    /// for unknown ids.
    fn fetch_blueprint(&self, id: u64) -> Result<Blueprint>;

    /// Save cells under a name, creating the blueprint if needed.
    ///
    /// The previous cell set of a same-named blueprint is replaced as a whole.
    /// Returns the blueprint id.
    fn save(&mut self, name: &str, cells: Vec<Cell>) -> Result<u64>;

    /// Read the cells of a blueprint, in no particular order.
    fn fetch_cells(&self, id: u64) -> Result<Vec<Cell>> {
        Ok(self.fetch_blueprint(id)?.cells())
    }

    /// Find the id of a blueprint by name.
    fn find_by_name(&self, name: &str) -> Result<Option<u64>> {
        Ok(self.list()?.into_iter().find(|s| s.name == name).map(|s| s.id))
    }
}
