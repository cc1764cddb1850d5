//! In-memory blueprint store.

use super::{BlueprintSummary, GridStore};
use crate::error::{DrafterError, Result};
use crate::types::{Blueprint, Cell};
use std::collections::BTreeMap;

/// A [`GridStore`] kept entirely in memory. Ids start at 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryGridStore {
    blueprints: BTreeMap<u64, Blueprint>,
    next_id: u64,
}

impl MemoryGridStore {
    pub fn new() -> Self {
        Self {
            blueprints: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

impl GridStore for MemoryGridStore {
    fn list(&self) -> Result<Vec<BlueprintSummary>> {
        Ok(self
            .blueprints
            .iter()
            .map(|(id, bp)| BlueprintSummary {
                id: *id,
                name: bp.name.clone(),
            })
            .collect())
    }

    fn fetch_blueprint(&self, id: u64) -> Result<Blueprint> {
        self.blueprints
            .get(&id)
            .cloned()
            .ok_or_else(|| DrafterError::BlueprintNotFound(id.to_string()))
    }

    fn save(&mut self, name: &str, cells: Vec<Cell>) -> Result<u64> {
        let replacement = Blueprint::with_cells(name, cells);

        if let Some((id, existing)) = self.blueprints.iter_mut().find(|(_, bp)| bp.name == name) {
            *existing = replacement;
            return Ok(*id);
        }

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.blueprints.insert(id, replacement);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellPosition;

    #[test]
    fn test_save_and_fetch() {
        let mut store = MemoryGridStore::new();
        let id = store
            .save("house", vec![Cell::new(0, 0, 0, "wall"), Cell::new(1, 0, 0, "")])
            .unwrap();
        assert_eq!(id, 1);

        let cells = store.fetch_cells(id).unwrap();
        assert_eq!(cells, vec![Cell::new(0, 0, 0, "wall")]);
    }

    #[test]
    fn test_save_replaces_cells() {
        let mut store = MemoryGridStore::new();
        let first = store.save("house", vec![Cell::new(0, 0, 0, "wall")]).unwrap();
        let second = store.save("house", vec![Cell::new(5, 5, 0, "roof")]).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);

        let blueprint = store.fetch_blueprint(first).unwrap();
        assert_eq!(blueprint.get(CellPosition::new(0, 0, 0)), None);
        assert_eq!(blueprint.get(CellPosition::new(5, 5, 0)), Some("roof"));
    }

    #[test]
    fn test_list_and_find() {
        let mut store = MemoryGridStore::new();
        store.save("a", vec![]).unwrap();
        store.save("b", vec![]).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(store.find_by_name("b").unwrap(), Some(2));
        assert_eq!(store.find_by_name("c").unwrap(), None);
    }

    #[test]
    fn test_not_found() {
        let store = MemoryGridStore::default();
        assert!(matches!(
            store.fetch_cells(3),
            Err(DrafterError::BlueprintNotFound(_))
        ));
    }
}
