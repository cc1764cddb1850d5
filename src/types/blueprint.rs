//! Blueprints and their per-z layer views.

use super::{Cell, CellPosition, GridBounds};
use std::collections::BTreeMap;

/// A named set of typed cells.
///
/// At most one block type is held per coordinate; inserting at an occupied
/// position replaces the previous tag. Blank tags are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blueprint {
    pub name: String,
    cells: BTreeMap<CellPosition, String>,
}

impl Blueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Build a blueprint from a cell list. Later duplicates win.
    pub fn with_cells(name: impl Into<String>, cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut blueprint = Self::new(name);
        for cell in cells {
            blueprint.insert(cell);
        }
        blueprint
    }

    /// Insert a cell, or clear its position when the tag is blank.
    pub fn insert(&mut self, cell: Cell) {
        let pos = cell.position();
        if cell.is_blank() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, cell.block);
        }
    }

    pub fn get(&self, pos: CellPosition) -> Option<&str> {
        self.cells.get(&pos).map(String::as_str)
    }

    /// Iterate cells ordered by (z, y, x).
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellPosition, &str)> + '_ {
        self.cells.iter().map(|(pos, block)| (*pos, block.as_str()))
    }

    /// Owned copies of every cell, ordered by (z, y, x).
    pub fn cells(&self) -> Vec<Cell> {
        self.iter_cells()
            .map(|(pos, block)| Cell::new(pos.x, pos.y, pos.z, block))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn bounds(&self) -> Option<GridBounds> {
        GridBounds::from_positions(self.cells.keys().copied())
    }

    /// Distinct layer heights, ascending.
    pub fn layer_heights(&self) -> Vec<i32> {
        let mut heights: Vec<i32> = self.cells.keys().map(|p| p.z).collect();
        heights.dedup();
        heights
    }

    /// All non-empty layers, ascending by z.
    pub fn layers(&self) -> Vec<Layer> {
        let mut layers: Vec<Layer> = Vec::new();
        for (pos, block) in &self.cells {
            let cell = LayerCell {
                x: pos.x,
                y: pos.y,
                block: block.clone(),
            };
            match layers.last_mut() {
                Some(layer) if layer.z == pos.z => layer.cells.push(cell),
                _ => layers.push(Layer {
                    z: pos.z,
                    cells: vec![cell],
                }),
            }
        }
        layers
    }

    /// The layer at one height (possibly empty).
    pub fn layer(&self, z: i32) -> Layer {
        let cells = self
            .cells
            .range(CellPosition::new(i32::MIN, i32::MIN, z)..=CellPosition::new(i32::MAX, i32::MAX, z))
            .map(|(pos, block)| LayerCell {
                x: pos.x,
                y: pos.y,
                block: block.clone(),
            })
            .collect();
        Layer { z, cells }
    }
}

/// A cell within a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerCell {
    pub x: i32,
    pub y: i32,
    pub block: String,
}

/// All cells of a blueprint sharing one z, ordered by (y, x).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub z: i32,
    pub cells: Vec<LayerCell>,
}

impl Layer {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}
