//! Layer rasterization and the solid-neighbor test.
//!
//! A layer is turned into one filled rectangle per recognized cell. The set of
//! recognized positions doubles as the boundary map used by the dimension
//! annotator: a side of a cell is exposed when the neighbor there is not solid.

use super::geometry::Rect;
use crate::config::{Geometry, Palette};
use crate::types::{Layer, Rgb, Side};
use glam::Vec2;
use std::collections::{BTreeMap, HashSet};

/// Positions within one layer that hold a recognized block type.
#[derive(Debug, Clone, Default)]
pub struct SolidMap {
    solid: HashSet<(i32, i32)>,
}

impl SolidMap {
    pub fn from_positions(positions: impl IntoIterator<Item = (i32, i32)>) -> Self {
        Self {
            solid: positions.into_iter().collect(),
        }
    }

    /// True iff a recognized block sits at `(x, y)`.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.solid.contains(&(x, y))
    }

    /// True iff the neighbor of `(x, y)` on `side` is not solid.
    ///
    /// A neighbor outside the coordinate range counts as open space.
    pub fn is_exposed(&self, x: i32, y: i32, side: Side) -> bool {
        let (dx, dy) = side.offset();
        match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(nx), Some(ny)) => !self.is_solid(nx, ny),
            _ => true,
        }
    }

    /// Sorted x coordinates of solid cells, grouped by row.
    pub fn rows(&self) -> BTreeMap<i32, Vec<i32>> {
        let mut rows: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for &(x, y) in &self.solid {
            rows.entry(y).or_default().push(x);
        }
        for xs in rows.values_mut() {
            xs.sort_unstable();
        }
        rows
    }

    /// Sorted y coordinates of solid cells, grouped by column.
    pub fn columns(&self) -> BTreeMap<i32, Vec<i32>> {
        let mut columns: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for &(x, y) in &self.solid {
            columns.entry(x).or_default().push(y);
        }
        for ys in columns.values_mut() {
            ys.sort_unstable();
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.solid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solid.is_empty()
    }
}

/// A rasterized cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub block: String,
    pub rect: Rect,
    pub color: Rgb,
}

/// Rasterized form of one layer.
#[derive(Debug, Clone, Default)]
pub struct LayerRaster {
    /// Filled rectangles, ordered by (y, x).
    pub cells: Vec<CellRect>,
    /// Boundary map for the annotator.
    pub solid: SolidMap,
}

/// Page rectangle of cell `(x, y)`: bottom-left at
/// `(origin.x + x*scale, origin.y - (y+1)*scale)`, `scale` on each side.
///
/// Returns `None` when the cell cannot be placed (coordinate overflow or a
/// non-finite result).
pub fn cell_rect(geometry: &Geometry, x: i32, y: i32) -> Option<Rect> {
    let below = y.checked_add(1)?;
    let rect = Rect::new(
        Vec2::new(geometry.column_left(x), geometry.row_top(below)),
        Vec2::splat(geometry.scale),
    );
    rect.is_finite().then_some(rect)
}

/// Rasterize the recognized cells of a layer.
///
/// Only placed cells enter the solid map: unrecognized types and cells that
/// cannot be placed are left out of both. Skipped cells are logged and the
/// rest of the layer is still drawn.
pub fn rasterize_layer(layer: &Layer, palette: &Palette, geometry: &Geometry) -> LayerRaster {
    let mut cells = Vec::with_capacity(layer.cells.len());

    for cell in &layer.cells {
        if !palette.recognizes(&cell.block) {
            log::debug!(
                "Skipping unrecognized block '{}' at ({}, {}, {})",
                cell.block,
                cell.x,
                cell.y,
                layer.z
            );
            continue;
        }

        let Some(rect) = cell_rect(geometry, cell.x, cell.y) else {
            log::warn!(
                "Skipping cell at ({}, {}, {}): cannot be placed on the page",
                cell.x,
                cell.y,
                layer.z
            );
            continue;
        };

        cells.push(CellRect {
            x: cell.x,
            y: cell.y,
            block: cell.block.clone(),
            rect,
            color: palette.color_of(&cell.block),
        });
    }

    let solid = SolidMap::from_positions(cells.iter().map(|c| (c.x, c.y)));
    LayerRaster { cells, solid }
}
