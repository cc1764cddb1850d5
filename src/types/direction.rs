//! In-plane sides of a grid cell, used for exposure tests and dimension placement.

use serde::{Deserialize, Serialize};

/// The four axis-aligned neighbors of a cell within one layer.
///
/// South and north step along y (`y - 1` and `y + 1`), west and east along x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    West,
    East,
}

impl Side {
    /// Get the grid offset for this side.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Side::North => (0, 1),
            Side::South => (0, -1),
            Side::West => (-1, 0),
            Side::East => (1, 0),
        }
    }

    /// Axis along which runs exposed on this side are measured.
    pub fn run_axis(&self) -> Axis {
        match self {
            Side::North | Side::South => Axis::X,
            Side::West | Side::East => Axis::Y,
        }
    }
}

/// The two in-plane axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}
