//! Dimension labels for exposed runs of solid cells.
//!
//! For every row, cells whose south (`y - 1`) or north (`y + 1`) neighbor is
//! open are grouped into runs along x; for every column, cells open to the
//! west or east are grouped along y. Each run of two or more cells gets a label
//! with its length, placed just outside the exposed edge.

use super::raster::SolidMap;
use super::runs::{detect_runs, Run};
use crate::config::Geometry;
use crate::types::Side;
use glam::Vec2;

/// Shortest run that gets a label.
pub const MIN_LABELED_RUN: u32 = 2;

/// Gap between a south-exposed edge and the label baseline.
const SOUTH_OFFSET: f32 = 4.0;
/// Extra drop below the cell for north-exposed labels, on top of one cell.
const NORTH_EXTRA: f32 = 11.0;
/// Label start left of a west-exposed column.
const WEST_OFFSET: f32 = -15.0;
/// Gap right of an east-exposed column.
const EAST_GAP: f32 = 4.0;
/// Baseline drop so column labels read centered on the run.
const COLUMN_NUDGE: f32 = 3.0;

/// A span label on one side of a row or column.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLabel {
    /// Which edge of the run is exposed.
    pub side: Side,
    /// Fixed coordinate: the row `y` for north/south, the column `x` for west/east.
    pub line: i32,
    /// The labeled run along the other axis.
    pub run: Run,
    /// Baseline anchor on the page.
    pub position: Vec2,
    /// Label text, the run length.
    pub text: String,
}

/// Label every exposed run of length two or more in a layer.
///
/// Output order: rows ascending (south labels, then north labels), then
/// columns ascending (west, then east).
pub fn annotate_layer(solid: &SolidMap, geometry: &Geometry) -> Vec<DimensionLabel> {
    let mut labels = Vec::new();

    for (y, xs) in solid.rows() {
        for side in [Side::South, Side::North] {
            let exposed: Vec<i32> = xs
                .iter()
                .copied()
                .filter(|&x| solid.is_exposed(x, y, side))
                .collect();
            for run in labeled_runs(&exposed) {
                labels.push(row_label(geometry, side, y, run));
            }
        }
    }

    for (x, ys) in solid.columns() {
        for side in [Side::West, Side::East] {
            let exposed: Vec<i32> = ys
                .iter()
                .copied()
                .filter(|&y| solid.is_exposed(x, y, side))
                .collect();
            for run in labeled_runs(&exposed) {
                labels.push(column_label(geometry, side, x, run));
            }
        }
    }

    labels
}

fn labeled_runs(coords: &[i32]) -> impl Iterator<Item = Run> {
    detect_runs(coords)
        .into_iter()
        .filter(|run| run.len() >= MIN_LABELED_RUN)
}

fn row_label(geometry: &Geometry, side: Side, y: i32, run: Run) -> DimensionLabel {
    let x = geometry.origin.x + run.midpoint() * geometry.scale;
    let offset = match side {
        Side::South => SOUTH_OFFSET,
        _ => -(geometry.scale + NORTH_EXTRA),
    };
    DimensionLabel {
        side,
        line: y,
        run,
        position: Vec2::new(x, geometry.row_top(y) + offset),
        text: run.len().to_string(),
    }
}

fn column_label(geometry: &Geometry, side: Side, x: i32, run: Run) -> DimensionLabel {
    let offset = match side {
        Side::West => WEST_OFFSET,
        _ => geometry.scale + EAST_GAP,
    };
    let y = geometry.origin.y - run.midpoint() * geometry.scale - COLUMN_NUDGE;
    DimensionLabel {
        side,
        line: x,
        run,
        position: Vec2::new(geometry.column_left(x) + offset, y),
        text: run.len().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry::new(20.0, Vec2::new(100.0, 400.0))
    }

    fn labels_on(labels: &[DimensionLabel], side: Side) -> Vec<&DimensionLabel> {
        labels.iter().filter(|l| l.side == side).collect()
    }

    #[test]
    fn test_isolated_cell_has_no_labels() {
        let solid = SolidMap::from_positions([(0, 0)]);
        assert!(annotate_layer(&solid, &geometry()).is_empty());
    }

    #[test]
    fn test_three_cell_row() {
        let solid = SolidMap::from_positions([(0, 0), (1, 0), (2, 0)]);
        let labels = annotate_layer(&solid, &geometry());

        let south = labels_on(&labels, Side::South);
        assert_eq!(south.len(), 1);
        assert_eq!(south[0].text, "3");
        assert_eq!(south[0].run, Run::new(0, 2));
        // Centered on the middle cell x=1.
        assert_eq!(south[0].position.x, 100.0 + 1.5 * 20.0);
        assert_eq!(south[0].position.y, 400.0 + 4.0);

        let north = labels_on(&labels, Side::North);
        assert_eq!(north.len(), 1);
        assert_eq!(north[0].position.y, 400.0 - (20.0 + 11.0));

        // Columns are single cells.
        assert!(labels_on(&labels, Side::West).is_empty());
        assert!(labels_on(&labels, Side::East).is_empty());
    }

    #[test]
    fn test_covered_edge_not_labeled() {
        // Two rows stacked: the shared edge is not exposed on either row.
        let solid = SolidMap::from_positions([(0, 0), (1, 0), (0, 1), (1, 1)]);
        let labels = annotate_layer(&solid, &geometry());

        let south = labels_on(&labels, Side::South);
        assert_eq!(south.len(), 1);
        assert_eq!(south[0].line, 0);

        let north = labels_on(&labels, Side::North);
        assert_eq!(north.len(), 1);
        assert_eq!(north[0].line, 1);

        assert_eq!(labels_on(&labels, Side::West).len(), 1);
        assert_eq!(labels_on(&labels, Side::East).len(), 1);
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn test_doorway_splits_run() {
        // Wall with a gap at x=2, and a second wall row above covering x=0..=1.
        let solid = SolidMap::from_positions([
            (0, 0),
            (1, 0),
            (3, 0),
            (4, 0),
            (5, 0),
            (0, -1),
            (1, -1),
        ]);
        let labels = annotate_layer(&solid, &geometry());
        let south_row0: Vec<&str> = labels
            .iter()
            .filter(|l| l.side == Side::South && l.line == 0)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(south_row0, vec!["3"]);

        let north_row0: Vec<&str> = labels
            .iter()
            .filter(|l| l.side == Side::North && l.line == 0)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(north_row0, vec!["2", "3"]);
    }

    #[test]
    fn test_column_placement() {
        let solid = SolidMap::from_positions([(2, 0), (2, 1), (2, 2), (2, 3)]);
        let labels = annotate_layer(&solid, &geometry());

        let west = labels_on(&labels, Side::West);
        assert_eq!(west.len(), 1);
        assert_eq!(west[0].text, "4");
        assert_eq!(west[0].position.x, 100.0 + 2.0 * 20.0 - 15.0);
        assert_eq!(west[0].position.y, 400.0 - 2.0 * 20.0 - 3.0);

        let east = labels_on(&labels, Side::East);
        assert_eq!(east[0].position.x, 100.0 + 2.0 * 20.0 + 20.0 + 4.0);
    }

    #[test]
    fn test_deterministic_order() {
        let positions = [(0, 0), (1, 0), (2, 0), (0, 1), (0, 2), (5, 5), (6, 5)];
        let a = annotate_layer(&SolidMap::from_positions(positions), &geometry());
        let b = annotate_layer(&SolidMap::from_positions(positions.iter().rev().copied()), &geometry());
        assert_eq!(a, b);
    }
}
