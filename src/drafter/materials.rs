//! Material quantities for a whole blueprint.

use crate::config::{FloorHeight, Palette};
use crate::types::Blueprint;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Count for one block type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialCount {
    /// Type tag, e.g. "wall".
    pub block: String,
    /// Legend label, e.g. "Wall".
    pub display_name: String,
    pub count: u64,
}

/// Per-type material totals in palette declaration order.
///
/// Every palette entry is present, including zero counts; display paths use
/// [`MaterialTally::non_zero`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialTally {
    pub floor_height: FloorHeight,
    entries: Vec<MaterialCount>,
}

impl MaterialTally {
    fn empty(palette: &Palette, floor_height: FloorHeight) -> Self {
        let entries = palette
            .entries()
            .iter()
            .map(|e| MaterialCount {
                block: e.name.clone(),
                display_name: e.display_name(),
                count: 0,
            })
            .collect();
        Self {
            floor_height,
            entries,
        }
    }

    /// Count for a type; zero for unknown types.
    pub fn get(&self, block: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.block == block)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialCount> + '_ {
        self.entries.iter()
    }

    pub fn non_zero(&self) -> impl Iterator<Item = &MaterialCount> + '_ {
        self.entries.iter().filter(|e| e.count > 0)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Legend header, e.g. `Material (H:3)`.
    pub fn legend_header(&self) -> String {
        format!("Material (H:{})", self.floor_height)
    }

    /// Legend lines for non-zero types, e.g. `Wall: 12`.
    pub fn legend_lines(&self) -> Vec<String> {
        self.non_zero()
            .map(|e| format!("{}: {}", e.display_name, e.count))
            .collect()
    }
}

/// Serializes as a `type -> count` map in palette order, zero counts included.
impl Serialize for MaterialTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.block, &entry.count)?;
        }
        map.end()
    }
}

/// Sum block counts over every layer of a blueprint.
///
/// Types that scale with height contribute `floor_height` per cell, other
/// recognized types contribute 1. Unrecognized types contribute nothing.
pub fn aggregate_materials(
    blueprint: &Blueprint,
    palette: &Palette,
    floor_height: FloorHeight,
) -> MaterialTally {
    let mut tally = MaterialTally::empty(palette, floor_height);

    for (_, block) in blueprint.iter_cells() {
        let Some(index) = palette.index_of(block) else {
            continue;
        };
        let weight = if palette.entries()[index].scales_with_height {
            floor_height.get() as u64
        } else {
            1
        };
        tally.entries[index].count += weight;
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn height(h: u32) -> FloorHeight {
        FloorHeight::new(h).unwrap()
    }

    #[test]
    fn test_height_scaling() {
        let mut cells = Vec::new();
        for x in 0..4 {
            cells.push(Cell::new(x, 0, 0, "wall"));
        }
        cells.push(Cell::new(0, 1, 0, "ladder"));
        cells.push(Cell::new(0, 1, 1, "ladder"));
        let blueprint = Blueprint::with_cells("tower", cells);

        let tally = aggregate_materials(&blueprint, &Palette::default(), height(5));
        assert_eq!(tally.get("wall"), 20);
        assert_eq!(tally.get("ladder"), 10);
        assert_eq!(tally.get("floor"), 0);
        assert_eq!(tally.get("stairs"), 0);
        assert_eq!(tally.get("roof"), 0);
        assert_eq!(tally.legend_lines(), vec!["Wall: 20", "Ladder: 10"]);
        assert_eq!(tally.legend_header(), "Material (H:5)");
    }

    #[test]
    fn test_flat_types_count_once() {
        let blueprint = Blueprint::with_cells(
            "deck",
            vec![
                Cell::new(0, 0, 0, "floor"),
                Cell::new(1, 0, 0, "floor"),
                Cell::new(0, 0, 1, "roof"),
                Cell::new(1, 0, 1, "stairs"),
            ],
        );
        let tally = aggregate_materials(&blueprint, &Palette::default(), height(9));
        assert_eq!(tally.get("floor"), 2);
        assert_eq!(tally.get("roof"), 1);
        assert_eq!(tally.get("stairs"), 1);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_unrecognized_type_ignored() {
        let blueprint = Blueprint::with_cells(
            "garden",
            vec![Cell::new(0, 0, 0, "decoration"), Cell::new(1, 0, 0, "floor")],
        );
        let tally = aggregate_materials(&blueprint, &Palette::default(), FloorHeight::DEFAULT);
        assert_eq!(tally.get("decoration"), 0);
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.legend_lines(), vec!["Floor: 1"]);
    }

    #[test]
    fn test_display_order_follows_palette() {
        let blueprint = Blueprint::with_cells(
            "mixed",
            vec![
                Cell::new(0, 0, 0, "ladder"),
                Cell::new(1, 0, 0, "roof"),
                Cell::new(2, 0, 0, "wall"),
            ],
        );
        let tally = aggregate_materials(&blueprint, &Palette::default(), height(1));
        let order: Vec<&str> = tally.non_zero().map(|e| e.block.as_str()).collect();
        assert_eq!(order, vec!["wall", "roof", "ladder"]);
    }

    #[test]
    fn test_serialize_as_map() {
        let blueprint = Blueprint::with_cells("one", vec![Cell::new(0, 0, 0, "wall")]);
        let tally = aggregate_materials(&blueprint, &Palette::default(), height(3));
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(
            json,
            r#"{"wall":3,"floor":0,"stairs":0,"roof":0,"ladder":0}"#
        );
    }
}
