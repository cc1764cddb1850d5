//! Raw draw-command export for custom rendering.

use crate::config::{FloorHeight, PageSize};
use crate::drafter::{DrafterOutput, MaterialTally, Page};
use crate::error::Result;
use serde::Serialize;

/// Borrowed view of a drafter output, serializable as JSON.
#[derive(Debug, Serialize)]
pub struct RawDrawing<'a> {
    pub name: &'a str,
    pub floor_height: FloorHeight,
    pub page_size: PageSize,
    /// `type -> count` in palette order, zero counts included.
    pub materials: &'a MaterialTally,
    pub pages: &'a [Page],
}

/// Export a drafter output as raw data.
pub fn export_raw(output: &DrafterOutput) -> RawDrawing<'_> {
    RawDrawing {
        name: &output.drawing.name,
        floor_height: output.materials.floor_height,
        page_size: output.drawing.page_size,
        materials: &output.materials,
        pages: &output.drawing.pages,
    }
}

/// Export a drafter output as pretty-printed JSON.
pub fn export_json(output: &DrafterOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_raw(output))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafter::Drafter;
    use crate::types::{Blueprint, Cell};

    #[test]
    fn test_export_json() {
        let blueprint = Blueprint::with_cells(
            "raw",
            vec![Cell::new(0, 0, 0, "floor"), Cell::new(1, 0, 0, "floor")],
        );
        let output = Drafter::new().draft(&blueprint, FloorHeight::new(4).unwrap());
        let json: serde_json::Value = serde_json::from_str(&export_json(&output).unwrap()).unwrap();

        assert_eq!(json["name"], "raw");
        assert_eq!(json["floor_height"], 4);
        assert_eq!(json["materials"]["floor"], 2);
        assert_eq!(json["pages"].as_array().unwrap().len(), 1);
        assert_eq!(json["pages"][0]["z"], 0);

        let kinds: Vec<&str> = json["pages"][0]["commands"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["kind"].as_str())
            .collect();
        assert!(kinds.contains(&"fill_rect"));
        assert!(kinds.contains(&"text"));
    }
}
