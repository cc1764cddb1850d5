//! # Blueprint Drafter
//!
//! A Rust library for turning voxel building blueprints into dimensioned
//! floor-plan drawings with a materials bill.
//!
//! ## Overview
//!
//! A blueprint is a sparse 3D grid of typed cells. Each horizontal layer
//! (`z` level) becomes one page: filled cells, a background grid, dimension
//! labels on every exposed wall run of two or more cells, a materials legend
//! and a title. Pages are exported as PDF, with PNG previews and raw draw
//! commands available for other renderers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use blueprint_drafter::{load_blueprint, render, FloorHeight};
//!
//! let blueprint = load_blueprint("cabin.json")?;
//! let pdf = render(&blueprint, FloorHeight::new(4)?)?;
//! std::fs::write("cabin.pdf", pdf)?;
//! ```
//!
//! ## Library Integration
//!
//! For integrating with an existing cell store, implement the [`GridStore`]
//! trait and use [`Drafter::render_stored`]:
//!
//! ```ignore
//! use blueprint_drafter::{Drafter, MemoryGridStore, GridStore, Cell};
//!
//! let mut store = MemoryGridStore::new();
//! let id = store.save("hut", vec![Cell::new(0, 0, 0, "wall")])?;
//!
//! // Height comes from untrusted input and falls back to the default
//! let pdf = Drafter::new().render_stored(&store, id, Some("4"))?;
//! ```

pub mod config;
pub mod drafter;
pub mod error;
pub mod export;
pub mod storage;
pub mod types;

// Re-export main types for convenience
pub use config::{DraftConfig, FloorHeight, Geometry, PageSize, Palette, PaletteEntry};
pub use drafter::{DrawCommand, Drafter, DrafterOutput, Drawing, MaterialTally, Page};
pub use error::{DrafterError, Result};
pub use export::pdf::export_pdf;
pub use export::png::export_png_pages;
pub use export::raw::{export_json, export_raw, RawDrawing};
pub use storage::{BlueprintSummary, GridStore, JsonFileStore, LoadResponse, MemoryGridStore};
pub use types::{Axis, Blueprint, Cell, CellPosition, Layer, Rgb, Side};

/// Render a blueprint as a paged PDF using the default configuration.
pub fn render(blueprint: &Blueprint, floor_height: FloorHeight) -> Result<Vec<u8>> {
    Drafter::new().render_pdf(blueprint, floor_height)
}

/// Material quantities of a blueprint using the default palette.
pub fn aggregate_materials(blueprint: &Blueprint, floor_height: FloorHeight) -> MaterialTally {
    Drafter::new().materials(blueprint, floor_height)
}

/// Load a blueprint document from a JSON file.
///
/// Accepts both the flat cell list and the nested `z -> x -> y -> type` map.
pub fn load_blueprint<P: AsRef<std::path::Path>>(path: P) -> Result<Blueprint> {
    let contents = std::fs::read_to_string(path)?;
    load_blueprint_from_str(&contents)
}

/// Load a blueprint document from a JSON string (for WASM compatibility).
pub fn load_blueprint_from_str(json: &str) -> Result<Blueprint> {
    storage::parse_blueprint(json)
}

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cabin.json");
        std::fs::write(
            &path,
            r#"{"name": "cabin", "cells": {"0": {"0": {"0": "wall", "1": "wall"}}}}"#,
        )
        .unwrap();

        let blueprint = load_blueprint(&path).unwrap();
        assert_eq!(blueprint.len(), 2);

        let pdf = render(&blueprint, FloorHeight::DEFAULT).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let tally = aggregate_materials(&blueprint, FloorHeight::new(2).unwrap());
        assert_eq!(tally.get("wall"), 4);
    }

    #[test]
    fn test_nested_keys_are_z_x_y() {
        let blueprint =
            load_blueprint_from_str(r#"{"name": "keys", "cells": {"1": {"2": {"5": "roof"}}}}"#)
                .unwrap();
        assert_eq!(blueprint.get(CellPosition::new(2, 5, 1)), Some("roof"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_blueprint("/nonexistent/blueprint.json"),
            Err(DrafterError::Io(_))
        ));
    }
}
