//! Blueprint-to-drawing compilation.
//!
//! This module turns a blueprint into per-layer pages of draw commands and a
//! material tally. Exporters in [`crate::export`] turn the result into bytes.

pub mod annotate;
pub mod compose;
pub mod geometry;
pub mod materials;
pub mod raster;
pub mod runs;

pub use annotate::{annotate_layer, DimensionLabel};
pub use geometry::{DrawCommand, Drawing, Page, Rect, TextAnchor};
pub use materials::{aggregate_materials, MaterialCount, MaterialTally};
pub use raster::{rasterize_layer, CellRect, LayerRaster, SolidMap};
pub use runs::{detect_runs, Run};

use crate::config::{DraftConfig, FloorHeight};
use crate::error::Result;
use crate::storage::GridStore;
use crate::types::Blueprint;

/// Output from the drafter.
#[derive(Debug, Clone, PartialEq)]
pub struct DrafterOutput {
    /// Pages of draw commands, lowest layer first.
    pub drawing: Drawing,
    /// Material quantities over the whole blueprint.
    pub materials: MaterialTally,
}

impl DrafterOutput {
    pub fn page_count(&self) -> usize {
        self.drawing.page_count()
    }
}

/// The main drafter struct.
#[derive(Debug, Clone, Default)]
pub struct Drafter {
    config: DraftConfig,
}

impl Drafter {
    /// Create a drafter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drafter with custom configuration.
    ///
    /// Configurations that fail [`DraftConfig::validate`] are still accepted;
    /// drawing stays bounded but grid lines may be left out.
    pub fn with_config(config: DraftConfig) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Drafting with an unusable configuration: {}", e);
        }
        Self { config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    /// Resolve a caller-supplied height string, falling back to the default.
    pub fn floor_height(&self, input: Option<&str>) -> FloorHeight {
        self.config.floor_height(input)
    }

    /// Compile a blueprint into a drawing and material tally.
    pub fn draft(&self, blueprint: &Blueprint, floor_height: FloorHeight) -> DrafterOutput {
        let materials = self.materials(blueprint, floor_height);
        let drawing = compose::compose(blueprint, &self.config, &materials);
        log::debug!(
            "Drafted '{}': {} pages, {} commands",
            blueprint.name,
            drawing.page_count(),
            drawing.command_count()
        );
        DrafterOutput { drawing, materials }
    }

    /// Material quantities for a blueprint.
    pub fn materials(&self, blueprint: &Blueprint, floor_height: FloorHeight) -> MaterialTally {
        aggregate_materials(blueprint, &self.config.palette, floor_height)
    }

    /// Compile a blueprint and export it as a paged PDF.
    pub fn render_pdf(&self, blueprint: &Blueprint, floor_height: FloorHeight) -> Result<Vec<u8>> {
        let output = self.draft(blueprint, floor_height);
        crate::export::pdf::export_pdf(&output.drawing)
    }

    /// Fetch a stored blueprint and export it as a paged PDF.
    ///
    /// A missing blueprint fails before anything is drawn.
    pub fn render_stored<S: GridStore + ?Sized>(
        &self,
        store: &S,
        id: u64,
        height_input: Option<&str>,
    ) -> Result<Vec<u8>> {
        let blueprint = store.fetch_blueprint(id)?;
        let floor_height = self.floor_height(height_input);
        self.render_pdf(&blueprint, floor_height)
    }
}
