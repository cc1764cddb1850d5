//! Error types for the blueprint drafter.

use thiserror::Error;

/// Result type alias using DrafterError.
pub type Result<T> = std::result::Result<T, DrafterError>;

/// Main error type for blueprint drafting operations.
///
/// Per-cell problems (bad coordinates, unknown block types, unusable heights)
/// never show up here: they are logged and the offending input is dropped.
#[derive(Error, Debug)]
pub enum DrafterError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to build or serialize a PDF document.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Failed to encode a page preview image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No blueprint is stored under the requested id.
    #[error("Blueprint not found: {0}")]
    BlueprintNotFound(String),

    /// An explicit floor height that cannot be used (zero).
    #[error("Invalid floor height: {0}")]
    InvalidFloorHeight(String),

    /// Configuration values that cannot be drawn with.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Blueprint data that cannot be interpreted at all.
    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    /// Failed to export a drawing.
    #[error("Export error: {0}")]
    Export(String),
}
