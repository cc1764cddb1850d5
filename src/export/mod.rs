//! Drawing export formats.
//!
//! This module provides exporters for compiled drawings.

pub mod pdf;
pub mod png;
pub mod raw;

pub use pdf::export_pdf;
pub use png::{export_png_page, export_png_pages};
pub use raw::{export_json, export_raw, RawDrawing};
