//! Drafting configuration.
//!
//! Everything an export depends on besides the blueprint itself lives in a
//! [`DraftConfig`] value that is handed to the drafter. Nothing here is global,
//! so exports with different palettes can run side by side.

use crate::error::{DrafterError, Result};
use crate::types::Rgb;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// One recognized block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Type tag as stored on cells, e.g. "wall".
    pub name: String,
    /// Fill color on the drawing.
    pub color: Rgb,
    /// Material cost grows with floor height (walls, ladders).
    #[serde(default)]
    pub scales_with_height: bool,
}

impl PaletteEntry {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
            scales_with_height: false,
        }
    }

    pub fn scaled(mut self) -> Self {
        self.scales_with_height = true;
        self
    }

    /// Legend label: the name with its first letter upper-cased.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// The set of recognized block types, in legend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PaletteEntry>", into = "Vec<PaletteEntry>")]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl From<Vec<PaletteEntry>> for Palette {
    fn from(entries: Vec<PaletteEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<Palette> for Vec<PaletteEntry> {
    fn from(palette: Palette) -> Self {
        palette.entries
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(vec![
            PaletteEntry::new("wall", Rgb::new(0x33, 0x33, 0x33)).scaled(),
            PaletteEntry::new("floor", Rgb::new(0xb2, 0x99, 0x66)),
            PaletteEntry::new("stairs", Rgb::new(0x99, 0x66, 0x33)),
            PaletteEntry::new("roof", Rgb::new(0xcc, 0x33, 0x33)),
            PaletteEntry::new("ladder", Rgb::new(0xff, 0xcc, 0x33)).scaled(),
        ])
    }
}

impl Palette {
    /// Create a palette. A repeated name keeps its first entry.
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        let mut unique: Vec<PaletteEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|e| e.name == entry.name) {
                log::warn!("Duplicate palette entry '{}' ignored", entry.name);
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, block: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.name == block)
    }

    /// Whether a type tag is in the recognized set.
    pub fn recognizes(&self, block: &str) -> bool {
        self.get(block).is_some()
    }

    /// Fill color for a type, gray when the type is unknown.
    pub fn color_of(&self, block: &str) -> Rgb {
        self.get(block).map(|e| e.color).unwrap_or(Rgb::GRAY)
    }

    /// Position of a type in declaration order.
    pub fn index_of(&self, block: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == block)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Height of one floor in blocks; always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorHeight(NonZeroU32);

impl FloorHeight {
    pub const DEFAULT: FloorHeight = match NonZeroU32::new(3) {
        Some(h) => FloorHeight(h),
        None => unreachable!(),
    };

    /// Create a height from an explicit value. Zero is rejected.
    pub fn new(height: u32) -> Result<Self> {
        NonZeroU32::new(height)
            .map(FloorHeight)
            .ok_or_else(|| DrafterError::InvalidFloorHeight(height.to_string()))
    }

    /// Interpret user input, falling back to `default` for anything that is
    /// missing, non-numeric, zero, or negative.
    pub fn parse_lenient(input: Option<&str>, default: FloorHeight) -> FloorHeight {
        let Some(raw) = input else {
            return default;
        };
        match raw.trim().parse::<i64>() {
            Ok(value) if value >= 1 => match u32::try_from(value) {
                Ok(h) => FloorHeight::new(h).unwrap_or(default),
                Err(_) => {
                    log::warn!("Floor height {} out of range, using {}", value, default);
                    default
                }
            },
            Ok(value) => {
                log::warn!("Floor height {} is not positive, using {}", value, default);
                default
            }
            Err(_) => {
                log::warn!("Floor height '{}' is not a number, using {}", raw, default);
                default
            }
        }
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for FloorHeight {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for FloorHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page-space placement of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Edge length of one cell in points.
    pub scale: f32,
    /// Page position of grid coordinate (0, 0). Grid y grows down the page.
    pub origin: Vec2,
}

impl Geometry {
    pub fn new(scale: f32, origin: Vec2) -> Self {
        Self { scale, origin }
    }

    /// Page x of the left edge of column `x`.
    pub fn column_left(&self, x: i32) -> f32 {
        self.origin.x + x as f32 * self.scale
    }

    /// Page y of the top edge of row `y` (the line shared with row `y - 1`).
    pub fn row_top(&self, y: i32) -> f32 {
        self.origin.y - y as f32 * self.scale
    }
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// Largest page side PDF viewers are required to support (200 inches).
    pub const MAX_EXTENT: f32 = 14_400.0;

    pub const A4_LANDSCAPE: PageSize = PageSize {
        width: 842.0,
        height: 595.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4_LANDSCAPE
    }
}

/// Full drafting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Recognized block types and their colors.
    pub palette: Palette,
    /// Grid scale and origin.
    pub geometry: Geometry,
    /// Page size for every layer.
    pub page: PageSize,
    /// Height used when the caller gives none or an unusable one.
    pub default_floor_height: FloorHeight,
    /// Font size of dimension labels.
    pub label_font_size: f32,
    /// Font size of legend lines.
    pub legend_font_size: f32,
    /// Font size of the page title.
    pub title_font_size: f32,
}

impl Default for DraftConfig {
    fn default() -> Self {
        let page = PageSize::default();
        Self {
            palette: Palette::default(),
            geometry: Geometry::new(20.0, Vec2::new(page.width / 2.0, page.height / 2.0)),
            page,
            default_floor_height: FloorHeight::DEFAULT,
            label_font_size: 8.0,
            legend_font_size: 10.0,
            title_font_size: 14.0,
        }
    }
}

impl DraftConfig {
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_page(mut self, page: PageSize) -> Self {
        self.page = page;
        self
    }

    /// Resolve a caller-supplied height string against this config's default.
    pub fn floor_height(&self, input: Option<&str>) -> FloorHeight {
        FloorHeight::parse_lenient(input, self.default_floor_height)
    }

    /// Load a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DraftConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value can be drawn with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| -> Result<()> { Err(DrafterError::InvalidConfig(message)) };

        let scale = self.geometry.scale;
        if !(scale.is_finite() && scale >= 1.0) {
            return invalid(format!("grid scale must be at least 1 point, got {}", scale));
        }
        if !self.geometry.origin.is_finite() {
            return invalid(format!("grid origin must be finite, got {}", self.geometry.origin));
        }
        for (what, extent) in [("width", self.page.width), ("height", self.page.height)] {
            if !(extent.is_finite() && extent > 0.0 && extent <= PageSize::MAX_EXTENT) {
                return invalid(format!(
                    "page {} must be in (0, {}] points, got {}",
                    what,
                    PageSize::MAX_EXTENT,
                    extent
                ));
            }
        }
        for (what, size) in [
            ("label", self.label_font_size),
            ("legend", self.legend_font_size),
            ("title", self.title_font_size),
        ] {
            if !(size.is_finite() && size > 0.0) {
                return invalid(format!("{} font size must be positive, got {}", what, size));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_order() {
        let palette = Palette::default();
        let names: Vec<&str> = palette.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["wall", "floor", "stairs", "roof", "ladder"]);
        assert!(palette.get("wall").unwrap().scales_with_height);
        assert!(palette.get("ladder").unwrap().scales_with_height);
        assert!(!palette.get("floor").unwrap().scales_with_height);
    }

    #[test]
    fn test_unknown_type_is_gray() {
        let palette = Palette::default();
        assert!(!palette.recognizes("decoration"));
        assert_eq!(palette.color_of("decoration"), Rgb::GRAY);
        assert_eq!(palette.color_of("roof"), Rgb::new(0xcc, 0x33, 0x33));
    }

    #[test]
    fn test_duplicate_palette_entry_keeps_first() {
        let palette = Palette::new(vec![
            PaletteEntry::new("wall", Rgb::BLACK),
            PaletteEntry::new("wall", Rgb::WHITE),
        ]);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.color_of("wall"), Rgb::BLACK);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(PaletteEntry::new("stairs", Rgb::BLACK).display_name(), "Stairs");
        assert_eq!(PaletteEntry::new("", Rgb::BLACK).display_name(), "");
    }

    #[test]
    fn test_floor_height_lenient() {
        let default = FloorHeight::DEFAULT;
        assert_eq!(FloorHeight::parse_lenient(Some("5"), default).get(), 5);
        assert_eq!(FloorHeight::parse_lenient(Some(" 7 "), default).get(), 7);
        assert_eq!(FloorHeight::parse_lenient(Some("abc"), default).get(), 3);
        assert_eq!(FloorHeight::parse_lenient(Some(""), default).get(), 3);
        assert_eq!(FloorHeight::parse_lenient(Some("0"), default).get(), 3);
        assert_eq!(FloorHeight::parse_lenient(Some("-2"), default).get(), 3);
        assert_eq!(FloorHeight::parse_lenient(Some("99999999999"), default).get(), 3);
        assert_eq!(FloorHeight::parse_lenient(None, default).get(), 3);
    }

    #[test]
    fn test_floor_height_rejects_zero() {
        assert!(FloorHeight::new(0).is_err());
        assert_eq!(FloorHeight::new(4).unwrap().get(), 4);
    }

    #[test]
    fn test_geometry_edges() {
        let geometry = Geometry::new(10.0, Vec2::new(100.0, 200.0));
        assert_eq!(geometry.column_left(2), 120.0);
        assert_eq!(geometry.row_top(0), 200.0);
        assert_eq!(geometry.row_top(1), 190.0);
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config = DraftConfig::from_json(r#"{ "default_floor_height": 4 }"#).unwrap();
        assert_eq!(config.default_floor_height.get(), 4);
        assert_eq!(config.palette, Palette::default());
        assert_eq!(config.floor_height(Some("x")).get(), 4);
    }

    #[test]
    fn test_config_custom_palette() {
        let json = r##"{ "palette": [
            { "name": "glass", "color": [200, 230, 255] },
            { "name": "brick", "color": "#b22222", "scales_with_height": true }
        ] }"##;
        let config = DraftConfig::from_json(json).unwrap();
        assert!(config.palette.recognizes("glass"));
        assert!(!config.palette.recognizes("wall"));
        assert_eq!(config.palette.color_of("brick"), Rgb::new(0xb2, 0x22, 0x22));
    }

    #[test]
    fn test_config_rejects_bad_scale() {
        let json = r#"{ "geometry": { "scale": 0.0, "origin": [0.0, 0.0] } }"#;
        assert!(matches!(
            DraftConfig::from_json(json),
            Err(DrafterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_rejects_huge_page() {
        let json = r#"{ "page": { "width": 1e30, "height": 595.0 } }"#;
        assert!(matches!(
            DraftConfig::from_json(json),
            Err(DrafterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_builder_config() {
        assert!(DraftConfig::default().validate().is_ok());

        let zero_scale = DraftConfig::default().with_geometry(Geometry::new(0.0, Vec2::ZERO));
        assert!(zero_scale.validate().is_err());

        let mut no_font = DraftConfig::default();
        no_font.label_font_size = 0.0;
        assert!(no_font.validate().is_err());
    }
}
