//! Shared types used throughout the library.

mod blueprint;
mod direction;

pub use blueprint::{Blueprint, Layer, LayerCell};
pub use direction::{Axis, Side};

use serde::{Deserialize, Serialize};

/// A cell position in 3D grid space. `z` selects the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    pub z: i32,
    pub y: i32,
    pub x: i32,
}

impl CellPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// One occupied grid unit: a position plus its block type tag.
///
/// The tag is kept verbatim; whether it is drawable is decided by the
/// [`Palette`](crate::config::Palette) in effect for an export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    #[serde(rename = "type")]
    pub block: String,
}

impl Cell {
    pub fn new(x: i32, y: i32, z: i32, block: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            block: block.into(),
        }
    }

    pub fn position(&self) -> CellPosition {
        CellPosition::new(self.x, self.y, self.z)
    }

    /// A blank tag means "no cell here".
    pub fn is_blank(&self) -> bool {
        self.block.trim().is_empty()
    }
}

/// An axis-aligned integer bounding box over occupied cells (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl GridBounds {
    pub fn from_positions(positions: impl Iterator<Item = CellPosition>) -> Option<Self> {
        let mut min = [i32::MAX; 3];
        let mut max = [i32::MIN; 3];
        let mut has_points = false;

        for p in positions {
            has_points = true;
            let coords = [p.x, p.y, p.z];
            for i in 0..3 {
                min[i] = min[i].min(coords[i]);
                max[i] = max[i].max(coords[i]);
            }
        }

        if has_points {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Number of cells spanned on each axis.
    pub fn dimensions(&self) -> [i64; 3] {
        [
            self.max[0] as i64 - self.min[0] as i64 + 1,
            self.max[1] as i64 - self.min[1] as i64 + 1,
            self.max[2] as i64 - self.min[2] as i64 + 1,
        ]
    }
}

/// An 8-bit RGB color.
///
/// Deserializes from `"#rrggbb"` or `[r, g, b]`; serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RgbWire", into = "[u8; 3]")]
pub struct Rgb(pub [u8; 3]);

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbWire {
    Hex(String),
    Channels([u8; 3]),
}

impl TryFrom<RgbWire> for Rgb {
    type Error = String;

    fn try_from(wire: RgbWire) -> std::result::Result<Self, Self::Error> {
        match wire {
            RgbWire::Hex(hex) => {
                Rgb::from_hex(&hex).ok_or_else(|| format!("invalid hex color {:?}", hex))
            }
            RgbWire::Channels(channels) => Ok(Rgb(channels)),
        }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.0
    }
}

impl Rgb {
    /// Fallback fill for cells whose type has no palette entry.
    pub const GRAY: Rgb = Rgb([0x80, 0x80, 0x80]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([0xff, 0xff, 0xff]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Channels scaled to 0.0..=1.0, as PDF color operators expect.
    pub fn to_unit(self) -> [f32; 3] {
        let [r, g, b] = self.0;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}
