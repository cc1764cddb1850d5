//! Page-space drawing primitives.
//!
//! All coordinates are PDF points with the origin at the bottom-left corner
//! of the page and y growing upward.

use crate::config::PageSize;
use crate::types::Rgb;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its bottom-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.size.is_finite()
    }
}

/// Horizontal alignment of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Text starts at the position.
    Start,
    /// Text is centered on the position.
    Middle,
}

/// A single drawing operation on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Stroke a straight line.
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgb,
        width: f32,
    },
    /// Fill a rectangle.
    FillRect { rect: Rect, color: Rgb },
    /// Draw a text run; `position` is the baseline anchor.
    Text {
        position: Vec2,
        text: String,
        size: f32,
        anchor: TextAnchor,
        color: Rgb,
    },
}

/// One page of a drawing: a single layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Layer height drawn on this page.
    pub z: i32,
    /// Commands in paint order.
    pub commands: Vec<DrawCommand>,
}

impl Page {
    pub fn new(z: i32) -> Self {
        Self {
            z,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// All text runs on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A compiled blueprint drawing, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Blueprint name.
    pub name: String,
    /// Page dimensions shared by all pages.
    pub page_size: PageSize,
    /// One page per non-empty layer, lowest layer first.
    pub pages: Vec<Page>,
}

impl Drawing {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn command_count(&self) -> usize {
        self.pages.iter().map(|p| p.commands.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let rect = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(rect.max(), Vec2::new(14.0, 26.0));
        assert_eq!(rect.center(), Vec2::new(12.0, 23.0));
        assert!(rect.is_finite());
        assert!(!Rect::new(Vec2::new(f32::NAN, 0.0), Vec2::ONE).is_finite());
    }

    #[test]
    fn test_page_queries() {
        let mut page = Page::new(0);
        page.push(DrawCommand::FillRect {
            rect: Rect::new(Vec2::ZERO, Vec2::ONE),
            color: Rgb::BLACK,
        });
        page.push(DrawCommand::Text {
            position: Vec2::ZERO,
            text: "3".to_string(),
            size: 8.0,
            anchor: TextAnchor::Middle,
            color: Rgb::BLACK,
        });
        assert_eq!(page.commands.len(), 2);
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["3"]);
    }

    #[test]
    fn test_command_json_tagged() {
        let command = DrawCommand::Line {
            from: Vec2::ZERO,
            to: Vec2::ONE,
            color: Rgb::WHITE,
            width: 0.5,
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["kind"], "line");
    }
}
