//! PNG page previews.
//!
//! Rasterizes lines and filled rectangles of each page. Text is not rendered;
//! use the PDF export for a complete drawing.

use crate::config::PageSize;
use crate::drafter::{DrawCommand, Drawing, Page};
use crate::error::{DrafterError, Result};
use crate::types::Rgb;
use image::{ImageEncoder, RgbImage};

/// Largest preview the rasterizer will allocate, in pixels.
pub const MAX_PREVIEW_PIXELS: u64 = 64 * 1024 * 1024;

/// Export every page as a PNG image, `pixels_per_point` pixels per PDF point.
pub fn export_png_pages(drawing: &Drawing, pixels_per_point: f32) -> Result<Vec<Vec<u8>>> {
    drawing
        .pages
        .iter()
        .map(|page| export_png_page(page, drawing.page_size, pixels_per_point))
        .collect()
}

/// Export one page as a PNG image.
pub fn export_png_page(page: &Page, size: PageSize, pixels_per_point: f32) -> Result<Vec<u8>> {
    let image = rasterize_page(page, size, pixels_per_point)?;

    let mut bytes = Vec::new();
    let cursor = std::io::Cursor::new(&mut bytes);
    let encoder = image::codecs::png::PngEncoder::new(cursor);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(bytes)
}

/// Paint a page onto a white canvas.
pub fn rasterize_page(page: &Page, size: PageSize, pixels_per_point: f32) -> Result<RgbImage> {
    if !(pixels_per_point.is_finite() && pixels_per_point > 0.0) {
        return Err(DrafterError::Export(format!(
            "invalid preview resolution: {}",
            pixels_per_point
        )));
    }
    let width = (size.width as f64 * pixels_per_point as f64).ceil();
    let height = (size.height as f64 * pixels_per_point as f64).ceil();
    if !(width >= 1.0 && height >= 1.0) {
        return Err(DrafterError::Export("page has no area".to_string()));
    }
    if width * height > MAX_PREVIEW_PIXELS as f64 {
        return Err(DrafterError::Export(format!(
            "preview of {}x{} pixels exceeds the limit of {} pixels",
            width, height, MAX_PREVIEW_PIXELS
        )));
    }
    let (width, height) = (width as u32, height as u32);

    let mut canvas = Canvas {
        image: RgbImage::from_pixel(width, height, image::Rgb(Rgb::WHITE.0)),
        page_height: size.height,
        scale: pixels_per_point,
    };

    for command in &page.commands {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => canvas.line(from.x, from.y, to.x, to.y, *width, *color),
            DrawCommand::FillRect { rect, color } => {
                let max = rect.max();
                canvas.fill(rect.min.x, rect.min.y, max.x, max.y, *color);
            }
            DrawCommand::Text { .. } => {}
        }
    }

    Ok(canvas.image)
}

struct Canvas {
    image: RgbImage,
    page_height: f32,
    scale: f32,
}

impl Canvas {
    /// Fill the page-space box [x0, x1] x [y0, y1].
    fn fill(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb) {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let px0 = (x0.min(x1) * self.scale).floor().clamp(0.0, w) as u32;
        let px1 = (x0.max(x1) * self.scale).ceil().clamp(0.0, w) as u32;
        let py0 = ((self.page_height - y0.max(y1)) * self.scale).floor().clamp(0.0, h) as u32;
        let py1 = ((self.page_height - y0.min(y1)) * self.scale).ceil().clamp(0.0, h) as u32;

        for py in py0..py1 {
            for px in px0..px1 {
                self.image.put_pixel(px, py, image::Rgb(color.0));
            }
        }
    }

    /// Stroke a line by stamping squares of the line width along it.
    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgb) {
        let half = (width / 2.0).max(0.5 / self.scale);
        let length = (x1 - x0).abs().max((y1 - y0).abs()) * self.scale;
        let steps = length.ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.fill(x - half, y - half, x + half, y + half, color);
        }
    }
}
