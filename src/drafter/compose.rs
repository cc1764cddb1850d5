//! Page composition: one page per non-empty layer.
//!
//! Each page is painted in a fixed order: reference grid, axis lines, cells,
//! dimension labels, legend panel, title.

use super::annotate::annotate_layer;
use super::geometry::{DrawCommand, Drawing, Page, Rect, TextAnchor};
use super::materials::MaterialTally;
use super::raster::{rasterize_layer, LayerRaster};
use crate::config::DraftConfig;
use crate::types::{Axis, Blueprint, Layer, Rgb};
use glam::Vec2;
use std::ops::RangeInclusive;

const GRID_LIGHT: Rgb = Rgb::new(0xee, 0xee, 0xee);
const GRID_MAJOR: Rgb = Rgb::new(0x88, 0x88, 0x88);
const AXIS_X: Rgb = Rgb::new(0x00, 0xff, 0xcc);
const AXIS_Y: Rgb = Rgb::new(0xff, 0x33, 0x66);
const LEGEND_FILL: Rgb = Rgb::new(0xf0, 0xf0, 0xf0);

const GRID_LINE_WIDTH: f32 = 0.5;
const AXIS_LINE_WIDTH: f32 = 1.0;
/// Every n-th grid line is drawn heavier.
const MAJOR_EVERY: i64 = 5;
/// Upper bound on grid lines per axis.
const MAX_GRID_LINES: i64 = 10_000;

const PAGE_MARGIN: f32 = 20.0;
const LEGEND_WIDTH: f32 = 150.0;
const LEGEND_PADDING: f32 = 8.0;
const LINE_SPACING: f32 = 4.0;

/// Compose a drawing for a blueprint.
///
/// Layers without any recognized cell produce no page.
pub fn compose(blueprint: &Blueprint, config: &DraftConfig, materials: &MaterialTally) -> Drawing {
    let mut pages = Vec::new();

    for layer in blueprint.layers() {
        let raster = rasterize_layer(&layer, &config.palette, &config.geometry);
        if raster.cells.is_empty() {
            log::debug!("Layer {} has no drawable cells, skipping", layer.z);
            continue;
        }
        pages.push(compose_layer(&blueprint.name, &layer, &raster, config, materials));
    }

    Drawing {
        name: blueprint.name.clone(),
        page_size: config.page,
        pages,
    }
}

fn compose_layer(
    name: &str,
    layer: &Layer,
    raster: &LayerRaster,
    config: &DraftConfig,
    materials: &MaterialTally,
) -> Page {
    let mut page = Page::new(layer.z);

    draw_grid(&mut page, config);

    for cell in &raster.cells {
        page.push(DrawCommand::FillRect {
            rect: cell.rect,
            color: cell.color,
        });
    }

    let labels = annotate_layer(&raster.solid, &config.geometry);
    log::debug!(
        "Layer {}: {} cells, {} dimension labels",
        layer.z,
        raster.cells.len(),
        labels.len()
    );
    for label in labels {
        let anchor = match label.side.run_axis() {
            Axis::X => TextAnchor::Middle,
            Axis::Y => TextAnchor::Start,
        };
        page.push(DrawCommand::Text {
            position: label.position,
            text: label.text,
            size: config.label_font_size,
            anchor,
            color: Rgb::BLACK,
        });
    }

    draw_legend(&mut page, config, materials);

    page.push(DrawCommand::Text {
        position: Vec2::new(PAGE_MARGIN, config.page.height - PAGE_MARGIN - config.title_font_size),
        text: format!("Design: {} ({}F)", name, layer.z),
        size: config.title_font_size,
        anchor: TextAnchor::Start,
        color: Rgb::BLACK,
    });

    page
}

/// Light reference grid across the page plus the two axis lines.
fn draw_grid(page: &mut Page, config: &DraftConfig) {
    let geometry = &config.geometry;
    let size = config.page;

    let line_color = |i: i64| {
        if i % MAJOR_EVERY == 0 {
            GRID_MAJOR
        } else {
            GRID_LIGHT
        }
    };

    // Column line i sits at origin.x + i * scale.
    for i in line_indices(-geometry.origin.x, size.width - geometry.origin.x, geometry.scale) {
        if i == 0 {
            continue;
        }
        let x = geometry.origin.x + i as f32 * geometry.scale;
        page.push(DrawCommand::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, size.height),
            color: line_color(i),
            width: GRID_LINE_WIDTH,
        });
    }

    // Row line j sits at origin.y - j * scale.
    for j in line_indices(geometry.origin.y - size.height, geometry.origin.y, geometry.scale) {
        if j == 0 {
            continue;
        }
        let y = geometry.origin.y - j as f32 * geometry.scale;
        page.push(DrawCommand::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(size.width, y),
            color: line_color(j),
            width: GRID_LINE_WIDTH,
        });
    }

    page.push(DrawCommand::Line {
        from: Vec2::new(geometry.origin.x, 0.0),
        to: Vec2::new(geometry.origin.x, size.height),
        color: AXIS_X,
        width: AXIS_LINE_WIDTH,
    });
    page.push(DrawCommand::Line {
        from: Vec2::new(0.0, geometry.origin.y),
        to: Vec2::new(size.width, geometry.origin.y),
        color: AXIS_Y,
        width: AXIS_LINE_WIDTH,
    });
}

/// Indices `i` with `low <= i * step <= high`.
///
/// Empty when the step or bounds are unusable or the range would exceed
/// [`MAX_GRID_LINES`].
fn line_indices(low: f32, high: f32, step: f32) -> RangeInclusive<i64> {
    if !(step.is_finite() && step > 0.0) {
        log::warn!("Grid step {} is not positive, skipping grid lines", step);
        return 1..=0;
    }
    let first = (low as f64 / step as f64).ceil();
    let last = (high as f64 / step as f64).floor();
    if !(first.is_finite() && last.is_finite()) || last - first > MAX_GRID_LINES as f64 {
        log::warn!("Grid from {} to {} step {} is too dense, skipping grid lines", low, high, step);
        return 1..=0;
    }
    first as i64..=last as i64
}

/// Shaded materials panel in the top-right corner.
fn draw_legend(page: &mut Page, config: &DraftConfig, materials: &MaterialTally) {
    let lines = materials.legend_lines();
    let line_height = config.legend_font_size + LINE_SPACING;
    let height = (lines.len() + 1) as f32 * line_height + 2.0 * LEGEND_PADDING;
    let top = config.page.height - PAGE_MARGIN;
    let left = config.page.width - PAGE_MARGIN - LEGEND_WIDTH;

    page.push(DrawCommand::FillRect {
        rect: Rect::new(Vec2::new(left, top - height), Vec2::new(LEGEND_WIDTH, height)),
        color: LEGEND_FILL,
    });

    let text_x = left + LEGEND_PADDING;
    let mut baseline = top - LEGEND_PADDING - config.legend_font_size;
    for text in std::iter::once(materials.legend_header()).chain(lines) {
        page.push(DrawCommand::Text {
            position: Vec2::new(text_x, baseline),
            text,
            size: config.legend_font_size,
            anchor: TextAnchor::Start,
            color: Rgb::BLACK,
        });
        baseline -= line_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FloorHeight, Geometry};
    use crate::drafter::materials::aggregate_materials;
    use crate::types::Cell;

    fn draw(blueprint: &Blueprint, height: u32) -> Drawing {
        let config = DraftConfig::default();
        let materials = aggregate_materials(
            blueprint,
            &config.palette,
            FloorHeight::new(height).unwrap(),
        );
        compose(blueprint, &config, &materials)
    }

    #[test]
    fn test_empty_layers_skipped() {
        let blueprint = Blueprint::with_cells(
            "split",
            vec![
                Cell::new(0, 0, 0, "floor"),
                Cell::new(0, 0, 2, "roof"),
                Cell::new(3, 3, 1, "decoration"),
            ],
        );
        let drawing = draw(&blueprint, 3);
        let zs: Vec<i32> = drawing.pages.iter().map(|p| p.z).collect();
        assert_eq!(zs, vec![0, 2]);
    }

    #[test]
    fn test_empty_blueprint_has_no_pages() {
        let drawing = draw(&Blueprint::new("blank"), 3);
        assert!(drawing.is_empty());
    }

    #[test]
    fn test_page_texts() {
        let blueprint = Blueprint::with_cells(
            "Cabin",
            vec![
                Cell::new(0, 0, 1, "wall"),
                Cell::new(1, 0, 1, "wall"),
                Cell::new(2, 0, 1, "wall"),
            ],
        );
        let drawing = draw(&blueprint, 4);
        assert_eq!(drawing.page_count(), 1);

        let texts: Vec<&str> = drawing.pages[0].texts().collect();
        // South and north run labels, legend, title.
        assert_eq!(
            texts,
            vec!["3", "3", "Material (H:4)", "Wall: 12", "Design: Cabin (1F)"]
        );
    }

    #[test]
    fn test_paint_order() {
        let blueprint = Blueprint::with_cells(
            "order",
            vec![Cell::new(0, 0, 0, "floor"), Cell::new(1, 0, 0, "floor")],
        );
        let drawing = draw(&blueprint, 3);
        let commands = &drawing.pages[0].commands;

        let first_rect = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { .. }))
            .unwrap();
        let last_line = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap();
        assert!(last_line < first_rect, "grid must be under the cells");

        // Axis lines are the last two lines drawn.
        assert!(matches!(
            commands[last_line],
            DrawCommand::Line { color: AXIS_Y, .. }
        ));
        assert!(matches!(
            commands[last_line - 1],
            DrawCommand::Line { color: AXIS_X, .. }
        ));
    }

    #[test]
    fn test_grid_major_lines() {
        let mut page = Page::new(0);
        let config = DraftConfig::default();
        draw_grid(&mut page, &config);

        let origin = config.geometry.origin;
        let scale = config.geometry.scale;
        let major_x = origin.x + 5.0 * scale;
        let light_x = origin.x + 2.0 * scale;
        let color_at = |x: f32| {
            page.commands.iter().find_map(|c| match c {
                DrawCommand::Line { from, to, color, .. } if from.x == x && to.x == x => Some(*color),
                _ => None,
            })
        };
        assert_eq!(color_at(major_x), Some(GRID_MAJOR));
        assert_eq!(color_at(light_x), Some(GRID_LIGHT));
        assert_eq!(color_at(origin.x), Some(AXIS_X));
    }

    #[test]
    fn test_zero_scale_grid_is_bounded() {
        let config = DraftConfig::default().with_geometry(Geometry::new(
            0.0,
            Vec2::new(421.0, 297.5),
        ));
        let mut page = Page::new(0);
        draw_grid(&mut page, &config);
        // Only the two axis lines remain.
        assert_eq!(page.commands.len(), 2);

        let blueprint = Blueprint::with_cells(
            "flat",
            vec![Cell::new(0, 0, 0, "wall"), Cell::new(1, 0, 0, "wall")],
        );
        let materials = aggregate_materials(&blueprint, &config.palette, FloorHeight::DEFAULT);
        let drawing = compose(&blueprint, &config, &materials);
        assert_eq!(drawing.page_count(), 1);
    }

    #[test]
    fn test_line_indices() {
        assert_eq!(line_indices(-45.0, 45.0, 20.0), -2..=2);
        assert!(line_indices(f32::MIN, f32::MAX, 1.0).is_empty());
        assert!(line_indices(0.0, 100.0, f32::NAN).is_empty());
    }

    #[test]
    fn test_compose_is_idempotent() {
        let blueprint = Blueprint::with_cells(
            "repeat",
            vec![
                Cell::new(0, 0, 0, "wall"),
                Cell::new(1, 0, 0, "wall"),
                Cell::new(1, 1, 0, "stairs"),
                Cell::new(4, 2, 1, "ladder"),
                Cell::new(4, 3, 1, "ladder"),
            ],
        );
        assert_eq!(draw(&blueprint, 3), draw(&blueprint, 3));
    }
}
