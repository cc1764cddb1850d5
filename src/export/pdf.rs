//! Paged PDF export.
//!
//! Every [`Page`] of a drawing becomes one PDF page. Text uses the built-in
//! Helvetica font with WinAnsi encoding; characters outside Latin-1 are
//! replaced by `?`.

use crate::drafter::{DrawCommand, Drawing, Page, TextAnchor};
use crate::error::Result;
use crate::types::Rgb;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

const FONT_NAME: &str = "F1";

/// Export a drawing as PDF bytes.
///
/// A drawing without pages still produces a valid document with one blank page.
/// Output is deterministic: no timestamps or random ids are written.
pub fn export_pdf(drawing: &Drawing) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let id_pages = doc.new_object_id();

    let id_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let id_resources = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_NAME => id_font,
        },
    });

    let blank;
    let pages: &[Page] = if drawing.pages.is_empty() {
        blank = [Page::new(0)];
        &blank
    } else {
        &drawing.pages
    };

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let id_content = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let id_page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => id_pages,
            "Contents" => id_content,
        });
        kids.push(id_page.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        id_pages,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => id_resources,
            "MediaBox" => vec![
                0.0f32.into(),
                0.0f32.into(),
                drawing.page_size.width.into(),
                drawing.page_size.height.into(),
            ],
        }),
    );

    let id_catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => id_pages,
    });
    doc.trailer.set("Root", id_catalog);

    let id_info = doc.add_object(dictionary! {
        "Title" => Object::String(encode_text(&format!("Design: {}", drawing.name)), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("blueprint-drafter ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Info", id_info);

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Content stream operations for one page.
fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();

    for command in &page.commands {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(color_op("RG", *color));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![from.x.into(), from.y.into()]));
                ops.push(Operation::new("l", vec![to.x.into(), to.y.into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawCommand::FillRect { rect, color } => {
                ops.push(color_op("rg", *color));
                ops.push(Operation::new(
                    "re",
                    vec![
                        rect.min.x.into(),
                        rect.min.y.into(),
                        rect.size.x.into(),
                        rect.size.y.into(),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawCommand::Text {
                position,
                text,
                size,
                anchor,
                color,
            } => {
                let x = match anchor {
                    TextAnchor::Start => position.x,
                    TextAnchor::Middle => position.x - text_width(text, *size) / 2.0,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(color_op("rg", *color));
                ops.push(Operation::new("Tf", vec![FONT_NAME.into(), (*size).into()]));
                ops.push(Operation::new("Td", vec![x.into(), position.y.into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_text(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }

    ops
}

fn color_op(operator: &str, color: Rgb) -> Operation {
    let [r, g, b] = color.to_unit();
    Operation::new(operator, vec![r.into(), g.into(), b.into()])
}

/// Encode text for a WinAnsi font.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7e | 0xa0..=0xff) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Rendered width of a string in Helvetica, in points.
fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(helvetica_advance).sum();
    units as f32 * size / 1000.0
}

/// Glyph advance in 1/1000 em; common glyphs exact, others approximated.
fn helvetica_advance(c: char) -> u32 {
    match c {
        '0'..='9' => 556,
        ' ' | '.' | ',' | ':' | ';' | '!' | '/' => 278,
        '(' | ')' | '-' => 333,
        'i' | 'j' | 'l' => 222,
        'f' | 't' => 278,
        'r' => 333,
        'm' => 833,
        'w' => 722,
        'A'..='Z' => 667,
        _ => 556,
    }
}
