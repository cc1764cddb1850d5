//! JSON shapes of blueprint cell data at the storage boundary.
//!
//! Two shapes are accepted:
//!
//! ```json
//! { "0": { "3": { "-1": "wall" } } }                      // nested z -> x -> y -> type
//! [ { "x": 3, "y": -1, "z": 0, "type": "wall" } ]         // flat records
//! ```
//!
//! Both become flat [`Cell`]s. Each entry is read on its own: one with a
//! non-integer coordinate, a non-string type, or the wrong structure is
//! dropped with a warning and the rest are kept. A blank or null type is
//! passed on as a blank cell, which clears that position.

use crate::error::{DrafterError, Result};
use crate::types::{Blueprint, Cell};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Nested `z -> x -> y -> type` mapping with stringified integer keys.
pub type NestedCells = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// A flat cell record as received; coordinates may be numbers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatCell {
    #[serde(default)]
    pub x: Value,
    #[serde(default)]
    pub y: Value,
    #[serde(default)]
    pub z: Value,
    #[serde(rename = "type", alias = "element_type", default)]
    pub block: Value,
}

/// Cell data in either accepted shape, kept as raw JSON until conversion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CellsWire(pub Value);

impl CellsWire {
    /// Convert to flat cells, dropping malformed entries.
    pub fn into_cells(self) -> Vec<Cell> {
        match self.0 {
            Value::Null => Vec::new(),
            Value::Array(records) => records
                .into_iter()
                .enumerate()
                .filter_map(|(index, record)| flat_cell(index, record))
                .collect(),
            Value::Object(layers) => nested_cells(&layers),
            other => {
                log::warn!("Ignoring cells of unexpected shape: {}", other);
                Vec::new()
            }
        }
    }
}

fn flat_cell(index: usize, record: Value) -> Option<Cell> {
    let record: FlatCell = match serde_json::from_value(record) {
        Ok(record) => record,
        Err(e) => {
            log::warn!("Skipping cell entry {}: {}", index, e);
            return None;
        }
    };
    make_cell(
        coordinate(&record.x),
        coordinate(&record.y),
        coordinate(&record.z),
        &record.block,
        || format!("({}, {}, {})", record.x, record.y, record.z),
    )
}

fn nested_cells(layers: &Map<String, Value>) -> Vec<Cell> {
    let mut cells = Vec::new();
    for (z_key, columns) in layers {
        let Some(columns) = columns.as_object() else {
            log::warn!("Skipping layer {:?}: expected a map of columns", z_key);
            continue;
        };
        for (x_key, rows) in columns {
            let Some(rows) = rows.as_object() else {
                log::warn!("Skipping column z={:?} x={:?}: expected a map of rows", z_key, x_key);
                continue;
            };
            for (y_key, block) in rows {
                let cell = make_cell(
                    parse_key(x_key),
                    parse_key(y_key),
                    parse_key(z_key),
                    block,
                    || format!("z={:?} x={:?} y={:?}", z_key, x_key, y_key),
                );
                cells.extend(cell);
            }
        }
    }
    cells
}

/// A blueprint document: a name plus cells in either shape.
#[derive(Debug, Clone, Deserialize)]
pub struct BlueprintDocument {
    pub name: String,
    #[serde(default)]
    pub cells: CellsWire,
}

impl BlueprintDocument {
    pub fn into_blueprint(self) -> Blueprint {
        Blueprint::with_cells(self.name, self.cells.into_cells())
    }
}

/// Stored form of a blueprint, always nested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBlueprint {
    pub name: String,
    pub cells: NestedCells,
}

/// Editor load response: nested cells plus the layer to open on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResponse {
    pub cells: NestedCells,
    pub current_layer: i32,
}

impl LoadResponse {
    pub fn new(blueprint: &Blueprint) -> Self {
        Self {
            cells: to_nested(blueprint),
            current_layer: 0,
        }
    }
}

/// Parse a blueprint document from JSON.
///
/// Fails on malformed JSON or a blank name; individual bad cells are skipped.
pub fn parse_blueprint(json: &str) -> Result<Blueprint> {
    let document: BlueprintDocument = serde_json::from_str(json)?;
    if document.name.trim().is_empty() {
        return Err(DrafterError::InvalidBlueprint(
            "blueprint name is empty".to_string(),
        ));
    }
    Ok(document.into_blueprint())
}

/// Convert a blueprint to the nested shape.
pub fn to_nested(blueprint: &Blueprint) -> NestedCells {
    let mut nested = NestedCells::new();
    for (pos, block) in blueprint.iter_cells() {
        nested
            .entry(pos.z.to_string())
            .or_default()
            .entry(pos.x.to_string())
            .or_default()
            .insert(pos.y.to_string(), block.to_string());
    }
    nested
}

fn parse_key(key: &str) -> Option<i32> {
    key.trim().parse().ok()
}

fn coordinate(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => parse_key(s),
        _ => None,
    }
}

fn make_cell(
    x: Option<i32>,
    y: Option<i32>,
    z: Option<i32>,
    block: &Value,
    describe: impl Fn() -> String,
) -> Option<Cell> {
    let (Some(x), Some(y), Some(z)) = (x, y, z) else {
        log::warn!("Skipping cell with non-integer coordinate at {}", describe());
        return None;
    };
    match block {
        Value::String(s) => Some(Cell::new(x, y, z, s.as_str())),
        Value::Null => Some(Cell::new(x, y, z, "")),
        other => {
            log::warn!("Skipping cell at {} with non-string type {}", describe(), other);
            None
        }
    }
}
