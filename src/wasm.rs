//! WASM bindings for blueprint-drafter.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use crate::{load_blueprint_from_str, Drafter};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Drafting options shared by the exported functions.
#[wasm_bindgen]
#[derive(Default)]
pub struct DraftOptions {
    config_json: Option<String>,
}

#[wasm_bindgen]
impl DraftOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DraftOptions {
        DraftOptions::default()
    }

    /// Use a drafting configuration given as JSON.
    #[wasm_bindgen(setter)]
    pub fn set_config_json(&mut self, value: String) {
        self.config_json = Some(value);
    }
}

fn drafter(options: Option<DraftOptions>) -> Result<Drafter, JsError> {
    match options.and_then(|o| o.config_json) {
        Some(json) => {
            let config =
                crate::DraftConfig::from_json(&json).map_err(|e| JsError::new(&e.to_string()))?;
            Ok(Drafter::with_config(config))
        }
        None => Ok(Drafter::new()),
    }
}

/// Render a blueprint document (JSON) as PDF bytes.
///
/// `height` is taken as typed by the user; unusable values fall back to the
/// configured default.
#[wasm_bindgen]
pub fn render_blueprint_pdf(
    blueprint_json: &str,
    height: Option<String>,
    options: Option<DraftOptions>,
) -> Result<Vec<u8>, JsError> {
    let drafter = drafter(options)?;
    let blueprint = load_blueprint_from_str(blueprint_json)
        .map_err(|e| JsError::new(&format!("Invalid blueprint: {}", e)))?;

    let floor_height = drafter.floor_height(height.as_deref());
    drafter
        .render_pdf(&blueprint, floor_height)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Aggregate the materials of a blueprint document (JSON).
///
/// Returns a JSON object mapping each palette type to its count.
#[wasm_bindgen]
pub fn aggregate_materials_json(
    blueprint_json: &str,
    height: Option<String>,
    options: Option<DraftOptions>,
) -> Result<String, JsError> {
    let drafter = drafter(options)?;
    let blueprint = load_blueprint_from_str(blueprint_json)
        .map_err(|e| JsError::new(&format!("Invalid blueprint: {}", e)))?;

    let tally = drafter.materials(&blueprint, drafter.floor_height(height.as_deref()));
    serde_json::to_string(&tally).map_err(|e| JsError::new(&e.to_string()))
}
