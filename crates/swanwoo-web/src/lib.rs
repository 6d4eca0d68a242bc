//! Swanwoo Web - browser frontend for the Swanwoo Pedals site
//!
//! Builds the landing page in the DOM and renders one Bevy viewer per
//! product canvas.

mod app;
mod dom;
mod header;
mod input;
mod models;
mod network;
mod overlay;
mod page;
mod viewer;

use wasm_bindgen::prelude::*;

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    let (config, config_error) = app::load_config();

    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(config.log_level())
            .build(),
    );

    if let Some(e) = config_error {
        tracing::error!("Invalid site config, using defaults: {}", e);
    }

    if let Err(e) = app::run(config) {
        tracing::error!("Failed to start site: {:#}", e);
    }
}
