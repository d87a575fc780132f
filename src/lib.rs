//! Village Engine - canvas exploration mini-game in WASM
//!
//! Architecture:
//! - core/       - RNG and geometry primitives
//! - domain/     - World schema and entity types
//! - systems/    - Worldgen, collision, steering, camera, interaction
//! - simulation/ - Orchestration (VillageCore, tick, draw plan)
//! - api/        - wasm facade and canvas renderer

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod api;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🏡 Village WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::Village;
pub use domain::world::World;
pub use simulation::VillageCore;
