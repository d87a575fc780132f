//! Public API: the wasm facade the host mounts, and the canvas
//! renderer behind it.

pub mod render;
pub mod wasm;
