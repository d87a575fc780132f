//! Canvas 2D renderer.
//!
//! Consumes the core's draw plan; never mutates simulation state. All
//! draw paths return `Result` so a faulting frame can be abandoned
//! without killing the loop.

mod renderer;
mod sprites;

pub use renderer::CanvasRenderer;
