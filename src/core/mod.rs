//! Core primitives: deterministic RNG and 2D geometry.

pub mod math;
pub mod rng;

pub use math::{Rect, Vec2};
pub use rng::Mulberry32;
