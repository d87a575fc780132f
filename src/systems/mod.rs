//! Simulation systems: generation, collision, steering, camera,
//! interaction.

pub mod camera;
pub mod collision;
pub mod interact;
pub mod steering;
pub mod worldgen;

pub use camera::Camera;
pub use interact::{Hit, HitKind};
pub use worldgen::{Decor, GenConfig};
