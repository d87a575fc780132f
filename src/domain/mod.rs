//! Domain model: the typed world document and runtime entities.

pub mod agents;
pub mod decor;
pub mod world;

pub use agents::{Animal, AnimalKind, NpcKind, Player, RuntimeNpc};
pub use decor::{Bird, BirdKind, FlowerPatch, Pond, Tree, Well};
pub use world::{Neighborhood, Npc, Stop, World};
