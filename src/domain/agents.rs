//! Runtime agents: player, NPCs and wandering animals.

use serde::{Deserialize, Serialize};

use crate::core::math::Vec2;
use crate::core::rng::Mulberry32;
use crate::domain::world::Npc;

pub const PLAYER_RADIUS: f64 = 14.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcKind {
    #[default]
    Kid,
    Cat,
    Dog,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimalKind {
    Deer,
    Peacock,
}

/// NPC runtime state, derived from its template at init. Home is the
/// spawn position and acts as a soft attractor while wandering.
#[derive(Clone, Debug)]
pub struct RuntimeNpc {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub message: String,
    pub kind: NpcKind,
    pub pos: Vec2,
    pub home: Vec2,
    pub vel: Vec2,
    pub decision_t: f64,
    pub radius: f64,
    pub speed: f64,
}

impl RuntimeNpc {
    /// Radius and speed are kind-dependent; speed and the initial
    /// velocity come from the seeded RNG, so the draw order here is part
    /// of the deterministic stream.
    pub fn from_template(npc: &Npc, rng: &mut Mulberry32) -> Self {
        let radius = match npc.kind {
            NpcKind::Kid => 11.0,
            NpcKind::Cat | NpcKind::Dog => 10.0,
        };
        let speed = match npc.kind {
            NpcKind::Kid => rng.range(40.0, 75.0),
            NpcKind::Cat => rng.range(55.0, 95.0),
            NpcKind::Dog => rng.range(65.0, 115.0),
        };
        let vel = Vec2::new((rng.next() - 0.5) * 60.0, (rng.next() - 0.5) * 60.0);

        Self {
            id: npc.id.clone(),
            name: npc.name.clone(),
            avatar: npc.avatar.clone(),
            message: npc.message.clone(),
            kind: npc.kind,
            pos: Vec2::new(npc.x, npc.y),
            home: Vec2::new(npc.x, npc.y),
            vel,
            decision_t: 0.0,
            radius,
            speed,
        }
    }
}

/// Wandering wildlife. Non-solid (may clip visually) but steered by the
/// same collision predicate as everyone else.
#[derive(Clone, Debug)]
pub struct Animal {
    pub pos: Vec2,
    pub scale: f64,
    pub phase: f64,
    pub kind: AnimalKind,
    pub vel: Vec2,
    pub home: Vec2,
    pub decision_t: f64,
}

impl Animal {
    pub fn speed(&self) -> f64 {
        match self.kind {
            AnimalKind::Deer => 22.0,
            AnimalKind::Peacock => 18.0,
        }
    }
}

/// The input-driven avatar. Facing keeps its last nonzero movement
/// direction so the sprite stays oriented while idle.
#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub r: f64,
    pub facing: Vec2,
}

impl Player {
    pub fn at(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            r: PLAYER_RADIUS,
            facing: Vec2::new(1.0, 0.0),
        }
    }
}
