//! Nearest-interactable search.
//!
//! Candidates are every stop's knight anchor and every live NPC. The
//! closest candidate within a fixed radius wins; exact ties go to the
//! earlier candidate, and stops are enumerated before NPCs in world
//! data order. That tie-break is deliberate and tested.

use crate::core::math::{dist2, Vec2};
use crate::domain::agents::RuntimeNpc;
use crate::domain::world::World;

/// Interaction reach in world units.
pub const INTERACT_RADIUS: f64 = 76.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    Stop,
    Npc,
}

/// The focused interactable for a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    pub kind: HitKind,
    pub id: String,
    pub d2: f64,
}

pub fn find_nearest_interactable(p: Vec2, world: &World, npcs: &[RuntimeNpc]) -> Option<Hit> {
    let r2 = INTERACT_RADIUS * INTERACT_RADIUS;
    let mut best: Option<Hit> = None;

    for stop in world.stops() {
        let d = dist2(p, stop.knight_pos());
        if d <= r2 && best.as_ref().map_or(true, |b| d < b.d2) {
            best = Some(Hit { kind: HitKind::Stop, id: stop.id.clone(), d2: d });
        }
    }
    for npc in npcs {
        let d = dist2(p, npc.pos);
        if d <= r2 && best.as_ref().map_or(true, |b| d < b.d2) {
            best = Some(Hit { kind: HitKind::Npc, id: npc.id.clone(), d2: d });
        }
    }

    best
}
