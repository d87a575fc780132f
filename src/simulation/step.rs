//! The per-tick simulation step.
//!
//! Ordering within a tick: player first (input integration), then NPCs,
//! then animals. All mutation happens here, before any drawing in the
//! same frame.

use super::VillageCore;
use crate::systems::steering::{step_animal, step_npc, step_player};

pub(super) fn simulate(core: &mut VillageCore, dt: f64) {
    let intent = core.input.movement_intent();
    let fields = core.step_fields();

    step_player(fields.player, intent, dt, &fields.obstacles);
    let player_pos = fields.player.pos;

    for npc in fields.npcs.iter_mut() {
        step_npc(npc, dt, &fields.obstacles, fields.rng);
    }

    for animal in fields.animals.iter_mut() {
        step_animal(animal, dt, player_pos, &fields.obstacles, fields.rng);
    }
}
