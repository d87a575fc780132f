//! The simulation core.
//!
//! `VillageCore` owns every piece of per-mount state (world, generated
//! decoration, agents, camera, input, RNG) and is driven by explicit
//! `tick(dt, paused)` calls, so tests advance it with synthetic
//! timesteps and the facade drives it from the display callback. No
//! module-level state anywhere: two concurrent mounts cannot share RNG
//! or key state.

pub mod draw_plan;
pub mod input;

mod step;

pub use draw_plan::{DrawKind, DrawPlan, DrawRecord};
pub use input::{InputState, KeyCode};

use crate::core::math::Rect;
use crate::core::rng::Mulberry32;
use crate::domain::agents::{Animal, Player, RuntimeNpc};
use crate::domain::world::World;
use crate::systems::camera::Camera;
use crate::systems::collision::Obstacles;
use crate::systems::interact::{find_nearest_interactable, Hit};
use crate::systems::worldgen::{self, Decor, GenConfig};

/// Elapsed-time cap per tick; prevents simulation blow-ups after a
/// stall (tab backgrounding, slow frame).
pub const MAX_DT: f64 = 0.05;

pub struct VillageCore {
    world: World,
    houses: Vec<Rect>,
    decor: Decor,
    npcs: Vec<RuntimeNpc>,
    player: Player,
    camera: Camera,
    input: InputState,
    rng: Mulberry32,
    view_w: f64,
    view_h: f64,
    focused: Option<Hit>,
}

impl VillageCore {
    pub fn new(world: World) -> Self {
        Self::with_config(world, &GenConfig::default())
    }

    pub fn with_config(world: World, cfg: &GenConfig) -> Self {
        let mut rng = Mulberry32::new(world.seed);
        let generated = worldgen::generate(&world, cfg, &mut rng);
        let player = Player::at(world.spawn);
        let houses = world.house_rects();

        Self {
            world,
            houses,
            decor: generated.decor,
            npcs: generated.npcs,
            player,
            camera: Camera::default(),
            input: InputState::new(),
            rng,
            view_w: 0.0,
            view_h: 0.0,
            focused: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        Ok(Self::new(World::from_json(json)?))
    }

    // === Accessors ===

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn decor(&self) -> &Decor {
        &self.decor
    }

    pub fn npcs(&self) -> &[RuntimeNpc] {
        &self.npcs
    }

    pub fn animals(&self) -> &[Animal] {
        &self.decor.animals
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.view_w, self.view_h)
    }

    /// The currently focused interactable; recomputed from scratch
    /// every unpaused tick, never cached across frames.
    pub fn focused(&self) -> Option<&Hit> {
        self.focused.as_ref()
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    // === Host-driven state ===

    /// Logical viewport size in CSS pixels. Applied immediately, even
    /// while paused, so the last frame stays responsive to resize.
    pub fn set_viewport(&mut self, w: f64, h: f64) {
        self.view_w = w.max(1.0);
        self.view_h = h.max(1.0);
    }

    /// Edge-triggered interact: resolve the current nearest candidate.
    /// The caller raises the host event; nothing resolves while paused.
    pub fn interact(&self, paused: bool) -> Option<Hit> {
        if paused {
            return None;
        }
        find_nearest_interactable(self.player.pos, &self.world, &self.npcs)
    }

    /// One simulation step. While paused the world is frozen (input is
    /// not integrated, no agent moves, focus clears) but the camera
    /// still tracks the viewport so rendering stays correct.
    pub fn tick(&mut self, dt: f64, paused: bool) {
        let dt = dt.clamp(0.0, MAX_DT);

        if !paused {
            step::simulate(self, dt);
        }

        self.camera.follow(
            self.player.pos,
            self.view_w,
            self.view_h,
            self.world.w,
            self.world.h,
        );

        self.focused = if paused {
            None
        } else {
            find_nearest_interactable(self.player.pos, &self.world, &self.npcs)
        };
    }

    /// Culled, depth-sorted description of the frame for the renderer.
    pub fn draw_plan(&self) -> DrawPlan {
        draw_plan::build(self)
    }

}

/// Borrow view used by the step functions: obstacles are immutable for
/// the whole tick while agents mutate, so every agent sees the same
/// world state within a frame.
pub(crate) struct StepFields<'a> {
    pub player: &'a mut Player,
    pub npcs: &'a mut [RuntimeNpc],
    pub animals: &'a mut [Animal],
    pub input: &'a InputState,
    pub rng: &'a mut Mulberry32,
    pub obstacles: Obstacles<'a>,
}

impl VillageCore {
    pub(crate) fn step_fields(&mut self) -> StepFields<'_> {
        let Decor { ponds, wells, animals, .. } = &mut self.decor;
        StepFields {
            player: &mut self.player,
            npcs: &mut self.npcs,
            animals,
            input: &self.input,
            rng: &mut self.rng,
            obstacles: Obstacles {
                world_w: self.world.w,
                world_h: self.world.h,
                houses: &self.houses,
                ponds,
                wells,
            },
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
