//! Procedural world population.
//!
//! Every category samples uniform positions inside a margin inset of the
//! world bounds and rejects spots that violate its placement
//! constraints. Retries are bounded: when a budget runs out the category
//! simply ends up with fewer objects than its target. That is policy,
//! not an error, so tests treat target counts as upper bounds.
//!
//! Generation order is fixed (ponds, NPCs, trees, wells, flowers, birds,
//! animals) because each step consumes the shared seeded RNG stream and
//! the layout must be a pure function of world + seed.

use crate::core::math::{dist2, point_in_rotated_ellipse, Rect, Vec2};
use crate::core::rng::Mulberry32;
use crate::domain::agents::{Animal, AnimalKind, RuntimeNpc};
use crate::domain::decor::{Bird, BirdKind, FlowerPatch, Pond, Tree, Well};
use crate::domain::world::World;

/// Placement tunables. Target counts, retry budgets and size ranges are
/// configuration; the defaults reproduce the shipped village.
#[derive(Clone, Debug)]
pub struct GenConfig {
    pub pond_count: usize,
    pub tree_count: usize,
    pub tree_tries_per_target: usize,
    pub tree_min_sep: f64,
    pub tree_house_clearance: f64,
    pub well_count: usize,
    pub well_tries: usize,
    pub well_pad: f64,
    pub flower_count: usize,
    pub flower_tries: usize,
    pub flower_pad: f64,
    pub bird_count: usize,
    pub animal_count: usize,
    pub deer_count: usize,
    pub animal_pad: f64,
    pub animal_spot_guard: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            pond_count: 9,
            tree_count: 260,
            tree_tries_per_target: 18,
            tree_min_sep: 52.0,
            tree_house_clearance: 140.0,
            well_count: 7,
            well_tries: 400,
            well_pad: 90.0,
            flower_count: 95,
            flower_tries: 1200,
            flower_pad: 40.0,
            bird_count: 42,
            animal_count: 7,
            deer_count: 4,
            animal_pad: 120.0,
            animal_spot_guard: 120,
        }
    }
}

/// All generated decoration, created once per mount.
#[derive(Clone, Debug, Default)]
pub struct Decor {
    pub ponds: Vec<Pond>,
    pub trees: Vec<Tree>,
    pub wells: Vec<Well>,
    pub flowers: Vec<FlowerPatch>,
    pub birds: Vec<Bird>,
    pub animals: Vec<Animal>,
}

/// Decoration plus the derived runtime NPC list.
pub struct Generated {
    pub decor: Decor,
    pub npcs: Vec<RuntimeNpc>,
}

/// A spot is free for a feature when it avoids every pond (padded
/// ellipse), every house (rect inflated by 12 against the pad box) and
/// every already-placed well.
pub fn feature_spot_ok(
    p: Vec2,
    pad: f64,
    ponds: &[Pond],
    houses: &[Rect],
    wells: &[Well],
) -> bool {
    for pond in ponds {
        if point_in_rotated_ellipse(p, pond.pos, pond.rx, pond.ry, pond.rot, pad) {
            return false;
        }
    }
    let probe = Rect::new(p.x - pad, p.y - pad, pad * 2.0, pad * 2.0);
    for house in houses {
        if probe.overlaps(&house.inflated(12.0)) {
            return false;
        }
    }
    for well in wells {
        if (p - well.pos).length() < well.r + pad {
            return false;
        }
    }
    true
}

fn tree_spot_ok(p: Vec2, scale: f64, cfg: &GenConfig, ponds: &[Pond], houses: &[Rect], trees: &[Tree]) -> bool {
    for pond in ponds {
        if point_in_rotated_ellipse(p, pond.pos, pond.rx, pond.ry, pond.rot, 48.0 * scale) {
            return false;
        }
    }
    let clearance2 = cfg.tree_house_clearance * cfg.tree_house_clearance;
    for house in houses {
        if dist2(p, house.center()) < clearance2 {
            return false;
        }
    }
    for t in trees {
        let md = cfg.tree_min_sep * (t.scale + scale);
        if dist2(p, t.pos) < md * md {
            return false;
        }
    }
    true
}

/// Populate the world. Consumes the engine's RNG stream in a fixed
/// order; calling this twice with equal inputs yields identical output.
pub fn generate(world: &World, cfg: &GenConfig, rng: &mut Mulberry32) -> Generated {
    let (w, h) = (world.w, world.h);
    let houses = world.house_rects();

    // Ponds go first: they gate every later placement.
    let mut ponds = Vec::with_capacity(cfg.pond_count);
    for _ in 0..cfg.pond_count {
        let x = 220.0 + rng.next() * (w - 440.0);
        let y = 220.0 + rng.next() * (h - 440.0);
        ponds.push(Pond {
            pos: Vec2::new(x, y),
            rx: 75.0 + rng.next() * 120.0,
            ry: 38.0 + rng.next() * 90.0,
            rot: (rng.next() - 0.5) * 0.75,
        });
    }

    let npcs: Vec<RuntimeNpc> = world
        .npcs
        .iter()
        .map(|n| RuntimeNpc::from_template(n, rng))
        .collect();

    let mut trees: Vec<Tree> = Vec::with_capacity(cfg.tree_count);
    let mut tries = 0;
    let tree_budget = cfg.tree_count * cfg.tree_tries_per_target;
    while trees.len() < cfg.tree_count && tries < tree_budget {
        tries += 1;
        let p = Vec2::new(80.0 + rng.next() * (w - 160.0), 80.0 + rng.next() * (h - 160.0));
        let scale = 0.85 + rng.next() * 1.3;
        if !tree_spot_ok(p, scale, cfg, &ponds, &houses, &trees) {
            continue;
        }
        let tint = (rng.next() * 3.0) as u8;
        trees.push(Tree { pos: p, scale, tint });
    }

    // Wells are solid, so they join the obstacle set as they land.
    let mut wells: Vec<Well> = Vec::with_capacity(cfg.well_count);
    let mut tries = 0;
    while wells.len() < cfg.well_count && tries < cfg.well_tries {
        tries += 1;
        let p = Vec2::new(220.0 + rng.next() * (w - 440.0), 220.0 + rng.next() * (h - 440.0));
        let r = 18.0 + rng.next() * 10.0;
        if !feature_spot_ok(p, cfg.well_pad, &ponds, &houses, &wells) {
            continue;
        }
        wells.push(Well { pos: p, r, roof: 26.0 + rng.next() * 12.0 });
    }

    let mut flowers = Vec::with_capacity(cfg.flower_count);
    let mut tries = 0;
    while flowers.len() < cfg.flower_count && tries < cfg.flower_tries {
        tries += 1;
        let p = Vec2::new(120.0 + rng.next() * (w - 240.0), 120.0 + rng.next() * (h - 240.0));
        if !feature_spot_ok(p, cfg.flower_pad, &ponds, &houses, &wells) {
            continue;
        }
        flowers.push(FlowerPatch {
            pos: p,
            r: 14.0 + rng.next() * 22.0,
            pattern: (rng.next() * 1000.0) as u32,
        });
    }

    // Birds are visual only; no placement constraints.
    let mut birds = Vec::with_capacity(cfg.bird_count);
    for _ in 0..cfg.bird_count {
        let p = Vec2::new(120.0 + rng.next() * (w - 240.0), 120.0 + rng.next() * (h - 240.0));
        birds.push(Bird {
            pos: p,
            scale: 0.8 + rng.next() * 1.15,
            phase: rng.next() * std::f64::consts::TAU,
            kind: if rng.next() < 0.78 { BirdKind::Bird } else { BirdKind::Butterfly },
        });
    }

    // Animals retry in place with a guard and accept the last sample if
    // the guard runs out (best effort, they are allowed to clip).
    let mut animals = Vec::with_capacity(cfg.animal_count);
    for i in 0..cfg.animal_count {
        let kind = if i < cfg.deer_count { AnimalKind::Deer } else { AnimalKind::Peacock };
        let mut p = Vec2::new(260.0 + rng.next() * (w - 520.0), 260.0 + rng.next() * (h - 520.0));
        let mut guard = 0;
        while !feature_spot_ok(p, cfg.animal_pad, &ponds, &houses, &wells)
            && guard < cfg.animal_spot_guard
        {
            guard += 1;
            p = Vec2::new(260.0 + rng.next() * (w - 520.0), 260.0 + rng.next() * (h - 520.0));
        }
        animals.push(Animal {
            pos: p,
            scale: 0.85 + rng.next() * 1.15,
            phase: rng.next() * std::f64::consts::TAU,
            kind,
            vel: Vec2::new(rng.next() - 0.5, rng.next() - 0.5),
            home: p,
            decision_t: 0.4 + rng.next() * 1.6,
        });
    }

    Generated {
        decor: Decor { ponds, trees, wells, flowers, birds, animals },
        npcs,
    }
}
