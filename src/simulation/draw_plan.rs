//! Frame draw plan.
//!
//! The simulation describes a frame as tagged records sorted by a
//! world-Y key (painter's algorithm: objects further down the screen
//! draw on top). The renderer dispatches on the tag; tests assert the
//! sorted record list directly, independent of pixel output.
//!
//! Ponds sit below grade and are collected separately, drawn before
//! the sorted pass. Birds get a negative Y offset so they read as a fly
//! layer above ground objects.

use super::VillageCore;
use crate::core::math::Rect;
use crate::systems::camera::CULL_PAD;

/// What to draw; the index points into the owning collection on the
/// core (stops for huts/knights, decoration vectors otherwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawKind {
    Flowers,
    Tree,
    Well,
    Hut,
    Knight,
    Animal,
    Npc,
    Bird,
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRecord {
    pub kind: DrawKind,
    pub index: usize,
    pub sort_y: f64,
}

#[derive(Debug, Default)]
pub struct DrawPlan {
    /// Visible pond indices, below-grade, unsorted.
    pub ponds: Vec<usize>,
    /// Everything else, stable-sorted by `sort_y` ascending.
    pub items: Vec<DrawRecord>,
}

pub(super) fn build(core: &VillageCore) -> DrawPlan {
    let cam = core.camera();
    let (vw, vh) = core.view_size();
    let decor = core.decor();

    let mut plan = DrawPlan::default();

    for (i, pond) in decor.ponds.iter().enumerate() {
        let aabb = Rect::new(
            pond.pos.x - pond.rx,
            pond.pos.y - pond.ry,
            pond.rx * 2.0,
            pond.ry * 2.0,
        );
        if cam.in_view(aabb, vw, vh, CULL_PAD) {
            plan.ponds.push(i);
        }
    }

    for (i, fp) in decor.flowers.iter().enumerate() {
        let aabb = Rect::new(
            fp.pos.x - fp.r - 20.0,
            fp.pos.y - fp.r - 20.0,
            fp.r * 2.0 + 40.0,
            fp.r * 2.0 + 40.0,
        );
        if cam.in_view(aabb, vw, vh, CULL_PAD) {
            plan.items.push(DrawRecord { kind: DrawKind::Flowers, index: i, sort_y: fp.pos.y + 2.0 });
        }
    }

    for (i, tree) in decor.trees.iter().enumerate() {
        let aabb = Rect::new(tree.pos.x - 70.0, tree.pos.y - 90.0, 140.0, 160.0);
        if cam.in_view(aabb, vw, vh, CULL_PAD) {
            plan.items.push(DrawRecord { kind: DrawKind::Tree, index: i, sort_y: tree.pos.y });
        }
    }

    for (i, well) in decor.wells.iter().enumerate() {
        let aabb = Rect::new(well.pos.x - 80.0, well.pos.y - 120.0, 160.0, 220.0);
        if cam.in_view(aabb, vw, vh, CULL_PAD) {
            plan.items.push(DrawRecord { kind: DrawKind::Well, index: i, sort_y: well.pos.y + 20.0 });
        }
    }

    for (i, stop) in core.world().stops().enumerate() {
        let h = stop.house_rect();
        let aabb = Rect::new(h.x - 30.0, h.y - 120.0, h.w + 60.0, h.h + 240.0);
        if cam.in_view(aabb, vw, vh, CULL_PAD) {
            plan.items.push(DrawRecord { kind: DrawKind::Hut, index: i, sort_y: h.y + h.h });
            plan.items.push(DrawRecord { kind: DrawKind::Knight, index: i, sort_y: stop.knight.y });
        }
    }

    for (i, animal) in decor.animals.iter().enumerate() {
        let aabb = Rect::new(animal.pos.x - 60.0, animal.pos.y - 80.0, 120.0, 160.0);
        if cam.in_view(aabb, vw, vh, CULL_PAD) {
            plan.items.push(DrawRecord { kind: DrawKind::Animal, index: i, sort_y: animal.pos.y + 10.0 });
        }
    }

    for (i, npc) in core.npcs().iter().enumerate() {
        let aabb = Rect::new(npc.pos.x - 40.0, npc.pos.y - 40.0, 80.0, 80.0);
        if cam.in_view(aabb, vw, vh, CULL_PAD) {
            plan.items.push(DrawRecord { kind: DrawKind::Npc, index: i, sort_y: npc.pos.y });
        }
    }

    for (i, bird) in decor.birds.iter().enumerate() {
        let aabb = Rect::new(bird.pos.x - 60.0, bird.pos.y - 80.0, 120.0, 160.0);
        if cam.in_view(aabb, vw, vh, CULL_PAD) {
            plan.items.push(DrawRecord { kind: DrawKind::Bird, index: i, sort_y: bird.pos.y - 120.0 });
        }
    }

    let player = core.player();
    plan.items.push(DrawRecord { kind: DrawKind::Player, index: 0, sort_y: player.pos.y });

    plan.items.sort_by(|a, b| a.sort_y.total_cmp(&b.sort_y));
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::VillageCore;

    fn core() -> VillageCore {
        VillageCore::from_json(
            r#"{
                "seed": 5,
                "size": {"w": 3600, "h": 2400},
                "playerSpawn": {"x": 1800, "y": 1200},
                "neighborhoods": [{"id": "nb1", "name": "N", "stops": [
                    {"id": "s1", "title": "T",
                     "house": {"x": 1700, "y": 1100, "w": 120, "h": 90},
                     "knight": {"x": 1760, "y": 1230}}
                ]}],
                "npcs": [{"id": "n1", "name": "Mia", "message": "hi", "x": 1850, "y": 1250}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn plan_is_sorted_ascending_by_depth_key() {
        let mut core = core();
        core.set_viewport(800.0, 600.0);
        core.tick(0.016, false);
        let plan = core.draw_plan();
        assert!(plan.items.windows(2).all(|w| w[0].sort_y <= w[1].sort_y));
    }

    #[test]
    fn player_and_nearby_entities_are_present() {
        let mut core = core();
        core.set_viewport(800.0, 600.0);
        core.tick(0.016, false);
        let plan = core.draw_plan();
        let has = |kind| plan.items.iter().any(|r| r.kind == kind);
        assert!(has(DrawKind::Player));
        assert!(has(DrawKind::Hut));
        assert!(has(DrawKind::Knight));
        assert!(has(DrawKind::Npc));
    }

    #[test]
    fn far_decoration_is_culled() {
        let mut core = core();
        core.set_viewport(800.0, 600.0);
        core.tick(0.016, false);
        let plan = core.draw_plan();

        // Everything in the plan must intersect the padded viewport; in a
        // 3600x2400 world with an 800x600 view most decoration is out.
        let total = core.decor().trees.len() + core.decor().flowers.len();
        let planned = plan
            .items
            .iter()
            .filter(|r| matches!(r.kind, DrawKind::Tree | DrawKind::Flowers))
            .count();
        assert!(planned < total, "culling should drop off-screen decoration");
    }

    #[test]
    fn hut_sorts_by_house_base_and_knight_by_anchor() {
        let mut core = core();
        core.set_viewport(800.0, 600.0);
        core.tick(0.016, false);
        let plan = core.draw_plan();
        let hut = plan.items.iter().find(|r| r.kind == DrawKind::Hut).unwrap();
        let knight = plan.items.iter().find(|r| r.kind == DrawKind::Knight).unwrap();
        assert_eq!(hut.sort_y, 1100.0 + 90.0);
        assert_eq!(knight.sort_y, 1230.0);
    }
}
