//! Circle-vs-world collision.
//!
//! One predicate serves the player, NPCs and animals: houses are solid
//! rectangles, ponds solid ellipses, wells solid circles. Animals probe
//! with a lenient radius so they stay out of obstacles behaviorally but
//! may clip a little visually.

use crate::core::math::{point_in_rotated_ellipse, Rect, Vec2};
use crate::domain::decor::{Pond, Well};

/// Obstacle view over world + decoration, borrowed per query.
pub struct Obstacles<'a> {
    pub world_w: f64,
    pub world_h: f64,
    pub houses: &'a [Rect],
    pub ponds: &'a [Pond],
    pub wells: &'a [Well],
}

/// True when a circle of `radius` at `p` cannot occupy that spot:
/// outside world bounds, over a house, inside a pond (padding scaled by
/// the radius) or within a well.
pub fn collides_circle(p: Vec2, radius: f64, obs: &Obstacles) -> bool {
    if p.x < radius || p.y < radius || p.x > obs.world_w - radius || p.y > obs.world_h - radius {
        return true;
    }

    let aabb = Rect::new(p.x - radius, p.y - radius, radius * 2.0, radius * 2.0);
    for house in obs.houses {
        if aabb.overlaps(house) {
            return true;
        }
    }

    for pond in obs.ponds {
        if point_in_rotated_ellipse(p, pond.pos, pond.rx, pond.ry, pond.rot, radius * 0.85) {
            return true;
        }
    }

    for well in obs.wells {
        if (p - well.pos).length() < well.r + radius * 0.92 {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacles<'a>(houses: &'a [Rect], ponds: &'a [Pond], wells: &'a [Well]) -> Obstacles<'a> {
        Obstacles { world_w: 2000.0, world_h: 1500.0, houses, ponds, wells }
    }

    #[test]
    fn out_of_bounds_collides() {
        let obs = obstacles(&[], &[], &[]);
        assert!(collides_circle(Vec2::new(-5.0, 100.0), 10.0, &obs));
        assert!(collides_circle(Vec2::new(5.0, 100.0), 10.0, &obs));
        assert!(collides_circle(Vec2::new(1999.0, 100.0), 10.0, &obs));
        assert!(collides_circle(Vec2::new(100.0, 1495.0), 10.0, &obs));
    }

    #[test]
    fn house_center_collides_open_ground_does_not() {
        let houses = [Rect::new(100.0, 100.0, 40.0, 40.0)];
        let obs = obstacles(&houses, &[], &[]);
        assert!(collides_circle(Vec2::new(120.0, 120.0), 14.0, &obs));
        assert!(!collides_circle(Vec2::new(500.0, 500.0), 14.0, &obs));
    }

    #[test]
    fn house_edge_respects_circle_aabb() {
        let houses = [Rect::new(100.0, 100.0, 40.0, 40.0)];
        let obs = obstacles(&houses, &[], &[]);
        // AABB of the circle touches the house at 86 + 14 = 100.
        assert!(collides_circle(Vec2::new(90.0, 120.0), 14.0, &obs));
        assert!(!collides_circle(Vec2::new(80.0, 120.0), 14.0, &obs));
    }

    #[test]
    fn pond_padding_scales_with_radius() {
        let ponds = [Pond { pos: Vec2::new(400.0, 400.0), rx: 80.0, ry: 40.0, rot: 0.0 }];
        let obs = obstacles(&[], &ponds, &[]);
        // 80 + 14 * 0.85 = 91.9 along x.
        assert!(collides_circle(Vec2::new(491.0, 400.0), 14.0, &obs));
        assert!(!collides_circle(Vec2::new(493.0, 400.0), 14.0, &obs));
    }

    #[test]
    fn wells_are_solid_circles() {
        let wells = [Well { pos: Vec2::new(300.0, 300.0), r: 20.0, roof: 30.0 }];
        let obs = obstacles(&[], &[], &wells);
        // 20 + 14 * 0.92 = 32.88.
        assert!(collides_circle(Vec2::new(300.0, 332.0), 14.0, &obs));
        assert!(!collides_circle(Vec2::new(300.0, 334.0), 14.0, &obs));
    }
}
