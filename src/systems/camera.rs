//! Camera follow and viewport culling.

use crate::core::math::{Rect, Vec2};

/// Padding applied around the viewport for visibility tests; generous
/// enough to avoid pop-in at the screen edge.
pub const CULL_PAD: f64 = 180.0;

/// Top-left of the visible world rectangle. Derived from the player
/// every frame; never shows area outside world bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Center on `focus`, clamped to the world. When the world is
    /// smaller than the viewport on an axis the camera pins to 0 there.
    pub fn follow(&mut self, focus: Vec2, view_w: f64, view_h: f64, world_w: f64, world_h: f64) {
        self.pos.x = (focus.x - view_w / 2.0).clamp(0.0, (world_w - view_w).max(0.0));
        self.pos.y = (focus.y - view_h / 2.0).clamp(0.0, (world_h - view_h).max(0.0));
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        p - self.pos
    }

    /// Does a world-space AABB intersect the padded viewport?
    pub fn in_view(&self, aabb: Rect, view_w: f64, view_h: f64, pad: f64) -> bool {
        aabb.x < self.pos.x + view_w + pad
            && aabb.x + aabb.w > self.pos.x - pad
            && aabb.y < self.pos.y + view_h + pad
            && aabb.y + aabb.h > self.pos.y - pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_clamps_to_world_edges() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(0.0, 0.0), 800.0, 600.0, 3600.0, 2400.0);
        assert_eq!(cam.pos, Vec2::new(0.0, 0.0));

        cam.follow(Vec2::new(3600.0, 2400.0), 800.0, 600.0, 3600.0, 2400.0);
        assert_eq!(cam.pos, Vec2::new(2800.0, 1800.0));

        cam.follow(Vec2::new(1800.0, 1200.0), 800.0, 600.0, 3600.0, 2400.0);
        assert_eq!(cam.pos, Vec2::new(1400.0, 900.0));
    }

    #[test]
    fn small_world_pins_camera_to_origin() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(400.0, 300.0), 1920.0, 1080.0, 800.0, 600.0);
        assert_eq!(cam.pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn culling_keeps_padded_margin() {
        let mut cam = Camera::default();
        cam.follow(Vec2::new(1800.0, 1200.0), 800.0, 600.0, 3600.0, 2400.0);
        // Viewport is x in [1400, 2200], pad 180 extends to [1220, 2380].
        assert!(cam.in_view(Rect::new(1230.0, 1000.0, 50.0, 50.0), 800.0, 600.0, CULL_PAD));
        assert!(!cam.in_view(Rect::new(1100.0, 1000.0, 50.0, 50.0), 800.0, 600.0, CULL_PAD));
        assert!(!cam.in_view(Rect::new(2400.0, 1000.0, 50.0, 50.0), 800.0, 600.0, CULL_PAD));
    }
}
