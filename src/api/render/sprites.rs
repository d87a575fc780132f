//! Per-entity sprite drawing. Every sprite is vector-drawn in screen
//! space from its world anchor; ambient motion (bob, sway, flap) is a
//! pure function of the frame clock so paused frames hold still.

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsValue;

use crate::core::math::Vec2;
use crate::domain::agents::{AnimalKind, NpcKind};
use crate::domain::decor::BirdKind;
use crate::simulation::VillageCore;

use super::renderer::{round_rect, CanvasRenderer};

/// FNV-1a over UTF-16 code units; drives per-NPC cosmetic variation.
fn hash_str(s: &str) -> u32 {
    let mut h: u32 = 2_166_136_261;
    for unit in s.encode_utf16() {
        h ^= u32::from(unit);
        h = h.wrapping_mul(16_777_619);
    }
    h
}

impl CanvasRenderer {
    pub(super) fn draw_pond(&self, core: &VillageCore, index: usize) -> Result<(), JsValue> {
        let pd = &core.decor().ponds[index];
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(pd.pos);

        ctx.save();
        ctx.translate(p.x, p.y)?;
        ctx.rotate(pd.rot)?;

        ctx.set_fill_style_str("rgba(15, 23, 42, 0.10)");
        ctx.begin_path();
        ctx.ellipse(3.0, 6.0, pd.rx * 1.02, pd.ry * 1.02, 0.0, 0.0, TAU)?;
        ctx.fill();

        let g = ctx.create_radial_gradient(
            -pd.rx * 0.2,
            -pd.ry * 0.2,
            8.0,
            0.0,
            0.0,
            pd.rx.max(pd.ry) * 1.1,
        )?;
        g.add_color_stop(0.0, "rgba(147, 197, 253, 0.75)")?;
        g.add_color_stop(1.0, "rgba(37, 99, 235, 0.25)")?;
        ctx.set_fill_style_canvas_gradient(&g);
        ctx.begin_path();
        ctx.ellipse(0.0, 0.0, pd.rx, pd.ry, 0.0, 0.0, TAU)?;
        ctx.fill();

        ctx.set_stroke_style_str("rgba(34, 124, 78, 0.24)");
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.ellipse(0.0, 0.0, pd.rx, pd.ry, 0.0, 0.0, TAU)?;
        ctx.stroke();

        ctx.restore();
        Ok(())
    }

    pub(super) fn draw_tree(&self, core: &VillageCore, index: usize) -> Result<(), JsValue> {
        let t = &core.decor().trees[index];
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(t.pos);
        let s = t.scale;

        self.shadow_ellipse(
            core,
            Vec2::new(t.pos.x, t.pos.y + 18.0 * s),
            16.0 * s,
            6.0 * s,
            0.10,
        )?;

        let trunk = ctx.create_linear_gradient(p.x, p.y - 10.0 * s, p.x, p.y + 24.0 * s);
        trunk.add_color_stop(0.0, "rgba(120, 74, 40, 1)")?;
        trunk.add_color_stop(1.0, "rgba(78, 45, 20, 1)")?;
        ctx.set_fill_style_canvas_gradient(&trunk);
        round_rect(ctx, p.x - 6.0 * s, p.y - 6.0 * s, 12.0 * s, 30.0 * s, 6.0 * s)?;
        ctx.fill();

        let canopy = match t.tint {
            0 => "rgba(34, 197, 94, 0.95)",
            1 => "rgba(22, 163, 74, 0.95)",
            _ => "rgba(16, 185, 129, 0.92)",
        };
        ctx.set_fill_style_str(canopy);
        const BLOBS: [(f64, f64, f64); 5] = [
            (-18.0, -18.0, 18.0),
            (0.0, -28.0, 22.0),
            (18.0, -18.0, 18.0),
            (-6.0, -10.0, 20.0),
            (10.0, -8.0, 18.0),
        ];
        for (dx, dy, r) in BLOBS {
            ctx.begin_path();
            ctx.arc(p.x + dx * s, p.y + dy * s, r * s, 0.0, TAU)?;
            ctx.fill();
        }
        Ok(())
    }

    pub(super) fn draw_well(&self, core: &VillageCore, index: usize) -> Result<(), JsValue> {
        let w = &core.decor().wells[index];
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(w.pos);

        self.shadow_ellipse(
            core,
            Vec2::new(w.pos.x, w.pos.y + 16.0),
            w.r * 1.25,
            w.r * 0.45,
            0.12,
        )?;

        ctx.save();
        let g = ctx.create_linear_gradient(p.x - w.r, p.y - w.r, p.x + w.r, p.y + w.r);
        g.add_color_stop(0.0, "rgba(226, 232, 240, 0.95)")?;
        g.add_color_stop(1.0, "rgba(148, 163, 184, 0.95)")?;
        ctx.set_fill_style_canvas_gradient(&g);
        ctx.begin_path();
        ctx.ellipse(p.x, p.y + 6.0, w.r, w.r * 0.65, 0.0, 0.0, TAU)?;
        ctx.fill();

        ctx.set_fill_style_str("rgba(15, 23, 42, 0.35)");
        ctx.begin_path();
        ctx.ellipse(p.x, p.y + 6.0, w.r * 0.62, w.r * 0.40, 0.0, 0.0, TAU)?;
        ctx.fill();

        ctx.set_fill_style_str("rgba(147, 197, 253, 0.18)");
        ctx.begin_path();
        ctx.ellipse(p.x - w.r * 0.18, p.y + 3.0, w.r * 0.28, w.r * 0.18, 0.0, 0.0, TAU)?;
        ctx.fill();

        // posts + roof
        ctx.set_stroke_style_str("rgba(101, 70, 35, 0.85)");
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(p.x - w.r * 0.55, p.y - 14.0);
        ctx.line_to(p.x - w.r * 0.55, p.y - 14.0 - w.roof);
        ctx.move_to(p.x + w.r * 0.55, p.y - 14.0);
        ctx.line_to(p.x + w.r * 0.55, p.y - 14.0 - w.roof);
        ctx.stroke();

        ctx.set_fill_style_str("rgba(204, 160, 96, 0.95)");
        ctx.begin_path();
        ctx.move_to(p.x - w.r * 0.75, p.y - 14.0 - w.roof + 8.0);
        ctx.quadratic_curve_to(
            p.x,
            p.y - 14.0 - w.roof - 18.0,
            p.x + w.r * 0.75,
            p.y - 14.0 - w.roof + 8.0,
        );
        ctx.close_path();
        ctx.fill();

        ctx.restore();
        Ok(())
    }

    pub(super) fn draw_flowers(
        &self,
        core: &VillageCore,
        index: usize,
        t_now: f64,
    ) -> Result<(), JsValue> {
        let fp = &core.decor().flowers[index];
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(fp.pos);
        let sway = (t_now * 1.2 + f64::from(fp.pattern)).sin() * 0.6;

        ctx.save();
        ctx.set_global_alpha(0.85);
        for i in 0..9u32 {
            let a = f64::from(i) / 9.0 * TAU;
            let rr = fp.r * (0.25 + f64::from(i % 3) * 0.08);
            let x = p.x + a.cos() * (fp.r * 0.55) + sway;
            let y = p.y + a.sin() * (fp.r * 0.35);
            let tone = match i % 3 {
                0 => "rgba(251, 113, 133, 0.85)",
                1 => "rgba(250, 204, 21, 0.82)",
                _ => "rgba(34, 197, 94, 0.85)",
            };
            ctx.set_fill_style_str(tone);
            ctx.begin_path();
            ctx.ellipse(x, y, rr, rr * 0.75, a, 0.0, TAU)?;
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
        ctx.restore();
        Ok(())
    }

    pub(super) fn draw_hut(&self, core: &VillageCore, index: usize) -> Result<(), JsValue> {
        let Some(stop) = core.world().stops().nth(index) else {
            return Ok(());
        };
        let h = stop.house_rect();
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(Vec2::new(h.x, h.y));

        self.shadow_ellipse(
            core,
            Vec2::new(h.x + h.w * 0.52, h.y + h.h + 10.0),
            h.w * 0.58,
            h.h * 0.18,
            0.16,
        )?;

        ctx.save();

        // foundation dirt patch
        ctx.set_fill_style_str("rgba(90, 55, 25, 0.18)");
        ctx.begin_path();
        ctx.ellipse(p.x + h.w * 0.52, p.y + h.h + 6.0, h.w * 0.52, h.h * 0.14, 0.0, 0.0, TAU)?;
        ctx.fill();

        let wall_x = p.x;
        let wall_y = p.y + 14.0;
        let wall_w = h.w;
        let wall_h = h.h - 14.0;

        let roof_x = p.x - 12.0;
        let roof_y = p.y - 28.0;
        let roof_w = h.w + 24.0;
        let roof_h = 70.0 + h.h * 0.18;

        let roof = ctx.create_linear_gradient(roof_x, roof_y, roof_x, roof_y + roof_h);
        roof.add_color_stop(0.0, "rgba(204, 160, 96, 1)")?;
        roof.add_color_stop(1.0, "rgba(132, 92, 48, 1)")?;
        ctx.set_fill_style_canvas_gradient(&roof);
        ctx.begin_path();
        ctx.move_to(roof_x, roof_y + roof_h * 0.62);
        ctx.quadratic_curve_to(
            roof_x + roof_w * 0.5,
            roof_y - roof_h * 0.18,
            roof_x + roof_w,
            roof_y + roof_h * 0.62,
        );
        ctx.line_to(roof_x + roof_w * 0.88, roof_y + roof_h * 0.98);
        ctx.quadratic_curve_to(
            roof_x + roof_w * 0.5,
            roof_y + roof_h * 1.10,
            roof_x + roof_w * 0.12,
            roof_y + roof_h * 0.98,
        );
        ctx.close_path();
        ctx.fill();

        // roof highlight
        ctx.set_global_alpha(0.12);
        ctx.set_stroke_style_str("rgba(255, 255, 255, 1)");
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(roof_x + roof_w * 0.16, roof_y + roof_h * 0.70);
        ctx.quadratic_curve_to(
            roof_x + roof_w * 0.5,
            roof_y + roof_h * 0.42,
            roof_x + roof_w * 0.84,
            roof_y + roof_h * 0.70,
        );
        ctx.stroke();
        ctx.set_global_alpha(1.0);

        // chimney
        ctx.set_fill_style_str("rgba(101, 70, 35, 0.55)");
        round_rect(ctx, roof_x + roof_w * 0.72, roof_y + roof_h * 0.32, 16.0, 34.0, 6.0)?;
        ctx.fill();
        ctx.set_fill_style_str("rgba(15, 23, 42, 0.08)");
        round_rect(ctx, roof_x + roof_w * 0.72, roof_y + roof_h * 0.30, 16.0, 8.0, 4.0)?;
        ctx.fill();

        // roof underside shadow
        ctx.set_fill_style_str("rgba(15, 23, 42, 0.10)");
        ctx.begin_path();
        ctx.ellipse(
            p.x + wall_w * 0.5,
            roof_y + roof_h * 0.78,
            roof_w * 0.40,
            roof_h * 0.10,
            0.0,
            0.0,
            TAU,
        )?;
        ctx.fill();

        // straw lines
        ctx.set_global_alpha(0.16);
        ctx.set_stroke_style_str("rgba(55, 33, 12, 1)");
        ctx.set_line_width(1.0);
        for i in 0..28 {
            let t = f64::from(i) / 27.0;
            let y = roof_y + roof_h * (0.64 + t * 0.28);
            ctx.begin_path();
            ctx.move_to(roof_x + 12.0, y);
            ctx.line_to(roof_x + roof_w - 12.0, y);
            ctx.stroke();
        }
        ctx.set_global_alpha(1.0);

        // walls
        let wall = ctx.create_linear_gradient(wall_x, wall_y, wall_x + wall_w, wall_y + wall_h);
        wall.add_color_stop(0.0, "rgba(246, 235, 214, 1)")?;
        wall.add_color_stop(1.0, "rgba(204, 178, 145, 1)")?;
        ctx.set_fill_style_canvas_gradient(&wall);
        round_rect(ctx, wall_x, wall_y, wall_w, wall_h, 12.0)?;
        ctx.fill();

        ctx.set_stroke_style_str("rgba(90, 55, 25, 0.26)");
        ctx.set_line_width(2.0);
        round_rect(ctx, wall_x, wall_y, wall_w, wall_h, 12.0)?;
        ctx.stroke();

        // grass occlusion strip
        let strip_h = 12.0;
        let strip = ctx.create_linear_gradient(
            wall_x,
            wall_y + wall_h - strip_h,
            wall_x,
            wall_y + wall_h + 2.0,
        );
        strip.add_color_stop(0.0, "rgba(34, 197, 94, 0.00)")?;
        strip.add_color_stop(1.0, "rgba(34, 197, 94, 0.26)")?;
        ctx.set_fill_style_canvas_gradient(&strip);
        round_rect(
            ctx,
            wall_x + 2.0,
            wall_y + wall_h - strip_h,
            wall_w - 4.0,
            strip_h + 5.0,
            10.0,
        )?;
        ctx.fill();

        // door
        let door_w = (wall_w * 0.22).max(18.0);
        let door_h = (wall_h * 0.36).max(26.0);
        let door_x = wall_x + wall_w * 0.5 - door_w / 2.0;
        let door_y = wall_y + wall_h - door_h - 7.0;

        let door = ctx.create_linear_gradient(door_x, door_y, door_x, door_y + door_h);
        door.add_color_stop(0.0, "rgba(132, 84, 44, 1)")?;
        door.add_color_stop(1.0, "rgba(74, 42, 18, 1)")?;
        ctx.set_fill_style_canvas_gradient(&door);
        round_rect(ctx, door_x, door_y, door_w, door_h, 9.0)?;
        ctx.fill();

        // step
        ctx.set_fill_style_str("rgba(15, 23, 42, 0.10)");
        ctx.begin_path();
        ctx.ellipse(door_x + door_w * 0.5, door_y + door_h + 5.0, door_w * 0.55, 4.0, 0.0, 0.0, TAU)?;
        ctx.fill();

        // knob
        ctx.set_fill_style_str("rgba(226, 232, 240, 0.8)");
        ctx.begin_path();
        ctx.arc(door_x + door_w * 0.78, door_y + door_h * 0.55, 2.2, 0.0, TAU)?;
        ctx.fill();

        // windows
        let win_count = if wall_w > 120.0 { 2 } else { 1 };
        for i in 0..win_count {
            let win_w = wall_w * 0.18;
            let win_h = wall_h * 0.18;
            let cx = if i == 0 { wall_x + wall_w * 0.25 } else { wall_x + wall_w * 0.75 };
            let win_x = cx - win_w / 2.0;
            let win_y = wall_y + wall_h * 0.42 - win_h / 2.0;

            ctx.set_fill_style_str("rgba(250, 204, 21, 0.10)");
            ctx.begin_path();
            ctx.ellipse(
                win_x + win_w / 2.0,
                win_y + win_h / 2.0,
                win_w * 0.9,
                win_h * 0.8,
                0.0,
                0.0,
                TAU,
            )?;
            ctx.fill();

            ctx.set_fill_style_str("rgba(15, 23, 42, 0.26)");
            round_rect(ctx, win_x, win_y, win_w, win_h, 7.0)?;
            ctx.fill();

            ctx.set_stroke_style_str("rgba(90, 55, 25, 0.30)");
            ctx.set_line_width(2.0);
            round_rect(ctx, win_x, win_y, win_w, win_h, 7.0)?;
            ctx.stroke();

            ctx.set_stroke_style_str("rgba(226, 232, 240, 0.60)");
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.move_to(win_x + win_w / 2.0, win_y + 3.0);
            ctx.line_to(win_x + win_w / 2.0, win_y + win_h - 3.0);
            ctx.move_to(win_x + 3.0, win_y + win_h / 2.0);
            ctx.line_to(win_x + win_w - 3.0, win_y + win_h / 2.0);
            ctx.stroke();
        }

        // front fence
        ctx.set_global_alpha(0.65);
        ctx.set_stroke_style_str("rgba(101, 70, 35, 0.8)");
        ctx.set_line_width(2.0);
        let fy = wall_y + wall_h + 6.0;
        ctx.begin_path();
        ctx.move_to(wall_x + 14.0, fy);
        ctx.line_to(wall_x + wall_w - 14.0, fy);
        ctx.stroke();
        for i in 0..6 {
            let xx = wall_x + 18.0 + f64::from(i) * (wall_w - 36.0) / 5.0;
            ctx.begin_path();
            ctx.move_to(xx, fy - 2.0);
            ctx.line_to(xx, fy + 10.0);
            ctx.stroke();
        }
        ctx.set_global_alpha(1.0);

        ctx.restore();
        Ok(())
    }

    pub(super) fn draw_knight(&self, core: &VillageCore, index: usize) -> Result<(), JsValue> {
        let Some(stop) = core.world().stops().nth(index) else {
            return Ok(());
        };
        let pos = stop.knight_pos();
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(pos);

        self.shadow_ellipse(core, Vec2::new(pos.x, pos.y + 12.0), 14.0, 6.0, 0.15)?;

        ctx.save();
        ctx.set_fill_style_str("rgba(55, 65, 81, 1)");
        round_rect(ctx, p.x - 8.0, p.y - 2.0, 16.0, 22.0, 7.0)?;
        ctx.fill();

        ctx.set_fill_style_str("rgba(148, 163, 184, 1)");
        ctx.begin_path();
        ctx.arc(p.x, p.y - 8.0, 9.0, PI, TAU)?;
        ctx.fill();

        // spear
        ctx.set_stroke_style_str("rgba(101, 70, 35, 1)");
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(p.x + 10.0, p.y + 2.0);
        ctx.line_to(p.x + 26.0, p.y - 18.0);
        ctx.stroke();
        ctx.restore();
        Ok(())
    }

    pub(super) fn draw_bird(
        &self,
        core: &VillageCore,
        index: usize,
        t_now: f64,
    ) -> Result<(), JsValue> {
        let b = &core.decor().birds[index];
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(b.pos);
        let rate = if b.kind == BirdKind::Bird { 6.0 } else { 8.0 };
        let flap = (t_now * rate + b.phase).sin();
        let lift = if b.kind == BirdKind::Bird { 2.0 } else { 3.0 } * flap;
        let s = b.scale;

        ctx.save();

        ctx.set_global_alpha(0.12);
        ctx.set_fill_style_str("rgba(15, 23, 42, 1)");
        ctx.begin_path();
        ctx.ellipse(p.x, p.y + 14.0, 6.0 * s, 2.3 * s, 0.0, 0.0, TAU)?;
        ctx.fill();
        ctx.set_global_alpha(1.0);

        match b.kind {
            BirdKind::Bird => {
                ctx.set_fill_style_str("rgba(30, 41, 59, 0.85)");
                round_rect(ctx, p.x - 5.0 * s, p.y + lift, 10.0 * s, 6.0 * s, 3.0 * s)?;
                ctx.fill();

                ctx.set_stroke_style_str("rgba(30, 41, 59, 0.85)");
                ctx.set_line_width(2.0);
                ctx.begin_path();
                ctx.move_to(p.x - 4.0 * s, p.y + 2.0 + lift);
                ctx.quadratic_curve_to(
                    p.x - 10.0 * s,
                    p.y - 3.0 - flap * 2.0,
                    p.x - 14.0 * s,
                    p.y + 2.0 + lift,
                );
                ctx.move_to(p.x + 4.0 * s, p.y + 2.0 + lift);
                ctx.quadratic_curve_to(
                    p.x + 10.0 * s,
                    p.y - 3.0 - flap * 2.0,
                    p.x + 14.0 * s,
                    p.y + 2.0 + lift,
                );
                ctx.stroke();

                ctx.set_fill_style_str("rgba(251, 191, 36, 0.9)");
                ctx.begin_path();
                ctx.move_to(p.x + 6.0 * s, p.y + 3.0 + lift);
                ctx.line_to(p.x + 10.0 * s, p.y + 2.0 + lift);
                ctx.line_to(p.x + 6.0 * s, p.y + 5.0 + lift);
                ctx.close_path();
                ctx.fill();
            }
            BirdKind::Butterfly => {
                ctx.set_global_alpha(0.9);
                ctx.set_fill_style_str("rgba(168, 85, 247, 0.65)");
                ctx.begin_path();
                ctx.ellipse(p.x - 5.0 * s, p.y + lift, 6.0 * s, (5.0 + flap * 2.0) * s, 0.0, 0.0, TAU)?;
                ctx.ellipse(p.x + 5.0 * s, p.y + lift, 6.0 * s, (5.0 + flap * 2.0) * s, 0.0, 0.0, TAU)?;
                ctx.fill();
                ctx.set_fill_style_str("rgba(30, 41, 59, 0.75)");
                round_rect(ctx, p.x - s, p.y + lift - 4.0 * s, 2.0 * s, 8.0 * s, 2.0 * s)?;
                ctx.fill();
                ctx.set_global_alpha(1.0);
            }
        }

        ctx.restore();
        Ok(())
    }

    pub(super) fn draw_animal(
        &self,
        core: &VillageCore,
        index: usize,
        t_now: f64,
    ) -> Result<(), JsValue> {
        let a = &core.decor().animals[index];
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(a.pos);
        let s = a.scale;
        let bob = (t_now * 2.2 + a.phase).sin() * 0.8;

        self.shadow_ellipse(core, Vec2::new(a.pos.x, a.pos.y + 14.0), 16.0 * s, 6.0 * s, 0.12)?;

        match a.kind {
            AnimalKind::Deer => {
                ctx.save();

                ctx.set_fill_style_str("rgba(120, 74, 40, 0.95)");
                round_rect(ctx, p.x - 14.0 * s, p.y + bob, 28.0 * s, 14.0 * s, 8.0 * s)?;
                ctx.fill();

                ctx.set_stroke_style_str("rgba(74, 42, 18, 0.9)");
                ctx.set_line_width(3.0);
                ctx.begin_path();
                ctx.move_to(p.x - 8.0 * s, p.y + 12.0 * s + bob);
                ctx.line_to(p.x - 10.0 * s, p.y + 22.0 * s + bob);
                ctx.move_to(p.x + 8.0 * s, p.y + 12.0 * s + bob);
                ctx.line_to(p.x + 10.0 * s, p.y + 22.0 * s + bob);
                ctx.stroke();

                ctx.set_fill_style_str("rgba(253, 224, 180, 0.95)");
                ctx.begin_path();
                ctx.ellipse(p.x + 18.0 * s, p.y + 3.0 * s + bob, 9.0 * s, 7.0 * s, 0.0, 0.0, TAU)?;
                ctx.fill();

                ctx.set_fill_style_str("rgba(253, 224, 180, 0.9)");
                ctx.begin_path();
                ctx.ellipse(p.x + 20.0 * s, p.y - 4.0 * s + bob, 3.0 * s, 5.0 * s, 0.5, 0.0, TAU)?;
                ctx.ellipse(p.x + 14.0 * s, p.y - 4.0 * s + bob, 3.0 * s, 5.0 * s, -0.5, 0.0, TAU)?;
                ctx.fill();

                ctx.set_stroke_style_str("rgba(101, 70, 35, 0.85)");
                ctx.set_line_width(2.0);
                ctx.begin_path();
                ctx.move_to(p.x + 16.0 * s, p.y - 6.0 * s + bob);
                ctx.line_to(p.x + 10.0 * s, p.y - 16.0 * s + bob);
                ctx.line_to(p.x + 12.0 * s, p.y - 20.0 * s + bob);
                ctx.move_to(p.x + 20.0 * s, p.y - 6.0 * s + bob);
                ctx.line_to(p.x + 26.0 * s, p.y - 16.0 * s + bob);
                ctx.line_to(p.x + 24.0 * s, p.y - 20.0 * s + bob);
                ctx.stroke();

                ctx.restore();
            }
            AnimalKind::Peacock => {
                ctx.save();

                // tail fan
                ctx.set_global_alpha(0.75);
                ctx.set_fill_style_str("rgba(16, 185, 129, 0.65)");
                ctx.begin_path();
                ctx.ellipse(p.x - 10.0 * s, p.y - 2.0 * s + bob, 22.0 * s, 18.0 * s, -0.4, 0.0, TAU)?;
                ctx.fill();

                // eye spots
                ctx.set_global_alpha(0.7);
                for i in 0..7 {
                    let ang = -0.7 + f64::from(i) / 6.0 * 1.2;
                    let ex = p.x - 18.0 * s + ang.cos() * 12.0 * s;
                    let ey = p.y - 8.0 * s + bob + ang.sin() * 10.0 * s;
                    ctx.set_fill_style_str("rgba(59, 130, 246, 0.55)");
                    ctx.begin_path();
                    ctx.arc(ex, ey, 3.6 * s, 0.0, TAU)?;
                    ctx.fill();
                    ctx.set_fill_style_str("rgba(250, 204, 21, 0.55)");
                    ctx.begin_path();
                    ctx.arc(ex, ey, 1.6 * s, 0.0, TAU)?;
                    ctx.fill();
                }
                ctx.set_global_alpha(1.0);

                ctx.set_fill_style_str("rgba(30, 64, 175, 0.9)");
                round_rect(ctx, p.x - 10.0 * s, p.y + bob, 20.0 * s, 12.0 * s, 7.0 * s)?;
                ctx.fill();

                // neck + head
                ctx.set_fill_style_str("rgba(16, 185, 129, 0.9)");
                round_rect(ctx, p.x + 6.0 * s, p.y - 10.0 * s + bob, 6.0 * s, 16.0 * s, 4.0 * s)?;
                ctx.fill();
                ctx.begin_path();
                ctx.arc(p.x + 10.0 * s, p.y - 12.0 * s + bob, 5.0 * s, 0.0, TAU)?;
                ctx.fill();

                ctx.set_fill_style_str("rgba(251, 191, 36, 0.9)");
                ctx.begin_path();
                ctx.move_to(p.x + 15.0 * s, p.y - 12.0 * s + bob);
                ctx.line_to(p.x + 22.0 * s, p.y - 14.0 * s + bob);
                ctx.line_to(p.x + 15.0 * s, p.y - 10.0 * s + bob);
                ctx.close_path();
                ctx.fill();

                ctx.restore();
            }
        }
        Ok(())
    }

    pub(super) fn draw_npc(
        &self,
        core: &VillageCore,
        index: usize,
        t_now: f64,
    ) -> Result<(), JsValue> {
        let n = &core.npcs()[index];
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(n.pos);
        let h = hash_str(&format!("{}{}", n.id, n.name));
        let bob = (t_now * 2.1 + f64::from(h % 1000)).sin() * 0.8;

        if n.kind == NpcKind::Kid {
            self.shadow_ellipse(core, Vec2::new(n.pos.x, n.pos.y + 13.0), 12.0, 5.0, 0.12)?;
            ctx.save();

            // skin
            ctx.set_fill_style_str("rgba(253, 224, 180, 1)");
            ctx.begin_path();
            ctx.arc(p.x, p.y - 2.0 + bob, 9.0, 0.0, TAU)?;
            ctx.fill();

            let hair = match h % 3 {
                0 => "rgba(15, 23, 42, 0.92)",
                1 => "rgba(51, 65, 85, 0.92)",
                _ => "rgba(30, 41, 59, 0.90)",
            };
            ctx.set_fill_style_str(hair);
            ctx.begin_path();
            ctx.arc(p.x, p.y - 6.0 + bob, 9.2, PI, TAU)?;
            ctx.close_path();
            ctx.fill();

            // bangs / side tuft
            ctx.set_global_alpha(0.9);
            if h & 1 == 0 {
                ctx.begin_path();
                ctx.ellipse(p.x - 4.0, p.y - 8.0 + bob, 4.2, 3.4, 0.2, 0.0, TAU)?;
                ctx.fill();
            } else {
                ctx.begin_path();
                ctx.ellipse(p.x + 4.0, p.y - 9.0 + bob, 4.6, 3.2, -0.2, 0.0, TAU)?;
                ctx.fill();
            }
            ctx.set_global_alpha(1.0);

            // eyes
            ctx.set_fill_style_str("rgba(15, 23, 42, 0.85)");
            ctx.begin_path();
            ctx.arc(p.x - 3.0, p.y - 2.0 + bob, 1.3, 0.0, TAU)?;
            ctx.arc(p.x + 3.0, p.y - 2.0 + bob, 1.3, 0.0, TAU)?;
            ctx.fill();

            // smile
            ctx.set_stroke_style_str("rgba(15, 23, 42, 0.35)");
            ctx.set_line_width(1.5);
            ctx.begin_path();
            ctx.arc(p.x, p.y + 1.5 + bob, 3.6, 0.1 * PI, 0.9 * PI)?;
            ctx.stroke();

            let shirt = match h % 4 {
                0 => "rgba(30, 64, 175, 0.92)",
                1 => "rgba(15, 118, 110, 0.92)",
                2 => "rgba(99, 102, 241, 0.90)",
                _ => "rgba(51, 65, 85, 0.92)",
            };
            ctx.set_fill_style_str(shirt);
            round_rect(ctx, p.x - 9.0, p.y + 7.0 + bob, 18.0, 14.0, 7.0)?;
            ctx.fill();

            // belt stripe
            ctx.set_global_alpha(0.25);
            ctx.set_fill_style_str("rgba(255, 255, 255, 1)");
            round_rect(ctx, p.x - 8.0, p.y + 12.0 + bob, 16.0, 3.0, 2.0)?;
            ctx.fill();
            ctx.set_global_alpha(1.0);

            // hands
            ctx.set_fill_style_str("rgba(253, 224, 180, 0.9)");
            ctx.begin_path();
            ctx.arc(p.x - 10.0, p.y + 13.0 + bob, 2.2, 0.0, TAU)?;
            ctx.arc(p.x + 10.0, p.y + 13.0 + bob, 2.2, 0.0, TAU)?;
            ctx.fill();

            ctx.restore();
            return Ok(());
        }

        // cat / dog
        self.shadow_ellipse(core, Vec2::new(n.pos.x, n.pos.y + 10.0), 12.0, 5.0, 0.12)?;
        ctx.save();

        let (body, face) = if n.kind == NpcKind::Cat {
            ("rgba(100, 116, 139, 1)", "rgba(148, 163, 184, 1)")
        } else {
            ("rgba(120, 74, 40, 1)", "rgba(253, 224, 180, 1)")
        };
        let b = bob * 0.4;

        ctx.set_fill_style_str(body);
        round_rect(ctx, p.x - 10.0, p.y + 2.0 + b, 20.0, 10.0, 6.0)?;
        ctx.fill();

        // tail
        ctx.set_stroke_style_str(body);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(p.x - 10.0, p.y + 8.0 + b);
        ctx.quadratic_curve_to(p.x - 18.0, p.y + 2.0 + b, p.x - 12.0, p.y - 2.0 + b);
        ctx.stroke();

        // head
        ctx.set_fill_style_str(face);
        ctx.begin_path();
        ctx.arc(p.x + 12.0, p.y + 4.0 + b, 6.0, 0.0, TAU)?;
        ctx.fill();

        if n.kind == NpcKind::Cat {
            ctx.begin_path();
            ctx.move_to(p.x + 9.0, p.y - 2.0 + b);
            ctx.line_to(p.x + 11.0, p.y + 2.0 + b);
            ctx.line_to(p.x + 7.0, p.y + 2.0 + b);
            ctx.close_path();
            ctx.fill();

            ctx.begin_path();
            ctx.move_to(p.x + 15.0, p.y - 2.0 + b);
            ctx.line_to(p.x + 17.0, p.y + 2.0 + b);
            ctx.line_to(p.x + 13.0, p.y + 2.0 + b);
            ctx.close_path();
            ctx.fill();
        } else {
            // floppy ears
            ctx.set_global_alpha(0.9);
            ctx.begin_path();
            ctx.ellipse(p.x + 9.0, p.y + 1.0 + b, 3.0, 5.0, 0.4, 0.0, TAU)?;
            ctx.ellipse(p.x + 16.0, p.y + 1.0 + b, 3.0, 5.0, -0.4, 0.0, TAU)?;
            ctx.fill();
            ctx.set_global_alpha(1.0);
        }

        // eyes
        ctx.set_fill_style_str("rgba(15, 23, 42, 0.75)");
        ctx.begin_path();
        ctx.arc(p.x + 10.5, p.y + 3.0 + b, 0.9, 0.0, TAU)?;
        ctx.arc(p.x + 13.5, p.y + 3.0 + b, 0.9, 0.0, TAU)?;
        ctx.fill();

        ctx.restore();
        Ok(())
    }

    pub(super) fn draw_player(&self, core: &VillageCore) -> Result<(), JsValue> {
        let player = core.player();
        let ctx = self.ctx();
        let p = core.camera().world_to_screen(player.pos);

        self.shadow_ellipse(
            core,
            Vec2::new(player.pos.x, player.pos.y + 16.0),
            14.0,
            6.0,
            0.12,
        )?;

        ctx.save();
        ctx.set_fill_style_str("rgba(30, 41, 59, 1)");
        round_rect(ctx, p.x - 10.0, p.y + 2.0, 20.0, 18.0, 8.0)?;
        ctx.fill();

        // belt highlight
        ctx.set_global_alpha(0.18);
        ctx.set_fill_style_str("rgba(255, 255, 255, 1)");
        round_rect(ctx, p.x - 9.0, p.y + 10.0, 18.0, 3.0, 2.0)?;
        ctx.fill();
        ctx.set_global_alpha(1.0);

        // head
        ctx.set_fill_style_str("rgba(253, 224, 180, 1)");
        ctx.begin_path();
        ctx.arc(p.x, p.y - 6.0, 9.0, 0.0, TAU)?;
        ctx.fill();

        // hair
        ctx.set_fill_style_str("rgba(15, 23, 42, 0.90)");
        ctx.begin_path();
        ctx.arc(p.x - 1.0, p.y - 10.5, 8.5, PI * 1.05, PI * 1.95)?;
        ctx.fill();

        // eyes track the facing direction
        let fx = player.facing.x;
        ctx.set_fill_style_str("rgba(15, 23, 42, 0.85)");
        ctx.begin_path();
        ctx.arc(p.x + fx * 2.8 - 2.2, p.y - 7.0, 1.3, 0.0, TAU)?;
        ctx.arc(p.x + fx * 2.8 + 2.2, p.y - 7.0, 1.3, 0.0, TAU)?;
        ctx.fill();

        // mouth
        ctx.set_stroke_style_str("rgba(15, 23, 42, 0.35)");
        ctx.set_line_width(1.5);
        ctx.begin_path();
        ctx.arc(p.x, p.y - 3.3, 3.2, 0.15 * PI, 0.85 * PI)?;
        ctx.stroke();

        ctx.restore();
        Ok(())
    }
}
