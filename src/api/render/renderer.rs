//! Frame orchestration: ground, depth-sorted pass, overlays.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasPattern, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::math::Vec2;
use crate::core::rng::Mulberry32;
use crate::simulation::{DrawKind, DrawPlan, VillageCore};
use crate::systems::interact::{Hit, HitKind};

const GRASS_TILE: f64 = 220.0;
const GRASS_FALLBACK: &str = "#e9f7ea";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    grass: Option<CanvasPattern>,
    grass_seed: u32,
}

impl CanvasRenderer {
    /// `grass_seed` keys the cached ground texture; it is derived from
    /// the world seed so the ground is as reproducible as the layout.
    pub fn new(ctx: CanvasRenderingContext2d, grass_seed: u32) -> Self {
        Self { ctx, grass: None, grass_seed }
    }

    pub fn render(
        &mut self,
        core: &VillageCore,
        plan: &DrawPlan,
        t_now: f64,
        paused: bool,
    ) -> Result<(), JsValue> {
        let (vw, vh) = core.view_size();
        if vw <= 1.0 || vh <= 1.0 {
            return Ok(());
        }
        self.ensure_grass()?;

        self.ctx.clear_rect(0.0, 0.0, vw, vh);
        match &self.grass {
            Some(pattern) => self.ctx.set_fill_style_canvas_pattern(pattern),
            None => self.ctx.set_fill_style_str(GRASS_FALLBACK),
        }
        self.ctx.fill_rect(0.0, 0.0, vw, vh);

        // Below-grade first, then the painter's pass.
        for &i in &plan.ponds {
            self.draw_pond(core, i)?;
        }
        for record in &plan.items {
            match record.kind {
                DrawKind::Flowers => self.draw_flowers(core, record.index, t_now)?,
                DrawKind::Tree => self.draw_tree(core, record.index)?,
                DrawKind::Well => self.draw_well(core, record.index)?,
                DrawKind::Hut => self.draw_hut(core, record.index)?,
                DrawKind::Knight => self.draw_knight(core, record.index)?,
                DrawKind::Animal => self.draw_animal(core, record.index, t_now)?,
                DrawKind::Npc => self.draw_npc(core, record.index, t_now)?,
                DrawKind::Bird => self.draw_bird(core, record.index, t_now)?,
                DrawKind::Player => self.draw_player(core)?,
            }
        }

        self.draw_signs(core)?;
        if !paused {
            if let Some(hit) = core.focused() {
                self.draw_hint(core, hit)?;
            }
        }
        self.draw_vignette(vw, vh)?;
        Ok(())
    }

    pub(super) fn ctx(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Build the tiled ground texture once: a soft green gradient with
    /// speckles and short grass-blade strokes.
    fn ensure_grass(&mut self) -> Result<(), JsValue> {
        if self.grass.is_some() {
            return Ok(());
        }
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let tile: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("tile is not a canvas"))?;
        tile.set_width(GRASS_TILE as u32);
        tile.set_height(GRASS_TILE as u32);
        let t: CanvasRenderingContext2d = tile
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no tile context"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("tile context is not 2d"))?;

        let mut rng = Mulberry32::new(self.grass_seed);

        let base = t.create_linear_gradient(0.0, 0.0, GRASS_TILE, GRASS_TILE);
        base.add_color_stop(0.0, "rgba(206, 244, 214, 1)")?;
        base.add_color_stop(1.0, "rgba(173, 230, 196, 1)")?;
        t.set_fill_style_canvas_gradient(&base);
        t.fill_rect(0.0, 0.0, GRASS_TILE, GRASS_TILE);

        for _ in 0..1900 {
            let x = (rng.next() * GRASS_TILE).floor();
            let y = (rng.next() * GRASS_TILE).floor();
            let a = 0.05 + rng.next() * 0.09;
            t.set_fill_style_str(&format!("rgba(16, 90, 50, {a})"));
            t.fill_rect(x, y, 1.0, 1.0);
        }

        t.set_stroke_style_str("rgba(15, 110, 60, 0.08)");
        t.set_line_width(1.0);
        for _ in 0..190 {
            let x = rng.next() * GRASS_TILE;
            let y = rng.next() * GRASS_TILE;
            t.begin_path();
            t.move_to(x, y);
            t.line_to(x + (rng.next() - 0.5) * 8.0, y - (3.0 + rng.next() * 9.0));
            t.stroke();
        }

        self.grass = self.ctx.create_pattern_with_html_canvas_element(&tile, "repeat")?;
        Ok(())
    }

    /// Ground shadow under an entity, drawn in screen space.
    pub(super) fn shadow_ellipse(
        &self,
        core: &VillageCore,
        world: Vec2,
        rx: f64,
        ry: f64,
        alpha: f64,
    ) -> Result<(), JsValue> {
        let p = core.camera().world_to_screen(world);
        self.ctx.save();
        self.ctx.set_fill_style_str(&format!("rgba(15, 23, 42, {alpha})"));
        self.ctx.begin_path();
        self.ctx
            .ellipse(p.x, p.y, rx, ry, 0.0, 0.0, std::f64::consts::TAU)?;
        self.ctx.fill();
        self.ctx.restore();
        Ok(())
    }

    /// World-anchored neighborhood signboards, drawn over the sorted
    /// pass. Title comes from the neighborhood name, the smaller line
    /// from its optional tagline.
    fn draw_signs(&self, core: &VillageCore) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (vw, vh) = core.view_size();
        let cam = core.camera();

        for nb in &core.world().neighborhoods {
            if nb.name.is_empty() {
                continue;
            }
            let x = nb.bounds.x + nb.bounds.w * 0.5;
            let y = nb.bounds.y + 72.0;
            let anchor = crate::core::math::Rect::new(x - 340.0, y - 160.0, 680.0, 220.0);
            if !cam.in_view(anchor, vw, vh, 60.0) {
                continue;
            }
            let p = cam.world_to_screen(Vec2::new(x, y));

            ctx.save();
            ctx.set_fill_style_str("rgba(15, 23, 42, 0.18)");
            ctx.begin_path();
            ctx.ellipse(p.x, p.y + 68.0, 150.0, 12.0, 0.0, 0.0, std::f64::consts::TAU)?;
            ctx.fill();

            // posts
            ctx.set_fill_style_str("rgba(101, 70, 35, 1)");
            round_rect(ctx, p.x - 130.0, p.y + 8.0, 14.0, 70.0, 7.0)?;
            ctx.fill();
            round_rect(ctx, p.x + 116.0, p.y + 8.0, 14.0, 70.0, 7.0)?;
            ctx.fill();

            let board_w = 320.0;
            let board_h = 92.0;
            let bx = p.x - board_w / 2.0;
            let by = p.y - board_h / 2.0;

            let wood = ctx.create_linear_gradient(bx, by, bx, by + board_h);
            wood.add_color_stop(0.0, "rgba(234, 210, 170, 1)")?;
            wood.add_color_stop(1.0, "rgba(196, 165, 118, 1)")?;
            ctx.set_fill_style_canvas_gradient(&wood);
            round_rect(ctx, bx, by, board_w, board_h, 18.0)?;
            ctx.fill();

            ctx.set_stroke_style_str("rgba(90, 55, 25, 0.35)");
            ctx.set_line_width(3.0);
            round_rect(ctx, bx, by, board_w, board_h, 18.0)?;
            ctx.stroke();

            // grain lines
            ctx.set_global_alpha(0.12);
            ctx.set_stroke_style_str("rgba(90, 55, 25, 1)");
            ctx.set_line_width(1.0);
            for i in 0..9 {
                let yy = by + 10.0 + f64::from(i) * 9.0;
                ctx.begin_path();
                ctx.move_to(bx + 14.0, yy);
                ctx.line_to(bx + board_w - 14.0, yy);
                ctx.stroke();
            }
            ctx.set_global_alpha(1.0);

            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");

            ctx.set_fill_style_str("rgba(15, 23, 42, 0.90)");
            ctx.set_font("700 22px system-ui, -apple-system, Segoe UI, Roboto");
            ctx.fill_text(&nb.name, p.x, by + 34.0)?;

            if let Some(tagline) = &nb.tagline {
                ctx.set_fill_style_str("rgba(15, 23, 42, 0.70)");
                ctx.set_font("600 13px system-ui, -apple-system, Segoe UI, Roboto");
                ctx.fill_text(tagline, p.x, by + 62.0)?;
            }

            ctx.restore();
        }
        Ok(())
    }

    /// Bubble over the focused interactable.
    fn draw_hint(&self, core: &VillageCore, hit: &Hit) -> Result<(), JsValue> {
        let (target, text) = match hit.kind {
            HitKind::Stop => match core.world().stop_by_id(&hit.id) {
                Some(stop) => (stop.knight_pos(), "Press E to read story"),
                None => return Ok(()),
            },
            HitKind::Npc => match core.npcs().iter().find(|n| n.id == hit.id) {
                Some(npc) => (npc.pos, "Press E to interact"),
                None => return Ok(()),
            },
        };

        let ctx = &self.ctx;
        let tp = core.camera().world_to_screen(target);

        ctx.save();
        ctx.set_font("14px system-ui, -apple-system, Segoe UI, Roboto");
        ctx.set_text_align("center");
        ctx.set_text_baseline("bottom");
        let pad_x = 10.0;
        let w = ctx.measure_text(text)?.width() + pad_x * 2.0;
        let h = 26.0;
        let bx = tp.x - w / 2.0;
        let by = tp.y - 22.0 - h;

        ctx.set_fill_style_str("rgba(255, 255, 255, 0.92)");
        ctx.set_stroke_style_str("rgba(15, 23, 42, 0.18)");
        ctx.set_line_width(1.0);
        round_rect(ctx, bx, by, w, h, 10.0)?;
        ctx.fill();
        ctx.stroke();

        ctx.set_fill_style_str("rgba(15, 23, 42, 0.86)");
        ctx.fill_text(text, tp.x, by + h - 7.0)?;
        ctx.restore();
        Ok(())
    }

    fn draw_vignette(&self, vw: f64, vh: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        let g = ctx.create_radial_gradient(
            vw * 0.5,
            vh * 0.45,
            vw.min(vh) * 0.2,
            vw * 0.5,
            vh * 0.5,
            vw.max(vh) * 0.88,
        )?;
        g.add_color_stop(0.0, "rgba(0, 0, 0, 0)")?;
        g.add_color_stop(1.0, "rgba(0, 0, 0, 0.12)")?;
        ctx.set_fill_style_canvas_gradient(&g);
        ctx.fill_rect(0.0, 0.0, vw, vh);
        ctx.restore();
        Ok(())
    }
}

/// Rounded-rectangle path, radius clamped to half the short side.
pub(super) fn round_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) -> Result<(), JsValue> {
    let rr = r.clamp(0.0, (w.min(h) / 2.0).max(0.0));
    ctx.begin_path();
    ctx.move_to(x + rr, y);
    ctx.arc_to(x + w, y, x + w, y + h, rr)?;
    ctx.arc_to(x + w, y + h, x, y + h, rr)?;
    ctx.arc_to(x, y + h, x, y, rr)?;
    ctx.arc_to(x, y, x + w, y, rr)?;
    ctx.close_path();
    Ok(())
}
