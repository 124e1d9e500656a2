use retro_cockpit::rendering::fonts::glyph_font::{TextDrawer, GLYPH_HEIGHT};
use retro_cockpit::rendering::shapes::{fill_rectangle, fill_rectangle_dithered, stroke_rectangle};
use retro_cockpit::rendering::bresenham::LineRasterizer;
use retro_cockpit::rendering::sprite::SpriteDrawer;
use retro_cockpit::rendering::blittable::SizedSurface;
use retro_cockpit::window::BlitContext;
use crate::HomeboundApp;
use crate::cockpit::CockpitGeometry;
use crate::constants::*;
use crate::hud::{planet_info_lines, HudLayout, ScanBlock};
use crate::prefs::HudAlign;
use crate::scene::{Rect, Viewport};
use crate::subsystems::rendering::mint;

impl HomeboundApp {
    fn draw_centered(&self, ctx: &mut BlitContext, cx: f32, y: f32, scale: i32, text: &str, color: u8) {
        let width = (self.font.measure_text_width(text) * scale) as f32;
        self.font.draw_text_scaled(ctx, (cx - width / 2.0).round() as i32, y.round() as i32, scale, text, color);
    }

    pub fn render_prompt_copy(&self, ctx: &mut BlitContext, vp: &Viewport) {
        let scale = self.font_scale(vp);
        let layout = self.prompt_layout(vp);
        let cx = vp.width / 2.0;

        self.draw_centered(ctx, cx, layout.title_y, scale * 2, PROMPT_TITLE, HUD_TEXT);
        self.draw_centered(ctx, cx, layout.line_ys[0], scale, PROMPT_LINE_1, HUD_TEXT);
        self.draw_centered(ctx, cx, layout.line_ys[1], scale, PROMPT_LINE_2, HUD_TEXT);

        let button = layout.button;
        let (x, y, w, h) = (button.x as i32, button.y as i32, button.w as i32, button.h as i32);
        let fill = if self.launch_button_hovered { mint(0.25) } else { mint(0.15) };
        fill_rectangle(ctx, x, y, w, h, fill);
        stroke_rectangle(ctx, x, y, w, h, mint(1.0));
        let label_y = button.y + (button.h - (GLYPH_HEIGHT * scale) as f32) / 2.0;
        self.draw_centered(ctx, cx, label_y, scale, PROMPT_BUTTON, mint(1.0));
    }

    pub fn render_intro_status(&self, ctx: &mut BlitContext, vp: &Viewport) {
        if let Some(text) = self.sequencer.intro.status_text() {
            let width = self.font.measure_text_width(text) as f32;
            let x = ((vp.width - width) / 2.0).round() as i32;
            let y = vp.px(16.0).round().max(2.0) as i32;
            self.font.draw_text_glow(ctx, x, y, text, HUD_TEXT, mint(0.3));
        }
    }

    pub fn render_help(&self, ctx: &mut BlitContext, vp: &Viewport, cockpit: &CockpitGeometry) {
        let line_height = vp.px(HELP_LINE_HEIGHT).max(self.font.line_height() as f32);
        let x = cockpit.cx + cockpit.w * HELP_PANEL_X + vp.px(HELP_PAD.0 + HELP_NUDGE_X);
        let top = cockpit.cy + cockpit.h * HELP_PANEL_Y + vp.px(HELP_PAD.1);
        let bottom_limit = vp.height - 2.0 - line_height * HELP_LINES.len() as f32;
        let top = top.min(bottom_limit).max(0.0);
        for (idx, line) in HELP_LINES.iter().enumerate() {
            let y = top + idx as f32 * line_height;
            self.font.draw_text(ctx, x.round() as i32, y.round() as i32, line, HUD_TEXT);
        }
    }

    /// Console art plus the live telemetry printed onto it.
    pub fn render_interface(&self, ctx: &mut BlitContext, vp: &Viewport, cockpit: &CockpitGeometry) {
        if let Some(image) = &self.sprites.interface {
            let (iw, ih) = (image.get_width() as f32, image.get_height() as f32);
            if iw >= 1.0 && ih >= 1.0 {
                let cover = (cockpit.w / iw).max(cockpit.h / ih);
                SpriteDrawer::create(ctx, image)
                    .with_center((cockpit.cx, cockpit.cy))
                    .with_size((iw * cover, ih * cover))
                    .draw();
            }
        }

        let scale = self.font_scale(vp);
        let glyph_line = (self.font.line_height() * scale) as f32;
        let layout = HudLayout::new(cockpit, vp, self.prefs.offset(vp.px_scale()), glyph_line);
        let telemetry = &self.sequencer.telemetry;

        { // left readouts
            let (x, y) = layout.left;
            for (idx, line) in telemetry.readout_lines().iter().enumerate() {
                let ly = y + idx as f32 * layout.left_line_height;
                self.font.draw_text_scaled(ctx, x.round() as i32, ly.round() as i32, scale, line, HUD_TEXT);
            }
        }

        { // right short info, right aligned
            let (x, y) = layout.right;
            for (idx, line) in telemetry.short_info().iter().enumerate() {
                let width = (self.font.measure_text_width(line) * scale) as f32;
                let ly = y + idx as f32 * layout.right_line_height;
                self.font.draw_text_scaled(ctx, (x - width).round() as i32, ly.round() as i32, scale, line, HUD_TEXT);
            }
        }

        { // scan block
            let block = ScanBlock::from_scan(&self.sequencer.scan, self.now);
            let (cx, cy) = layout.center;
            let bar_w = layout.scan_bar_width;
            self.draw_aligned(ctx, cx, cy, bar_w, scale, block.headline());

            let mut detail_y = cy + layout.center_line_height;
            if let ScanBlock::Active { progress, .. } = block {
                let bar_h = vp.px(HUD_SCAN_BAR_HEIGHT).round().max(2.0);
                let bx = (cx - bar_w / 2.0).round() as i32;
                let by = detail_y.round() as i32;
                fill_rectangle(ctx, bx, by, bar_w as i32, bar_h as i32, SCAN_BAR_BG);
                let fill_w = (bar_w * progress).max(2.0).round() as i32;
                fill_rectangle(ctx, bx, by, fill_w, bar_h as i32, SCAN_BAR_FILL);
                detail_y += bar_h + vp.px(8.0).max(2.0);
            }
            self.draw_aligned(ctx, cx, detail_y, bar_w, scale, block.detail());
        }
    }

    /// Places a line of the center block following the preferred alignment.
    fn draw_aligned(&self, ctx: &mut BlitContext, cx: f32, y: f32, block_w: f32, scale: i32, text: &str) {
        let width = (self.font.measure_text_width(text) * scale) as f32;
        let x = match self.prefs.align {
            HudAlign::Left => cx - block_w / 2.0,
            HudAlign::Center => cx - width / 2.0,
            HudAlign::Right => cx + block_w / 2.0 - width
        };
        self.font.draw_text_scaled(ctx, x.round() as i32, y.round() as i32, scale, text, HUD_TEXT);
    }

    /// Reticle and survey panel for the locked planet, only behind the glass.
    pub fn render_target_lock(&self, ctx: &mut BlitContext, vp: &Viewport, cockpit: &CockpitGeometry) {
        let reticle = match self.target_lock.reticle(self.now, vp) {
            Some(it) => it,
            None => return
        };
        ctx.push_clip(cockpit.window_clip(vp));

        { // corner brackets
            let color = mint(reticle.bracket_alpha);
            let outer = reticle.outer;
            let corner = reticle.corner.round() as i32;
            let (l, t) = (outer.x as i32, outer.y as i32);
            let (r, b) = (l + outer.w as i32 - 1, t + outer.h as i32 - 1);
            let arms = [
                ((l, t), (l + corner, t)), ((l, t), (l, t + corner)),
                ((r, t), (r - corner, t)), ((r, t), (r, t + corner)),
                ((l, b), (l + corner, b)), ((l, b), (l, b - corner)),
                ((r, b), (r - corner, b)), ((r, b), (r, b - corner))
            ];
            for (from, to) in arms {
                LineRasterizer::create(ctx).from(from).to(to).rasterize(color);
            }
        }

        { // pulsing inner frame
            let inner = reticle.inner;
            stroke_rectangle(
                ctx,
                inner.x as i32, inner.y as i32,
                inner.w as i32, inner.h as i32,
                mint(reticle.inner_alpha)
            );
        }

        if let Some(planet) = self.target_lock.planet.and_then(|idx| self.planets.get(idx)) {
            let lines = planet_info_lines(planet.name, planet.meta.as_ref(), self.target_lock.dz);
            self.render_info_panel(ctx, vp, &reticle.outer, &lines);
        }

        ctx.pop_clip();
    }

    fn render_info_panel(&self, ctx: &mut BlitContext, vp: &Viewport, anchor: &Rect, lines: &[String]) {
        let line_height = self.font.line_height();
        let pad = vp.px(12.0).round().max(3.0) as i32;
        let text_w = lines.iter().map(|it| self.font.measure_text_width(it)).max().unwrap_or(0);
        let panel_w = text_w + pad * 2;
        let panel_h = line_height * lines.len() as i32 + pad * 2;

        let right_x = (anchor.x + anchor.w) as i32 + pad;
        let x = if right_x + panel_w <= vp.width as i32 {
            right_x
        } else {
            anchor.x as i32 - pad - panel_w
        };
        let y = (anchor.y as i32).clamp(0, (vp.height as i32 - panel_h).max(0));

        fill_rectangle_dithered(ctx, x, y, panel_w, panel_h, SPACE_BG, 160);
        stroke_rectangle(ctx, x, y, panel_w, panel_h, mint(0.6));
        for (idx, line) in lines.iter().enumerate() {
            self.font.draw_text(ctx, x + pad, y + pad + idx as i32 * line_height, line, mint(1.0));
        }
    }
}
