use rand::Rng;
use retro_cockpit::palette::PaletteOverlay;
use retro_cockpit::window::BlitContext;
use crate::HomeboundApp;
use crate::constants::RED_ALERT_COLOR;
use crate::scene::{asteroid_hits_ship, belt_camera_z, integrate_asteroids, Viewport};
use crate::target_lock::find_candidate;

impl HomeboundApp {
    pub fn update_asteroids(&mut self, dt_seconds: f32, vp: &Viewport) {
        if !self.sequencer.in_flight() {
            return;
        }
        let camera_z = belt_camera_z(self.flight.depth, &self.belt);
        integrate_asteroids(&mut self.asteroids, dt_seconds, camera_z);

        let depth = self.flight.depth;
        let struck = self.asteroids
            .iter()
            .any(|asteroid| asteroid_hits_ship(asteroid, depth, vp));
        if struck && self.sequencer.strike(self.now) {
            log::info!("asteroid strike, hull at {}%", self.sequencer.telemetry.hull);
        }
    }

    pub fn update_target_lock(&mut self, vp: &Viewport) {
        if !self.sequencer.in_flight() {
            self.target_lock.clear();
            return;
        }
        let candidate = find_candidate(&self.planets, self.flight.depth, self.flight.ship, vp);
        self.target_lock.update(candidate, &self.planets, self.now);
    }

    /// Red alert and power overlays are blended into the palette, not the framebuffer.
    pub fn update_palette(&mut self, ctx: &mut BlitContext) {
        let now = self.now;
        let mut overlays = Vec::with_capacity(2);

        let red_alpha = self.sequencer.collision.red_alert_alpha(now);
        if red_alpha > 0.0 {
            overlays.push(PaletteOverlay::new(RED_ALERT_COLOR, red_alpha));
        }

        let jitter = self.sequencer.rng().gen_range(-0.25..0.25);
        let power = &self.sequencer.power;
        let breath = self.noise.sample(power.breath_time(now));
        if let Some(overlay) = power.overlay(now, breath, jitter) {
            overlays.push(overlay);
        }

        if overlays.is_empty() {
            ctx.set_palette(&self.palette);
        } else {
            ctx.set_palette(&self.palette.composed(&overlays));
        }
    }
}
