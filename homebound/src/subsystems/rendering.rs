use rand::Rng;
use rand::rngs::StdRng;
use retro_cockpit::rendering::blittable::{ClipRect, PixelTarget, SizedSurface};
use retro_cockpit::rendering::bresenham::LineRasterizer;
use retro_cockpit::rendering::sprite::SpriteDrawer;
use retro_cockpit::rendering::transform::Transform;
use retro_cockpit::window::BlitContext;
use crate::HomeboundApp;
use crate::arrival::Arrival;
use crate::collision::Collision;
use crate::constants::*;
use crate::hit::{Hit, HitPhase};
use crate::scene::{belt_camera_z, far_to_near, planet_wiggle, project_asteroid, project_planet, Viewport};
use crate::sequencer::SequenceFrame;

fn jitter(rng: &mut StdRng, amount: f32) -> f32 {
    if amount <= 0.0 {
        0.0
    } else {
        rng.gen_range(-amount..amount)
    }
}

/// Streaks fall down and to the left regardless of the hit direction
fn speed_line_end(start: (f32, f32), len: f32) -> (f32, f32) {
    (start.0 - len * 0.6, start.1 + len)
}

/// Mint ramp entry standing in for the lock color at `alpha` opacity
pub fn mint(alpha: f32) -> u8 {
    MINT_RAMP_START + (alpha.clamp(0.0, 1.0) * (MINT_RAMP_LEN - 1) as f32).round() as u8
}

impl HomeboundApp {
    pub fn render(&mut self, ctx: &mut BlitContext, vp: &Viewport, frame: &SequenceFrame) {
        self.bump_allocator.reset();
        ctx.clear(SPACE_BG);
        let cockpit = self.cockpit_geometry(ctx, vp);

        if self.sequencer.intro.is_awaiting() {
            self.render_launch_prompt(ctx, vp);
        } else if self.sequencer.intro.is_active() {
            self.render_intro_world(ctx, vp, frame);
        } else {
            self.render_flight_world(ctx, vp, frame);
        }

        self.render_cockpit(ctx, &cockpit);
        self.render_help(ctx, vp, &cockpit);

        if self.sequencer.intro.is_active() {
            self.render_intro_status(ctx, vp);
            return;
        }

        self.render_radar(ctx, vp, &cockpit);
        if self.prefs.show_hud {
            self.render_interface(ctx, vp, &cockpit);
        } else {
            self.render_target_lock(ctx, vp, &cockpit);
        }
    }

    fn render_launch_prompt(&self, ctx: &mut BlitContext, vp: &Viewport) {
        let identity = Transform::from_identity();
        self.render_stars(ctx, vp, &identity, 0.0);
        self.render_ground(ctx, vp, &identity, 0.0, 0.0);
        self.render_prompt_copy(ctx, vp);
    }

    fn render_intro_world(&mut self, ctx: &mut BlitContext, vp: &Viewport, frame: &SequenceFrame) {
        let now = self.now;
        let wobble = self.noise.sample(Hit::turbulence_noise_time(now));
        let turbulence = self.sequencer.hit.pre_turbulence(now, wobble);
        let shake = vp.px(self.sequencer.intro.shake(now) + frame.collision_shake * INTRO_EXTRA_SHAKE_GAIN);
        let spin = self.sequencer.hit.intro_spin();
        let fling = self.sequencer.hit.fling_offset(vp.width, self.flight.ship.0);
        let tumbling = self.sequencer.hit.phase == HitPhase::Tumble;
        let ground_drop = self.sequencer.intro.ground_offset(now, vp.height);

        let (mut offset, tilt) = match turbulence {
            Some(it) => ((vp.px(it.offset.0), vp.px(it.offset.1)), it.tilt),
            None => ((0.0, 0.0), 0.0)
        };
        let rng = self.sequencer.rng();
        offset.0 += jitter(rng, shake);
        offset.1 += jitter(rng, shake);
        let transform = Transform::around_pivot(vp.center(), tilt + spin, offset);

        self.render_stars(ctx, vp, &transform, fling);
        self.render_ground(ctx, vp, &transform, fling, ground_drop);
        if tumbling {
            self.render_speed_lines(ctx, vp);
        }
    }

    fn render_flight_world(&mut self, ctx: &mut BlitContext, vp: &Viewport, frame: &SequenceFrame) {
        let spin = if self.sequencer.arrival.active {
            self.sequencer.arrival.spin
        } else if self.sequencer.arrival.waiting || self.sequencer.hit.is_spinning() {
            self.sequencer.hit.spin
        } else {
            0.0
        };
        let shake = vp.px(frame.collision_shake);
        let max_tilt = if self.sequencer.collision.active {
            Collision::max_tilt(frame.collision_shake)
        } else {
            0.0
        };
        let rng = self.sequencer.rng();
        let tilt = jitter(rng, max_tilt);
        let offset = (jitter(rng, shake), jitter(rng, shake));
        let transform = Transform::around_pivot(vp.center(), tilt + spin, offset);

        self.render_stars(ctx, vp, &transform, 0.0);

        let arrival = frame.arrival;
        if arrival.map(|it| it.stars_only).unwrap_or(false) {
            return;
        }
        let head_turn = arrival.map(|it| it.head_turn_offset).unwrap_or(0.0);
        let reveal = arrival
            .filter(|it| it.reveal_progress < 1.0)
            .map(|it| ClipRect::new(
                0,
                0,
                Arrival::reveal_width(it.reveal_progress, vp.width),
                vp.height.ceil() as i32
            ));

        if let Some(clip) = reveal {
            ctx.push_clip(clip);
        }
        self.render_belt(ctx, vp, &transform, head_turn);
        self.render_planets(ctx, vp, &transform, head_turn);
        if reveal.is_some() {
            ctx.pop_clip();
        }
    }

    fn render_stars(&self, ctx: &mut BlitContext, vp: &Viewport, transform: &Transform, shift: f32) {
        for star in self.stars.iter() {
            let (x, y) = transform.transform_point((star.x * vp.width + shift, star.y * vp.height));
            ctx.plot(x.round() as i32, y.round() as i32, STAR_RAMP_START + star.shade);
        }
    }

    /// Launch pad strip, scaled to the view width and sunk by `drop` pixels.
    fn render_ground(&self, ctx: &mut BlitContext, vp: &Viewport, transform: &Transform, shift: f32, drop: f32) {
        let ground = &self.sprites.surface;
        let (gw, gh) = (ground.get_width() as f32, ground.get_height() as f32);
        if gw < 1.0 {
            return;
        }
        let draw_h = gh * vp.width / gw;
        let center = (vp.width / 2.0 + shift, vp.height - draw_h / 2.0 + drop);
        // oversized so tilting never shows its corners
        SpriteDrawer::create(ctx, ground)
            .with_center(transform.transform_point(center))
            .with_size((vp.width * 1.25, draw_h * 1.25))
            .with_rotation(transform.rotation())
            .draw();
    }

    fn render_speed_lines(&mut self, ctx: &mut BlitContext, vp: &Viewport) {
        let count = self.config.speed_lines;
        let color = STAR_RAMP_START + STAR_RAMP_LEN - 1;
        let rng = self.sequencer.rng();
        for _ in 0..count {
            let start = (rng.gen_range(0.0..vp.width), rng.gen_range(0.0..vp.height));
            let end = speed_line_end(start, vp.px(rng.gen_range(40.0..160.0)));
            LineRasterizer::create(ctx)
                .from((start.0 as i32, start.1 as i32))
                .to((end.0 as i32, end.1 as i32))
                .with_thickness(2)
                .rasterize(color);
        }
    }

    fn render_belt(&self, ctx: &mut BlitContext, vp: &Viewport, transform: &Transform, head_turn: f32) {
        let sprite_count = self.sprites.asteroids.len();
        if sprite_count == 0 {
            return;
        }
        let camera_z = belt_camera_z(self.flight.depth, &self.belt);
        for asteroid in self.asteroids.iter() {
            let projection = match project_asteroid(asteroid, camera_z, vp) {
                Some(it) => it,
                None => continue
            };
            let center = (projection.center.0 + head_turn, projection.center.1);
            SpriteDrawer::create(ctx, &self.sprites.asteroids[asteroid.sprite % sprite_count])
                .with_center(transform.transform_point(center))
                .with_size((projection.size, projection.size))
                .with_rotation(asteroid.rot + transform.rotation())
                .with_opacity(projection.opacity)
                .draw();
        }
    }

    fn render_planets(&self, ctx: &mut BlitContext, vp: &Viewport, transform: &Transform, head_turn: f32) {
        let sprite_count = self.sprites.planets.len();
        if sprite_count == 0 {
            return;
        }
        let depth = self.flight.depth;
        for &idx in far_to_near(&self.planets, depth, &self.bump_allocator).iter() {
            let planet = &self.planets[idx];
            let projection = match project_planet(planet, depth, self.flight.ship, vp) {
                Some(it) => it,
                None => continue
            };
            let wiggle = vp.px(planet_wiggle(self.now, planet));
            let center = (projection.center.0 + wiggle + head_turn, projection.center.1);
            SpriteDrawer::create(ctx, &self.sprites.planets[planet.sprite % sprite_count])
                .with_center(transform.transform_point(center))
                .with_size((projection.size, projection.size))
                .with_rotation(transform.rotation())
                .with_opacity(projection.opacity)
                .draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use super::*;

    #[test]
    fn mint_ramp_spans_background_to_lock_color() {
        assert_eq!(mint(0.0), MINT_RAMP_START);
        assert_eq!(mint(1.0), MINT_RAMP_START + MINT_RAMP_LEN - 1);
        assert_eq!(mint(7.0), mint(1.0));
    }

    #[test]
    fn speed_lines_slant_down_left() {
        assert_eq!(speed_line_end((100.0, 50.0), 40.0), (76.0, 90.0));
        assert_eq!(speed_line_end((0.0, 0.0), 0.0), (0.0, 0.0));
    }

    #[test]
    fn jitter_stays_within_amount() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(jitter(&mut rng, 0.0), 0.0);
        for _ in 0..100 {
            assert!(jitter(&mut rng, 2.5).abs() <= 2.5);
        }
    }
}
