use std::f32::consts::TAU;
use rand::Rng;
use crate::constants::{
    FRAME_MS, HIT_DELAY_MAX_MS, HIT_DELAY_MIN_MS, HIT_FLING_FALLBACK, HIT_FLING_PX, HIT_IMPACT_MS,
    HIT_RECOVER_DAMP_GAIN, HIT_RECOVER_MS, HIT_SPIN_DAMP, HIT_SPIN_DEG_PER_SEC, HIT_TUMBLE_MS,
    PRE_TURBULENCE_MS, PRE_TURBULENCE_PX, PRE_TURBULENCE_TILT_DEG
};
use crate::easing::{constrain, damp, lerp};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitPhase {
    Idle,
    Impact,
    Tumble,
    Recover,
    Done
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitEvent {
    Impact,
    Done
}

/// Camera jitter in the moments before the impact
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PreTurbulence {
    pub offset: (f32, f32),
    pub tilt: f32
}

/// The unseen strike that sends the ship tumbling during lift-off.
pub struct Hit {
    pub phase: HitPhase,
    pub t0: f32,
    pub impact_at: Option<f32>,
    pub spin: f32,
    /// radians per reference frame
    pub spin_vel: f32,
    pub bias_angle: f32
}

impl Hit {
    pub fn new() -> Self {
        Self {
            phase: HitPhase::Idle,
            t0: 0.0,
            impact_at: None,
            spin: 0.0,
            spin_vel: 0.0,
            bias_angle: 0.0
        }
    }

    pub fn schedule(&mut self, now: f32, rng: &mut impl Rng) {
        self.phase = HitPhase::Idle;
        self.impact_at = Some(now + rng.gen_range(HIT_DELAY_MIN_MS..HIT_DELAY_MAX_MS));
        self.spin = 0.0;
        self.spin_vel = 0.0;
        self.bias_angle = rng.gen_range(0.0..TAU);
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, HitPhase::Impact | HitPhase::Tumble | HitPhase::Recover)
    }

    /// Rotation of the intro world; nothing once the ship has settled.
    pub fn intro_spin(&self) -> f32 {
        if self.is_spinning() { self.spin } else { 0.0 }
    }

    pub fn is_flinging(&self) -> bool {
        matches!(self.phase, HitPhase::Tumble | HitPhase::Recover)
    }

    pub fn update(&mut self, now: f32, dt_frames: f32) -> Option<HitEvent> {
        let mut event = None;
        let elapsed = now - self.t0;
        match self.phase {
            HitPhase::Idle => {
                if matches!(self.impact_at, Some(at) if now >= at) {
                    self.phase = HitPhase::Impact;
                    self.t0 = now;
                    self.spin_vel = HIT_SPIN_DEG_PER_SEC.to_radians() / 60.0;
                    event = Some(HitEvent::Impact);
                }
            }
            HitPhase::Impact if elapsed >= HIT_IMPACT_MS => {
                self.phase = HitPhase::Tumble;
                self.t0 = now;
            }
            HitPhase::Tumble if elapsed >= HIT_TUMBLE_MS => {
                self.phase = HitPhase::Recover;
                self.t0 = now;
            }
            HitPhase::Recover if elapsed >= HIT_RECOVER_MS => {
                self.phase = HitPhase::Done;
                event = Some(HitEvent::Done);
            }
            _ => ()
        }

        if self.is_spinning() && event != Some(HitEvent::Impact) {
            self.spin += self.spin_vel * dt_frames;
            let factor = if self.phase == HitPhase::Recover {
                HIT_SPIN_DAMP * HIT_RECOVER_DAMP_GAIN
            } else {
                HIT_SPIN_DAMP
            };
            self.spin_vel *= damp(factor, dt_frames);
        }
        event
    }

    /// Noise coordinate for the turbulence wobble, 0.06 per 60 Hz frame
    pub fn turbulence_noise_time(now: f32) -> f32 {
        now / FRAME_MS * 0.06
    }

    /// `noise` is a smooth value in 0..1, offsets are in reference pixels.
    pub fn pre_turbulence(&self, now: f32, noise: f32) -> Option<PreTurbulence> {
        if self.phase != HitPhase::Idle {
            return None;
        }
        let remain = self.impact_at? - now;
        if remain > PRE_TURBULENCE_MS {
            return None;
        }
        let r = constrain(1.0 - remain / PRE_TURBULENCE_MS, 0.0, 1.0);
        let n = (noise - 0.5) * 2.0;
        let mag = lerp(0.0, PRE_TURBULENCE_PX, r * r);
        let (by, bx) = self.bias_angle.sin_cos();
        let along = mag * (0.8 + 0.4 * r);
        let wobble = n * mag * 0.6;
        Some(PreTurbulence {
            offset: (bx * along + wobble, by * along + wobble),
            tilt: PRE_TURBULENCE_TILT_DEG.to_radians() * (n * 0.5 + r * 0.5)
        })
    }

    /// Sideways push of the world while tumbling, in pixels of a `width` wide view
    pub fn fling_offset(&self, width: f32, ship_x: f32) -> f32 {
        if !self.is_flinging() {
            return 0.0;
        }
        let lateral = if ship_x != 0.0 { ship_x } else { HIT_FLING_FALLBACK };
        width * HIT_FLING_PX * lateral
    }
}

impl Default for Hit {
    fn default() -> Self {
        Self::new()
    }
}
