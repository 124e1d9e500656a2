use std::f32::consts::TAU;
use rand::Rng;
use crate::constants::{
    COLLISION_COOLDOWN_MS, COLLISION_DURATION_MS, COLLISION_FLASH_HZ, COLLISION_MAX_TILT_DEG,
    COLLISION_SHAKE, COLLISION_SHAKE_EXP
};
use crate::easing::{constrain, map_range};
use crate::hud::{Telemetry, LINK_NOISE, SYNC_DESYNC};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionUpdate {
    /// Shake amplitude in reference pixels
    pub shake: f32,
    pub just_ended: bool
}

/// Red alert envelope started by an impact.
pub struct Collision {
    pub active: bool,
    pub t0: f32,
    pub last_hit: f32
}

impl Collision {
    pub fn new() -> Self {
        Self {
            active: false,
            t0: 0.0,
            last_hit: -99999.0
        }
    }

    /// Returns false while the previous hit is still cooling down.
    pub fn start(&mut self, now: f32, telemetry: &mut Telemetry, rng: &mut impl Rng) -> bool {
        if now - self.last_hit < COLLISION_COOLDOWN_MS {
            return false;
        }
        self.active = true;
        self.t0 = now;
        self.last_hit = now;
        let damage: u8 = rng.gen_range(1..=3);
        telemetry.hull = telemetry.hull.saturating_sub(damage);
        telemetry.link = LINK_NOISE;
        telemetry.sync = SYNC_DESYNC;
        true
    }

    pub fn update(&mut self, now: f32) -> CollisionUpdate {
        if !self.active {
            return CollisionUpdate { shake: 0.0, just_ended: false };
        }
        let elapsed = now - self.t0;
        if elapsed >= COLLISION_DURATION_MS {
            self.active = false;
            return CollisionUpdate { shake: 0.0, just_ended: true };
        }
        let p = constrain(elapsed / COLLISION_DURATION_MS, 0.0, 1.0);
        CollisionUpdate {
            shake: COLLISION_SHAKE * (1.0 - p.powf(COLLISION_SHAKE_EXP)),
            just_ended: false
        }
    }

    /// Opacity of the red wash, 0 when no alert runs
    pub fn red_alert_alpha(&self, now: f32) -> f32 {
        if !self.active {
            return 0.0;
        }
        let elapsed = now - self.t0;
        let p = constrain(elapsed / COLLISION_DURATION_MS, 0.0, 1.0);
        let flash = (TAU * COLLISION_FLASH_HZ * elapsed / 1000.0).sin() * 0.5 + 0.5;
        (0.25 + 0.45 * flash) * (1.0 - p)
    }

    /// True once the most recent alert has run its full course
    pub fn alert_over(&self, now: f32) -> bool {
        now - self.t0 >= COLLISION_DURATION_MS
    }

    /// Largest random world tilt for the given shake, in radians
    pub fn max_tilt(shake: f32) -> f32 {
        map_range(shake, 0.0, COLLISION_SHAKE, 0.0, COLLISION_MAX_TILT_DEG, false).to_radians()
    }
}

impl Default for Collision {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn started_at(now: f32) -> (Collision, Telemetry) {
        let mut collision = Collision::new();
        let mut telemetry = Telemetry::default();
        assert!(collision.start(now, &mut telemetry, &mut StdRng::seed_from_u64(1)));
        (collision, telemetry)
    }

    #[test]
    fn start_damages_hull_and_scrambles_comms() {
        let (collision, telemetry) = started_at(100.0);
        assert!(collision.active);
        assert!((59..=61).contains(&telemetry.hull));
        assert_eq!(telemetry.link, "NOISE");
        assert_eq!(telemetry.sync, "DESYNC");
    }

    #[test]
    fn cooldown_blocks_repeated_hits() {
        let (mut collision, mut telemetry) = started_at(100.0);
        let hull = telemetry.hull;
        let mut rng = StdRng::seed_from_u64(2);
        assert!(!collision.start(4099.0, &mut telemetry, &mut rng));
        assert_eq!(telemetry.hull, hull);
        assert_eq!(collision.t0, 100.0);
        assert!(collision.start(4100.0, &mut telemetry, &mut rng));
        assert_eq!(collision.t0, 4100.0);
    }

    #[test]
    fn hull_never_underflows() {
        let mut collision = Collision::new();
        let mut telemetry = Telemetry { hull: 1, ..Telemetry::default() };
        collision.start(0.0, &mut telemetry, &mut StdRng::seed_from_u64(3));
        assert_eq!(telemetry.hull, 0);
    }

    #[test]
    fn shake_decays_and_alert_ends() {
        let (mut collision, _) = started_at(0.0);
        let first = collision.update(0.0);
        assert!((first.shake - 30.0).abs() < 1e-4);
        let mid = collision.update(3000.0);
        assert!(mid.shake > 0.0 && mid.shake < 30.0);
        assert!(!mid.just_ended);
        let last = collision.update(6000.0);
        assert_eq!(last, CollisionUpdate { shake: 0.0, just_ended: true });
        assert!(!collision.active);
        assert!(!collision.update(6100.0).just_ended);
    }

    #[test]
    fn red_alert_fades_with_progress() {
        let (collision, _) = started_at(0.0);
        let start = collision.red_alert_alpha(0.0);
        assert!((start - 0.475).abs() < 1e-4);
        for step in 0..60 {
            let alpha = collision.red_alert_alpha(step as f32 * 100.0);
            let cap = 0.7 * (1.0 - step as f32 * 100.0 / 6000.0);
            assert!(alpha >= 0.0 && alpha <= cap + 1e-4);
        }
        assert_eq!(Collision::new().red_alert_alpha(10.0), 0.0);
    }

    #[test]
    fn alert_over_after_duration() {
        let (collision, _) = started_at(500.0);
        assert!(!collision.alert_over(6499.0));
        assert!(collision.alert_over(6500.0));
    }

    #[test]
    fn tilt_scales_with_shake() {
        assert_eq!(Collision::max_tilt(0.0), 0.0);
        assert!((Collision::max_tilt(30.0) - 3f32.to_radians()).abs() < 1e-6);
    }
}
