use std::f32::consts::TAU;
use retro_cockpit::palette::PaletteOverlay;
use crate::constants::{
    BLACKOUT_ALPHA, BLACKOUT_BREATH, RELIGHT_BASE_ALPHA, RELIGHT_FADE_MS, RELIGHT_FLASH_MS,
    RELIGHT_FLICKER_AMP, RELIGHT_FLICKER_HZ
};
use crate::easing::{constrain, ease_out_cubic};

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PowerState {
    On,
    Blackout,
    Relight
}

pub struct Power {
    pub state: PowerState,
    pub t0: f32
}

impl Power {
    pub fn new() -> Self {
        Self { state: PowerState::On, t0: 0.0 }
    }

    pub fn blackout(&mut self, now: f32) {
        self.state = PowerState::Blackout;
        self.t0 = now;
    }

    pub fn relight(&mut self, now: f32) {
        self.state = PowerState::Relight;
        self.t0 = now;
    }

    /// Returns true on the frame the lights come fully back.
    pub fn update(&mut self, now: f32) -> bool {
        if self.state == PowerState::Relight && now - self.t0 >= RELIGHT_FLASH_MS + RELIGHT_FADE_MS {
            self.state = PowerState::On;
            return true;
        }
        false
    }

    /// Seconds since the current state began, for the blackout noise lookup
    pub fn breath_time(&self, now: f32) -> f32 {
        (now - self.t0) * 0.001 * 0.7
    }

    /// `noise` is a smooth 0..1 sample at `breath_time`, `jitter` a phase jitter in -0.25..0.25.
    pub fn overlay(&self, now: f32, noise: f32, jitter: f32) -> Option<PaletteOverlay> {
        match self.state {
            PowerState::On => None,
            PowerState::Blackout => {
                let alpha = BLACKOUT_ALPHA + BLACKOUT_BREATH * (noise - 0.5) * 255.0;
                Some(PaletteOverlay::new(BLACK, constrain(alpha, 220.0, 255.0) / 255.0))
            }
            PowerState::Relight => {
                let elapsed = now - self.t0;
                if elapsed < RELIGHT_FLASH_MS {
                    return Some(PaletteOverlay::new(WHITE, 1.0 - elapsed / RELIGHT_FLASH_MS));
                }
                let k = (elapsed - RELIGHT_FLASH_MS) / RELIGHT_FADE_MS;
                let e = ease_out_cubic(constrain(k, 0.0, 1.0));
                let amplitude = (1.0 - e) * RELIGHT_FLICKER_AMP;
                let f = (TAU * RELIGHT_FLICKER_HZ * k + jitter).sin();
                let flicker = 1.0 - amplitude * f.max(0.0);
                let alpha = constrain(RELIGHT_BASE_ALPHA * (1.0 - e) * flicker, 0.0, RELIGHT_BASE_ALPHA);
                Some(PaletteOverlay::new(BLACK, alpha / 255.0))
            }
        }
    }
}

impl Default for Power {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_has_no_overlay() {
        assert_eq!(Power::new().overlay(0.0, 0.5, 0.0), None);
    }

    #[test]
    fn blackout_stays_nearly_opaque() {
        let mut power = Power::new();
        power.blackout(10.0);
        for noise in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let overlay = power.overlay(500.0, noise, 0.0).unwrap();
            assert_eq!(overlay.color, [0, 0, 0]);
            assert!(overlay.alpha >= 220.0 / 255.0 && overlay.alpha <= 1.0);
        }
        let still = power.overlay(500.0, 0.5, 0.0).unwrap();
        assert!((still.alpha - 240.0 / 255.0).abs() < 1e-4);
    }

    #[test]
    fn relight_flashes_white_then_fades_black() {
        let mut power = Power::new();
        power.relight(0.0);
        let flash = power.overlay(0.0, 0.5, 0.0).unwrap();
        assert_eq!(flash.color, [255, 255, 255]);
        assert!((flash.alpha - 1.0).abs() < 1e-4);
        let half_flash = power.overlay(110.0, 0.5, 0.0).unwrap();
        assert!((half_flash.alpha - 0.5).abs() < 1e-3);

        let fade_start = power.overlay(220.0, 0.5, 0.0).unwrap();
        assert_eq!(fade_start.color, [0, 0, 0]);
        assert!((fade_start.alpha - 210.0 / 255.0).abs() < 1e-3);
        let fade_end = power.overlay(1420.0, 0.5, 0.0).unwrap();
        assert!(fade_end.alpha < 1e-4);
    }

    #[test]
    fn flicker_only_dims() {
        let mut power = Power::new();
        power.relight(0.0);
        for step in 0..120 {
            let now = 220.0 + step as f32 * 10.0;
            let base = 210.0 * (1.0 - ease_out_cubic(((now - 220.0) / 1200.0).min(1.0))) / 255.0;
            for jitter in [-0.25, 0.0, 0.25] {
                let alpha = power.overlay(now, 0.5, jitter).unwrap().alpha;
                assert!(alpha <= base + 1e-4);
                assert!(alpha >= base * (1.0 - 0.28) - 1e-4);
            }
        }
    }

    #[test]
    fn relight_ends_on() {
        let mut power = Power::new();
        power.relight(100.0);
        assert!(!power.update(1519.0));
        assert_eq!(power.state, PowerState::Relight);
        assert!(power.update(1520.0));
        assert_eq!(power.state, PowerState::On);
        assert!(!power.update(1600.0));
    }

    #[test]
    fn blackout_never_ends_on_its_own() {
        let mut power = Power::new();
        power.blackout(0.0);
        assert!(!power.update(1_000_000.0));
        assert_eq!(power.state, PowerState::Blackout);
    }
}
