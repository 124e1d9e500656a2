use std::f32::consts::{FRAC_PI_2, TAU};
use crate::constants::{SCAN_DURATION_MS, SCAN_RESULT_MS, SCAN_TURNS};
use crate::easing::constrain;
use crate::hud::{Telemetry, LINK_LOST, LINK_SEARCH, SYNC_NONE, SYNC_SCANNING};

pub struct Scan {
    pub active: bool,
    pub t0: f32,
    pub show_until: f32
}

impl Scan {
    pub fn new() -> Self {
        Self { active: false, t0: 0.0, show_until: 0.0 }
    }

    /// Ignored while a scan is already running.
    pub fn start(&mut self, now: f32, telemetry: &mut Telemetry) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.t0 = now;
        telemetry.link = LINK_SEARCH;
        telemetry.sync = SYNC_SCANNING;
        true
    }

    /// Returns true on the frame the scan completes.
    pub fn update(&mut self, now: f32, telemetry: &mut Telemetry) -> bool {
        if !self.active || now - self.t0 < SCAN_DURATION_MS {
            return false;
        }
        self.active = false;
        self.show_until = now + SCAN_RESULT_MS;
        telemetry.link = LINK_LOST;
        telemetry.sync = SYNC_NONE;
        true
    }

    pub fn progress(&self, now: f32) -> f32 {
        constrain((now - self.t0) / SCAN_DURATION_MS, 0.0, 1.0)
    }

    pub fn message_visible(&self, now: f32) -> bool {
        self.active || now < self.show_until
    }

    /// Radar sweep heading, starting straight up and turning twice per scan
    pub fn sweep_angle(&self, now: f32) -> f32 {
        -FRAC_PI_2 + self.progress(now) * TAU * SCAN_TURNS
    }
}

impl Default for Scan {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_updates_comms() {
        let mut scan = Scan::new();
        let mut telemetry = Telemetry::default();
        assert!(!scan.message_visible(0.0));
        assert!(scan.start(100.0, &mut telemetry));
        assert_eq!((telemetry.link, telemetry.sync), ("SEARCH", "SCANNING"));
        assert!(!scan.start(200.0, &mut telemetry));
        assert_eq!(scan.t0, 100.0);

        assert!(!scan.update(5099.0, &mut telemetry));
        assert!((scan.progress(2600.0) - 0.5).abs() < 1e-4);
        assert!(scan.update(5100.0, &mut telemetry));
        assert!(!scan.active);
        assert_eq!((telemetry.link, telemetry.sync), ("LOST", "— — —"));
    }

    #[test]
    fn result_message_lingers() {
        let mut scan = Scan::new();
        let mut telemetry = Telemetry::default();
        scan.start(0.0, &mut telemetry);
        scan.update(5000.0, &mut telemetry);
        assert!(scan.message_visible(6799.0));
        assert!(!scan.message_visible(6800.0));
    }

    #[test]
    fn sweep_turns_twice() {
        let mut scan = Scan::new();
        let mut telemetry = Telemetry::default();
        scan.start(0.0, &mut telemetry);
        assert!((scan.sweep_angle(0.0) + FRAC_PI_2).abs() < 1e-5);
        assert!((scan.sweep_angle(5000.0) - (-FRAC_PI_2 + 2.0 * TAU)).abs() < 1e-4);
    }
}
