use crate::constants::{
    ARRIVAL_APPROACH_DISTANCE, ARRIVAL_APPROACH_RATE, ARRIVAL_MIN_STEP, ARRIVAL_REVEAL_MS,
    ARRIVAL_SPIN_DAMP, ARRIVAL_SPIN_INHERIT, ARRIVAL_STARS_ONLY_MS, CAMERA_MAX_SHIFT, CAMERA_TURN_MS,
    CAMERA_YAW_END_DEG, CAMERA_YAW_START_DEG
};
use crate::easing::{constrain, damp, ease_out_cubic, lerp, map_range};

/// Head-turn from the starboard view back to the planets.
pub struct Camera {
    pub active: bool,
    pub t0: f32,
    pub yaw: f32
}

impl Camera {
    pub fn new() -> Self {
        Self { active: false, t0: 0.0, yaw: CAMERA_YAW_START_DEG }
    }

    pub fn start(&mut self, now: f32) {
        self.active = true;
        self.t0 = now;
        self.yaw = CAMERA_YAW_START_DEG;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn update(&mut self, now: f32) -> f32 {
        if self.active {
            let p = constrain((now - self.t0) / CAMERA_TURN_MS, 0.0, 1.0);
            self.yaw = lerp(CAMERA_YAW_START_DEG, CAMERA_YAW_END_DEG, ease_out_cubic(p));
        }
        self.yaw
    }

    /// Horizontal world shift for the current yaw
    pub fn offset_x(&self, width: f32) -> f32 {
        if !self.active {
            return 0.0;
        }
        map_range(self.yaw, 0.0, 90.0, 0.0, width * CAMERA_MAX_SHIFT, false)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArrivalFrame {
    /// Only stars are drawn, planets and asteroids stay hidden
    pub stars_only: bool,
    pub reveal_progress: f32,
    pub head_turn_offset: f32,
    pub finished: bool
}

/// Post-blackout approach: residual spin, head-turn and the left-to-right reveal.
pub struct Arrival {
    pub waiting: bool,
    pub active: bool,
    pub t0: f32,
    pub spin: f32,
    pub spin_vel: f32,
    pub target_depth: f32,
    pub camera: Camera
}

impl Arrival {
    pub fn new() -> Self {
        Self {
            waiting: false,
            active: false,
            t0: 0.0,
            spin: 0.0,
            spin_vel: 0.0,
            target_depth: 0.0,
            camera: Camera::new()
        }
    }

    pub fn begin_waiting(&mut self) {
        self.waiting = true;
        self.active = false;
        self.t0 = 0.0;
    }

    pub fn can_start(&self, alert_over: bool, warning_playing: bool) -> bool {
        self.waiting && alert_over && !warning_playing
    }

    /// Inherits the hit's spin and moves `depth` back so the approach has room.
    pub fn start(&mut self, now: f32, spin: f32, spin_vel: f32, target_depth: f32, depth: &mut f32) {
        self.waiting = false;
        self.active = true;
        self.t0 = now;
        self.spin = spin;
        self.spin_vel = spin_vel * ARRIVAL_SPIN_INHERIT;
        self.target_depth = target_depth;
        *depth = target_depth - ARRIVAL_APPROACH_DISTANCE;
        self.camera.start(now);
    }

    pub fn update(&mut self, now: f32, dt_frames: f32, depth: &mut f32, width: f32) -> ArrivalFrame {
        self.spin += self.spin_vel * dt_frames;
        self.spin_vel *= damp(ARRIVAL_SPIN_DAMP, dt_frames);

        let yaw = self.camera.update(now);
        let head_turn_offset = self.camera.offset_x(width);

        let dz = self.target_depth - *depth;
        if dz != 0.0 {
            let step = dz.signum() * (dz.abs() * ARRIVAL_APPROACH_RATE).max(ARRIVAL_MIN_STEP) * dt_frames;
            *depth += if step.abs() > dz.abs() { dz } else { step };
        }

        let reveal_elapsed = now - self.t0 - ARRIVAL_STARS_ONLY_MS;
        let stars_only = reveal_elapsed < 0.0;
        let reveal_progress = if stars_only {
            0.0
        } else {
            constrain(reveal_elapsed / ARRIVAL_REVEAL_MS, 0.0, 1.0)
        };

        let settled = dz.abs() < 2.0
            && self.spin_vel.abs() < 0.0005
            && reveal_progress >= 1.0
            && (yaw - CAMERA_YAW_END_DEG).abs() < 0.1;
        if settled {
            self.active = false;
            self.spin = 0.0;
            self.spin_vel = 0.0;
            *depth = self.target_depth;
            self.camera.stop();
        }

        ArrivalFrame {
            stars_only,
            reveal_progress,
            head_turn_offset: if settled { 0.0 } else { head_turn_offset },
            finished: settled
        }
    }

    /// Width of the wipe that uncovers planets, growing from the left edge
    pub fn reveal_width(progress: f32, width: f32) -> i32 {
        (width * ease_out_cubic(constrain(progress, 0.0, 1.0))).round() as i32
    }
}

impl Default for Arrival {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(depth: &mut f32) -> Arrival {
        let mut arrival = Arrival::new();
        arrival.begin_waiting();
        arrival.start(0.0, 0.4, 0.01, 400.0, depth);
        arrival
    }

    #[test]
    fn waits_for_alert_and_warning() {
        let mut arrival = Arrival::new();
        assert!(!arrival.can_start(true, false));
        arrival.begin_waiting();
        assert!(!arrival.can_start(false, false));
        assert!(!arrival.can_start(true, true));
        assert!(arrival.can_start(true, false));
    }

    #[test]
    fn start_inherits_spin_and_backs_off() {
        let mut depth = 0.0;
        let arrival = started(&mut depth);
        assert!(arrival.active && !arrival.waiting);
        assert_eq!(depth, 400.0 - 2600.0);
        assert!((arrival.spin_vel - 0.009).abs() < 1e-6);
        assert_eq!(arrival.camera.yaw, 90.0);
    }

    #[test]
    fn stars_only_then_reveal() {
        let mut depth = 0.0;
        let mut arrival = started(&mut depth);
        let early = arrival.update(4999.0, 1.0, &mut depth, 640.0);
        assert!(early.stars_only);
        assert_eq!(early.reveal_progress, 0.0);
        let mid = arrival.update(5900.0, 1.0, &mut depth, 640.0);
        assert!(!mid.stars_only);
        assert!((mid.reveal_progress - 0.5).abs() < 1e-4);
    }

    #[test]
    fn head_turn_shifts_then_settles() {
        let mut depth = 0.0;
        let mut arrival = started(&mut depth);
        let first = arrival.update(0.0, 1.0, &mut depth, 640.0);
        assert!((first.head_turn_offset - 800.0).abs() < 1e-3);
        let turned = arrival.update(2200.0, 1.0, &mut depth, 640.0);
        assert!(turned.head_turn_offset.abs() < 1e-3);
    }

    #[test]
    fn approach_never_overshoots() {
        let mut depth = 399.0;
        let mut arrival = Arrival::new();
        arrival.target_depth = 400.0;
        arrival.active = true;
        arrival.update(0.0, 5.0, &mut depth, 640.0);
        assert_eq!(depth, 400.0);
    }

    #[test]
    fn finishes_when_everything_settles() {
        let mut depth = 0.0;
        let mut arrival = started(&mut depth);
        let mut now = 0.0;
        let mut finished_at = None;
        while now < 20000.0 {
            now += 16.0;
            let frame = arrival.update(now, 16.0 / (1000.0 / 60.0), &mut depth, 640.0);
            if frame.finished {
                finished_at = Some(now);
                break;
            }
        }
        let finished_at = finished_at.expect("arrival should settle");
        assert!(finished_at >= 6800.0);
        assert!(!arrival.active);
        assert_eq!(depth, 400.0);
        assert_eq!(arrival.spin, 0.0);
        assert!(!arrival.camera.active);
    }

    #[test]
    fn reveal_width_eases_across_the_screen() {
        assert_eq!(Arrival::reveal_width(0.0, 640.0), 0);
        assert_eq!(Arrival::reveal_width(0.5, 640.0), 560);
        assert_eq!(Arrival::reveal_width(1.0, 640.0), 640);
    }
}
