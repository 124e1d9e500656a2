use crate::constants::{
    FRAME_MS, INTRO_GROUND_DROP, INTRO_IDLE_MS, INTRO_IDLE_SHAKE, INTRO_LIFT_MS,
    INTRO_LIFT_SHAKE_FROM, INTRO_LIFT_SHAKE_TO
};
use crate::easing::{constrain, ease_out_cubic, lerp};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntroPhase {
    /// Launch prompt, waiting for the player
    Await,
    Idle,
    Lift,
    Done
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntroTransition {
    LiftStarted,
    Finished
}

pub struct Intro {
    pub phase: IntroPhase,
    pub t0: f32
}

impl Intro {
    pub fn new() -> Self {
        Self { phase: IntroPhase::Await, t0: 0.0 }
    }

    pub fn is_active(&self) -> bool {
        self.phase != IntroPhase::Done
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == IntroPhase::Await
    }

    /// Leaves the launch prompt. Returns false when the launch already happened.
    pub fn start_launch(&mut self, now: f32) -> bool {
        if self.phase != IntroPhase::Await {
            return false;
        }
        self.phase = IntroPhase::Idle;
        self.t0 = now;
        true
    }

    pub fn update(&mut self, now: f32) -> Option<IntroTransition> {
        let elapsed = now - self.t0;
        match self.phase {
            IntroPhase::Idle if elapsed >= INTRO_IDLE_MS => {
                self.phase = IntroPhase::Lift;
                self.t0 = now;
                Some(IntroTransition::LiftStarted)
            }
            IntroPhase::Lift if elapsed >= INTRO_LIFT_MS => {
                self.phase = IntroPhase::Done;
                Some(IntroTransition::Finished)
            }
            _ => None
        }
    }

    pub fn lift_progress(&self, now: f32) -> f32 {
        match self.phase {
            IntroPhase::Lift => constrain((now - self.t0) / INTRO_LIFT_MS, 0.0, 1.0),
            IntroPhase::Done => 1.0,
            _ => 0.0
        }
    }

    /// Base camera shake amplitude in reference pixels
    pub fn shake(&self, now: f32) -> f32 {
        match self.phase {
            IntroPhase::Idle => {
                let frame = now / FRAME_MS;
                INTRO_IDLE_SHAKE * (0.5 + 0.5 * (frame * 0.25).sin())
            }
            IntroPhase::Lift => lerp(INTRO_LIFT_SHAKE_FROM, INTRO_LIFT_SHAKE_TO, self.lift_progress(now)),
            _ => 0.0
        }
    }

    /// How far the ground has dropped below its resting place
    pub fn ground_offset(&self, now: f32, height: f32) -> f32 {
        ease_out_cubic(self.lift_progress(now)) * height * INTRO_GROUND_DROP
    }

    pub fn status_text(&self) -> Option<&'static str> {
        match self.phase {
            IntroPhase::Idle => Some("Pre-Launch: Guidance nominal"),
            IntroPhase::Lift => Some("Ignition… lift-off"),
            _ => None
        }
    }
}

impl Default for Intro {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_only_leaves_the_prompt_once() {
        let mut intro = Intro::new();
        assert!(intro.is_awaiting());
        assert!(intro.start_launch(100.0));
        assert_eq!(intro.phase, IntroPhase::Idle);
        assert!(!intro.start_launch(200.0));
        assert_eq!(intro.t0, 100.0);
    }

    #[test]
    fn awaiting_never_advances_on_its_own() {
        let mut intro = Intro::new();
        assert_eq!(intro.update(1_000_000.0), None);
        assert!(intro.is_awaiting());
    }

    #[test]
    fn phases_follow_their_durations() {
        let mut intro = Intro::new();
        intro.start_launch(0.0);
        assert_eq!(intro.update(1799.0), None);
        assert_eq!(intro.update(1800.0), Some(IntroTransition::LiftStarted));
        assert_eq!(intro.phase, IntroPhase::Lift);
        assert_eq!(intro.update(11799.0), None);
        assert_eq!(intro.update(11800.0), Some(IntroTransition::Finished));
        assert!(!intro.is_active());
        assert_eq!(intro.update(20000.0), None);
    }

    #[test]
    fn lift_shake_and_ground_follow_progress() {
        let mut intro = Intro::new();
        intro.start_launch(0.0);
        intro.update(1800.0);
        assert!((intro.shake(1800.0) - 6.0).abs() < 1e-4);
        assert!((intro.shake(11800.0) - 1.0).abs() < 1e-4);
        assert_eq!(intro.ground_offset(1800.0, 360.0), 0.0);
        assert!((intro.ground_offset(11800.0, 360.0) - 324.0).abs() < 1e-3);
    }

    #[test]
    fn idle_shake_stays_within_amplitude() {
        let mut intro = Intro::new();
        intro.start_launch(0.0);
        for step in 0..100 {
            let shake = intro.shake(step as f32 * 16.0);
            assert!((0.0..=3.0).contains(&shake));
        }
    }

    #[test]
    fn status_text_per_phase() {
        let mut intro = Intro::new();
        assert_eq!(intro.status_text(), None);
        intro.start_launch(0.0);
        assert_eq!(intro.status_text(), Some("Pre-Launch: Guidance nominal"));
        intro.update(2000.0);
        assert_eq!(intro.status_text(), Some("Ignition… lift-off"));
    }
}
