use rand::SeedableRng;
use rand::rngs::StdRng;
use crate::arrival::{Arrival, ArrivalFrame};
use crate::collision::Collision;
use crate::hit::{Hit, HitEvent};
use crate::hud::{Telemetry, LINK_LOST, SYNC_NONE};
use crate::intro::{Intro, IntroTransition};
use crate::power::Power;
use crate::scan::Scan;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SequenceEvent {
    LaunchStarted,
    LiftOff,
    IntroFinished,
    Impact,
    WarningTriggered,
    PowerLost,
    ArrivalStarted,
    ArrivalFinished,
    RelightFinished,
    ScanFinished
}

/// Per-frame inputs the sequencer cannot know on its own
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameClock {
    pub now: f32,
    pub dt_frames: f32,
    pub warning_playing: bool,
    pub width: f32
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SequenceFrame {
    /// Collision shake in reference pixels
    pub collision_shake: f32,
    pub arrival: Option<ArrivalFrame>
}

/// Owns every timed state of the flight and advances them in a fixed order.
pub struct Sequencer {
    pub intro: Intro,
    pub hit: Hit,
    pub collision: Collision,
    pub power: Power,
    pub arrival: Arrival,
    pub scan: Scan,
    pub telemetry: Telemetry,
    rng: StdRng,
    events: Vec<SequenceEvent>
}

impl Sequencer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };
        Self {
            intro: Intro::new(),
            hit: Hit::new(),
            collision: Collision::new(),
            power: Power::new(),
            arrival: Arrival::new(),
            scan: Scan::new(),
            telemetry: Telemetry::default(),
            rng,
            events: Vec::new()
        }
    }

    pub fn in_flight(&self) -> bool {
        !self.intro.is_active()
    }

    /// Scroll and drag steer the ship only after launch and outside the arrival.
    pub fn accepts_flight_input(&self) -> bool {
        !self.intro.is_awaiting() && !self.arrival.active
    }

    pub fn start_launch(&mut self, now: f32) -> bool {
        if !self.intro.start_launch(now) {
            return false;
        }
        self.events.push(SequenceEvent::LaunchStarted);
        true
    }

    pub fn start_scan(&mut self, now: f32) -> bool {
        self.scan.start(now, &mut self.telemetry)
    }

    /// Starts a red alert unless the previous one is still cooling down.
    pub fn trigger_collision(&mut self, now: f32) -> bool {
        if !self.collision.start(now, &mut self.telemetry, &mut self.rng) {
            return false;
        }
        self.events.push(SequenceEvent::WarningTriggered);
        true
    }

    /// An asteroid touching the ship; ignored before flight and during the arrival.
    pub fn strike(&mut self, now: f32) -> bool {
        if !self.in_flight() || self.arrival.active {
            return false;
        }
        self.trigger_collision(now)
    }

    /// Advances everything by one frame; `depth` is the flight depth the arrival steers.
    pub fn update(&mut self, clock: FrameClock, depth: &mut f32, home_depth: f32) -> SequenceFrame {
        let now = clock.now;
        match self.intro.update(now) {
            Some(IntroTransition::LiftStarted) => {
                self.hit.schedule(now, &mut self.rng);
                self.events.push(SequenceEvent::LiftOff);
            }
            Some(IntroTransition::Finished) => self.events.push(SequenceEvent::IntroFinished),
            None => ()
        }

        match self.hit.update(now, clock.dt_frames) {
            Some(HitEvent::Impact) => {
                self.events.push(SequenceEvent::Impact);
                self.trigger_collision(now);
            }
            Some(HitEvent::Done) => {
                self.power.blackout(now);
                self.arrival.begin_waiting();
                self.events.push(SequenceEvent::PowerLost);
            }
            None => ()
        }

        if self.scan.update(now, &mut self.telemetry) {
            self.events.push(SequenceEvent::ScanFinished);
        }

        let collision = self.collision.update(now);
        if collision.just_ended && !self.scan.active {
            self.telemetry.link = LINK_LOST;
            self.telemetry.sync = SYNC_NONE;
        }

        if self.arrival.can_start(self.collision.alert_over(now), clock.warning_playing) {
            self.arrival.start(now, self.hit.spin, self.hit.spin_vel, home_depth, depth);
            self.power.relight(now);
            self.events.push(SequenceEvent::ArrivalStarted);
        }

        let mut arrival = None;
        if self.arrival.active && self.in_flight() {
            let frame = self.arrival.update(now, clock.dt_frames, depth, clock.width);
            if frame.finished {
                self.events.push(SequenceEvent::ArrivalFinished);
            }
            arrival = Some(frame);
        }

        if self.power.update(now) {
            self.events.push(SequenceEvent::RelightFinished);
        }

        SequenceFrame { collision_shake: collision.shake, arrival }
    }

    pub fn drain_events(&mut self) -> Vec<SequenceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COLLISION_COOLDOWN_MS, FRAME_MS};
    use crate::hit::HitPhase;
    use crate::power::PowerState;

    fn clock(now: f32, warning_playing: bool) -> FrameClock {
        FrameClock { now, dt_frames: 1.0, warning_playing, width: 640.0 }
    }

    /// Runs frames until `until`, collecting every event on the way
    fn run(sequencer: &mut Sequencer, from: f32, until: f32, depth: &mut f32) -> Vec<SequenceEvent> {
        let mut events = Vec::new();
        let mut now = from;
        while now < until {
            now += FRAME_MS;
            sequencer.update(clock(now, false), depth, 400.0);
            events.extend(sequencer.drain_events());
        }
        events
    }

    #[test]
    fn nothing_happens_before_launch() {
        let mut sequencer = Sequencer::new(Some(1));
        let mut depth = 400.0;
        assert!(run(&mut sequencer, 0.0, 5000.0, &mut depth).is_empty());
        assert!(sequencer.intro.is_awaiting());
    }

    #[test]
    fn launch_event_fires_once() {
        let mut sequencer = Sequencer::new(Some(1));
        assert!(sequencer.start_launch(10.0));
        assert!(!sequencer.start_launch(20.0));
        assert_eq!(sequencer.drain_events(), vec![SequenceEvent::LaunchStarted]);
        assert!(sequencer.drain_events().is_empty());
    }

    #[test]
    fn full_sequence_runs_in_order() {
        let mut sequencer = Sequencer::new(Some(42));
        let mut depth = 400.0;
        sequencer.start_launch(0.0);
        sequencer.drain_events();
        let events = run(&mut sequencer, 0.0, 40000.0, &mut depth);
        let order = [
            SequenceEvent::LiftOff,
            SequenceEvent::Impact,
            SequenceEvent::WarningTriggered,
            SequenceEvent::PowerLost,
            SequenceEvent::ArrivalStarted,
            SequenceEvent::RelightFinished,
            SequenceEvent::ArrivalFinished
        ];
        let mut position = 0;
        for expected in order {
            let found = events[position..].iter().position(|&it| it == expected);
            assert!(found.is_some(), "missing {:?} in {:?}", expected, events);
            position += found.unwrap() + 1;
        }
        assert!(events.contains(&SequenceEvent::IntroFinished));
        assert_eq!(sequencer.hit.phase, HitPhase::Done);
        assert_eq!(sequencer.power.state, PowerState::On);
        assert!(!sequencer.arrival.active);
        assert_eq!(depth, 400.0);
        assert!(sequencer.telemetry.hull < 62);
    }

    #[test]
    fn arrival_waits_for_the_warning_sound() {
        let mut sequencer = Sequencer::new(Some(3));
        let mut depth = 400.0;
        sequencer.start_launch(0.0);
        let mut now = 0.0;
        while !sequencer.arrival.waiting {
            now += FRAME_MS;
            sequencer.update(clock(now, true), &mut depth, 400.0);
            assert!(now < 30000.0);
        }
        for _ in 0..600 {
            now += FRAME_MS;
            sequencer.update(clock(now, true), &mut depth, 400.0);
        }
        assert!(sequencer.arrival.waiting);
        assert_eq!(sequencer.power.state, PowerState::Blackout);
        now += FRAME_MS;
        sequencer.update(clock(now, false), &mut depth, 400.0);
        assert!(sequencer.arrival.active);
        assert_eq!(sequencer.power.state, PowerState::Relight);
    }

    #[test]
    fn alert_end_restores_comms_unless_scanning() {
        let mut sequencer = Sequencer::new(Some(5));
        let mut depth = 400.0;
        assert!(sequencer.trigger_collision(0.0));
        assert_eq!(sequencer.telemetry.link, "NOISE");
        sequencer.update(clock(6000.0, false), &mut depth, 400.0);
        assert_eq!(sequencer.telemetry.link, "LOST");

        assert!(sequencer.trigger_collision(20000.0));
        sequencer.start_scan(22000.0);
        sequencer.update(clock(26000.0, false), &mut depth, 400.0);
        assert_eq!(sequencer.telemetry.link, "SEARCH");
    }

    #[test]
    fn scan_finish_is_reported() {
        let mut sequencer = Sequencer::new(Some(5));
        let mut depth = 400.0;
        assert!(sequencer.start_scan(0.0));
        sequencer.update(clock(5000.0, false), &mut depth, 400.0);
        assert_eq!(sequencer.drain_events(), vec![SequenceEvent::ScanFinished]);
    }

    #[test]
    fn arrival_locks_out_input_and_strikes() {
        let mut sequencer = Sequencer::new(Some(42));
        let mut depth = 400.0;
        assert!(!sequencer.accepts_flight_input());
        assert!(!sequencer.strike(0.0));

        sequencer.start_launch(0.0);
        assert!(sequencer.accepts_flight_input());
        let mut now = 0.0;
        while !(sequencer.arrival.active && sequencer.in_flight()) {
            now += FRAME_MS;
            sequencer.update(clock(now, false), &mut depth, 400.0);
            assert!(now < 40000.0);
        }
        sequencer.drain_events();

        assert!(now - sequencer.collision.last_hit >= COLLISION_COOLDOWN_MS);
        let hull = sequencer.telemetry.hull;
        assert!(!sequencer.accepts_flight_input());
        assert!(!sequencer.strike(now));
        assert!(!sequencer.collision.active);
        assert_eq!(sequencer.telemetry.hull, hull);
        assert!(!sequencer.drain_events().contains(&SequenceEvent::WarningTriggered));

        while sequencer.arrival.active {
            now += FRAME_MS;
            sequencer.update(clock(now, false), &mut depth, 400.0);
            assert!(now < 60000.0);
        }
        assert!(sequencer.accepts_flight_input());
        assert!(sequencer.strike(now));
        assert_eq!(sequencer.drain_events().last(), Some(&SequenceEvent::WarningTriggered));
    }
}
