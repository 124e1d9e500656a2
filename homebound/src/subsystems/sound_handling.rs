use retro_cockpit::window::BlitContext;
use crate::HomeboundApp;
use crate::sequencer::SequenceEvent;

impl HomeboundApp {
    /// Starts the engine hum unless it is already running.
    pub fn ensure_engine_loop(&mut self, ctx: &mut BlitContext) {
        if let Some(handle) = self.engine_handle {
            if ctx.playback_in_progress(handle) {
                return;
            }
        }
        if let Some(engine) = &self.sounds.engine {
            self.engine_handle = ctx.play_sound_looped(engine);
            if let Some(handle) = self.engine_handle {
                ctx.set_sound_volume(handle, self.config.audio.engine_volume);
            }
        }
    }

    fn restart_warning(&mut self, ctx: &mut BlitContext) {
        if let Some(handle) = self.warning_handle.take() {
            ctx.stop_sound(handle);
        }
        if let Some(warning) = &self.sounds.warning {
            self.warning_handle = ctx.play_sound(warning);
        }
    }

    pub fn handle_sequence_events(&mut self, ctx: &mut BlitContext) {
        for event in self.sequencer.drain_events() {
            match event {
                SequenceEvent::LaunchStarted => {
                    log::info!("launch confirmed");
                    if let Some(launch) = &self.sounds.launch {
                        ctx.play_sound(launch);
                    }
                    self.ensure_engine_loop(ctx);
                }
                SequenceEvent::LiftOff => log::info!("lift-off"),
                SequenceEvent::IntroFinished => log::info!("climb finished, entering cruise"),
                SequenceEvent::Impact => log::info!("impact, ship is tumbling"),
                SequenceEvent::WarningTriggered => {
                    log::info!("red alert, hull at {}%", self.sequencer.telemetry.hull);
                    self.restart_warning(ctx);
                }
                SequenceEvent::PowerLost => log::info!("main power lost"),
                SequenceEvent::ArrivalStarted => log::info!("power restored, approaching home"),
                SequenceEvent::ArrivalFinished => log::info!("arrived at depth {}", self.flight.depth),
                SequenceEvent::RelightFinished => log::debug!("cabin lights steady"),
                SequenceEvent::ScanFinished => log::info!("active scan finished, no friendly signal")
            }
        }
    }
}
