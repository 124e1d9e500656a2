use std::time::Instant;

/// Logs the time between construction and drop at `trace` level.
pub struct StopWatch {
    instant: Instant,
    name: &'static str
}

impl StopWatch {
    pub fn named(name: &'static str) -> Self {
        Self { name, instant: Instant::now() }
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.instant.elapsed().as_secs_f32() * 1000.0
    }
}

impl Drop for StopWatch {
    fn drop(&mut self) {
        log::trace!("{}: {:.3} ms", self.name, self.elapsed_ms())
    }
}
