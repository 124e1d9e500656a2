use crate::constants::{DRAG_GAIN, INITIAL_DEPTH_BEHIND_FIRST, SCROLL_GAIN};
use crate::scene::{Belt, Planet};

/// How far the ship has drifted along the planet line, and where it sits laterally.
pub struct Flight {
    pub depth: f32,
    pub ship: (f32, f32),
    start_depth: f32,
    max_depth: f32,
    drag_last_y: Option<f32>
}

impl Flight {
    pub fn new(planets: &[Planet], belt: &Belt) -> Self {
        let first_z = planets.first().map(|it| it.z).unwrap_or(0.0);
        let max_depth = belt.lock_depth().max(0.0);
        let start_depth = (first_z - INITIAL_DEPTH_BEHIND_FIRST).clamp(0.0, max_depth);
        Self {
            depth: start_depth,
            ship: (0.0, 0.0),
            start_depth,
            max_depth,
            drag_last_y: None
        }
    }

    pub fn start_depth(&self) -> f32 {
        self.start_depth
    }

    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    /// `delta_y` uses the browser convention: positive scrolls forward
    pub fn scroll(&mut self, delta_y: f32) {
        self.depth += delta_y * SCROLL_GAIN;
        self.clamp();
    }

    pub fn begin_drag(&mut self, y: f32) {
        self.drag_last_y = Some(y);
    }

    /// `y` is in reference pixels so the drag feels the same at every resolution
    pub fn drag_to(&mut self, y: f32) {
        if let Some(last_y) = self.drag_last_y {
            self.depth += (y - last_y) * DRAG_GAIN;
            self.drag_last_y = Some(y);
            self.clamp();
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_last_y = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_last_y.is_some()
    }

    pub fn reset(&mut self) {
        self.depth = self.start_depth;
        self.ship = (0.0, 0.0);
        self.drag_last_y = None;
    }

    pub fn clamp(&mut self) {
        self.depth = self.depth.clamp(0.0, self.max_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::default_planets;

    fn flight() -> Flight {
        let planets = default_planets();
        Flight::new(&planets, &Belt::behind(&planets))
    }

    #[test]
    fn starts_behind_the_first_planet() {
        let flight = flight();
        assert_eq!(flight.depth, 400.0);
        assert_eq!(flight.max_depth(), 9200.0);
    }

    #[test]
    fn scroll_is_scaled_and_clamped() {
        let mut flight = flight();
        flight.scroll(100.0);
        assert_eq!(flight.depth, 475.0);
        flight.scroll(-10000.0);
        assert_eq!(flight.depth, 0.0);
        flight.scroll(100000.0);
        assert_eq!(flight.depth, 9200.0);
    }

    #[test]
    fn drag_follows_pointer() {
        let mut flight = flight();
        flight.drag_to(50.0);
        assert_eq!(flight.depth, 400.0);
        flight.begin_drag(10.0);
        flight.drag_to(20.0);
        assert!((flight.depth - 412.0).abs() < 1e-3);
        flight.drag_to(15.0);
        assert!((flight.depth - 406.0).abs() < 1e-3);
        flight.end_drag();
        assert!(!flight.is_dragging());
        let before = flight.depth;
        flight.drag_to(100.0);
        assert_eq!(flight.depth, before);
    }

    #[test]
    fn reset_restores_start() {
        let mut flight = flight();
        flight.scroll(1000.0);
        flight.ship = (0.1, -0.2);
        flight.begin_drag(3.0);
        flight.reset();
        assert_eq!(flight.depth, 400.0);
        assert_eq!(flight.ship, (0.0, 0.0));
        assert!(!flight.is_dragging());
    }
}
