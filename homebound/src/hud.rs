use crate::cockpit::CockpitGeometry;
use crate::constants::{FRAME_MS, HUD_LINE_HEIGHT, HUD_RIGHT_LINE_HEIGHT, PROMPT_BUTTON_SIZE};
use crate::scan::Scan;
use crate::scene::{PlanetMeta, Rect, Viewport};

pub const LINK_LOST: &str = "LOST";
pub const LINK_NOISE: &str = "NOISE";
pub const LINK_SEARCH: &str = "SEARCH";
pub const SYNC_NONE: &str = "— — —";
pub const SYNC_DESYNC: &str = "DESYNC";
pub const SYNC_SCANNING: &str = "SCANNING";

/// Ship readouts shown on the canopy HUD.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub fuel: u8,
    pub power: u8,
    pub o2: u8,
    pub co2: f32,
    pub cabin_temp: f32,
    pub cabin_press: f32,
    pub hull: u8,
    pub rad: f32,
    pub drift: &'static str,
    pub link: &'static str,
    pub sync: &'static str,
    pub rcs: &'static str,
    pub main: &'static str,
    pub rel_vel: &'static str
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            fuel: 83,
            power: 73,
            o2: 87,
            co2: 0.6,
            cabin_temp: 20.3,
            cabin_press: 101.3,
            hull: 62,
            rad: 0.12,
            drift: "+0.002 AU/hr @ 217°",
            link: LINK_LOST,
            sync: SYNC_NONE,
            rcs: "ONLINE",
            main: "STANDBY",
            rel_vel: "0.3 m/s"
        }
    }
}

impl Telemetry {
    pub fn readout_lines(&self) -> [String; 9] {
        [
            format!("FUEL: {}%   •   POWER: {}%", self.fuel, self.power),
            format!("PROP: MAIN {}   |   RCS {}", self.main, self.rcs),
            format!("LIFE: O₂ {}%   CO₂ {}%", self.o2, self.co2),
            format!("CABIN: {}°C   {} kPa", self.cabin_temp, self.cabin_press),
            format!("HULL: {}%  (micrometeoroid pitting)", self.hull),
            format!("RADIATION: {} mSv/hr", self.rad),
            "NAV: NO FIX   |   Star match < 3%".to_string(),
            format!("DRIFT: {}", self.drift),
            format!("COMMS: LINK {}   SYNC: {}", self.link, self.sync)
        ]
    }

    pub fn short_info(&self) -> [String; 3] {
        [
            "Beacon: standby".to_string(),
            format!("Relative vel: {}", self.rel_vel),
            "Proximity: dust impacts detected".to_string()
        ]
    }
}

/// What the center block of the HUD reports about the beacon search
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScanBlock {
    Active { progress: f32, blink: bool },
    Finished,
    Passive
}

impl ScanBlock {
    pub fn from_scan(scan: &Scan, now: f32) -> Self {
        if !scan.message_visible(now) {
            return ScanBlock::Passive;
        }
        if scan.active {
            let frame = (now / FRAME_MS) as u32;
            ScanBlock::Active { progress: scan.progress(now), blink: (frame >> 3) % 2 == 0 }
        } else {
            ScanBlock::Finished
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            ScanBlock::Active { .. } => "Active scan… searching for beacon",
            ScanBlock::Finished => "No friendly signal detected.",
            ScanBlock::Passive => "No coordinates found."
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            ScanBlock::Active { blink: true, .. } => "signal check…",
            ScanBlock::Active { blink: false, .. } => "signal check",
            ScanBlock::Finished => "Link LOST — retry later",
            ScanBlock::Passive => "Passive scan running…  retarget failed"
        }
    }
}

pub fn planet_info_lines(name: &str, meta: Option<&PlanetMeta>, dz: f32) -> Vec<String> {
    let mut lines = Vec::new();
    match meta {
        Some(meta) => {
            lines.push(format!("TARGET: {}", meta.display_name));
            lines.push(format!("TYPE: {}", meta.kind));
            lines.push(format!("DIST: {} ly", meta.distance_ly));
            lines.push(format!("TIDAL LOCK: {}", if meta.tidal_lock { "yes" } else { "no" }));
            lines.push(format!("EARTH SIM: {}%", meta.similarity_to_earth));
            lines.push(format!("ATMO: {}", meta.atmosphere));
            lines.push(format!("LIFE: {}", meta.life));
            lines.push(format!("HAZARD: {}", meta.hazard));
        }
        None => {
            lines.push(format!("TARGET: {}", name));
            lines.push("No survey data".to_string());
        }
    }
    lines.push(format!("RANGE: {:.0}", dz.max(0.0)));
    lines
}

/// Anchor points of the HUD text, derived from the cockpit window
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HudLayout {
    pub left: (f32, f32),
    pub left_line_height: f32,
    pub right: (f32, f32),
    pub right_line_height: f32,
    pub center: (f32, f32),
    pub center_line_height: f32,
    pub scan_bar_width: f32
}

impl HudLayout {
    /// `offset` shifts the whole HUD, `line_height` is the smallest spacing the font allows
    pub fn new(cockpit: &CockpitGeometry, vp: &Viewport, offset: (f32, f32), line_height: f32) -> Self {
        let win = cockpit.window_bounds();
        let fuel_bar_bottom = win.y + win.h * 0.3;
        let right_safe_x = win.x + win.w * 0.82;
        let spaced = |reference: f32| vp.px(reference).max(line_height);
        Self {
            left: (win.x - win.w * 0.01 + offset.0, fuel_bar_bottom + win.h * 0.04 + offset.1),
            left_line_height: spaced(HUD_LINE_HEIGHT),
            right: (right_safe_x + win.w * 0.2 + offset.0, win.y + win.h * 0.28 + offset.1),
            right_line_height: spaced(HUD_RIGHT_LINE_HEIGHT),
            center: (win.x + win.w / 2.0 + offset.0, win.y + win.h * 0.72 + offset.1),
            center_line_height: spaced(HUD_RIGHT_LINE_HEIGHT),
            scan_bar_width: (win.w * 0.42).round()
        }
    }
}

/// Launch prompt placement, shared by drawing and the button hit test
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PromptLayout {
    pub title_y: f32,
    pub line_ys: [f32; 2],
    pub button: Rect
}

impl PromptLayout {
    /// `button_min` is the smallest button that still fits its label
    pub fn new(vp: &Viewport, line_height: f32, button_min: (f32, f32)) -> Self {
        let title_y = (vp.height * 0.28).round();
        let line_1 = title_y + vp.px(26.0).max(line_height * 2.0);
        let line_2 = line_1 + vp.px(20.0).max(line_height);
        let button_y = (title_y + vp.px(86.0)).max(line_2 + line_height * 2.0);
        let w = vp.px(PROMPT_BUTTON_SIZE.0).max(button_min.0).round();
        let h = vp.px(PROMPT_BUTTON_SIZE.1).max(button_min.1).round();
        Self {
            title_y,
            line_ys: [line_1.round(), line_2.round()],
            button: Rect::new((vp.width / 2.0 - w / 2.0).round(), button_y.round(), w, h)
        }
    }
}
