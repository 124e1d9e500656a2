use retro_cockpit::rendering::blittable::ClipRect;
use crate::cockpit::CockpitGeometry;
use crate::constants::{
    RADAR_AHEAD_MAX, RADAR_ASTEROID, RADAR_CLIP_L, RADAR_CLIP_R, RADAR_CLIP_T, RADAR_MARKER_OFFSET,
    RADAR_MARKER_SIZE, RADAR_PANEL_H, RADAR_PANEL_W, RADAR_PANEL_Y, RADAR_PLANET, RADAR_PX_ASTEROID,
    RADAR_PX_PLANET, RADAR_SPREAD, SHIP_MARKER
};
use crate::easing::{constrain, lerp, map_range};
use crate::scene::{Asteroid, Planet, Rect, Viewport};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Blip {
    pub center: (i32, i32),
    pub size: i32,
    pub color: u8
}

/// Minimap placement inside the console.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RadarLayout {
    pub panel: Rect,
    pub rad: f32,
    /// The ship's position on the radar
    pub origin: (f32, f32),
    pub clip: ClipRect
}

impl RadarLayout {
    pub fn new(cockpit: &CockpitGeometry, vp: &Viewport) -> Option<Self> {
        let panel = Rect::new(
            cockpit.cx,
            cockpit.cy + cockpit.h * RADAR_PANEL_Y,
            cockpit.w * RADAR_PANEL_W,
            cockpit.h * RADAR_PANEL_H
        );
        let clip_w = panel.w - vp.px(RADAR_CLIP_L + RADAR_CLIP_R);
        let clip_h = panel.h - vp.px(RADAR_CLIP_T);
        if clip_w <= 4.0 || clip_h <= 4.0 {
            return None;
        }
        let clip = ClipRect::new(
            (panel.x + vp.px(RADAR_CLIP_L)).round() as i32,
            (panel.y + vp.px(RADAR_CLIP_T)).round() as i32,
            clip_w.round() as i32,
            clip_h.round() as i32
        );
        Some(Self {
            panel,
            rad: panel.w.min(panel.h) * 0.42,
            origin: (panel.x + vp.px(RADAR_MARKER_OFFSET.0), panel.y + vp.px(RADAR_MARKER_OFFSET.1)),
            clip
        })
    }

    /// Keeps a point one pixel inside the clip rect
    pub fn clamp(&self, point: (f32, f32)) -> (i32, i32) {
        let x = constrain(point.0, (self.clip.x + 1) as f32, (self.clip.right() - 1) as f32);
        let y = constrain(point.1, (self.clip.y + 1) as f32, (self.clip.bottom() - 1) as f32);
        (x.round() as i32, y.round() as i32)
    }

    fn ahead_offset(&self, dz: f32) -> f32 {
        map_range(dz, 0.0, RADAR_AHEAD_MAX, 0.0, self.rad * 0.9, false)
    }

    pub fn ship_marker(&self, vp: &Viewport) -> Blip {
        Blip {
            center: self.clamp(self.origin),
            size: blip_size(vp, RADAR_MARKER_SIZE),
            color: SHIP_MARKER
        }
    }

    /// Lateral radar position, pulled to the center as the planet nears and pushed out when passing
    pub fn planet_lateral(&self, planet: &Planet, dz: f32) -> f32 {
        const NEAR: f32 = 500.0;
        let spread = planet.x * self.rad * 0.85 * RADAR_SPREAD;
        let focus = map_range(dz, 2000.0, NEAR, 0.0, 1.0, true);
        let mut lateral = lerp(spread, 0.0, focus * 0.35);
        if dz < NEAR {
            let progress = map_range(dz, NEAR, -600.0, 0.0, 1.0, true);
            lateral += planet.side.sign() * progress * self.rad * 0.9 * 0.35;
        }
        lateral
    }

    pub fn planet_blips(&self, planets: &[Planet], depth: f32, vp: &Viewport) -> Vec<Blip> {
        planets
            .iter()
            .filter_map(|planet| {
                let dz = planet.z - depth;
                if !(0.0..=RADAR_AHEAD_MAX).contains(&dz) {
                    return None;
                }
                let x = self.origin.0 + self.planet_lateral(planet, dz);
                let y = self.origin.1 - self.ahead_offset(dz);
                Some(Blip {
                    center: self.clamp((x, y)),
                    size: blip_size(vp, RADAR_PX_PLANET),
                    color: RADAR_PLANET
                })
            })
            .collect()
    }

    pub fn asteroid_blips(&self, asteroids: &[Asteroid], depth: f32, vp: &Viewport) -> Vec<Blip> {
        asteroids
            .iter()
            .filter_map(|asteroid| {
                let dz = asteroid.z - depth;
                if !(0.0..=RADAR_AHEAD_MAX).contains(&dz) {
                    return None;
                }
                let x = self.origin.0 + asteroid.x * self.rad * 0.9 + vp.px(asteroid.radar_offset.0);
                let y = self.origin.1 - self.ahead_offset(dz) + vp.px(asteroid.radar_offset.1);
                Some(Blip {
                    center: self.clamp((x, y)),
                    size: blip_size(vp, RADAR_PX_ASTEROID),
                    color: RADAR_ASTEROID
                })
            })
            .collect()
    }

    /// Sweep line from the ship marker, both ends kept inside the clip
    pub fn sweep(&self, angle: f32) -> ((i32, i32), (i32, i32)) {
        let len = self.panel.w.min(self.panel.h) * 0.46;
        let (sin, cos) = angle.sin_cos();
        let end = (self.origin.0 + cos * len, self.origin.1 + sin * len);
        (self.clamp(self.origin), self.clamp(end))
    }
}

fn blip_size(vp: &Viewport, reference: f32) -> i32 {
    vp.px(reference).round().max(1.0) as i32
}
