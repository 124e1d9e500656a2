use retro_cockpit::rendering::blittable::ClipRect;
use retro_cockpit::rendering::deformed_rendering::Vertex;
use retro_cockpit::rendering::tessellation::{PathTessellator, TessellationError};
use crate::constants::{
    COCKPIT_BLEED, COCKPIT_CONSOLE_CROP, COCKPIT_OFFSET_Y_WINDOWED, COCKPIT_WINDOW_INSET,
    METAL_RAMP_START
};
use crate::scene::{Rect, Viewport};

/// Where the cockpit art lands on screen, computed like a cover-fit image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CockpitGeometry {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
    pub base: (f32, f32)
}

impl CockpitGeometry {
    pub fn cover(vp: &Viewport, base: (f32, f32), fullscreen: bool) -> Self {
        let base_scale = (vp.width / base.0).max(vp.height / base.1);
        let s = (base_scale * COCKPIT_BLEED * 1000.0).ceil() / 1000.0;
        let w = (base.0 * s).ceil() + 2.0;
        let h = (base.1 * s).ceil() + 2.0;
        let offset_y = if fullscreen { 0.0 } else { vp.px(COCKPIT_OFFSET_Y_WINDOWED) };
        Self {
            cx: (vp.width / 2.0).round(),
            cy: (vp.height / 2.0 + offset_y).round(),
            w,
            h,
            base
        }
    }

    pub fn left(&self) -> f32 {
        self.cx - self.w / 2.0
    }

    pub fn top(&self) -> f32 {
        self.cy - self.h / 2.0
    }

    /// The glass area inside the frame, without the console crop
    pub fn window_bounds(&self) -> Rect {
        let inset_x = self.w * COCKPIT_WINDOW_INSET;
        let inset_y = self.h * COCKPIT_WINDOW_INSET;
        Rect::new(
            self.left() + inset_x,
            self.top() + inset_y,
            self.w - inset_x * 2.0,
            self.h - inset_y * 2.0
        )
    }

    /// Clip for anything that must stay behind the glass
    pub fn window_clip(&self, vp: &Viewport) -> ClipRect {
        let bounds = self.window_bounds();
        ClipRect::new(
            bounds.x.round() as i32,
            bounds.y.round() as i32,
            bounds.w.round() as i32,
            (bounds.h - vp.px(COCKPIT_CONSOLE_CROP)).round() as i32
        )
    }

    /// Maps a point of the base art onto the screen
    pub fn base_to_screen(&self, point: (f32, f32)) -> (f32, f32) {
        (
            self.left() + point.0 * self.w / self.base.0,
            self.top() + point.1 * self.h / self.base.1
        )
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.w / self.base.0, self.h / self.base.1)
    }
}

pub struct FramePanel {
    pub color: u8,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>
}

/// Procedural cockpit art in base coordinates, used when no image is supplied.
pub struct CockpitFrame {
    pub panels: Vec<FramePanel>,
    pub outline: Vec<(f32, f32)>,
    pub outline_color: u8
}

const CANOPY: [(f32, f32); 6] = [
    (0.0, 0.0), (144.0, 0.0), (144.0, 11.0), (131.8, 7.6), (12.2, 7.6), (0.0, 11.0)
];
const LEFT_PILLAR: [(f32, f32); 4] = [(0.0, 11.0), (12.2, 7.6), (16.0, 72.0), (0.0, 80.0)];
const RIGHT_PILLAR: [(f32, f32); 4] = [(144.0, 11.0), (144.0, 80.0), (128.0, 72.0), (131.8, 7.6)];
const DASH: [(f32, f32); 6] = [
    (0.0, 80.0), (16.0, 72.0), (128.0, 72.0), (144.0, 80.0), (144.0, 90.0), (0.0, 90.0)
];
const DASH_LIP: [(f32, f32); 4] = [(16.0, 72.0), (128.0, 72.0), (126.0, 73.5), (18.0, 73.5)];
const RADAR_SCREEN: [(f32, f32); 4] = [(56.0, 76.0), (100.0, 76.0), (100.0, 88.5), (56.0, 88.5)];
const HELP_SCREEN: [(f32, f32); 4] = [(17.0, 77.5), (48.0, 77.5), (48.0, 88.0), (17.0, 88.0)];
const WINDOW_EDGE: [(f32, f32); 4] = [(12.2, 7.6), (131.8, 7.6), (128.0, 72.0), (16.0, 72.0)];

impl CockpitFrame {
    pub fn build() -> Result<Self, TessellationError> {
        let shapes: [(&[(f32, f32)], u8); 7] = [
            (&CANOPY, METAL_RAMP_START + 4),
            (&LEFT_PILLAR, METAL_RAMP_START + 6),
            (&RIGHT_PILLAR, METAL_RAMP_START + 6),
            (&DASH, METAL_RAMP_START + 3),
            (&DASH_LIP, METAL_RAMP_START + 10),
            (&RADAR_SCREEN, METAL_RAMP_START),
            (&HELP_SCREEN, METAL_RAMP_START)
        ];
        let mut tessellator = PathTessellator::new();
        let mut panels = Vec::with_capacity(shapes.len());
        for (points, color) in shapes {
            let mut vertices = Vec::new();
            let mut indices = Vec::new();
            tessellator.tessellate_polyline_fill(&mut vertices, &mut indices, points)?;
            panels.push(FramePanel { color, vertices, indices });
        }
        Ok(Self {
            panels,
            outline: WINDOW_EDGE.to_vec(),
            outline_color: METAL_RAMP_START + 12
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COCKPIT_BASE_SIZE;

    fn geometry() -> (Viewport, CockpitGeometry) {
        let vp = Viewport::new(640.0, 360.0);
        (vp, CockpitGeometry::cover(&vp, COCKPIT_BASE_SIZE, false))
    }

    #[test]
    fn cover_fit_overfills_the_screen() {
        let (vp, g) = geometry();
        assert!(g.w >= vp.width && g.h >= vp.height);
        assert_eq!(g.w, 671.0);
        assert_eq!(g.h, 421.0);
        assert_eq!(g.cx, 320.0);
        assert_eq!(g.cy, 161.0);
    }

    #[test]
    fn fullscreen_drops_vertical_offset() {
        let vp = Viewport::new(640.0, 360.0);
        let g = CockpitGeometry::cover(&vp, COCKPIT_BASE_SIZE, true);
        assert_eq!(g.cy, 180.0);
    }

    #[test]
    fn window_clip_is_inset_and_cropped() {
        let (vp, g) = geometry();
        let bounds = g.window_bounds();
        let clip = g.window_clip(&vp);
        assert!((bounds.x - (g.left() + 671.0 * 0.085)).abs() < 1e-3);
        assert_eq!(clip.width, bounds.w.round() as i32);
        assert_eq!(clip.height, (bounds.h - 40.0).round() as i32);
        assert!(clip.bottom() < 360);
    }

    #[test]
    fn base_corners_map_to_draw_rect() {
        let (_, g) = geometry();
        assert_eq!(g.base_to_screen((0.0, 0.0)), (g.left(), g.top()));
        let (x, y) = g.base_to_screen((144.0, 90.0));
        assert!((x - (g.left() + g.w)).abs() < 1e-3);
        assert!((y - (g.top() + g.h)).abs() < 1e-3);
    }

    #[test]
    fn procedural_frame_tessellates() {
        let frame = CockpitFrame::build().unwrap();
        assert_eq!(frame.panels.len(), 7);
        for panel in &frame.panels {
            assert!(!panel.indices.is_empty());
            assert_eq!(panel.indices.len() % 3, 0);
            assert!(panel.indices.iter().all(|&i| (i as usize) < panel.vertices.len()));
        }
    }
}
