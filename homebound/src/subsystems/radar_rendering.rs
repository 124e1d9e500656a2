use retro_cockpit::rendering::bresenham::{BresenhamCircleDrawer, LineRasterizer};
use retro_cockpit::rendering::deformed_rendering::{TriangleRasterizer, Vertex};
use retro_cockpit::rendering::shapes::fill_rectangle;
use retro_cockpit::window::BlitContext;
use crate::HomeboundApp;
use crate::cockpit::CockpitGeometry;
use crate::constants::{RADAR_PLANET_GLOW, SHIP_MARKER_GLOW, SWEEP};
use crate::radar::{Blip, RadarLayout};
use crate::scene::Viewport;

const MARKER_INDICES: [u16; 3] = [0, 1, 2];

fn fill_blip(ctx: &mut BlitContext, blip: &Blip, grow: i32, color: u8) {
    let size = blip.size + grow * 2;
    fill_rectangle(ctx, blip.center.0 - size / 2, blip.center.1 - size / 2, size, size, color);
}

impl HomeboundApp {
    pub fn render_radar(&self, ctx: &mut BlitContext, vp: &Viewport, cockpit: &CockpitGeometry) {
        let layout = match RadarLayout::new(cockpit, vp) {
            Some(it) => it,
            None => return
        };
        ctx.push_clip(layout.clip);

        let scan = &self.sequencer.scan;
        if scan.active {
            let (from, to) = layout.sweep(scan.sweep_angle(self.now));
            LineRasterizer::create(ctx)
                .from(from)
                .to(to)
                .with_thickness(2)
                .rasterize(SWEEP);
        }

        { // asteroids
            for blip in layout.asteroid_blips(&self.asteroids, self.flight.depth, vp).iter() {
                fill_blip(ctx, blip, 0, blip.color);
            }
        }

        { // planets, over a dim halo
            for blip in layout.planet_blips(&self.planets, self.flight.depth, vp).iter() {
                fill_blip(ctx, blip, 1, RADAR_PLANET_GLOW);
                fill_blip(ctx, blip, 0, blip.color);
            }
        }

        { // ship marker, a small arrow pointing ahead
            let marker = layout.ship_marker(vp);
            let half = (marker.size / 2).max(1) as f32;
            let vertices = [
                Vertex { position: (0.0, -half) },
                Vertex { position: (half, half) },
                Vertex { position: (-half, half) }
            ];
            BresenhamCircleDrawer::create(ctx)
                .with_position(marker.center)
                .with_radius(half as i32 + 1)
                .draw(SHIP_MARKER_GLOW);
            TriangleRasterizer::create(ctx)
                .with_translation((marker.center.0 as f32, marker.center.1 as f32))
                .rasterize_with_color(marker.color, &vertices, &MARKER_INDICES);
        }

        ctx.pop_clip();
    }
}
