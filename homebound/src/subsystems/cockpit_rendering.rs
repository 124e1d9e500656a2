use retro_cockpit::rendering::blittable::SizedSurface;
use retro_cockpit::rendering::bresenham::LineStripRasterizer;
use retro_cockpit::rendering::deformed_rendering::TriangleRasterizer;
use retro_cockpit::rendering::sprite::SpriteDrawer;
use retro_cockpit::rendering::transform::Transform;
use retro_cockpit::window::BlitContext;
use crate::HomeboundApp;
use crate::cockpit::CockpitGeometry;
use crate::constants::COCKPIT_BASE_SIZE;
use crate::scene::Viewport;

impl HomeboundApp {
    pub fn cockpit_geometry(&self, ctx: &BlitContext, vp: &Viewport) -> CockpitGeometry {
        let base = self.sprites.cockpit
            .as_ref()
            .map(|image| (image.get_width() as f32, image.get_height() as f32))
            .unwrap_or(COCKPIT_BASE_SIZE);
        CockpitGeometry::cover(vp, base, ctx.is_fullscreen())
    }

    pub fn render_cockpit(&self, ctx: &mut BlitContext, cockpit: &CockpitGeometry) {
        if let Some(image) = &self.sprites.cockpit {
            SpriteDrawer::create(ctx, image)
                .with_center((cockpit.cx, cockpit.cy))
                .with_size((cockpit.w, cockpit.h))
                .draw();
            return;
        }

        if let Some(frame) = &self.cockpit_frame {
            let transform = Transform::from_translation(cockpit.left(), cockpit.top())
                .with_scale(cockpit.scale());
            for panel in frame.panels.iter() {
                TriangleRasterizer::create(ctx)
                    .with_transform(transform)
                    .rasterize_with_color(panel.color, &panel.vertices, &panel.indices);
            }
            LineStripRasterizer::create(ctx)
                .with_color(frame.outline_color)
                .with_transform(transform)
                .rasterize_slice(true, &frame.outline);
        }
    }
}
