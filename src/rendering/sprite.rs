use crate::rendering::BlittableSurface;
use crate::rendering::blittable::{ClipRect, PixelTarget, SizedSurface};
use crate::rendering::dither;

/// Draws a [`BlittableSurface`] scaled to `size`, rotated around its center.
///
/// Sampling is nearest neighbour; opacity below 255 is approximated with ordered dithering.
pub struct SpriteDrawer<'a, P: PixelTarget> {
    target: &'a mut P,
    sprite: &'a BlittableSurface,
    center: (f32, f32),
    size: (f32, f32),
    rotation: f32,
    opacity: u8
}

impl<'a, P: PixelTarget> SpriteDrawer<'a, P> {
    pub fn create(target: &'a mut P, sprite: &'a BlittableSurface) -> Self {
        let size = (sprite.get_width() as f32, sprite.get_height() as f32);
        Self {
            target,
            sprite,
            center: (0.0, 0.0),
            size,
            rotation: 0.0,
            opacity: 255
        }
    }

    pub fn with_center(self, center: (f32, f32)) -> Self {
        Self { center, ..self }
    }

    pub fn with_size(self, size: (f32, f32)) -> Self {
        Self { size, ..self }
    }

    pub fn with_rotation(self, rotation: f32) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_opacity(self, opacity: u8) -> Self {
        Self { opacity, ..self }
    }

    pub fn draw(self) {
        let (sw, sh) = (self.sprite.get_width(), self.sprite.get_height());
        if sw == 0 || sh == 0 || self.size.0 < 0.5 || self.size.1 < 0.5 || self.opacity == 0 {
            return;
        }

        let (sin, cos) = self.rotation.sin_cos();
        let (half_w, half_h) = (self.size.0 * 0.5, self.size.1 * 0.5);
        let extent_x = (half_w * cos).abs() + (half_h * sin).abs();
        let extent_y = (half_w * sin).abs() + (half_h * cos).abs();

        let bounds = ClipRect::new(
            (self.center.0 - extent_x).floor() as i32,
            (self.center.1 - extent_y).floor() as i32,
            (extent_x * 2.0).ceil() as i32 + 2,
            (extent_y * 2.0).ceil() as i32 + 2
        );
        let area = self.target.get_clip().intersect(&bounds);
        if area.is_empty() {
            return;
        }

        let texel_x = sw as f32 / self.size.0;
        let texel_y = sh as f32 / self.size.1;

        for py in area.y..area.bottom() {
            for px in area.x..area.right() {
                if self.opacity < 255 && !dither::covers(px, py, self.opacity) {
                    continue;
                }
                let dx = px as f32 + 0.5 - self.center.0;
                let dy = py as f32 + 0.5 - self.center.1;
                // inverse rotation back into sprite space
                let lx = dx * cos + dy * sin + half_w;
                let ly = -dx * sin + dy * cos + half_h;
                if lx < 0.0 || ly < 0.0 || lx >= self.size.0 || ly >= self.size.1 {
                    continue;
                }
                let u = ((lx * texel_x) as usize).min(sw - 1);
                let v = ((ly * texel_y) as usize).min(sh - 1);
                let color = self.sprite.get_pixel(u, v);
                if !self.sprite.is_transparent(color) {
                    self.target.plot(px, py, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::blittable::{BufferProvider, BufferProviderMut};

    fn solid_sprite(w: u16, h: u16, color: u8) -> BlittableSurface {
        let mut sprite = BlittableSurface::new(w, h);
        for px in sprite.get_buffer_mut() {
            *px = color;
        }
        sprite
    }

    #[test]
    fn scaled_sprite_covers_requested_size() {
        let sprite = solid_sprite(2, 2, 7);
        let mut canvas = BlittableSurface::new(32, 32);
        SpriteDrawer::create(&mut canvas, &sprite)
            .with_center((16.0, 16.0))
            .with_size((10.0, 6.0))
            .draw();
        let covered = canvas.get_buffer().iter().filter(|&&it| it == 7).count();
        assert_eq!(covered, 60);
    }

    #[test]
    fn color_key_is_skipped() {
        let sprite = solid_sprite(4, 4, 0).with_color_key(0);
        let mut canvas = BlittableSurface::new(8, 8);
        for px in canvas.get_buffer_mut() {
            *px = 3;
        }
        SpriteDrawer::create(&mut canvas, &sprite)
            .with_center((4.0, 4.0))
            .draw();
        assert!(canvas.get_buffer().iter().all(|&it| it == 3));
    }

    #[test]
    fn offscreen_sprite_is_a_no_op() {
        let sprite = solid_sprite(4, 4, 1);
        let mut canvas = BlittableSurface::new(8, 8);
        SpriteDrawer::create(&mut canvas, &sprite)
            .with_center((-50.0, 100.0))
            .with_rotation(0.7)
            .draw();
        assert!(canvas.get_buffer().iter().all(|&it| it == 0));
    }

    #[test]
    fn quarter_turn_swaps_extents() {
        let sprite = solid_sprite(8, 2, 5);
        let mut canvas = BlittableSurface::new(20, 20);
        SpriteDrawer::create(&mut canvas, &sprite)
            .with_center((10.0, 10.0))
            .with_rotation(std::f32::consts::FRAC_PI_2)
            .draw();
        assert_eq!(canvas.get_pixel(10, 6), 5);
        assert_eq!(canvas.get_pixel(6, 10), 0);
    }
}
