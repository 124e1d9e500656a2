use crate::rendering::blittable::{ClipRect, PixelTarget};
use crate::rendering::dither;

pub fn fill_rectangle(
    dest: &mut impl PixelTarget,
    x: i32, y: i32,
    w: i32, h: i32,
    color: u8
) {
    let area = dest.get_clip().intersect(&ClipRect::new(x, y, w, h));
    if area.is_empty() {
        return;
    }
    let dw = dest.get_width();
    let buffer = dest.get_buffer_mut();

    let left = area.x as usize;
    let right = area.right() as usize;
    let mut stride = area.y as usize * dw;
    for _ in area.y..area.bottom() {
        for px in &mut buffer[stride + left..stride + right] {
            *px = color;
        }
        stride += dw;
    }
}

/// Fills with an ordered-dither pattern, standing in for a translucent fill.
pub fn fill_rectangle_dithered(
    dest: &mut impl PixelTarget,
    x: i32, y: i32,
    w: i32, h: i32,
    color: u8,
    opacity: u8
) {
    let area = dest.get_clip().intersect(&ClipRect::new(x, y, w, h));
    for py in area.y..area.bottom() {
        for px in area.x..area.right() {
            if dither::covers(px, py, opacity) {
                dest.plot(px, py, color);
            }
        }
    }
}

pub fn stroke_rectangle(
    dest: &mut impl PixelTarget,
    x: i32, y: i32,
    w: i32, h: i32,
    color: u8
) {
    if w <= 0 || h <= 0 {
        return;
    }
    for px in x..x + w {
        dest.plot(px, y, color);
        dest.plot(px, y + h - 1, color);
    }
    for py in y..y + h {
        dest.plot(x, py, color);
        dest.plot(x + w - 1, py, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::BlittableSurface;
    use crate::rendering::blittable::BufferProvider;

    fn count(surface: &BlittableSurface, color: u8) -> usize {
        surface.get_buffer().iter().filter(|&&it| it == color).count()
    }

    #[test]
    fn fill_is_clipped_to_surface() {
        let mut surface = BlittableSurface::new(10, 10);
        fill_rectangle(&mut surface, -5, 8, 8, 8, 4);
        assert_eq!(count(&surface, 4), 3 * 2);
    }

    #[test]
    fn stroke_draws_only_border() {
        let mut surface = BlittableSurface::new(10, 10);
        stroke_rectangle(&mut surface, 1, 1, 5, 4, 9);
        assert_eq!(count(&surface, 9), 5 * 2 + 2 * 2);
        assert_eq!(surface.get_pixel(3, 2), 0);
    }

    #[test]
    fn dithered_fill_is_partial() {
        let mut surface = BlittableSurface::new(8, 8);
        fill_rectangle_dithered(&mut surface, 0, 0, 8, 8, 1, 64);
        let covered = count(&surface, 1);
        assert!(covered > 0 && covered < 64);
    }
}
