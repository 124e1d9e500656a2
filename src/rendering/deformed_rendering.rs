use crate::math_utils::Barycentric2D;
use crate::rendering::blittable::{ClipRect, PixelTarget};
use crate::rendering::transform::Transform;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: (f32, f32)
}

/// Flat-colored triangle lists, typically produced by [`crate::rendering::tessellation::PathTessellator`].
pub struct TriangleRasterizer<'a, P: PixelTarget> {
    target: &'a mut P,
    transform: Transform
}

impl<'a, P: PixelTarget> TriangleRasterizer<'a, P> {
    pub fn create(target: &'a mut P) -> Self {
        Self {
            target,
            transform: Transform::from_identity()
        }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    pub fn with_translation(self, translation: (f32, f32)) -> Self {
        Self {
            transform: self.transform.with_translation(translation),
            ..self
        }
    }

    pub fn rasterize_with_color(self, color: u8, vertices: &[Vertex], indices: &[u16]) {
        let transform = self.transform;
        let target = self.target;
        for triangle in indices.chunks_exact(3) {
            let positions = transform.transform_positions([
                vertices[triangle[0] as usize].position,
                vertices[triangle[1] as usize].position,
                vertices[triangle[2] as usize].position
            ]);
            fill_triangle(&mut *target, positions, color);
        }
    }
}

fn fill_triangle(target: &mut impl PixelTarget, positions: [(f32, f32); 3], color: u8) {
    let min_x = positions.iter().map(|p| p.0).fold(f32::MAX, f32::min).floor() as i32;
    let max_x = positions.iter().map(|p| p.0).fold(f32::MIN, f32::max).ceil() as i32;
    let min_y = positions.iter().map(|p| p.1).fold(f32::MAX, f32::min).floor() as i32;
    let max_y = positions.iter().map(|p| p.1).fold(f32::MIN, f32::max).ceil() as i32;

    let area = target.get_clip().intersect(&ClipRect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1));
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            let sample = (x as f32 + 0.5, y as f32 + 0.5);
            if <(f32, f32)>::get_barycentric_2d(sample, positions).is_some() {
                target.plot(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::BlittableSurface;
    use crate::rendering::blittable::BufferProvider;

    #[test]
    fn quad_from_two_triangles_is_filled() {
        let vertices = [
            Vertex { position: (0.0, 0.0) },
            Vertex { position: (4.0, 0.0) },
            Vertex { position: (4.0, 4.0) },
            Vertex { position: (0.0, 4.0) }
        ];
        let indices = [0u16, 1, 2, 0, 2, 3];
        let mut surface = BlittableSurface::new(8, 8);
        TriangleRasterizer::create(&mut surface)
            .with_translation((2.0, 2.0))
            .rasterize_with_color(6, &vertices, &indices);
        let filled = surface.get_buffer().iter().filter(|&&it| it == 6).count();
        assert_eq!(filled, 16);
        assert_eq!(surface.get_pixel(2, 2), 6);
        assert_eq!(surface.get_pixel(6, 6), 0);
    }

    #[test]
    fn winding_does_not_matter() {
        let mut cw = BlittableSurface::new(10, 10);
        let mut ccw = BlittableSurface::new(10, 10);
        fill_triangle(&mut cw, [(1.0, 1.0), (9.0, 1.0), (1.0, 9.0)], 1);
        fill_triangle(&mut ccw, [(1.0, 1.0), (1.0, 9.0), (9.0, 1.0)], 1);
        assert_eq!(cw.get_buffer(), ccw.get_buffer());
        assert!(cw.get_buffer().iter().any(|&it| it == 1));
    }
}
