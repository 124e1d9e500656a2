use crate::rendering::blittable::PixelTarget;
use crate::rendering::transform::Transform;

fn plot_bresenham_circle(
    cx: i32, cy: i32, r: i32,
    mut plot_func: impl FnMut(i32, i32)
) {
    fn plot_all_octants(cx: i32, cy: i32, dx: i32, dy: i32, plot_func: &mut impl FnMut(i32, i32)) {
        plot_func(cx + dx, cy + dy);
        plot_func(cx + dx, cy - dy);
        plot_func(cx - dx, cy + dy);
        plot_func(cx - dx, cy - dy);
        plot_func(cx + dy, cy + dx);
        plot_func(cx + dy, cy - dx);
        plot_func(cx - dy, cy + dx);
        plot_func(cx - dy, cy - dx);
    }
    let mut d = 3 - r * 2;
    let mut x = 0;
    let mut y = r;
    plot_all_octants(cx, cy, x, y, &mut plot_func);
    while x < y {
        if d <= 0 {
            d += 6 + (x << 2);
        } else {
            d += 10 + ((x - y) << 2);
            y -= 1;
        }
        x += 1;
        plot_all_octants(cx, cy, x, y, &mut plot_func);
    }
}

fn plot_bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32, mut plot_func: impl FnMut(i32, i32)) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        plot_func(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = err * 2;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

pub struct BresenhamCircleDrawer<'a, P: PixelTarget> {
    target: &'a mut P,
    position: (i32, i32),
    radius: i32
}

impl<'a, P: PixelTarget> BresenhamCircleDrawer<'a, P> {
    pub fn create(target: &'a mut P) -> Self {
        Self {
            target,
            position: (0, 0),
            radius: 0
        }
    }

    pub fn with_position(self, position: (i32, i32)) -> Self {
        Self { position, ..self }
    }

    pub fn with_radius(self, radius: i32) -> Self {
        Self { radius, ..self }
    }

    pub fn draw(self, color: u8) {
        let target = self.target;
        plot_bresenham_circle(
            self.position.0,
            self.position.1,
            self.radius,
            |x, y| target.plot(x, y, color)
        )
    }
}

pub struct LineRasterizer<'a, P: PixelTarget> {
    target: &'a mut P,
    from: (i32, i32),
    to: (i32, i32),
    thickness: i32
}

impl<'a, P: PixelTarget> LineRasterizer<'a, P> {
    pub fn create(target: &'a mut P) -> Self {
        Self {
            target,
            from: (0, 0),
            to: (0, 0),
            thickness: 1
        }
    }

    pub fn from(self, from: (i32, i32)) -> Self {
        Self { from, ..self }
    }

    pub fn to(self, to: (i32, i32)) -> Self {
        Self { to, ..self }
    }

    pub fn with_thickness(self, thickness: i32) -> Self {
        Self { thickness: thickness.max(1), ..self }
    }

    pub fn rasterize(self, color: u8) {
        let target = self.target;
        let thickness = self.thickness;
        plot_bresenham_line(
            self.from.0,
            self.from.1,
            self.to.0,
            self.to.1,
            |x, y| {
                for j in 0..thickness {
                    for i in 0..thickness {
                        target.plot(x + i, y + j, color);
                    }
                }
            }
        )
    }
}

/// Draws a poly line through `positions` mapped by a [`Transform`].
pub struct LineStripRasterizer<'a, P: PixelTarget> {
    target: &'a mut P,
    transform: Transform,
    color: u8
}

impl<'a, P: PixelTarget> LineStripRasterizer<'a, P> {
    pub fn create(target: &'a mut P) -> Self {
        Self {
            target,
            transform: Transform::from_identity(),
            color: 0
        }
    }

    pub fn with_color(self, color: u8) -> Self {
        Self { color, ..self }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    pub fn rasterize_slice(self, closed: bool, positions: &[(f32, f32)]) {
        if positions.len() <= 1 {
            return;
        }
        let transform = self.transform;
        let color = self.color;
        let target = self.target;
        let segments = if closed { positions.len() } else { positions.len() - 1 };
        for i in 0..segments {
            let from = transform.transform_point(positions[i]);
            let to = transform.transform_point(positions[(i + 1) % positions.len()]);
            LineRasterizer::create(&mut *target)
                .from((from.0.floor() as i32, from.1.floor() as i32))
                .to((to.0.floor() as i32, to.1.floor() as i32))
                .rasterize(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::BlittableSurface;

    #[test]
    fn line_hits_both_endpoints() {
        let mut surface = BlittableSurface::new(16, 16);
        LineRasterizer::create(&mut surface)
            .from((1, 2))
            .to((13, 9))
            .rasterize(5);
        assert_eq!(surface.get_pixel(1, 2), 5);
        assert_eq!(surface.get_pixel(13, 9), 5);
    }

    #[test]
    fn line_partially_offscreen_does_not_panic() {
        let mut surface = BlittableSurface::new(8, 8);
        LineRasterizer::create(&mut surface)
            .from((-20, -3))
            .to((30, 12))
            .with_thickness(2)
            .rasterize(1);
    }

    #[test]
    fn circle_touches_its_extremes() {
        let mut surface = BlittableSurface::new(21, 21);
        BresenhamCircleDrawer::create(&mut surface)
            .with_position((10, 10))
            .with_radius(6)
            .draw(3);
        assert_eq!(surface.get_pixel(16, 10), 3);
        assert_eq!(surface.get_pixel(4, 10), 3);
        assert_eq!(surface.get_pixel(10, 4), 3);
        assert_eq!(surface.get_pixel(10, 10), 0);
    }

    #[test]
    fn closed_strip_returns_to_start() {
        let mut surface = BlittableSurface::new(10, 10);
        LineStripRasterizer::create(&mut surface)
            .with_color(2)
            .rasterize_slice(true, &[(1.0, 1.0), (8.0, 1.0), (8.0, 8.0)]);
        assert_eq!(surface.get_pixel(4, 4), 2);
    }
}
