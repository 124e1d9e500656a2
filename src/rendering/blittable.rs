#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32
}

impl ClipRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width: width.max(0), height: height.max(0) }
    }

    pub fn from_surface(surface: &impl SizedSurface) -> Self {
        Self::new(0, 0, surface.get_width() as i32, surface.get_height() as i32)
    }

    pub fn right(&self) -> i32 { self.x + self.width }

    pub fn bottom(&self) -> i32 { self.y + self.height }

    pub fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    pub fn intersect(&self, other: &ClipRect) -> ClipRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        ClipRect::new(x, y, right - x, bottom - y)
    }
}

pub trait SizedSurface {
    fn get_width(&self) -> usize;
    fn get_height(&self) -> usize;
}

pub trait BufferProvider<T> {
    fn get_buffer(&self) -> &[T];
}

pub trait BufferProviderMut<T> {
    fn get_buffer_mut(&mut self) -> &mut [T];
}

/// A palette-index surface every rasterizer can draw into.
///
/// `get_clip` is the region writes are limited to; it is always inside the surface.
pub trait PixelTarget: SizedSurface + BufferProviderMut<u8> {
    fn get_clip(&self) -> ClipRect {
        ClipRect::new(0, 0, self.get_width() as i32, self.get_height() as i32)
    }

    #[inline(always)]
    fn plot(&mut self, x: i32, y: i32, color: u8) {
        if self.get_clip().contains(x, y) {
            let idx = y as usize * self.get_width() + x as usize;
            self.get_buffer_mut()[idx] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_disjoint_rects_is_empty() {
        let a = ClipRect::new(0, 0, 10, 10);
        let b = ClipRect::new(20, 20, 5, 5);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn intersection_keeps_overlap() {
        let a = ClipRect::new(0, 0, 10, 10);
        let b = ClipRect::new(5, -5, 10, 10);
        assert_eq!(a.intersect(&b), ClipRect::new(5, 0, 5, 5));
    }

    #[test]
    fn negative_sizes_collapse_to_zero() {
        let r = ClipRect::new(3, 3, -4, 2);
        assert!(r.is_empty());
        assert!(!r.contains(3, 3));
    }
}
