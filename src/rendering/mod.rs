pub mod blittable;
pub mod bresenham;
pub mod deformed_rendering;
pub mod dither;
pub mod fonts;
pub mod shapes;
pub mod sprite;
pub mod tessellation;
pub mod transform;

use blittable::{BufferProvider, BufferProviderMut, PixelTarget, SizedSurface};

/// An owned palette-index image. Pixels equal to `color_key` are skipped when drawn.
#[derive(Clone, Debug)]
pub struct BlittableSurface {
    width: u16,
    height: u16,
    color_key: Option<u8>,
    buffer: Vec<u8>
}

impl BlittableSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            color_key: None,
            buffer: vec![0u8; width as usize * height as usize]
        }
    }

    pub fn from_buffer(width: u16, height: u16, buffer: Vec<u8>) -> Self {
        assert_eq!(buffer.len(), width as usize * height as usize);
        Self { width, height, color_key: None, buffer }
    }

    pub fn with_color_key(self, color_key: u8) -> Self {
        Self {
            color_key: Some(color_key),
            ..self
        }
    }

    pub fn get_color_key(&self) -> Option<u8> {
        self.color_key
    }

    #[inline(always)]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        self.buffer[y * self.width as usize + x]
    }

    #[inline(always)]
    pub fn is_transparent(&self, color: u8) -> bool {
        self.color_key == Some(color)
    }
}

impl SizedSurface for BlittableSurface {
    fn get_width(&self) -> usize { self.width as _ }

    fn get_height(&self) -> usize { self.height as _ }
}

impl BufferProvider<u8> for BlittableSurface {
    fn get_buffer(&self) -> &[u8] {
        &self.buffer
    }
}

impl BufferProviderMut<u8> for BlittableSurface {
    fn get_buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}

impl PixelTarget for BlittableSurface {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plotting_outside_is_ignored() {
        let mut surface = BlittableSurface::new(4, 3);
        surface.plot(-1, 0, 7);
        surface.plot(4, 0, 7);
        surface.plot(0, 3, 7);
        surface.plot(3, 2, 7);
        assert_eq!(surface.get_buffer().iter().filter(|&&it| it == 7).count(), 1);
        assert_eq!(surface.get_pixel(3, 2), 7);
    }

    #[test]
    fn color_key_marks_transparency() {
        let surface = BlittableSurface::new(2, 2).with_color_key(0);
        assert!(surface.is_transparent(0));
        assert!(!surface.is_transparent(1));
    }
}
