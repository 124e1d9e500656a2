use std::path::Path;
use crate::format_loaders::AssetError;
use crate::palette::Palette;
use crate::rendering::BlittableSurface;

const ALPHA_CUTOFF: u8 = 128;

/// Decodes an image and maps every pixel to the nearest palette entry.
///
/// Pixels with alpha below 128 become `color_key`, which is never picked for opaque pixels.
pub fn load_quantized(
    path: impl AsRef<Path>,
    palette: &Palette,
    color_key: u8
) -> Result<BlittableSurface, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.display().to_string(),
        source
    })?;
    quantize(&image.to_rgba8(), palette, color_key).ok_or_else(|| AssetError::TooLarge {
        path: path.display().to_string(),
        width: image.width(),
        height: image.height()
    })
}

pub fn quantize(image: &image::RgbaImage, palette: &Palette, color_key: u8) -> Option<BlittableSurface> {
    if image.width() > u16::MAX as u32 || image.height() > u16::MAX as u32 {
        return None;
    }
    let mut cache = std::collections::HashMap::new();
    let buffer = image
        .pixels()
        .map(|px| {
            let [r, g, b, a] = px.0;
            if a < ALPHA_CUTOFF {
                return color_key;
            }
            *cache.entry([r, g, b]).or_insert_with(|| nearest_opaque(palette, [r, g, b], color_key))
        })
        .collect();
    let surface = BlittableSurface::from_buffer(image.width() as u16, image.height() as u16, buffer);
    Some(surface.with_color_key(color_key))
}

fn nearest_opaque(palette: &Palette, color: [u8; 3], color_key: u8) -> u8 {
    let found = palette.nearest_index(color);
    if found != color_key {
        return found;
    }
    let below = if color_key > 0 { Some(palette.nearest_in(color, 0..=color_key - 1)) } else { None };
    let above = if color_key < 255 { Some(palette.nearest_in(color, color_key + 1..=255)) } else { None };
    match (below, above) {
        (Some(b), Some(a)) => {
            let db = distance(palette.get(b), color);
            let da = distance(palette.get(a), color);
            if db <= da { b } else { a }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => found
    }
}

fn distance(a: [u8; 3], b: [u8; 3]) -> i32 {
    (0..3).map(|i| (a[i] as i32 - b[i] as i32).pow(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::blittable::{BufferProvider, SizedSurface};

    fn test_palette() -> Palette {
        let mut palette = Palette::new();
        palette.set(1, [250, 250, 250]);
        palette.set(2, [200, 0, 0]);
        palette
    }

    #[test]
    fn transparent_pixels_become_color_key() {
        let mut image = image::RgbaImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, image::Rgba([255, 0, 0, 10]));
        let surface = quantize(&image, &test_palette(), 0).unwrap();
        assert_eq!(surface.get_buffer(), &[2, 0]);
        assert!(surface.is_transparent(0));
    }

    #[test]
    fn opaque_black_avoids_color_key() {
        let mut image = image::RgbaImage::new(1, 1);
        image.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
        let surface = quantize(&image, &test_palette(), 0).unwrap();
        assert_ne!(surface.get_buffer()[0], 0);
    }

    #[test]
    fn png_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        let mut image = image::RgbaImage::new(3, 2);
        for px in image.pixels_mut() {
            *px = image::Rgba([240, 245, 250, 255]);
        }
        image.save(&path).unwrap();
        let surface = load_quantized(&path, &test_palette(), 0).unwrap();
        assert_eq!((surface.get_width(), surface.get_height()), (3, 2));
        assert!(surface.get_buffer().iter().all(|&it| it == 1));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_quantized("/nope/missing.png", &test_palette(), 0).unwrap_err();
        assert!(err.to_string().contains("missing.png"));
    }
}
