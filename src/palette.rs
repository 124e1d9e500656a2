pub type Rgb = [u8; 3];

/// A full-screen translucent fill expressed as a blend towards `color`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaletteOverlay {
    pub color: Rgb,
    /// 0.0 keeps the palette, 1.0 replaces every entry with `color`
    pub alpha: f32
}

impl PaletteOverlay {
    pub fn new(color: Rgb, alpha: f32) -> Self {
        Self { color, alpha: alpha.clamp(0.0, 1.0) }
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

#[derive(Clone, PartialEq)]
pub struct Palette {
    colors: [Rgb; 256]
}

impl Palette {
    pub fn new() -> Self {
        Self { colors: [[0, 0, 0]; 256] }
    }

    pub fn from_colors(colors: &[Rgb]) -> Self {
        let mut palette = Self::new();
        for (dst, src) in palette.colors.iter_mut().zip(colors.iter()) {
            *dst = *src;
        }
        palette
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> Rgb {
        self.colors[idx as usize]
    }

    pub fn set(&mut self, idx: u8, color: Rgb) {
        self.colors[idx as usize] = color;
    }

    /// Fills `len` entries starting at `start` with a linear gradient `from -> to`.
    pub fn set_ramp(&mut self, start: u8, len: u8, from: Rgb, to: Rgb) {
        if len == 0 {
            return;
        }
        let last = (len - 1).max(1) as f32;
        for i in 0..len {
            let t = i as f32 / last;
            let idx = start as usize + i as usize;
            if idx > 255 {
                break;
            }
            self.colors[idx] = lerp_rgb(from, to, t);
        }
    }

    /// Closest entry in `range` by squared rgb distance.
    pub fn nearest_in(&self, color: Rgb, range: std::ops::RangeInclusive<u8>) -> u8 {
        let mut best = *range.start();
        let mut best_distance = u32::MAX;
        for idx in range {
            let distance = distance_sq(self.colors[idx as usize], color);
            if distance < best_distance {
                best_distance = distance;
                best = idx;
            }
        }
        best
    }

    pub fn nearest_index(&self, color: Rgb) -> u8 {
        self.nearest_in(color, 0..=255)
    }

    /// Applies overlays in order, the last one ending up on top.
    pub fn composed(&self, overlays: &[PaletteOverlay]) -> Palette {
        let mut result = self.clone();
        for overlay in overlays.iter().filter(|it| it.is_visible()) {
            for color in result.colors.iter_mut() {
                *color = lerp_rgb(*color, overlay.color, overlay.alpha);
            }
        }
        result
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

pub fn lerp_rgb(from: Rgb, to: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = from[i] as f32 + (to[i] as f32 - from[i] as f32) * t;
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}
