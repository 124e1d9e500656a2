use std::path::Path;

use noise::{Fbm, MultiFractal, NoiseFn, Perlin, Seedable};
use retro_cockpit::audio::SoundHandle;
use retro_cockpit::format_loaders::png::load_quantized;
use retro_cockpit::palette::Palette;
use retro_cockpit::rendering::BlittableSurface;
use crate::constants::*;

const PLANET_SPRITE_SIZE: u16 = 96;
const ASTEROID_SPRITE_SIZE: u16 = 40;
const GROUND_SIZE: (u16, u16) = (320, 72);
const PLANET_SPRITES: usize = 6;
const ASTEROID_SPRITES: usize = 5;

pub fn build_palette() -> Palette {
    let mut palette = Palette::new();
    palette.set(TRANSPARENT, [0, 0, 0]);
    palette.set(SPACE_BG, SPACE_BG_COLOR);
    palette.set_ramp(STAR_RAMP_START, STAR_RAMP_LEN, [150, 150, 160], [255, 255, 255]);
    palette.set_ramp(MINT_RAMP_START, MINT_RAMP_LEN, SPACE_BG_COLOR, LOCK_COLOR);
    palette.set(HUD_TEXT, HUD_TEXT_COLOR);
    palette.set(RADAR_PLANET, [255, 60, 60]);
    palette.set(RADAR_PLANET_GLOW, [110, 30, 36]);
    palette.set(RADAR_ASTEROID, [235, 235, 235]);
    palette.set(SHIP_MARKER, [60, 240, 100]);
    palette.set(SWEEP, [80, 255, 120]);
    palette.set(SHIP_MARKER_GLOW, [30, 110, 56]);
    palette.set(SCAN_BAR_BG, [44, 76, 70]);
    palette.set(SCAN_BAR_FILL, LOCK_COLOR);
    palette.set(WHITE, [255, 255, 255]);
    for (idx, &(dark, lit)) in PLANET_COLORS.iter().enumerate() {
        let start = PLANET_RAMPS_START + idx as u8 * PLANET_RAMP_LEN;
        palette.set_ramp(start, PLANET_RAMP_LEN, dark, lit);
    }
    palette.set_ramp(ROCK_RAMP_START, RAMP_LEN, [26, 24, 22], [176, 164, 150]);
    palette.set_ramp(GROUND_RAMP_START, RAMP_LEN, [14, 12, 10], [128, 106, 78]);
    palette.set_ramp(METAL_RAMP_START, RAMP_LEN, [12, 14, 20], [156, 166, 182]);

    let levels = [0u8, 85, 170, 255];
    let mut idx = COLOR_CUBE_START as usize;
    for &r in &levels {
        for &g in &levels {
            for &b in &levels {
                palette.set(idx as u8, [r, g, b]);
                idx += 1;
            }
        }
    }
    palette
}

pub struct Sprites {
    pub planets: Vec<BlittableSurface>,
    pub asteroids: Vec<BlittableSurface>,
    pub cockpit: Option<BlittableSurface>,
    pub interface: Option<BlittableSurface>,
    pub surface: BlittableSurface
}

impl Sprites {
    /// Loads every image found in `images_dir`; missing ones are generated.
    pub fn load(images_dir: &Path, palette: &Palette, seed: u32) -> Self {
        let planets = (0..PLANET_SPRITES)
            .map(|idx| {
                load_image(images_dir, &format!("{}.png", idx + 1), palette)
                    .unwrap_or_else(|| planet_sprite(idx, seed))
            })
            .collect();
        let asteroids = (0..ASTEROID_SPRITES)
            .map(|idx| {
                load_image(images_dir, &format!("asteroid{}.png", idx + 1), palette)
                    .unwrap_or_else(|| asteroid_sprite(idx, seed))
            })
            .collect();
        Self {
            planets,
            asteroids,
            cockpit: load_image(images_dir, "spacecraft.png", palette),
            interface: load_image(images_dir, "interface.png", palette),
            surface: load_image(images_dir, "surface.png", palette)
                .unwrap_or_else(|| ground_strip(seed))
        }
    }
}

fn load_image(dir: &Path, name: &str, palette: &Palette) -> Option<BlittableSurface> {
    match load_quantized(dir.join(name), palette, TRANSPARENT) {
        Ok(surface) => Some(surface),
        Err(error) => {
            log::warn!("{}, falling back to a generated image", error);
            None
        }
    }
}

pub struct Sounds {
    pub engine: Option<SoundHandle>,
    pub launch: Option<SoundHandle>,
    pub warning: Option<SoundHandle>
}

impl Sounds {
    pub fn load(sounds_dir: &Path) -> Self {
        Self {
            engine: load_sound(sounds_dir, "spacecraft.wav"),
            launch: load_sound(sounds_dir, "launch.wav"),
            warning: load_sound(sounds_dir, "warning.wav")
        }
    }
}

fn load_sound(dir: &Path, name: &str) -> Option<SoundHandle> {
    let path = dir.join(name);
    match SoundHandle::from_path(&path) {
        Ok(sound) => Some(sound),
        Err(error) => {
            log::warn!("{}: {}, it will stay silent", path.display(), error);
            None
        }
    }
}

/// Smooth 1D noise in 0..1, sampled by time for flicker and turbulence.
pub struct NoiseTrack {
    perlin: Perlin
}

impl NoiseTrack {
    pub fn new(seed: u32) -> Self {
        Self { perlin: Perlin::new().set_seed(seed) }
    }

    pub fn sample(&self, t: f32) -> f32 {
        let v = self.perlin.get([t as f64 * 0.93, 0.5]);
        ((v as f32 + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

fn ramp_color(start: u8, len: u8, level: f32) -> u8 {
    let max = (len - 1) as f32;
    start + (level.clamp(0.0, 1.0) * max).round() as u8
}

/// Lit disc with noisy cloud bands, colored with the planet's own ramp.
pub fn planet_sprite(idx: usize, seed: u32) -> BlittableSurface {
    let size = PLANET_SPRITE_SIZE;
    let fbm = Fbm::new()
        .set_seed(seed.wrapping_add(idx as u32 * 31))
        .set_octaves(4)
        .set_frequency(2.5);
    let ramp_start = PLANET_RAMPS_START + (idx % PLANET_COLORS.len()) as u8 * PLANET_RAMP_LEN;
    let radius = size as f32 / 2.0 - 1.0;
    let center = size as f32 / 2.0;
    let light = {
        let (x, y, z) = (-0.55f32, -0.45f32, 0.7f32);
        let len = (x * x + y * y + z * z).sqrt();
        (x / len, y / len, z / len)
    };

    let mut buffer = vec![TRANSPARENT; size as usize * size as usize];
    for py in 0..size as usize {
        for px in 0..size as usize {
            let nx = (px as f32 + 0.5 - center) / radius;
            let ny = (py as f32 + 0.5 - center) / radius;
            let d2 = nx * nx + ny * ny;
            if d2 > 1.0 {
                continue;
            }
            let nz = (1.0 - d2).sqrt();
            let lambert = (nx * light.0 + ny * light.1 + nz * light.2).max(0.0);
            let bands = fbm.get([nx as f64 * 0.6, ny as f64 * 2.2]) as f32;
            let level = 0.08 + lambert * 0.8 + bands * 0.18;
            buffer[py * size as usize + px] = ramp_color(ramp_start, PLANET_RAMP_LEN, level);
        }
    }
    BlittableSurface::from_buffer(size, size, buffer).with_color_key(TRANSPARENT)
}

/// Lumpy rock: the outline radius wobbles with noise sampled around the rim.
pub fn asteroid_sprite(idx: usize, seed: u32) -> BlittableSurface {
    let size = ASTEROID_SPRITE_SIZE;
    let perlin = Perlin::new().set_seed(seed.wrapping_add(1000 + idx as u32 * 17));
    let radius = size as f32 / 2.0 - 1.0;
    let center = size as f32 / 2.0;

    let mut buffer = vec![TRANSPARENT; size as usize * size as usize];
    for py in 0..size as usize {
        for px in 0..size as usize {
            let dx = px as f32 + 0.5 - center;
            let dy = py as f32 + 0.5 - center;
            let angle = dy.atan2(dx);
            let rim = perlin.get([angle.cos() as f64 * 1.3, angle.sin() as f64 * 1.3]) as f32;
            let limit = radius * (0.78 + 0.2 * rim);
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > limit {
                continue;
            }
            let grain = perlin.get([dx as f64 * 0.35, dy as f64 * 0.35]) as f32;
            let facing = 1.0 - ((dx + dy) / (limit * 2.0) + 0.5).clamp(0.0, 1.0);
            let level = 0.15 + facing * 0.6 + grain * 0.15;
            buffer[py * size as usize + px] = ramp_color(ROCK_RAMP_START, RAMP_LEN, level);
        }
    }
    BlittableSurface::from_buffer(size, size, buffer).with_color_key(TRANSPARENT)
}

/// Launch pad horizon: rolling hills over darkening ground, sky left transparent.
pub fn ground_strip(seed: u32) -> BlittableSurface {
    let (w, h) = GROUND_SIZE;
    let fbm = Fbm::new().set_seed(seed.wrapping_add(77)).set_octaves(3).set_frequency(1.0);
    let mut buffer = vec![TRANSPARENT; w as usize * h as usize];
    for px in 0..w as usize {
        let hill = fbm.get([px as f64 / 64.0, 0.25]) as f32;
        let ridge = (h as f32 * (0.35 + hill * 0.2)).clamp(2.0, h as f32 - 2.0) as usize;
        for py in ridge..h as usize {
            let depth = (py - ridge) as f32 / (h as usize - ridge).max(1) as f32;
            let grit = fbm.get([px as f64 / 6.0, py as f64 / 6.0]) as f32;
            let level = 0.75 - depth * 0.6 + grit * 0.12;
            buffer[py * w as usize + px] = ramp_color(GROUND_RAMP_START, RAMP_LEN, level);
        }
    }
    BlittableSurface::from_buffer(w, h, buffer).with_color_key(TRANSPARENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_cockpit::rendering::blittable::{BufferProvider, SizedSurface};

    fn opaque(surface: &BlittableSurface) -> usize {
        surface.get_buffer().iter().filter(|&&it| it != TRANSPARENT).count()
    }

    #[test]
    fn palette_ramps_are_in_place() {
        let palette = build_palette();
        assert_eq!(palette.get(SPACE_BG), SPACE_BG_COLOR);
        assert_eq!(palette.get(MINT_RAMP_START), SPACE_BG_COLOR);
        assert_eq!(palette.get(MINT_RAMP_START + MINT_RAMP_LEN - 1), LOCK_COLOR);
        assert_eq!(palette.get(PLANET_RAMPS_START + PLANET_RAMP_LEN - 1), PLANET_COLORS[0].1);
        assert_eq!(palette.get(255), [255, 255, 255]);
        assert_eq!(palette.get(COLOR_CUBE_START), [0, 0, 0]);
    }

    #[test]
    fn planet_sprite_is_a_disc_in_its_ramp() {
        let sprite = planet_sprite(2, 7);
        assert_eq!(sprite.get_width(), PLANET_SPRITE_SIZE as usize);
        assert!(sprite.is_transparent(sprite.get_pixel(0, 0)));
        let center = PLANET_SPRITE_SIZE as usize / 2;
        assert!(!sprite.is_transparent(sprite.get_pixel(center, center)));
        let ramp = PLANET_RAMPS_START + 2 * PLANET_RAMP_LEN..PLANET_RAMPS_START + 3 * PLANET_RAMP_LEN;
        assert!(sprite.get_buffer().iter().all(|it| *it == TRANSPARENT || ramp.contains(it)));
        let area = opaque(&sprite) as f32;
        let disc = std::f32::consts::PI * (PLANET_SPRITE_SIZE as f32 / 2.0 - 1.0).powi(2);
        assert!((area - disc).abs() / disc < 0.05);
    }

    #[test]
    fn asteroid_sprites_differ() {
        let a = asteroid_sprite(0, 7);
        let b = asteroid_sprite(1, 7);
        assert!(opaque(&a) > 0);
        assert!(a.get_buffer() != b.get_buffer());
        let center = ASTEROID_SPRITE_SIZE as usize / 2;
        assert!(!a.is_transparent(a.get_pixel(center, center)));
    }

    #[test]
    fn ground_has_sky_above() {
        let ground = ground_strip(3);
        assert!(ground.is_transparent(ground.get_pixel(10, 0)));
        assert!(!ground.is_transparent(ground.get_pixel(10, GROUND_SIZE.1 as usize - 1)));
    }

    #[test]
    fn missing_images_are_generated() {
        let dir = tempfile::tempdir().unwrap();
        let sprites = Sprites::load(dir.path(), &build_palette(), 1);
        assert_eq!(sprites.planets.len(), 6);
        assert_eq!(sprites.asteroids.len(), 5);
        assert!(sprites.cockpit.is_none());
        assert!(sprites.interface.is_none());
        assert!(opaque(&sprites.surface) > 0);
    }

    #[test]
    fn noise_track_stays_in_unit_range() {
        let track = NoiseTrack::new(4);
        for step in 0..200 {
            let v = track.sample(step as f32 * 0.37);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
