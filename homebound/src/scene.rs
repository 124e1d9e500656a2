use std::f32::consts::TAU;
use bumpalo::Bump;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use crate::constants::*;
use crate::easing::{constrain, map_range};

/// Drawable area in buffer pixels.
///
/// Lengths tuned for a 1080 px tall screen go through [`Viewport::px`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn px_scale(&self) -> f32 {
        self.height / REFERENCE_HEIGHT
    }

    #[inline(always)]
    pub fn px(&self, reference: f32) -> f32 {
        reference * self.px_scale()
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered(center: (f32, f32), size: f32) -> Self {
        Self::new(center.0 - size / 2.0, center.1 - size / 2.0, size, size)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right
}

impl Side {
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanetMeta {
    pub id: &'static str,
    pub display_name: &'static str,
    pub kind: &'static str,
    pub distance_ly: u32,
    pub tidal_lock: bool,
    pub similarity_to_earth: u8,
    pub atmosphere: &'static str,
    pub life: &'static str,
    pub hazard: &'static str,
    pub notes: &'static str
}

#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub side: Side,
    pub sprite: usize,
    pub meta: Option<PlanetMeta>
}

impl Planet {
    pub fn lock_id(&self) -> &'static str {
        self.meta.map(|it| it.id).unwrap_or(self.name)
    }
}

pub fn default_planets() -> Vec<Planet> {
    let planet = |sprite: usize, name, x, y, z, size, side| Planet {
        name, x, y, z, size, side, sprite, meta: None
    };
    vec![
        Planet {
            meta: Some(PlanetMeta {
                id: "nyx-3d",
                display_name: "Nyx-3d",
                kind: "Gas-ice giant",
                distance_ly: 137,
                tidal_lock: true,
                similarity_to_earth: 8,
                atmosphere: "H₂ / He, methane haze",
                life: "No biosigns",
                hazard: "Severe winds, cryo-temps",
                notes: "One side in perpetual light, the other in darkness. \
                    Narrow traces of suspended liquid haze."
            }),
            ..planet(0, "P-1", -0.30, 0.10, 1200.0, 500.0, Side::Left)
        },
        planet(1, "P-2", 0.20, -0.30, 2200.0, 120.0, Side::Right),
        planet(2, "P-3", 0.55, 0.20, 3600.0, 110.0, Side::Right),
        planet(3, "P-4", -0.40, -0.40, 4200.0, 150.0, Side::Left),
        planet(4, "P-5", 0.35, 0.08, 5200.0, 130.0, Side::Right),
        planet(5, "P-6", -0.18, 0.32, 6200.0, 115.0, Side::Left)
    ]
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Belt {
    pub start_z: f32,
    pub end_z: f32
}

impl Belt {
    pub fn behind(planets: &[Planet]) -> Self {
        let last_z = planets.iter().map(|it| it.z).fold(0.0, f32::max);
        let start_z = last_z + BELT_GAP;
        Self { start_z, end_z: start_z + BELT_DEPTH }
    }

    /// Furthest depth the ship may travel to
    pub fn lock_depth(&self) -> f32 {
        self.end_z - BELT_LOCK_MARGIN
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub sprite: usize,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub rot: f32,
    pub rot_speed: f32,
    pub vx: f32,
    pub vy: f32,
    pub radar_offset: (f32, f32)
}

pub fn spawn_asteroids(rng: &mut impl Rng, belt: &Belt, sprite_count: usize) -> Vec<Asteroid> {
    (0..ASTEROID_COUNT)
        .map(|_| Asteroid {
            sprite: rng.gen_range(0..sprite_count.max(1)),
            x: rng.gen_range(-BELT_X_RANGE..BELT_X_RANGE),
            y: rng.gen_range(-BELT_Y_RANGE..BELT_Y_RANGE),
            z: rng.gen_range(belt.start_z..belt.end_z),
            size: rng.gen_range(28.0..90.0),
            rot: rng.gen_range(0.0..TAU),
            rot_speed: rng.gen_range(-ASTEROID_ROT_ABS..ASTEROID_ROT_ABS),
            vx: rng.gen_range(ASTEROID_VX_MIN..ASTEROID_VX_MAX),
            vy: rng.gen_range(-ASTEROID_VY_ABS..ASTEROID_VY_ABS),
            radar_offset: (rng.gen_range(-20.0..20.0), rng.gen_range(-15.0..15.0))
        })
        .collect()
}

fn asteroid_in_view(dz: f32) -> bool {
    (ASTEROID_VISIBLE_BEHIND..=ASTEROID_VISIBLE_AHEAD).contains(&dz)
}

/// Drifts the asteroids near `camera_z`, wrapping them around the belt edges.
pub fn integrate_asteroids(asteroids: &mut [Asteroid], dt_seconds: f32, camera_z: f32) {
    for asteroid in asteroids.iter_mut() {
        if !asteroid_in_view(asteroid.z - camera_z) {
            continue;
        }
        asteroid.x += asteroid.vx * dt_seconds;
        asteroid.y += asteroid.vy * dt_seconds;
        if asteroid.x > BELT_X_WRAP {
            asteroid.x -= BELT_X_WRAP * 2.0;
        }
        if asteroid.x < -BELT_X_WRAP {
            asteroid.x += BELT_X_WRAP * 2.0;
        }
        if asteroid.y > BELT_Y_WRAP {
            asteroid.y = -BELT_Y_WRAP;
        }
        if asteroid.y < -BELT_Y_WRAP {
            asteroid.y = BELT_Y_WRAP;
        }
        asteroid.rot += asteroid.rot_speed * dt_seconds;
    }
}

/// The belt stops scrolling once the ship reaches its lock depth.
pub fn belt_camera_z(depth: f32, belt: &Belt) -> f32 {
    depth.min(belt.lock_depth())
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Star {
    /// Position as a fraction of the viewport
    pub x: f32,
    pub y: f32,
    pub shade: u8
}

pub fn starfield() -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(STAR_SEED);
    (0..STAR_COUNT)
        .map(|_| {
            let brightness: f32 = rng.gen_range(150.0..255.0);
            let shade = ((brightness - 150.0) / 105.0 * (STAR_RAMP_LEN - 1) as f32).round() as u8;
            Star { x: rng.gen_range(0.0..1.0), y: rng.gen_range(0.0..1.0), shade }
        })
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub center: (f32, f32),
    pub size: f32,
    pub opacity: u8
}

pub fn planet_scale(dz: f32) -> f32 {
    PLANET_SCALE / dz.max(PLANET_MIN_DZ)
}

fn planet_size(planet: &Planet, dz: f32, vp: &Viewport) -> f32 {
    let min_size = vp.px(PLANET_MIN_SIZE).max(1.0);
    let max_size = (vp.min_side() * PLANET_MAX_SIZE).max(min_size);
    constrain(vp.px(planet.size * planet_scale(dz)), min_size, max_size)
}

/// Screen-space placement of a planet before any camera transform.
///
/// Planets slide out towards their side once the ship is close, and vanish when far behind.
pub fn project_planet(planet: &Planet, depth: f32, ship: (f32, f32), vp: &Viewport) -> Option<Projection> {
    let dz = planet.z - depth;
    if dz < PLANET_HIDE_DZ {
        return None;
    }
    let mut sx = vp.width / 2.0 + (planet.x + ship.0) * vp.width * PLANET_SPREAD;
    let sy = vp.height / 2.0 + (planet.y + ship.1) * vp.height * PLANET_SPREAD;
    if dz < SLIDE_TRIGGER_Z {
        let progress = map_range(dz, SLIDE_TRIGGER_Z, SLIDE_EXIT_Z, 0.0, 1.0, true);
        sx += planet.side.sign() * progress * vp.width * PLANET_SPREAD;
    }
    Some(Projection {
        center: (sx, sy),
        size: planet_size(planet, dz, vp),
        opacity: map_range(dz, 4000.0, 200.0, 100.0, 255.0, true).round() as u8
    })
}

/// Slow horizontal bob, in reference pixels
pub fn planet_wiggle(now: f32, planet: &Planet) -> f32 {
    let frame = now / FRAME_MS;
    (frame * 0.012 + planet.z * 0.001).sin() * 1.1
}

pub fn project_asteroid(asteroid: &Asteroid, camera_z: f32, vp: &Viewport) -> Option<Projection> {
    let dz = asteroid.z - camera_z;
    if !asteroid_in_view(dz) {
        return None;
    }
    Some(Projection {
        center: (
            vp.width / 2.0 + asteroid.x * vp.width * ASTEROID_SPREAD,
            vp.height / 2.0 + asteroid.y * vp.height * ASTEROID_SPREAD
        ),
        size: asteroid_size(asteroid, dz, vp),
        opacity: 255
    })
}

fn asteroid_size(asteroid: &Asteroid, dz: f32, vp: &Viewport) -> f32 {
    let scale = PLANET_SCALE / dz.max(ASTEROID_MIN_DZ);
    let min_size = vp.px(ASTEROID_MIN_SIZE).max(1.0);
    let max_size = (vp.min_side() * ASTEROID_MAX_SIZE).max(min_size);
    constrain(vp.px(asteroid.size * scale), min_size, max_size)
}

/// Whether an asteroid just ahead of the ship overlaps the central hit box
pub fn asteroid_hits_ship(asteroid: &Asteroid, depth: f32, vp: &Viewport) -> bool {
    let dz = asteroid.z - depth;
    if !(COLLISION_NEAR_DZ..=COLLISION_FAR_DZ).contains(&dz) {
        return false;
    }
    let (cx, cy) = vp.center();
    let hit_w = vp.min_side() * 0.28;
    let hit_h = vp.min_side() * 0.20;
    let (hx, hy) = (cx - hit_w / 2.0, cy - hit_h / 2.0);

    let size = asteroid_size(asteroid, dz, vp);
    let ax = cx + asteroid.x * vp.width * ASTEROID_SPREAD - size / 2.0;
    let ay = cy + asteroid.y * vp.height * ASTEROID_SPREAD - size / 2.0;
    !(ax + size < hx || ax > hx + hit_w || ay + size < hy || ay > hy + hit_h)
}

/// Planet indices ordered far to near, allocated in the frame arena
pub fn far_to_near<'a>(planets: &[Planet], depth: f32, arena: &'a Bump) -> bumpalo::collections::Vec<'a, usize> {
    let mut order = bumpalo::collections::Vec::with_capacity_in(planets.len(), arena);
    order.extend(0..planets.len());
    order.sort_by(|&a, &b| {
        let dz_a = planets[a].z - depth;
        let dz_b = planets[b].z - depth;
        dz_b.partial_cmp(&dz_a).unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(640.0, 360.0)
    }

    #[test]
    fn six_planets_with_one_survey() {
        let planets = default_planets();
        assert_eq!(planets.len(), 6);
        assert_eq!(planets[0].lock_id(), "nyx-3d");
        assert_eq!(planets[1].lock_id(), "P-2");
        assert_eq!(planets.iter().filter(|it| it.meta.is_some()).count(), 1);
    }

    #[test]
    fn belt_sits_behind_last_planet() {
        let belt = Belt::behind(&default_planets());
        assert_eq!(belt, Belt { start_z: 8200.0, end_z: 11200.0 });
        assert_eq!(belt.lock_depth(), 9200.0);
    }

    #[test]
    fn asteroids_spawn_inside_belt() {
        let belt = Belt::behind(&default_planets());
        let asteroids = spawn_asteroids(&mut StdRng::seed_from_u64(5), &belt, 5);
        assert_eq!(asteroids.len(), 50);
        for it in &asteroids {
            assert!(it.z >= 8200.0 && it.z < 11200.0);
            assert!(it.sprite < 5);
            assert!(it.x.abs() <= 1.2 && it.y.abs() <= 0.6);
        }
    }

    #[test]
    fn asteroids_wrap_around() {
        let belt = Belt::behind(&default_planets());
        let mut asteroids = spawn_asteroids(&mut StdRng::seed_from_u64(5), &belt, 1);
        asteroids[0].x = 1.349;
        asteroids[0].vx = 0.002;
        asteroids[0].y = 0.4999;
        asteroids[0].vy = 0.0004;
        let camera_z = asteroids[0].z;
        integrate_asteroids(&mut asteroids[..1], 1.0, camera_z);
        assert!((asteroids[0].x - (1.351 - 2.7)).abs() < 1e-4);
        assert_eq!(asteroids[0].y, -0.5);
    }

    #[test]
    fn distant_asteroids_stay_frozen() {
        let belt = Belt::behind(&default_planets());
        let mut asteroids = spawn_asteroids(&mut StdRng::seed_from_u64(5), &belt, 1);
        let before = asteroids[0].clone();
        integrate_asteroids(&mut asteroids[..1], 1.0, before.z + 5000.0);
        assert_eq!(asteroids[0], before);
    }

    #[test]
    fn starfield_is_stable() {
        let stars = starfield();
        assert_eq!(stars.len(), 260);
        assert_eq!(stars, starfield());
        assert!(stars.iter().all(|it| it.shade < 16 && (0.0..1.0).contains(&it.x)));
    }

    #[test]
    fn planet_projection_scales_with_depth() {
        let planets = default_planets();
        let far = project_planet(&planets[1], 0.0, (0.0, 0.0), &vp()).unwrap();
        let near = project_planet(&planets[1], 2000.0, (0.0, 0.0), &vp()).unwrap();
        assert!(near.size > far.size);
        assert!(far.size >= vp().px(6.0));
        assert!(near.size <= 0.8 * 360.0);
        assert_eq!(far.opacity, 173);
        assert_eq!(near.opacity, 255);
        assert!((far.center.0 - (320.0 + 0.2 * 640.0 * 0.6)).abs() < 1e-3);
    }

    #[test]
    fn close_planets_slide_to_their_side() {
        let planets = default_planets();
        let left = &planets[0];
        let before = project_planet(left, left.z - 200.0, (0.0, 0.0), &vp()).unwrap();
        let sliding = project_planet(left, left.z + 230.0, (0.0, 0.0), &vp()).unwrap();
        let gone = project_planet(left, left.z + 600.0, (0.0, 0.0), &vp()).unwrap();
        assert!(sliding.center.0 < before.center.0);
        assert!((before.center.0 - gone.center.0 - 384.0).abs() < 1e-3);
        assert_eq!(project_planet(left, left.z + 801.0, (0.0, 0.0), &vp()), None);
    }

    #[test]
    fn asteroid_projection_respects_view_window() {
        let belt = Belt::behind(&default_planets());
        let asteroids = spawn_asteroids(&mut StdRng::seed_from_u64(9), &belt, 1);
        let it = &asteroids[0];
        assert!(project_asteroid(it, it.z - 20001.0, &vp()).is_none());
        assert!(project_asteroid(it, it.z + 2001.0, &vp()).is_none());
        let shown = project_asteroid(it, it.z - 500.0, &vp()).unwrap();
        assert!(shown.size <= 360.0 * 0.22);
    }

    #[test]
    fn centered_asteroid_hits_ship_only_when_close() {
        let belt = Belt::behind(&default_planets());
        let mut asteroids = spawn_asteroids(&mut StdRng::seed_from_u64(9), &belt, 1);
        let it = &mut asteroids[0];
        it.x = 0.0;
        it.y = 0.0;
        assert!(asteroid_hits_ship(it, it.z - 100.0, &vp()));
        assert!(!asteroid_hits_ship(it, it.z - 300.0, &vp()));
        assert!(!asteroid_hits_ship(it, it.z - 10.0, &vp()));
        it.x = 1.0;
        assert!(!asteroid_hits_ship(it, it.z - 100.0, &vp()));
    }

    #[test]
    fn draw_order_is_far_to_near() {
        let arena = Bump::new();
        let mut planets = default_planets();
        planets.swap(0, 4);
        let order = far_to_near(&planets, 0.0, &arena);
        let depths: Vec<f32> = order.iter().map(|&i| planets[i].z).collect();
        assert_eq!(depths, vec![6200.0, 5200.0, 4200.0, 3600.0, 2200.0, 1200.0]);
    }
}
