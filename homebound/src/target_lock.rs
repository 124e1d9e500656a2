use std::f32::consts::TAU;
use crate::constants::{
    LOCK_FADE_MS, LOCK_HYSTERESIS_MS, LOCK_INNER_PULSE_MS, LOCK_MAX_AHEAD, LOCK_MIN_SIZE
};
use crate::easing::constrain;
use crate::scene::{project_planet, Planet, Rect, Viewport};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LockCandidate {
    pub planet: usize,
    pub dz: f32,
    pub rect: Rect
}

/// Closest planet ahead that is large enough on screen to lock onto
pub fn find_candidate(planets: &[Planet], depth: f32, ship: (f32, f32), vp: &Viewport) -> Option<LockCandidate> {
    let min_size = vp.px(LOCK_MIN_SIZE);
    planets
        .iter()
        .enumerate()
        .filter_map(|(idx, planet)| {
            let dz = planet.z - depth;
            if !(0.0..=LOCK_MAX_AHEAD).contains(&dz) {
                return None;
            }
            let projection = project_planet(planet, depth, ship, vp)?;
            if projection.size < min_size {
                return None;
            }
            Some(LockCandidate {
                planet: idx,
                dz,
                rect: Rect::centered(projection.center, projection.size)
            })
        })
        .min_by(|a, b| a.dz.partial_cmp(&b.dz).unwrap_or(std::cmp::Ordering::Equal))
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reticle {
    pub outer: Rect,
    pub corner: f32,
    pub inner: Rect,
    /// Opacities in 0..1
    pub bracket_alpha: f32,
    pub inner_alpha: f32
}

pub struct TargetLock {
    pub id: Option<&'static str>,
    pub planet: Option<usize>,
    pub since: f32,
    pub last_seen: f32,
    pub dz: f32,
    pub rect: Option<Rect>
}

impl TargetLock {
    pub fn new() -> Self {
        Self {
            id: None,
            planet: None,
            since: 0.0,
            last_seen: 0.0,
            dz: f32::INFINITY,
            rect: None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn update(&mut self, candidate: Option<LockCandidate>, planets: &[Planet], now: f32) {
        let candidate = match candidate {
            Some(it) => it,
            None => {
                let held = self.id.is_some() && now - self.last_seen < LOCK_HYSTERESIS_MS;
                if !held {
                    self.clear();
                }
                return;
            }
        };
        let id = planets[candidate.planet].lock_id();
        if self.id != Some(id) {
            log::debug!("target lock acquired: {}", id);
            self.id = Some(id);
            self.since = now;
        }
        self.planet = Some(candidate.planet);
        self.last_seen = now;
        self.rect = Some(candidate.rect);
        self.dz = candidate.dz;
    }

    pub fn is_locked(&self) -> bool {
        self.id.is_some() && self.rect.is_some()
    }

    pub fn reticle(&self, now: f32, vp: &Viewport) -> Option<Reticle> {
        if self.id.is_none() {
            return None;
        }
        let rect = self.rect?;
        let fade = constrain((now - self.since) / LOCK_FADE_MS, 0.0, 1.0);
        let pulse_t = now.rem_euclid(LOCK_INNER_PULSE_MS) / LOCK_INNER_PULSE_MS;
        let pulse = 0.5 - 0.5 * (pulse_t * TAU).cos();

        let pad = vp.px(8.0).max(rect.w.min(rect.h) * 0.06);
        let outer = Rect::new(
            (rect.x - pad).round(),
            (rect.y - pad).round(),
            (rect.w + pad * 2.0).round(),
            (rect.h + pad * 2.0).round()
        );
        let short_side = outer.w.min(outer.h);
        let inset = (short_side * 0.08 + pulse * short_side * 0.03).round();
        Some(Reticle {
            outer,
            corner: vp.px(12.0).max(short_side * 0.20),
            inner: Rect::new(outer.x + inset, outer.y + inset, outer.w - inset * 2.0, outer.h - inset * 2.0),
            bracket_alpha: 200.0 / 255.0 * fade,
            inner_alpha: 140.0 / 255.0 * fade
        })
    }
}

impl Default for TargetLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::default_planets;

    fn vp() -> Viewport {
        Viewport::new(640.0, 360.0)
    }

    #[test]
    fn picks_closest_planet_in_range() {
        let planets = default_planets();
        let found = find_candidate(&planets, 1000.0, (0.0, 0.0), &vp()).unwrap();
        assert_eq!(found.planet, 0);
        assert_eq!(found.dz, 200.0);
        assert!(find_candidate(&planets, 0.0, (0.0, 0.0), &vp()).is_none());
    }

    #[test]
    fn passed_planets_are_ignored() {
        let planets = default_planets();
        let found = find_candidate(&planets, 1300.0, (0.0, 0.0), &vp()).unwrap();
        assert_eq!(found.planet, 1);
    }

    #[test]
    fn lock_survives_brief_dropouts() {
        let planets = default_planets();
        let mut lock = TargetLock::new();
        let candidate = find_candidate(&planets, 1000.0, (0.0, 0.0), &vp());
        lock.update(candidate, &planets, 100.0);
        assert_eq!(lock.id, Some("nyx-3d"));
        assert_eq!(lock.since, 100.0);

        lock.update(None, &planets, 549.0);
        assert!(lock.is_locked());
        lock.update(None, &planets, 550.0);
        assert!(!lock.is_locked());
        assert_eq!(lock.id, None);
        assert_eq!(lock.dz, f32::INFINITY);
    }

    #[test]
    fn same_target_keeps_its_start_time() {
        let planets = default_planets();
        let mut lock = TargetLock::new();
        lock.update(find_candidate(&planets, 1000.0, (0.0, 0.0), &vp()), &planets, 0.0);
        lock.update(find_candidate(&planets, 1010.0, (0.0, 0.0), &vp()), &planets, 50.0);
        assert_eq!(lock.since, 0.0);
        assert_eq!(lock.last_seen, 50.0);
        lock.update(find_candidate(&planets, 1300.0, (0.0, 0.0), &vp()), &planets, 60.0);
        assert_eq!(lock.id, Some("P-2"));
        assert_eq!(lock.since, 60.0);
    }

    #[test]
    fn reticle_fades_in() {
        let planets = default_planets();
        let mut lock = TargetLock::new();
        assert!(lock.reticle(0.0, &vp()).is_none());
        lock.update(find_candidate(&planets, 1000.0, (0.0, 0.0), &vp()), &planets, 0.0);
        let start = lock.reticle(0.0, &vp()).unwrap();
        assert_eq!(start.bracket_alpha, 0.0);
        let full = lock.reticle(220.0, &vp()).unwrap();
        assert!((full.bracket_alpha - 200.0 / 255.0).abs() < 1e-6);
        assert!((full.inner_alpha - 140.0 / 255.0).abs() < 1e-6);
        assert!(full.inner.w < full.outer.w);
        assert!(full.outer.w > lock.rect.unwrap().w);
    }
}
