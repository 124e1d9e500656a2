use std::f32::consts::PI;

pub fn ease_in_out_sine(x: f32) -> f32 {
    -((PI * x).cos() - 1.0) / 2.0
}

pub fn ease_out_cubic(x: f32) -> f32 {
    1.0 - (1.0 - x).powi(3)
}

#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline(always)]
pub fn constrain(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Re-maps `v` from `a0..a1` onto `b0..b1`, optionally clamped to the target range.
///
/// A degenerate source range maps everything onto `b0`.
pub fn map_range(v: f32, a0: f32, a1: f32, b0: f32, b1: f32, clamp: bool) -> f32 {
    if a1 == a0 {
        return b0;
    }
    let mapped = b0 + (v - a0) / (a1 - a0) * (b1 - b0);
    if clamp {
        constrain(mapped, b0.min(b1), b0.max(b1))
    } else {
        mapped
    }
}

/// Converts a factor tuned per 60 Hz frame into one for `dt_frames` frames
#[inline(always)]
pub fn damp(factor: f32, dt_frames: f32) -> f32 {
    factor.powf(dt_frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn easings_hit_their_end_points() {
        assert!(close(ease_in_out_sine(0.0), 0.0));
        assert!(close(ease_in_out_sine(0.5), 0.5));
        assert!(close(ease_in_out_sine(1.0), 1.0));
        assert!(close(ease_out_cubic(0.0), 0.0));
        assert!(close(ease_out_cubic(0.5), 0.875));
        assert!(close(ease_out_cubic(1.0), 1.0));
    }

    #[test]
    fn map_range_handles_reversed_ranges() {
        assert!(close(map_range(4000.0, 4000.0, 200.0, 100.0, 255.0, true), 100.0));
        assert!(close(map_range(200.0, 4000.0, 200.0, 100.0, 255.0, true), 255.0));
        assert!(close(map_range(-50.0, 4000.0, 200.0, 100.0, 255.0, true), 255.0));
        assert!(close(map_range(9000.0, 4000.0, 200.0, 100.0, 255.0, true), 100.0));
        assert!(close(map_range(2.0, 0.0, 1.0, 0.0, 10.0, false), 20.0));
    }

    #[test]
    fn degenerate_range_maps_to_start() {
        assert_eq!(map_range(3.0, 1.0, 1.0, 7.0, 9.0, true), 7.0);
    }

    #[test]
    fn damping_composes_over_frames() {
        assert!(close(damp(0.72, 1.0), 0.72));
        assert!(close(damp(0.72, 2.0), 0.72 * 0.72));
        assert!(close(damp(0.72, 0.0), 1.0));
    }

    #[test]
    fn lerp_and_constrain() {
        assert!(close(lerp(6.0, 1.0, 0.5), 3.5));
        assert_eq!(constrain(5.0, 0.0, 1.0), 1.0);
        assert_eq!(constrain(-5.0, 0.0, 1.0), 0.0);
    }
}
