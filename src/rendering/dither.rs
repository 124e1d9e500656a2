const BAYER_LOOKUP: [u8; 16] = [
    00, 08, 02, 10,
    12, 04, 14, 06,
    03, 11, 01, 09,
    15, 07, 13, 05
];

/// Ordered-dither coverage test: with `opacity` 255 every pixel passes, with 0 none does.
#[inline(always)]
pub fn covers(x: i32, y: i32, opacity: u8) -> bool {
    let level = (opacity as u32 * 16 / 255) as u8;
    let idx = (y & 3) as usize * 4 + (x & 3) as usize;
    BAYER_LOOKUP[idx] < level
}

#[cfg(test)]
mod tests {
    use super::covers;

    fn coverage(opacity: u8) -> usize {
        (0..4).flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| covers(x, y, opacity))
            .count()
    }

    #[test]
    fn extremes_are_solid_and_empty() {
        assert_eq!(coverage(255), 16);
        assert_eq!(coverage(0), 0);
    }

    #[test]
    fn half_opacity_covers_about_half() {
        let half = coverage(128);
        assert!((7..=9).contains(&half), "{}", half);
    }

    #[test]
    fn negative_coordinates_wrap() {
        assert_eq!(covers(-4, -4, 100), covers(0, 0, 100));
    }
}
