use glam::{Mat3A, vec2};

/// Translation, rotation and scale composed in that order (scale applied first).
#[derive(Copy, Clone, Debug)]
pub struct Transform {
    translation: (f32, f32),
    rotation: f32,
    scale: (f32, f32),
    matrix: Mat3A
}

impl Transform {
    pub fn from_identity() -> Transform {
        Self {
            translation: (0.0, 0.0),
            rotation: 0.0,
            scale: (1.0, 1.0),
            matrix: Mat3A::IDENTITY
        }
    }

    pub fn from_translation(x: f32, y: f32) -> Self {
        Self::from_identity().with_translation((x, y))
    }

    pub fn from_angle_and_translation(angle: f32, x: f32, y: f32) -> Self {
        Self::from_identity()
            .with_translation((x, y))
            .with_rotation(angle)
    }

    /// Rotates by `angle` around `pivot`, then shifts by `offset`.
    pub fn around_pivot(pivot: (f32, f32), angle: f32, offset: (f32, f32)) -> Self {
        let matrix = Mat3A::from_translation(vec2(pivot.0 + offset.0, pivot.1 + offset.1)) *
            Mat3A::from_angle(angle) *
            Mat3A::from_translation(vec2(-pivot.0, -pivot.1));
        Self {
            translation: (pivot.0 + offset.0, pivot.1 + offset.1),
            rotation: angle,
            scale: (1.0, 1.0),
            matrix
        }
    }

    pub fn with_rotation(self, angle: f32) -> Self {
        let mut result = self;
        result.set_rotation(angle);
        result
    }

    pub fn with_translation(self, translation: (f32, f32)) -> Self {
        let mut result = self;
        result.set_translation(translation);
        result
    }

    pub fn with_scale(self, scale: (f32, f32)) -> Self {
        let mut result = self;
        result.set_scale(scale);
        result
    }

    fn actualize_matrix(&mut self) {
        self.matrix =
            Mat3A::from_translation(vec2(self.translation.0, self.translation.1)) *
                Mat3A::from_angle(self.rotation) *
                Mat3A::from_scale(vec2(self.scale.0, self.scale.1))
    }

    pub fn set_scale(&mut self, scale: (f32, f32)) {
        self.scale = scale;
        self.actualize_matrix();
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.actualize_matrix();
    }

    pub fn set_translation(&mut self, translation: (f32, f32)) {
        self.translation = translation;
        self.actualize_matrix();
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn transform_point(&self, point: (f32, f32)) -> (f32, f32) {
        let p = self.matrix.transform_point2(vec2(point.0, point.1));
        (p.x, p.y)
    }

    pub fn transform_positions<const N: usize>(&self, positions: [(f32, f32); N]) -> [(f32, f32); N] {
        positions.map(|it| self.transform_point(it))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: (f32, f32), b: (f32, f32)) {
        assert!((a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn pivot_stays_fixed_under_rotation() {
        let t = Transform::around_pivot((50.0, 30.0), 1.2, (0.0, 0.0));
        assert_close(t.transform_point((50.0, 30.0)), (50.0, 30.0));
    }

    #[test]
    fn quarter_turn_around_pivot() {
        let t = Transform::around_pivot((10.0, 10.0), std::f32::consts::FRAC_PI_2, (2.0, 0.0));
        assert_close(t.transform_point((20.0, 10.0)), (12.0, 20.0));
    }

    #[test]
    fn scale_applies_before_translation() {
        let t = Transform::from_translation(5.0, 5.0).with_scale((2.0, 3.0));
        assert_close(t.transform_point((1.0, 1.0)), (7.0, 8.0));
    }
}
