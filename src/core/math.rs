// Math utilities and helper functions

use glam::Vec2;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp each component of `v` so that its magnitude does not exceed the
/// matching component of `cap`. Sign is preserved.
pub fn clamp_abs(v: Vec2, cap: Vec2) -> Vec2 {
    Vec2::new(clamp(v.x, -cap.x, cap.x), clamp(v.y, -cap.y, cap.y))
}

/// Check if two f32 values are approximately equal
#[allow(dead_code)]
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// True when both components are finite
pub fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_abs_preserves_sign() {
        let cap = Vec2::new(3.0, 1.0);
        assert_eq!(clamp_abs(Vec2::new(-5.0, 0.5), cap), Vec2::new(-3.0, 0.5));
        assert_eq!(clamp_abs(Vec2::new(2.0, -4.0), cap), Vec2::new(2.0, -1.0));
    }

    #[test]
    fn test_clamp_abs_zero_cap_pins_to_zero() {
        assert_eq!(clamp_abs(Vec2::new(7.0, -7.0), Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_approx_equal() {
        assert!(approx_equal(1.0, 1.00001, 0.0001));
        assert!(!approx_equal(1.0, 1.1, 0.01));
    }

    #[test]
    fn test_is_finite() {
        assert!(is_finite(Vec2::new(1.0, -2.0)));
        assert!(!is_finite(Vec2::new(f32::NAN, 0.0)));
        assert!(!is_finite(Vec2::new(0.0, f32::INFINITY)));
    }
}
