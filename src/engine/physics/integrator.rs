//! Fixed-step kinematic integrator
//!
//! Advances one body by one field timestep, always in the order
//! acceleration -> velocity -> position.

use super::body::Body;
use super::field::Field;
use crate::core::math::clamp_abs;

/// Advance `body` by one timestep of `field`, in place.
///
/// 1. Acceleration is set to the field's acceleration bias (constant
///    acceleration policy) and clamped to `max_acceleration`.
/// 2. `v += velocity_bias + intrinsic_velocity + (a + intrinsic_a) * dt`,
///    clamped to `max_velocity`.
/// 3. `p += 0.5 * (v_before + v_after) * dt`, clamped to `max_position`.
///    With no velocity biases this is exactly `v_before * dt + 0.5 * a * dt^2`.
/// 4. Momentum is refreshed for diagnostics.
pub fn advance(body: &mut Body, field: &Field) {
    let dt = field.dt;

    body.acceleration = clamp_abs(field.acceleration_bias, field.max_acceleration);

    let v_before = body.velocity;
    let accel = body.acceleration + body.intrinsic_acceleration;
    let v_after = v_before + field.velocity_bias + body.intrinsic_velocity + accel * dt;
    body.velocity = clamp_abs(v_after, field.max_velocity);

    let p = body.position + 0.5 * (v_before + body.velocity) * dt;
    body.position = clamp_abs(p, field.max_position);

    body.refresh_momentum();
}

/// Advance every body once, in container order
pub fn advance_all(bodies: &mut [Body], field: &Field) {
    for body in bodies.iter_mut() {
        advance(body, field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::BodyBuilder;
    use crate::engine::physics::field::FieldBuilder;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use glam::Vec2;

    fn field_with_accel(ax: f32, ay: f32, dt: f32) -> Field {
        FieldBuilder::new()
            .timestep(dt)
            .acceleration_bias(ax, ay)
            .arena(1000.0, 1000.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_step_under_downward_acceleration() {
        let field = field_with_accel(0.0, -1.0, 1.0);
        let mut body = BodyBuilder::new(1.0).build();

        advance(&mut body, &field);

        assert_relative_eq!(body.velocity.x, 0.0);
        assert_relative_eq!(body.velocity.y, -1.0);
        assert_relative_eq!(body.position.x, 0.0);
        assert_relative_eq!(body.position.y, -0.5);
        assert_eq!(body.acceleration, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_equilibrium_position_unchanged() {
        let field = field_with_accel(0.0, 0.0, 0.1);
        let mut body = BodyBuilder::new(3.0).position(7.0, -2.0).build();

        for _ in 0..1000 {
            advance(&mut body, &field);
        }

        assert_eq!(body.position, Vec2::new(7.0, -2.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_velocity_grows_linearly_with_constant_acceleration() {
        let (a, dt, k) = (2.0_f32, 0.05_f32, 40);
        let field = field_with_accel(a, 0.0, dt);
        let mut body = BodyBuilder::new(1.0).build();

        for _ in 0..k {
            advance(&mut body, &field);
        }

        assert_abs_diff_eq!(body.velocity.length(), k as f32 * a * dt, epsilon = 1e-4);
    }

    #[test]
    fn test_velocity_never_exceeds_cap() {
        let field = FieldBuilder::new()
            .timestep(0.1)
            .acceleration_bias(10.0, -10.0)
            .max_velocity(3.0, 2.0)
            .arena(1000.0, 1000.0)
            .build()
            .unwrap();
        let mut body = BodyBuilder::new(1.0).build();

        for _ in 0..100 {
            advance(&mut body, &field);
            assert!(body.velocity.x.abs() <= 3.0);
            assert!(body.velocity.y.abs() <= 2.0);
        }
        assert_relative_eq!(body.velocity.x, 3.0);
        assert_relative_eq!(body.velocity.y, -2.0);
    }

    #[test]
    fn test_acceleration_clamped_to_cap() {
        let field = FieldBuilder::new()
            .timestep(1.0)
            .acceleration_bias(-8.0, 0.5)
            .max_acceleration(2.0, 2.0)
            .build()
            .unwrap();
        let mut body = BodyBuilder::new(1.0).build();

        advance(&mut body, &field);

        assert_eq!(body.acceleration, Vec2::new(-2.0, 0.5));
        assert_relative_eq!(body.velocity.x, -2.0);
    }

    #[test]
    fn test_position_clamped_to_cap() {
        let field = FieldBuilder::new()
            .timestep(1.0)
            .velocity_bias(100.0, 0.0)
            .max_position(5.0, 5.0)
            .build()
            .unwrap();
        let mut body = BodyBuilder::new(1.0).build();

        advance(&mut body, &field);

        assert_eq!(body.position.x, 5.0);
    }

    #[test]
    fn test_intrinsic_terms_add_to_field() {
        let field = field_with_accel(0.0, -1.0, 1.0);
        let mut body = BodyBuilder::new(1.0)
            .intrinsic_velocity(1.0, 0.0)
            .intrinsic_acceleration(0.0, 3.0)
            .build();

        advance(&mut body, &field);

        // v = 0 + (1, 0) + ((0, -1) + (0, 3)) * 1
        assert_relative_eq!(body.velocity.x, 1.0);
        assert_relative_eq!(body.velocity.y, 2.0);
        // Stored acceleration is the field contribution only
        assert_eq!(body.acceleration, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_momentum_refreshed() {
        let field = field_with_accel(3.0, 4.0, 1.0);
        let mut body = BodyBuilder::new(2.0).build();

        advance(&mut body, &field);

        assert_relative_eq!(body.momentum, 10.0);
    }

    #[test]
    fn test_integration_is_deterministic() {
        let field = field_with_accel(0.3, -0.7, 0.016);
        let start = BodyBuilder::new(1.5).velocity(2.0, 1.0).build();

        let mut a = start;
        let mut b = start;
        for _ in 0..500 {
            advance(&mut a, &field);
            advance(&mut b, &field);
        }

        assert_eq!(a, b);
    }

    #[test]
    fn test_advance_all_touches_every_body() {
        let field = field_with_accel(0.0, -1.0, 1.0);
        let mut bodies = [BodyBuilder::new(1.0).build(), BodyBuilder::new(5.0).build()];

        advance_all(&mut bodies, &field);

        for body in &bodies {
            assert_relative_eq!(body.velocity.y, -1.0);
        }
    }
}
