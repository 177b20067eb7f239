//! Pure kinematics helpers shared by every simulated body.
//!
//! These are free functions over scalars and `Vec2` with no state; the
//! integration contract that calls them lives on [`crate::components::Body`].

use bevy::prelude::*;

/// Displacement along one axis after `dt` seconds.
///
/// Classic constant-acceleration kinematics: `v0*dt + 0.5*a*dt²`.
/// Applied independently per axis by the body integrator.
///
/// # Arguments
/// * `initial_speed` - Speed component at the start of the step (m/s)
/// * `dt` - Step duration in seconds
/// * `acceleration` - Acceleration component held over the step (m/s²)
pub fn displacement(initial_speed: f32, dt: f32, acceleration: f32) -> f32 {
    initial_speed * dt + 0.5 * acceleration * dt * dt
}

/// Average speed realized over a step of `dt` seconds.
///
/// `dt` must be positive; the body integrator guarantees this (it treats
/// `dt <= 0` as a no-op before ever reaching here).
pub fn speed(distance: f32, dt: f32) -> f32 {
    distance / dt
}

/// Acceleration due to aerodynamic drag, opposing the velocity vector.
///
/// Uses the drag equation `F = 0.5 * ρ * Cd * A * |v|²` solved for
/// acceleration via `F = m*a`, decomposed proportionally to each axis's
/// share of the speed.
///
/// A stationary body experiences no drag: `|v| == 0` returns `Vec2::ZERO`
/// rather than dividing by zero during direction normalization.
///
/// # Arguments
/// * `fluid_density` - Density of the surrounding fluid (kg/m³)
/// * `drag_coefficient` - Dimensionless drag coefficient (Cd)
/// * `area` - Cross-sectional area facing the flow (m²)
/// * `velocity` - Current velocity vector (m/s)
/// * `mass` - Body mass (kg), validated positive at construction
///
/// # Returns
/// The drag acceleration vector (m/s²), pointing against `velocity`
pub fn drag_acceleration(
    fluid_density: f32,
    drag_coefficient: f32,
    area: f32,
    velocity: Vec2,
    mass: f32,
) -> Vec2 {
    let speed = velocity.length();
    if speed == 0.0 {
        return Vec2::ZERO;
    }

    let magnitude = 0.5 * fluid_density * drag_coefficient * area * speed * speed / mass;

    // Oppose the velocity direction, split per axis by its share of |v|.
    -(velocity / speed) * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_from_rest() {
        // 2 m/s² for one second from rest covers one meter
        let d = displacement(0.0, 1.0, 2.0);
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn displacement_combines_speed_and_acceleration() {
        let d = displacement(3.0, 2.0, 1.0);
        // 3*2 + 0.5*1*4
        assert!((d - 8.0).abs() < 1e-6);
    }

    #[test]
    fn speed_is_distance_over_time() {
        assert!((speed(10.0, 2.0) - 5.0).abs() < 1e-6);
        assert!((speed(-4.0, 0.5) + 8.0).abs() < 1e-6);
    }

    #[test]
    fn drag_opposes_velocity() {
        let v = Vec2::new(30.0, 40.0);
        let a = drag_acceleration(1.225, 0.47, 0.01, v, 2.0);

        assert!(a.x < 0.0);
        assert!(a.y < 0.0);
        // Parallel to velocity, opposite sense
        assert!((a.normalize() + v.normalize()).length() < 1e-5);
    }

    #[test]
    fn drag_scales_with_square_of_speed() {
        let v = Vec2::new(10.0, 0.0);
        let a1 = drag_acceleration(1.225, 0.47, 0.01, v, 2.0);
        let a2 = drag_acceleration(1.225, 0.47, 0.01, v * 2.0, 2.0);

        assert!((a2.length() / a1.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn no_drag_on_stationary_body() {
        let a = drag_acceleration(1.225, 0.47, 0.01, Vec2::ZERO, 2.0);
        assert_eq!(a, Vec2::ZERO);
    }
}
