//! Core components for the fireworks simulation.

use bevy::prelude::*;

use crate::kinematics;
use crate::resources::FireworksEnvironment;
use crate::types::{LaunchError, MIN_TARGET_DISTANCE};

/// Shared physical-body component carried by every shell and star.
///
/// Positions are simulation coordinates: meters, origin at the bottom-left
/// of the play area, y growing upward. Canvas/pixel space never leaks in
/// here; [`crate::resources::Viewport`] owns that mapping.
///
/// Thrust is an optional capability resolved at construction: shells carry
/// `Some(newtons)` directed along their velocity, stars carry `None` and fly
/// purely under drag and gravity.
///
/// # Fields
/// * `position` - Current position (m)
/// * `velocity` - Current velocity (m/s)
/// * `acceleration` - Acceleration applied over the next step (m/s²)
/// * `mass` - Mass (kg), strictly positive
/// * `drag_coefficient` - Dimensionless Cd
/// * `cross_section_area` - Area facing the flow (m²)
/// * `thrust` - Optional self-propulsion force (N) along the velocity vector
/// * `spawned_at` - Clock reading when the body entered the active world
/// * `last_update_at` - Internal integration clock, monotonically non-decreasing
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_firework_dynamics::components::Body;
///
/// let body = Body::new(Vec2::new(64.0, 0.0), 5.3)
///     .unwrap()
///     .with_drag(0.47)
///     .with_cross_section(0.01)
///     .with_thrust(100.0);
/// ```
#[derive(Component, Reflect, Clone, Debug)]
#[reflect(Component)]
pub struct Body {
    /// Position in simulation space (m)
    pub position: Vec2,
    /// Velocity (m/s)
    pub velocity: Vec2,
    /// Acceleration for the next integration step (m/s²)
    pub acceleration: Vec2,
    /// Mass (kg)
    pub mass: f32,
    /// Drag coefficient (Cd)
    pub drag_coefficient: f32,
    /// Cross-sectional area (m²)
    pub cross_section_area: f32,
    /// Self-propulsion force along the velocity vector (N), if any
    pub thrust: Option<f32>,
    /// Clock reading at spawn, set once when the body goes live
    pub spawned_at: Option<f64>,
    /// Clock reading of the last completed integration step
    pub last_update_at: Option<f64>,
}

impl Default for Body {
    /// A unit-mass sphere at rest at the origin, no thrust.
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: 1.0,
            drag_coefficient: 0.47,
            cross_section_area: 0.01,
            thrust: None,
            spawned_at: None,
            last_update_at: None,
        }
    }
}

impl Body {
    /// Creates a body at rest at `position`.
    ///
    /// Mass is validated here, at construction, so a degenerate body can
    /// never enter the active world (`F = m*a` has no solution for zero
    /// mass, and a negative one flips every force).
    ///
    /// # Errors
    /// [`LaunchError::InvalidMass`] when `mass` is not finite or not `> 0`.
    pub fn new(position: Vec2, mass: f32) -> Result<Self, LaunchError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(LaunchError::InvalidMass(mass));
        }
        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass,
            drag_coefficient: 0.47, // sphere
            cross_section_area: 0.01,
            thrust: None,
            spawned_at: None,
            last_update_at: None,
        })
    }

    /// Builder pattern: set initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder pattern: set initial acceleration.
    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Builder pattern: set drag coefficient.
    pub fn with_drag(mut self, drag_coefficient: f32) -> Self {
        self.drag_coefficient = drag_coefficient;
        self
    }

    /// Builder pattern: set cross-sectional area.
    pub fn with_cross_section(mut self, area: f32) -> Self {
        self.cross_section_area = area;
        self
    }

    /// Builder pattern: enable thrust along the velocity vector.
    pub fn with_thrust(mut self, newtons: f32) -> Self {
        self.thrust = Some(newtons);
        self
    }

    /// Marks the body live at clock reading `now`. Set once.
    pub fn spawn(&mut self, now: f64) {
        if self.spawned_at.is_none() {
            self.spawned_at = Some(now);
        }
    }

    /// True once the body has been live since before the tick at `now`.
    ///
    /// Used by the frame loop's load-shedding gate: a body spawned in a
    /// prior tick keeps integrating even when the measured framerate has
    /// dropped below tolerance.
    pub fn spawned_before(&self, now: f64) -> bool {
        self.spawned_at.is_some_and(|t| t < now)
    }

    /// Integrates one time-step ending at `now` and returns the new position.
    ///
    /// Contract:
    /// - The first call only records the clock baseline and produces no
    ///   displacement, so wall-clock time elapsed between construction and
    ///   the first frame is never integrated.
    /// - `dt <= 0` is a caller contract violation and degrades to a no-op
    ///   instead of propagating NaN or infinity.
    /// - Velocity is re-derived from the realized displacement over `dt`
    ///   rather than integrated forward from acceleration. This is a
    ///   deliberate first-order approximation; its slight inaccuracy versus
    ///   a path-aware integrator is part of the display's look and is kept
    ///   as-is.
    /// - The new acceleration combines drag (from the pre-step velocity),
    ///   thrust (along the freshly derived velocity, zero at rest), and
    ///   gravity on the vertical axis.
    ///
    /// Never panics; malformed state degrades to a no-op.
    pub fn update(&mut self, now: f64, env: &FireworksEnvironment) -> Vec2 {
        let Some(last) = self.last_update_at else {
            self.last_update_at = Some(now);
            return self.position;
        };

        let dt = (now - last) as f32;
        if dt <= 0.0 {
            return self.position;
        }

        let prev_velocity = self.velocity;
        let moved = Vec2::new(
            kinematics::displacement(prev_velocity.x, dt, self.acceleration.x),
            kinematics::displacement(prev_velocity.y, dt, self.acceleration.y),
        );

        self.position += moved;
        self.velocity = Vec2::new(kinematics::speed(moved.x, dt), kinematics::speed(moved.y, dt));

        let drag = kinematics::drag_acceleration(
            env.fluid_density,
            self.drag_coefficient,
            self.cross_section_area,
            prev_velocity,
            self.mass,
        );
        self.acceleration = drag + self.thrust_acceleration() + env.gravity;
        self.last_update_at = Some(now);

        self.position
    }

    /// Acceleration contributed by thrust, directed along the current
    /// velocity vector.
    ///
    /// A body at rest has no thrust direction, so this returns zero there,
    /// matching the drag-at-rest convention. Bodies without the thrust
    /// capability always return zero.
    pub fn thrust_acceleration(&self) -> Vec2 {
        let Some(newtons) = self.thrust else {
            return Vec2::ZERO;
        };
        let speed = self.velocity.length();
        if speed == 0.0 {
            return Vec2::ZERO;
        }
        (self.velocity / speed) * (newtons / self.mass)
    }

    /// True when any physical field has gone non-finite.
    pub fn is_rogue(&self) -> bool {
        !(self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite())
    }
}

/// A launched projectile flying toward a target point.
///
/// Shells are range-triggered: detonation fires once the straight-line
/// displacement from the launch point reaches the launch-to-target distance,
/// not when the shell is near the target. A shell blown sideways still
/// detonates once it has covered that much ground; this matches the
/// display's original behavior and is kept deliberately.
///
/// # Fields
/// * `launched_from` - Launch position, frozen at creation (m)
/// * `target` - Candidate detonation point (m)
/// * `detonated` - Monotonic once-only flag guarding the burst
/// * `color` - Cosmetic tag, inherited by every star of the burst
#[derive(Component, Reflect, Clone, Debug)]
#[reflect(Component)]
pub struct Shell {
    /// Where the shell was launched from (m)
    pub launched_from: Vec2,
    /// Candidate detonation point (m)
    pub target: Vec2,
    /// Set exactly once when the burst fires
    pub detonated: bool,
    /// Burst color, propagated to child stars
    pub color: Color,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            launched_from: Vec2::ZERO,
            target: Vec2::new(0.0, MIN_TARGET_DISTANCE),
            detonated: false,
            color: Color::WHITE,
        }
    }
}

impl Shell {
    /// Creates a shell aimed from `launched_from` at `target`.
    ///
    /// # Errors
    /// [`LaunchError::TargetTooClose`] when the target is within
    /// [`MIN_TARGET_DISTANCE`] of the launcher, which would leave the launch
    /// direction undefined.
    pub fn aimed(launched_from: Vec2, target: Vec2, color: Color) -> Result<Self, LaunchError> {
        let distance = launched_from.distance(target);
        if distance < MIN_TARGET_DISTANCE {
            return Err(LaunchError::TargetTooClose {
                distance,
                minimum: MIN_TARGET_DISTANCE,
            });
        }
        Ok(Self {
            launched_from,
            target,
            detonated: false,
            color,
        })
    }

    /// Launch acceleration: the unit launch-to-target vector scaled by
    /// `thrust / mass`.
    ///
    /// The shell starts at rest, so the usual thrust-along-velocity rule
    /// would never get it moving; this seeds the first step instead.
    /// [`Shell::aimed`] has already rejected coincident points, so the
    /// direction is well defined.
    pub fn initial_acceleration(launched_from: Vec2, target: Vec2, mass: f32, thrust: f32) -> Vec2 {
        (target - launched_from).normalize() * (thrust / mass)
    }

    /// Straight-line displacement covered since launch.
    pub fn displacement_from_launch(&self, position: Vec2) -> f32 {
        self.launched_from.distance(position)
    }

    /// Straight-line displacement from launch point to target.
    pub fn displacement_to_target(&self) -> f32 {
        self.launched_from.distance(self.target)
    }

    /// Range trigger: has the shell covered at least the launch-to-target
    /// distance?
    pub fn should_detonate(&self, position: Vec2) -> bool {
        self.displacement_from_launch(position) >= self.displacement_to_target()
    }
}

/// A burst particle with a finite burn duration.
///
/// Stars are purely ballistic (drag plus gravity, no thrust) and never spawn
/// children. Decay is derived from the clock rather than stored: a star is
/// decayed once `now - spawned_at > duration`.
#[derive(Component, Reflect, Clone)]
#[reflect(Component)]
pub struct Star {
    /// Burn duration in seconds, drawn once at creation
    pub duration: f32,
    /// Color inherited from the parent shell at construction; no other
    /// reference to the parent is retained
    pub color: Color,
}

impl Default for Star {
    fn default() -> Self {
        Self {
            duration: 2.5,
            color: Color::WHITE,
        }
    }
}

impl Star {
    /// Whether the star has burned out.
    ///
    /// False exactly at `spawned_at`, true strictly after
    /// `spawned_at + duration`.
    pub fn is_decayed(&self, now: f64, spawned_at: f64) -> bool {
        now - spawned_at > f64::from(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> FireworksEnvironment {
        FireworksEnvironment::default()
    }

    #[test]
    fn rejects_non_positive_mass() {
        assert_eq!(
            Body::new(Vec2::ZERO, 0.0).unwrap_err(),
            LaunchError::InvalidMass(0.0)
        );
        assert!(Body::new(Vec2::ZERO, -1.0).is_err());
        assert!(Body::new(Vec2::ZERO, f32::NAN).is_err());
        assert!(Body::new(Vec2::ZERO, 5.0).is_ok());
    }

    #[test]
    fn first_update_only_establishes_baseline() {
        let mut body = Body::new(Vec2::new(10.0, 20.0), 1.0)
            .unwrap()
            .with_velocity(Vec2::new(50.0, 50.0));

        let pos = body.update(123.0, &env());

        assert_eq!(pos, Vec2::new(10.0, 20.0));
        assert_eq!(body.position, Vec2::new(10.0, 20.0));
        assert_eq!(body.last_update_at, Some(123.0));
    }

    #[test]
    fn second_update_integrates_motion() {
        let mut body = Body::new(Vec2::ZERO, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(10.0, 0.0));
        body.update(0.0, &env());
        body.update(1.0, &env());

        assert!((body.position.x - 10.0).abs() < 1e-4);
        // Gravity picked up for the next step
        assert!(body.acceleration.y < 0.0);
    }

    #[test]
    fn non_increasing_clock_is_a_noop() {
        let mut body = Body::new(Vec2::ZERO, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(10.0, 0.0));
        body.update(5.0, &env());
        let before = body.position;

        body.update(5.0, &env());
        body.update(4.0, &env());

        assert_eq!(body.position, before);
        assert_eq!(body.last_update_at, Some(5.0));
    }

    #[test]
    fn velocity_rederived_from_realized_displacement() {
        let mut body = Body::new(Vec2::ZERO, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(4.0, 0.0))
            .with_acceleration(Vec2::new(2.0, 0.0));
        body.update(0.0, &env());
        body.update(1.0, &env());

        // displacement = 4 + 0.5*2 = 5, so speed = 5 (not v + a*t = 6)
        assert!((body.velocity.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn thrust_undefined_at_rest() {
        let body = Body::new(Vec2::ZERO, 2.0).unwrap().with_thrust(100.0);
        assert_eq!(body.thrust_acceleration(), Vec2::ZERO);
    }

    #[test]
    fn thrust_follows_velocity_direction() {
        let body = Body::new(Vec2::ZERO, 2.0)
            .unwrap()
            .with_velocity(Vec2::new(0.0, 10.0))
            .with_thrust(100.0);
        let a = body.thrust_acceleration();

        assert!((a.y - 50.0).abs() < 1e-4);
        assert_eq!(a.x, 0.0);
    }

    #[test]
    fn stationary_star_sees_gravity_only() {
        // Degenerate velocity draw: must not divide by zero in drag
        let mut body = Body::new(Vec2::new(40.0, 30.0), 0.05).unwrap();
        body.update(0.0, &env());
        body.update(1.0 / 60.0, &env());

        assert!(!body.is_rogue());
        assert_eq!(body.acceleration, env().gravity);
    }

    #[test]
    fn shell_rejects_coincident_target() {
        let launch = Vec2::new(64.0, 0.0);
        let err = Shell::aimed(launch, launch + Vec2::new(0.5, 0.0), Color::WHITE).unwrap_err();
        assert!(matches!(err, LaunchError::TargetTooClose { .. }));

        assert!(Shell::aimed(launch, launch + Vec2::new(0.0, 2.0), Color::WHITE).is_ok());
    }

    #[test]
    fn initial_acceleration_points_at_target() {
        let a = Shell::initial_acceleration(Vec2::ZERO, Vec2::new(0.0, 36.0), 5.0, 100.0);
        assert!((a.y - 20.0).abs() < 1e-4);
        assert_eq!(a.x, 0.0);
    }

    #[test]
    fn range_trigger_ignores_direction() {
        let shell = Shell::aimed(Vec2::ZERO, Vec2::new(0.0, 10.0), Color::WHITE).unwrap();

        assert!(!shell.should_detonate(Vec2::new(0.0, 9.9)));
        assert!(shell.should_detonate(Vec2::new(0.0, 10.0)));
        // Drifted sideways but covered the range: still detonates
        assert!(shell.should_detonate(Vec2::new(10.0, 0.5)));
    }

    #[test]
    fn star_decay_boundary() {
        let star = Star {
            duration: 2.5,
            color: Color::WHITE,
        };

        assert!(!star.is_decayed(100.0, 100.0));
        assert!(!star.is_decayed(102.5, 100.0));
        assert!(star.is_decayed(102.5001, 100.0));
    }

    #[test]
    fn spawn_marks_once() {
        let mut body = Body::new(Vec2::ZERO, 1.0).unwrap();
        body.spawn(7.0);
        body.spawn(9.0);

        assert_eq!(body.spawned_at, Some(7.0));
        assert!(!body.spawned_before(7.0));
        assert!(body.spawned_before(7.1));
    }
}
