//! Motion systems - per-tick integration of shells and stars.

use bevy::prelude::*;

use crate::components::{Body, Shell, Star};
use crate::resources::{FireworksConfig, FireworksEnvironment, SimClock};

/// Advances every live shell by one integration step.
///
/// Load-shedding gate: when the measured framerate has fallen to or below
/// tolerance, shells spawned this very tick skip the step. Deferring a
/// fresh body's clock baseline avoids integrating a lag-induced jump the
/// moment the display recovers, while bodies already in flight keep moving
/// regardless of load. The asymmetry is intentional.
pub fn update_shell_motion(
    clock: Res<SimClock>,
    env: Res<FireworksEnvironment>,
    config: Res<FireworksConfig>,
    mut shells: Query<&mut Body, With<Shell>>,
) {
    for mut body in shells.iter_mut() {
        if clock.framerate > config.framerate_tolerance || body.spawned_before(clock.now) {
            body.update(clock.now, &env);
        }
    }
}

/// Advances every live star by one integration step.
///
/// No framerate gate here: once a star exists its decay clock must keep
/// running, or bursts would hang in the air under load.
pub fn update_star_motion(
    clock: Res<SimClock>,
    env: Res<FireworksEnvironment>,
    mut stars: Query<&mut Body, With<Star>>,
) {
    for mut body in stars.iter_mut() {
        body.update(clock.now, &env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_in_flight_climbs_tick_after_tick() {
        // Direct integration sanity check: a 100 N shell of ~5 kg launched
        // straight up gains altitude every step.
        let env = FireworksEnvironment::default();
        let launch = Vec2::new(64.0, 0.0);
        let mut body = Body::new(launch, 5.3)
            .unwrap()
            .with_drag(0.47)
            .with_cross_section(0.01)
            .with_thrust(100.0)
            .with_acceleration(Shell::initial_acceleration(
                launch,
                Vec2::new(64.0, 36.0),
                5.3,
                100.0,
            ));

        let mut now = 0.0;
        body.update(now, &env);
        let mut previous_altitude = body.position.y;
        for _ in 0..120 {
            now += 1.0 / 60.0;
            body.update(now, &env);
            assert!(body.position.y >= previous_altitude);
            previous_altitude = body.position.y;
        }

        assert!(body.position.y > 1.0);
        assert!(!body.is_rogue());
    }
}
