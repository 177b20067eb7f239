//! Lifecycle systems - detonation, star decay, and rogue-body cleanup.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::prelude::*;
use rand_distr::UnitCircle;

use crate::components::{Body, Shell, Star};
use crate::events::DetonationEvent;
use crate::resources::{FireworksConfig, SimClock, SimRng};

/// Builds one burst star at the detonation point.
///
/// Velocity is a uniform direction over the full circle times a uniform
/// magnitude from the configured range. The wide magnitude range is a
/// stylistic choice: slow stars read as flying toward the camera, giving a
/// flat 2D burst a pseudo-3D look. Duration is drawn once; no thrust.
///
/// Star mass comes from config and is validated positive there at display
/// setup, so construction cannot fail here in practice; a degenerate
/// configured mass falls back to skipping the star.
pub fn star_bundle(
    config: &FireworksConfig,
    rng: &mut StdRng,
    position: Vec2,
    color: Color,
    now: f64,
) -> Option<(Star, Body)> {
    let [dx, dy]: [f32; 2] = UnitCircle.sample(rng);
    let speed = rng.random_range(config.star_speed_min..config.star_speed_max);
    let duration = rng.random_range(config.star_duration_min..config.star_duration_max);

    let mut body = Body::new(position, config.star_mass)
        .ok()?
        .with_velocity(Vec2::new(dx, dy) * speed)
        .with_drag(config.star_drag_coefficient)
        .with_cross_section(config.star_cross_section);
    body.spawn(now);

    Some((Star { duration, color }, body))
}

/// Detonates shells that have covered their launch-to-target range.
///
/// The trigger is cumulative straight-line displacement from the launcher
/// reaching the launcher-to-target distance; a shell that drifted off the
/// direct line still detonates once it has flown that far. The burst fires
/// exactly once per shell: the `detonated` flag guards re-entry, and the
/// shell leaves the world the same frame its stars are enqueued.
///
/// Removal goes through deferred `Commands`, so the scan itself visits every
/// live shell exactly once regardless of how many detonate this tick.
pub fn detonate_spent_shells(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<FireworksConfig>,
    mut rng: ResMut<SimRng>,
    mut detonations: MessageWriter<DetonationEvent>,
    mut shells: Query<(Entity, &Body, &mut Shell)>,
) {
    for (entity, body, mut shell) in shells.iter_mut() {
        if !shell.should_detonate(body.position) {
            continue;
        }

        if !shell.detonated {
            shell.detonated = true;

            let mut spawned = 0;
            for _ in 0..config.stars_per_shell {
                if let Some(bundle) =
                    star_bundle(&config, &mut rng.0, body.position, shell.color, clock.now)
                {
                    commands.spawn(bundle);
                    spawned += 1;
                }
            }

            detonations.write(DetonationEvent {
                position: body.position,
                color: shell.color,
                stars: spawned,
            });
        }

        commands.entity(entity).despawn();
    }
}

/// Removes stars whose burn duration has elapsed.
pub fn decay_stars(
    mut commands: Commands,
    clock: Res<SimClock>,
    stars: Query<(Entity, &Body, &Star)>,
) {
    for (entity, body, star) in stars.iter() {
        let Some(spawned_at) = body.spawned_at else {
            continue;
        };
        if star.is_decayed(clock.now, spawned_at) {
            commands.entity(entity).despawn();
        }
    }
}

/// Removes any body whose physical state has gone non-finite.
///
/// The loop must never stop ticking because of a single malformed entity;
/// construction validation should make this unreachable, and if it ever
/// fires the entity simply vanishes from the display.
pub fn cleanup_rogue_bodies(mut commands: Commands, bodies: Query<(Entity, &Body)>) {
    for (entity, body) in bodies.iter() {
        if body.is_rogue() {
            warn!(
                "removing rogue body at {:?} with velocity {:?}",
                body.position, body.velocity
            );
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn star_bundles_respect_configured_ranges() {
        let config = FireworksConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let origin = Vec2::new(64.0, 36.0);

        for _ in 0..200 {
            let (star, body) = star_bundle(&config, &mut rng, origin, Color::WHITE, 5.0).unwrap();

            let speed = body.velocity.length();
            assert!(speed >= config.star_speed_min - 1e-3);
            assert!(speed < config.star_speed_max + 1e-3);
            assert!(star.duration >= config.star_duration_min);
            assert!(star.duration < config.star_duration_max);
            assert_eq!(body.position, origin);
            assert_eq!(body.thrust, None);
            assert_eq!(body.spawned_at, Some(5.0));
        }
    }

    #[test]
    fn star_bundle_skips_degenerate_mass() {
        let config = FireworksConfig {
            star_mass: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        assert!(star_bundle(&config, &mut rng, Vec2::ZERO, Color::WHITE, 0.0).is_none());
    }

    #[test]
    fn burst_directions_cover_the_circle() {
        let config = FireworksConfig::default();
        let mut rng = StdRng::seed_from_u64(123);

        let mut quadrants = [false; 4];
        for _ in 0..200 {
            let (_, body) = star_bundle(&config, &mut rng, Vec2::ZERO, Color::WHITE, 0.0).unwrap();
            let v = body.velocity;
            let quadrant = match (v.x >= 0.0, v.y >= 0.0) {
                (true, true) => 0,
                (false, true) => 1,
                (false, false) => 2,
                (true, false) => 3,
            };
            quadrants[quadrant] = true;
        }

        assert!(quadrants.iter().all(|&hit| hit));
    }
}
