//! Launch scheduler systems - manual, fanfare, and idle spawn sources.
//!
//! All three sources funnel into the same place: build a shell bundle,
//! validate it, spawn it. Scheduling state lives on the
//! [`LaunchScheduler`] resource and is advanced once per tick, so spawns
//! from different sources can never interleave mid-operation.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::prelude::*;

use crate::components::{Body, Shell};
use crate::events::{FanfareEvent, LaunchEvent};
use crate::resources::{FanfareState, FireworksConfig, LaunchScheduler, SimClock, SimRng, Viewport};
use crate::types::{random_shell_color, LaunchError};

/// Builds a complete shell bundle aimed at `target`.
///
/// The launch position is recomputed from current viewport geometry, the
/// mass is drawn from the configured range, and the initial acceleration is
/// seeded toward the target (the shell starts at rest, so thrust alone
/// would never get it moving). The body is marked live at `now`.
///
/// # Errors
/// Propagates construction rejections ([`LaunchError`]) for targets too
/// close to the launcher or degenerate configured masses. Callers log and
/// drop these; a rejected shell never enters the world.
pub fn shell_bundle(
    config: &FireworksConfig,
    viewport: &Viewport,
    rng: &mut StdRng,
    target: Vec2,
    now: f64,
) -> Result<(Shell, Body), LaunchError> {
    let launch = viewport.launcher_position();
    let shell = Shell::aimed(launch, target, random_shell_color(rng))?;

    let mut mass = config.shell_mass_min;
    if config.shell_mass_jitter > 0.0 {
        mass += rng.random_range(0.0..config.shell_mass_jitter);
    }

    let mut body = Body::new(launch, mass)?
        .with_drag(config.shell_drag_coefficient)
        .with_cross_section(config.shell_cross_section)
        .with_thrust(config.shell_thrust)
        .with_acceleration(Shell::initial_acceleration(
            launch,
            target,
            mass,
            config.shell_thrust,
        ));
    body.spawn(now);

    Ok((shell, body))
}

/// Draws a random target uniformly over the upper half of the play area.
pub fn random_target(viewport: &Viewport, rng: &mut StdRng) -> Vec2 {
    let width = viewport.width_meters();
    let height = viewport.height_meters();
    Vec2::new(
        rng.random_range(0.0..width),
        rng.random_range(height / 2.0..height),
    )
}

/// Spawns one shell per pending manual launch request.
///
/// A manual spawn also resets the idle timer baseline: user action counts
/// as a spawn for idle-suppression purposes.
pub fn process_launch_requests(
    mut commands: Commands,
    mut requests: MessageReader<LaunchEvent>,
    clock: Res<SimClock>,
    config: Res<FireworksConfig>,
    viewport: Res<Viewport>,
    mut rng: ResMut<SimRng>,
    mut scheduler: ResMut<LaunchScheduler>,
) {
    for request in requests.read() {
        match shell_bundle(&config, &viewport, &mut rng.0, request.target, clock.now) {
            Ok(bundle) => {
                commands.spawn(bundle);
                scheduler.idle_baseline = Some(clock.now);
            }
            Err(err) => warn!("manual launch rejected: {err}"),
        }
    }
}

/// Activates and advances the fanfare burst.
///
/// Activation is re-entrant-guarded: requests arriving while a fanfare is
/// running are dropped. The burst itself is polled state, advanced here once
/// per tick; it fires at the configured cadence until its deadline, then
/// clears its own flag, so no recurring timer can leak past the window.
pub fn process_fanfare(
    mut commands: Commands,
    mut requests: MessageReader<FanfareEvent>,
    clock: Res<SimClock>,
    config: Res<FireworksConfig>,
    viewport: Res<Viewport>,
    mut rng: ResMut<SimRng>,
    mut scheduler: ResMut<LaunchScheduler>,
) {
    let requested = requests.read().count() > 0;
    if requested {
        if scheduler.fanfare.is_none() {
            debug!("fanfare started for {:.1}s", config.fanfare_duration);
            scheduler.fanfare = Some(FanfareState {
                ends_at: clock.now + config.fanfare_duration,
                next_fire_at: clock.now,
            });
        } else {
            debug!("fanfare already running, request ignored");
        }
    }

    let Some(mut state) = scheduler.fanfare.take() else {
        return;
    };

    if clock.now >= state.ends_at {
        debug!("fanfare complete");
        return;
    }

    let interval = 1.0 / config.fanfare_rate;
    while state.next_fire_at <= clock.now {
        let target = random_target(&viewport, &mut rng.0);
        match shell_bundle(&config, &viewport, &mut rng.0, target, clock.now) {
            Ok(bundle) => {
                commands.spawn(bundle);
            }
            Err(err) => warn!("fanfare launch rejected: {err}"),
        }
        state.next_fire_at += interval;
    }

    scheduler.fanfare = Some(state);
}

/// Background spawn cadence keeping the sky busy between user launches.
///
/// Gated on the measured framerate: below tolerance the display is already
/// struggling, so no new work is added. When the elapsed time since the
/// last spawn exceeds the current period, one randomly targeted shell goes
/// up and the period is redrawn from the configured range.
pub fn idle_auto_spawn(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<FireworksConfig>,
    viewport: Res<Viewport>,
    mut rng: ResMut<SimRng>,
    mut scheduler: ResMut<LaunchScheduler>,
) {
    if clock.framerate <= config.framerate_tolerance {
        return;
    }

    if scheduler.idle_period <= 0.0 {
        scheduler.idle_period = rng
            .0
            .random_range(config.idle_period_min..config.idle_period_max);
    }

    let now = clock.now;
    let baseline = *scheduler.idle_baseline.get_or_insert(now);
    if now - baseline <= scheduler.idle_period {
        return;
    }

    let target = random_target(&viewport, &mut rng.0);
    match shell_bundle(&config, &viewport, &mut rng.0, target, now) {
        Ok(bundle) => {
            commands.spawn(bundle);
        }
        Err(err) => warn!("idle launch rejected: {err}"),
    }

    scheduler.idle_period = rng
        .0
        .random_range(config.idle_period_min..config.idle_period_max);
    scheduler.idle_baseline = Some(now);
}
