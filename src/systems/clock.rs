//! Frame clock system - per-tick time measurement and framerate estimate.

use bevy::prelude::*;

use crate::resources::SimClock;

/// Samples the external monotonic clock and derives the framerate.
///
/// Runs first in the tick. The first tick only records a baseline; a
/// zero-length tick keeps the previous rate rather than dividing by zero.
/// Everything downstream reads `clock.now` instead of re-querying time, so
/// one tick sees one consistent instant.
pub fn tick(time: Res<Time>, mut clock: ResMut<SimClock>) {
    let now = time.elapsed_secs_f64();

    if let Some(last) = clock.last_tick {
        let dt = now - last;
        if dt > 0.0 {
            clock.framerate = 1.0 / dt;
        }
    }

    clock.last_tick = Some(now);
    clock.now = now;
}
