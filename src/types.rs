//! Common types for the fireworks simulation.

use bevy::prelude::*;
use rand::prelude::*;
use thiserror::Error;

/// Reasons a shell or star is rejected before it can enter the active world.
///
/// These are configuration errors in the sense of the construction contract:
/// the scheduler's own generation ranges never produce them, but anything
/// arriving from the host (manual targets, custom configs) is validated and
/// rejected here rather than letting a degenerate body poison the frame loop.
#[derive(Debug, Error, PartialEq)]
pub enum LaunchError {
    /// Mass must be strictly positive for `F = m*a` to be solvable.
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    /// A target coincident with (or nearly coincident with) the launcher
    /// leaves the launch direction undefined.
    #[error("target is {distance:.3} m from the launcher, minimum is {minimum} m")]
    TargetTooClose { distance: f32, minimum: f32 },
}

/// Minimum launcher-to-target separation in meters.
///
/// Below this the unit launch vector is numerically meaningless.
pub const MIN_TARGET_DISTANCE: f32 = 1.0;

/// Pick a cosmetic shell color from the display palette.
///
/// Chosen once at shell creation and propagated to every star of its burst.
pub fn random_shell_color(rng: &mut StdRng) -> Color {
    let palette = [
        Color::srgb(1.0, 0.35, 0.35),  // red
        Color::srgb(1.0, 0.65, 0.25),  // orange
        Color::srgb(1.0, 0.95, 0.45),  // gold
        Color::srgb(0.45, 1.0, 0.5),   // green
        Color::srgb(0.4, 0.75, 1.0),   // blue
        Color::srgb(0.75, 0.5, 1.0),   // violet
        Color::srgb(1.0, 0.55, 0.85),  // pink
        Color::srgb(0.95, 0.95, 0.95), // white
    ];

    palette[rng.random_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn palette_pick_is_deterministic_for_a_seed() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        assert_eq!(random_shell_color(&mut a), random_shell_color(&mut b));
    }

    #[test]
    fn launch_error_formats_distance() {
        let err = LaunchError::TargetTooClose {
            distance: 0.25,
            minimum: MIN_TARGET_DISTANCE,
        };
        assert!(err.to_string().contains("0.250"));
    }
}
