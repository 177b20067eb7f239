use bevy::prelude::*;

use crate::components::{Body, Shell};
use crate::resources::FireworksConfig;

/// Draw debug gizmos for simulated bodies.
///
/// Draws positions, velocity vectors, and shell target markers in
/// simulation space.
pub fn draw_body_debug(
    mut gizmos: Gizmos,
    bodies: Query<(&Body, Option<&Shell>)>,
    config: Res<FireworksConfig>,
) {
    if !config.debug_draw {
        return;
    }

    for (body, shell) in bodies.iter() {
        gizmos.circle_2d(body.position, 0.3, Color::srgb(1.0, 0.0, 0.0));

        // Velocity vector, scaled down for visibility
        let end = body.position + body.velocity * 0.1;
        gizmos.line_2d(body.position, end, Color::srgb(0.0, 1.0, 0.0));

        if let Some(shell) = shell {
            gizmos.circle_2d(shell.target, 0.5, Color::srgb(1.0, 1.0, 0.0));
        }
    }
}
