//! VFX system - draw-command emission and trail fade.
//!
//! The core owns the *timing* of rendering, not the rendering itself: one
//! particle command per live body and exactly one fade per tick, emitted
//! after all entity updates. A host renderer consumes [`DrawCommand`]
//! messages and does the actual compositing.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::components::{Body, Shell, Star};
use crate::events::DrawCommand;
use crate::resources::{FireworksConfig, Viewport};

/// Emits draw requests for every live body, then the per-tick trail fade.
///
/// Positions are mapped to canvas space here, vertical flip included;
/// simulation coordinates never cross this boundary. The fade is last so
/// the renderer composites it over the particles drawn in the previous
/// frame, producing comet-trail persistence.
pub fn emit_draw_commands(
    config: Res<FireworksConfig>,
    viewport: Res<Viewport>,
    mut draws: MessageWriter<DrawCommand>,
    shells: Query<(&Body, &Shell)>,
    stars: Query<(&Body, &Star)>,
) {
    for (body, shell) in shells.iter() {
        draws.write(DrawCommand::Particle {
            position_px: viewport.to_canvas(body.position),
            radius_px: config.particle_radius_px,
            color: shell.color,
        });
    }

    for (body, star) in stars.iter() {
        draws.write(DrawCommand::Particle {
            position_px: viewport.to_canvas(body.position),
            radius_px: config.particle_radius_px,
            color: star.color,
        });
    }

    draws.write(DrawCommand::Fade {
        alpha: config.trail_alpha,
    });
}
