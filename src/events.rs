//! Events for the fireworks simulation.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of `Event`.
//!
//! These messages are the seams to the host: input arrives as
//! [`LaunchEvent`]/[`FanfareEvent`], rendering leaves as [`DrawCommand`],
//! and [`DetonationEvent`] lets the host hook audio or scoring on bursts.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::resources::Viewport;

/// Request to launch one shell at a user-chosen target.
///
/// The target is in simulation coordinates (meters, y up). Hosts holding a
/// pointer position in canvas space should go through
/// [`LaunchEvent::at_pixel`], which applies the viewport mapping including
/// the vertical flip.
///
/// A manual launch also resets the idle auto-spawn timer: user action counts
/// as a spawn for idle-suppression purposes.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_firework_dynamics::events::LaunchEvent;
/// use bevy_firework_dynamics::resources::Viewport;
///
/// let viewport = Viewport::default();
/// let from_click = LaunchEvent::at_pixel(Vec2::new(640.0, 180.0), &viewport);
/// let direct = LaunchEvent { target: Vec2::new(64.0, 54.0) };
/// assert!((from_click.target - direct.target).length() < 1e-3);
/// ```
#[derive(Message, Clone)]
pub struct LaunchEvent {
    /// Candidate detonation point in simulation space (m)
    pub target: Vec2,
}

impl LaunchEvent {
    /// Builds a launch request from a canvas-space pointer position.
    pub fn at_pixel(pixel: Vec2, viewport: &Viewport) -> Self {
        Self {
            target: viewport.from_canvas(pixel),
        }
    }
}

/// Request to start a fanfare: a timed burst of randomly targeted shells.
///
/// Re-entrant-guarded: a second event while a fanfare is running is a no-op.
#[derive(Message, Clone, Default)]
pub struct FanfareEvent;

/// Fired when a shell detonates into its star burst.
#[derive(Message, Clone)]
pub struct DetonationEvent {
    /// Detonation point in simulation space (m)
    pub position: Vec2,
    /// Burst color
    pub color: Color,
    /// Number of stars spawned
    pub stars: u32,
}

/// Rendering request emitted once per entity per tick, plus one fade.
///
/// The core never draws; it describes what to draw in canvas coordinates
/// and leaves compositing to the host. The `Fade` variant is the translucent
/// full-viewport clear that produces comet-trail persistence; exactly one is
/// emitted per tick, after all entity updates.
#[derive(Message, Clone)]
pub enum DrawCommand {
    /// Render one particle at a canvas-space position.
    Particle {
        /// Position in canvas space (px, y down)
        position_px: Vec2,
        /// Particle radius (px)
        radius_px: f32,
        /// Particle color
        color: Color,
    },
    /// Composite a translucent clear over the full viewport.
    Fade {
        /// Overlay alpha
        alpha: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_launch_applies_vertical_flip() {
        let viewport = Viewport::default();
        // A click at the top of the canvas aims at the top of the play area.
        let event = LaunchEvent::at_pixel(Vec2::new(0.0, 0.0), &viewport);
        assert!((event.target.y - viewport.height_meters()).abs() < 1e-3);
    }
}
