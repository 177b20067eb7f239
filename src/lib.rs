//! # Bevy Firework Dynamics
//!
//! Real-time 2D fireworks display simulation plugin for Bevy 0.18.
//!
//! ## Features
//! - Thrust-propelled shells launched toward user-aimed or random targets
//! - Range-triggered detonation into 100-star bursts under drag and gravity
//! - Framerate-aware launch scheduling: manual, timed fanfare, idle cadence
//! - Simulation runs in meters with an explicit canvas mapping, so hosts
//!   render from `DrawCommand` messages without touching physics state
//! - Headless-friendly: every system runs without a renderer
//!
//! ## Quick Start
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_firework_dynamics::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(FireworksPluginGroup)
//!         .run();
//! }
//! ```

pub mod components;
pub mod events;
pub mod kinematics;
pub mod resources;
pub mod systems;
pub mod types;


pub mod prelude {
    pub use crate::components::*;
    pub use crate::events::*;
    pub use crate::resources::*;
    pub use crate::types::*;
    pub use crate::FireworksPluginGroup;
    pub use crate::FireworksSet;
    pub use crate::{FireworksCorePlugin, FireworksSchedulerPlugin, FireworksVfxPlugin};
}

use bevy::prelude::*;

/// Tick phases of the simulation loop, in execution order.
///
/// One tick measures time, lets the scheduler enqueue shells, resolves
/// detonations, advances motion, retires decayed or broken bodies, and only
/// then asks the host to draw. Plugins hang their systems on these sets so
/// the order holds across plugin boundaries.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FireworksSet {
    /// Frame time measurement and framerate estimate
    Clock,
    /// Launch sources: manual, fanfare, idle
    Launch,
    /// Range-triggered detonation and burst spawning
    Lifecycle,
    /// Per-body motion integration
    Motion,
    /// Star decay and rogue-body cleanup
    Decay,
    /// Draw-command emission, fade last
    Draw,
}

/// Main plugin group bundling the whole display.
///
/// Adds the core simulation, the launch scheduler, draw-command emission,
/// and debug overlays. Headless hosts typically add `FireworksCorePlugin`
/// and `FireworksSchedulerPlugin` individually and skip the rest.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_firework_dynamics::prelude::*;
///
/// fn main() {
///     App::new()
///         .add_plugins(DefaultPlugins)
///         .add_plugins(FireworksPluginGroup)
///         .run();
/// }
/// ```
#[derive(Default)]
pub struct FireworksPluginGroup;

impl PluginGroup for FireworksPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(FireworksCorePlugin)
            .add(FireworksSchedulerPlugin)
            .add(FireworksVfxPlugin)
            .add(FireworksDebugPlugin)
    }
}

/// Core simulation plugin: clock, detonation lifecycle, and motion.
///
/// # Systems
/// - `clock::tick` - frame time measurement and framerate estimate
/// - `logic::detonate_spent_shells` - range trigger, burst spawn, removal
/// - `kinematics::update_shell_motion` - shell integration (framerate-gated
///   for freshly spawned shells)
/// - `kinematics::update_star_motion` - star integration, never gated
/// - `logic::decay_stars` - removal after the burn duration elapses
/// - `logic::cleanup_rogue_bodies` - defense against non-finite state
pub struct FireworksCorePlugin;

impl Plugin for FireworksCorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::Body>()
            .register_type::<components::Shell>()
            .register_type::<components::Star>()
            .register_type::<resources::FireworksEnvironment>()
            .register_type::<resources::FireworksConfig>()
            .register_type::<resources::Viewport>()
            .register_type::<resources::SimClock>()
            .init_resource::<resources::FireworksEnvironment>()
            .init_resource::<resources::FireworksConfig>()
            .init_resource::<resources::Viewport>()
            .init_resource::<resources::SimClock>()
            .init_resource::<resources::SimRng>()
            .add_message::<events::DetonationEvent>()
            .configure_sets(
                Update,
                (
                    FireworksSet::Clock,
                    FireworksSet::Launch,
                    FireworksSet::Lifecycle,
                    FireworksSet::Motion,
                    FireworksSet::Decay,
                    FireworksSet::Draw,
                )
                    .chain(),
            )
            .add_systems(Update, systems::clock::tick.in_set(FireworksSet::Clock))
            .add_systems(
                Update,
                systems::logic::detonate_spent_shells.in_set(FireworksSet::Lifecycle),
            )
            .add_systems(
                Update,
                (
                    systems::kinematics::update_shell_motion,
                    systems::kinematics::update_star_motion,
                )
                    .chain()
                    .in_set(FireworksSet::Motion),
            )
            .add_systems(
                Update,
                (
                    systems::logic::decay_stars,
                    systems::logic::cleanup_rogue_bodies,
                )
                    .chain()
                    .in_set(FireworksSet::Decay),
            );
    }
}

/// Launch scheduler plugin: the three spawn sources.
///
/// # Systems
/// - `scheduler::process_launch_requests` - user-aimed launches
/// - `scheduler::process_fanfare` - timed burst of random launches
/// - `scheduler::idle_auto_spawn` - background cadence above the framerate
///   floor
pub struct FireworksSchedulerPlugin;

impl Plugin for FireworksSchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<resources::LaunchScheduler>()
            .init_resource::<resources::LaunchScheduler>()
            .add_message::<events::LaunchEvent>()
            .add_message::<events::FanfareEvent>()
            .add_systems(
                Update,
                (
                    systems::scheduler::process_launch_requests,
                    systems::scheduler::process_fanfare,
                    systems::scheduler::idle_auto_spawn,
                )
                    .chain()
                    .in_set(FireworksSet::Launch),
            );
    }
}

/// VFX plugin: draw-command emission for a host renderer.
///
/// # Systems
/// - `vfx::emit_draw_commands` - one particle per live body, one fade per
///   tick, after all entity updates
pub struct FireworksVfxPlugin;

impl Plugin for FireworksVfxPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<events::DrawCommand>().add_systems(
            Update,
            systems::vfx::emit_draw_commands.in_set(FireworksSet::Draw),
        );
    }
}

/// Debug plugin for gizmo visualization of bodies and targets.
pub struct FireworksDebugPlugin;

impl Plugin for FireworksDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            systems::debug::draw_body_debug.after(FireworksSet::Draw),
        );
    }
}
