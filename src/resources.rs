//! Global resources for the fireworks simulation.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Global environment settings affecting every simulated body.
///
/// # Fields
/// * `gravity` - Gravity vector (m/s²); vertical-only by convention, the x
///   component stays zero
/// * `fluid_density` - Air density used by the drag equation (kg/m³)
#[derive(Resource, Reflect, Clone)]
#[reflect(Resource)]
pub struct FireworksEnvironment {
    /// Gravity vector (m/s²)
    pub gravity: Vec2,
    /// Air density affecting drag (kg/m³)
    pub fluid_density: f32,
}

impl Default for FireworksEnvironment {
    /// Earth-like defaults: 9.81 m/s² downward, sea-level air.
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            fluid_density: 1.225,
        }
    }
}

/// Tunable parameters for the whole display.
///
/// Defaults reproduce the reference display; hosts can serialize a preset
/// with serde and swap it in as a resource.
///
/// # Example
/// ```
/// use bevy_firework_dynamics::resources::FireworksConfig;
///
/// let config = FireworksConfig {
///     stars_per_shell: 150,
///     fanfare_duration: 6.0,
///     ..Default::default()
/// };
/// ```
#[derive(Resource, Reflect, Clone, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct FireworksConfig {
    /// Shell engine force (N)
    pub shell_thrust: f32,
    /// Minimum shell mass (kg)
    pub shell_mass_min: f32,
    /// Uniform jitter added on top of the minimum mass (kg)
    pub shell_mass_jitter: f32,
    /// Shell drag coefficient
    pub shell_drag_coefficient: f32,
    /// Shell cross-sectional area (m²)
    pub shell_cross_section: f32,
    /// Star mass (kg)
    pub star_mass: f32,
    /// Star drag coefficient
    pub star_drag_coefficient: f32,
    /// Star cross-sectional area (m²)
    pub star_cross_section: f32,
    /// Stars spawned per detonation
    pub stars_per_shell: u32,
    /// Minimum star burst speed (m/s)
    pub star_speed_min: f32,
    /// Maximum star burst speed (m/s), exclusive
    pub star_speed_max: f32,
    /// Minimum star burn duration (s)
    pub star_duration_min: f32,
    /// Maximum star burn duration (s), exclusive
    pub star_duration_max: f32,
    /// Framerate floor (fps) below which idle spawning pauses and freshly
    /// spawned shells defer their first motion
    pub framerate_tolerance: f64,
    /// Minimum idle auto-spawn period (s)
    pub idle_period_min: f64,
    /// Maximum idle auto-spawn period (s), exclusive
    pub idle_period_max: f64,
    /// Fanfare spawn cadence (shells per second)
    pub fanfare_rate: f64,
    /// Fanfare wall-clock duration (s)
    pub fanfare_duration: f64,
    /// Alpha of the per-tick fade overlay producing comet trails
    pub trail_alpha: f32,
    /// Radius of a rendered particle (px)
    pub particle_radius_px: f32,
    /// Enable gizmo overlays for body positions and velocities
    pub debug_draw: bool,
}

impl Default for FireworksConfig {
    /// Reference display tuning: 100 N shells around 5 kg bursting into
    /// 100 stars, 16/s fanfare for 4 s, idle cadence between 2 and 5 s.
    fn default() -> Self {
        Self {
            shell_thrust: 100.0,
            shell_mass_min: 5.0,
            shell_mass_jitter: 0.6,
            shell_drag_coefficient: 0.47,
            shell_cross_section: 0.01,
            star_mass: 0.05,
            star_drag_coefficient: 0.47,
            star_cross_section: 0.001,
            stars_per_shell: 100,
            star_speed_min: 3.0,
            star_speed_max: 100.0,
            star_duration_min: 2.5,
            star_duration_max: 3.0,
            framerate_tolerance: 15.0,
            idle_period_min: 2.0,
            idle_period_max: 5.0,
            fanfare_rate: 16.0,
            fanfare_duration: 4.0,
            trail_alpha: 0.1,
            particle_radius_px: 2.0,
            debug_draw: false,
        }
    }
}

/// Current viewport geometry and the simulation↔canvas mapping.
///
/// The core works in meters with the origin at the bottom-left; canvas
/// space is pixels with the origin at the top-left, so the vertical axis
/// flips on the way through. The mapping is a fixed meters-per-pixel scale,
/// recomputed from current geometry on every call so a resize needs no
/// cache invalidation.
#[derive(Resource, Reflect, Clone)]
#[reflect(Resource)]
pub struct Viewport {
    /// Canvas width (px)
    pub width_px: f32,
    /// Canvas height (px)
    pub height_px: f32,
    /// Scale constant (m per px)
    pub meters_per_pixel: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_px: 1280.0,
            height_px: 720.0,
            meters_per_pixel: 0.1,
        }
    }
}

impl Viewport {
    /// Play-area width in meters.
    pub fn width_meters(&self) -> f32 {
        self.width_px * self.meters_per_pixel
    }

    /// Play-area height in meters.
    pub fn height_meters(&self) -> f32 {
        self.height_px * self.meters_per_pixel
    }

    /// The launcher sits at the bottom-center of the play area.
    ///
    /// Derived from current geometry each call, never cached.
    pub fn launcher_position(&self) -> Vec2 {
        Vec2::new(self.width_meters() / 2.0, 0.0)
    }

    /// Maps a simulation-space point (meters, y up) to canvas space
    /// (pixels, y down).
    pub fn to_canvas(&self, sim: Vec2) -> Vec2 {
        Vec2::new(
            sim.x / self.meters_per_pixel,
            self.height_px - sim.y / self.meters_per_pixel,
        )
    }

    /// Inverse of [`Viewport::to_canvas`].
    pub fn from_canvas(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            px.x * self.meters_per_pixel,
            (self.height_px - px.y) * self.meters_per_pixel,
        )
    }
}

/// Per-frame clock and framerate estimate.
///
/// `now` is the external monotonic clock in seconds; `framerate` is derived
/// from consecutive tick spacing. The first tick only records a baseline and
/// leaves the rate untouched, as does a zero-length tick.
#[derive(Resource, Reflect, Clone, Default)]
#[reflect(Resource)]
pub struct SimClock {
    /// Clock reading of the current tick (s)
    pub now: f64,
    /// Clock reading of the previous tick, if any
    pub last_tick: Option<f64>,
    /// Measured frames per second; 0.0 until two ticks have been seen
    pub framerate: f64,
}

/// State of a running fanfare burst.
///
/// Explicit polled state rather than a detached recurring timer: the
/// scheduler system advances it once per tick, so burst spawns can never
/// interleave with the frame loop at sub-operation granularity.
#[derive(Reflect, Clone)]
pub struct FanfareState {
    /// Clock reading at which the burst self-terminates
    pub ends_at: f64,
    /// Clock reading of the next scheduled spawn
    pub next_fire_at: f64,
}

/// Launch scheduler state: the idle auto-spawn timer and any active fanfare.
#[derive(Resource, Reflect, Clone, Default)]
#[reflect(Resource)]
pub struct LaunchScheduler {
    /// Baseline for the idle timer; reset by every spawn, manual included
    pub idle_baseline: Option<f64>,
    /// Current idle period (s); redrawn from config range after each idle
    /// spawn, 0.0 until first armed
    pub idle_period: f64,
    /// Active fanfare, if one is running (at most one at a time)
    pub fanfare: Option<FanfareState>,
}

/// Random source for targets, masses, burst velocities, and colors.
///
/// Entropy-seeded by default; fixed seeds give reproducible displays and
/// deterministic tests.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

impl Default for SimRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl SimRng {
    /// Fixed-seed generator for reproducible simulations and tests.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}
