//! Systems module - all ECS systems for the fireworks simulation.

pub mod clock;
pub mod debug;
pub mod kinematics;
pub mod logic;
pub mod scheduler;
pub mod vfx;
