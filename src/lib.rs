//! Polyarena - A multi-agent 2D arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, ticks, observations)
//! - `config`: Externally settable arena constants
//! - `policy`: Seam for external decision-makers
//! - `error`: Configuration errors raised at the call boundary

pub mod config;
pub mod error;
pub mod policy;
pub mod sim;

pub use config::ArenaConfig;
pub use error::ArenaError;

use glam::Vec2;

/// Default arena constants
pub mod consts {
    use std::f32::consts::PI;

    /// Team count
    pub const TEAMS: usize = 4;
    /// Largest team count representable by `u8` team ids
    pub const MAX_TEAMS: usize = u8::MAX as usize + 1;
    /// Characters spawned per team
    pub const CHARACTERS_PER_TEAM: usize = 2;

    /// World bound B: the arena is the closed square [0, B] x [0, B]
    pub const WORLD_BOUND: f32 = 17.0;

    /// Speed change per accelerate/brake action (units/tick)
    pub const SPEED_INCREMENT: f32 = 0.001;
    /// Heading change per rotate action
    pub const ROTATION_INCREMENT: f32 = PI / 100.0;
    /// Reward assessed on the tick a character collides
    pub const COLLISION_PENALTY: i32 = -10;

    /// Maximum entries in one character's observation
    pub const OBSERVATION_CAP: usize = 10;

    /// Ray-probe march length per step
    pub const PROBE_STEP: f32 = 0.1;
    /// Ray-probe step limit per ray
    pub const PROBE_MAX_STEPS: u32 = 10;
    /// Rays per probe (evenly spread around the heading)
    pub const PROBE_RAYS: usize = 8;

    /// Spawn speed
    pub const INITIAL_SPEED: f32 = 0.01;
    pub const INITIAL_AMMO: u32 = 1000;

    /// Character shape: nose tip distance along heading
    pub const NOSE_LENGTH: f32 = 0.4;
    /// Character shape: base corner offset along the perpendicular
    pub const BASE_HALF_WIDTH: f32 = 0.1;

    /// Layout cell marking a wall
    pub const WALL_MARKER: char = 'X';
}

/// Wrap a heading into [0, 2π)
#[inline]
pub fn wrap_heading(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// True if `p` lies in the closed square [0, bound] x [0, bound]
#[inline]
pub fn in_bounds(p: Vec2, bound: f32) -> bool {
    (0.0..=bound).contains(&p.x) && (0.0..=bound).contains(&p.y)
}
