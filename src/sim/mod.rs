//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only
//! - Seeded RNG only
//! - Stable iteration order (characters by index, walls by layout order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod geometry;
pub mod layout;
pub mod observation;
pub mod probe;
pub mod state;
pub mod tick;

pub use entity::{Action, Character, CharacterShape, ObjectKind, PolygonalObject, Wall};
pub use geometry::{
    closest_point_on_boundary, direction_vector, perpendicular, point_in_polygon, signed_angle,
};
pub use layout::Layout;
pub use observation::{Observation, ObservationEntry, observe, observe_all};
pub use probe::ray_probe;
pub use state::Arena;
pub use tick::{StepOutcome, reset, snapshot, tick, tick_codes};
