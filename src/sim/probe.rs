//! Ray-probe telemetry
//!
//! Marches evenly spread rays out from a character until each one enters
//! another object, runs out of steps, or would leave the world. Used for
//! debugging and visualization only; rewards never depend on it.

use glam::Vec2;

use super::geometry::direction_vector;
use super::state::Arena;
use crate::in_bounds;

/// End points of every probe ray for character `index`
///
/// Ray `k` points along `heading + k * 2π / probe_rays`. Returns an empty list
/// if there is no such character.
pub fn ray_probe(arena: &Arena, index: usize) -> Vec<Vec2> {
    let Some(me) = arena.characters.get(index) else {
        return Vec::new();
    };

    let config = &arena.config;
    let bound = config.world_bound;
    let spacing = std::f32::consts::TAU / config.probe_rays as f32;

    let hits: Vec<Vec2> = (0..config.probe_rays)
        .map(|k| {
            let step = direction_vector(me.heading + k as f32 * spacing) * config.probe_step;
            let mut point = (me.position + step).clamp(Vec2::ZERO, Vec2::splat(bound));

            let mut steps = 0;
            while steps < config.probe_max_steps && !arena.is_point_in_any(point, Some(index)) {
                let next = point + step;
                if !in_bounds(next, bound) {
                    break;
                }
                point = next;
                steps += 1;
            }
            point
        })
        .collect();

    log::trace!("probe from character {}: {:?}", index, hits);
    hits
}
