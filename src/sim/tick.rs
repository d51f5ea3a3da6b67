//! Discrete simulation tick
//!
//! One tick consumes one action per character. All characters act and move
//! first; collisions are detected afterwards against the frozen
//! post-movement positions, so the result never depends on character order.
//!
//! Collision response only turns the character around and applies the
//! penalty. Positions are not corrected, so a character can stay overlapping
//! a wall (or outside the bounds) until its new heading carries it clear.

use serde::{Deserialize, Serialize};

use super::entity::Action;
use super::observation::{Observation, observe_all};
use super::state::Arena;
use crate::error::ArenaError;
use crate::in_bounds;

/// Everything a driver receives after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Per-character observations, in character order
    pub observations: Vec<Observation>,
    /// Per-character reward for this tick, in character order
    pub rewards: Vec<i32>,
}

impl StepOutcome {
    /// Indices of characters that were penalized this tick
    pub fn collided(&self) -> impl Iterator<Item = usize> + '_ {
        self.rewards
            .iter()
            .enumerate()
            .filter(|&(_, r)| *r != 0)
            .map(|(i, _)| i)
    }
}

/// Advance the arena by one tick
pub fn tick(arena: &mut Arena, actions: &[Action]) -> Result<StepOutcome, ArenaError> {
    if actions.len() != arena.characters.len() {
        return Err(ArenaError::ActionCountMismatch {
            expected: arena.characters.len(),
            found: actions.len(),
        });
    }

    // Act and move
    let steps = arena.action_steps();
    for (character, &action) in arena.characters.iter_mut().zip(actions) {
        character.apply_action(action, steps);
        character.integrate();
    }

    // Detect against frozen positions
    let hits: Vec<bool> = (0..arena.characters.len())
        .map(|i| is_colliding(arena, i))
        .collect();

    // Respond
    let penalty = arena.config.collision_penalty;
    let mut rewards = vec![0; arena.characters.len()];
    for (i, (character, &hit)) in arena.characters.iter_mut().zip(&hits).enumerate() {
        character.intersecting = hit;
        if hit {
            character.reverse();
            rewards[i] += penalty;
            log::debug!(
                "tick {}: character {} (team {}) collided at ({:.3}, {:.3})",
                arena.time_ticks + 1,
                i,
                character.team,
                character.position.x,
                character.position.y
            );
        }
    }

    arena.time_ticks += 1;

    Ok(StepOutcome {
        observations: observe_all(arena),
        rewards,
    })
}

/// Advance the arena by one tick from raw action codes
///
/// Every code is validated before the arena is touched.
pub fn tick_codes(arena: &mut Arena, codes: &[u8]) -> Result<StepOutcome, ArenaError> {
    let actions = codes
        .iter()
        .map(|&code| Action::try_from(code))
        .collect::<Result<Vec<_>, _>>()?;
    tick(arena, &actions)
}

/// Respawn every character (walls stay) and report the starting observations
pub fn reset(arena: &mut Arena) -> StepOutcome {
    arena.spawn_characters();
    arena.time_ticks = 0;
    log::info!(
        "Arena reset: {} characters respawned (stream {})",
        arena.characters.len(),
        arena.rng_state.stream - 1
    );

    snapshot(arena)
}

/// Observations of the current world with zero rewards; nothing is mutated
pub fn snapshot(arena: &Arena) -> StepOutcome {
    StepOutcome {
        observations: observe_all(arena),
        rewards: vec![0; arena.characters.len()],
    }
}

/// Whether character `index` is out of bounds or has its nose inside another object
fn is_colliding(arena: &Arena, index: usize) -> bool {
    let character = &arena.characters[index];
    let bound = arena.config.world_bound;
    let nose = character.nose();

    if !in_bounds(character.position, bound) || !in_bounds(nose, bound) {
        return true;
    }

    arena.others(index).any(|other| other.contains(nose))
}
