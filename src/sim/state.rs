//! Arena state and world queries
//!
//! All state needed to reproduce a run lives here. Character order is the
//! action/observation index contract: team-major, then per-team index.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{ActionSteps, Character, CharacterShape, PolygonalObject, Wall};
use super::layout::Layout;
use crate::config::ArenaConfig;
use crate::error::ArenaError;

/// RNG state wrapper for serialization
///
/// Each spawn round draws from a fresh PCG stream, so a snapshot only needs
/// the seed and the next stream id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// RNG for the next spawn round
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// The simulated world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub config: ArenaConfig,
    /// RNG state for spawning
    pub rng_state: RngState,
    /// Characters in index-contract order
    pub characters: Vec<Character>,
    /// Walls in row-major layout order (never change after construction)
    pub walls: Vec<Wall>,
    /// Ticks since construction or the last reset
    pub(crate) time_ticks: u64,
}

impl Arena {
    /// Build an arena with randomly placed characters
    pub fn new(config: ArenaConfig, layout: &Layout, seed: u64) -> Result<Self, ArenaError> {
        config.validate()?;

        let mut arena = Self {
            config,
            rng_state: RngState::new(seed),
            characters: Vec::new(),
            walls: layout.walls(),
            time_ticks: 0,
        };
        arena.spawn_characters();

        log::info!(
            "Arena ready: seed={}, bound={}, {} characters, {} walls",
            seed,
            arena.config.world_bound,
            arena.characters.len(),
            arena.walls.len()
        );
        Ok(arena)
    }

    /// Build an arena from explicit entities (scenarios, tests)
    pub fn from_parts(
        config: ArenaConfig,
        characters: Vec<Character>,
        walls: Vec<Wall>,
    ) -> Result<Self, ArenaError> {
        config.validate()?;
        if characters.len() != config.character_count() {
            return Err(ArenaError::CharacterCountMismatch {
                expected: config.character_count(),
                found: characters.len(),
            });
        }

        Ok(Self {
            config,
            rng_state: RngState::new(0),
            characters,
            walls,
            time_ticks: 0,
        })
    }

    /// Replace every character with a freshly spawned one
    pub(crate) fn spawn_characters(&mut self) {
        let mut rng = self.rng_state.next_rng();
        let bound = self.config.world_bound;
        let shape = self.shape();

        self.characters.clear();
        for team in 0..self.config.teams {
            for _ in 0..self.config.characters_per_team {
                let position = Vec2::new(rng.random::<f32>() * bound, rng.random::<f32>() * bound);
                let heading = rng.random::<f32>() * std::f32::consts::TAU;
                // validate() caps teams at MAX_TEAMS, so every id fits in u8
                let character = Character::new(position, heading, team as u8)
                    .with_speed(self.config.initial_speed)
                    .with_ammo(self.config.initial_ammo)
                    .with_shape(shape);
                self.characters.push(character);
            }
        }
    }

    /// Character shape from config
    pub fn shape(&self) -> CharacterShape {
        CharacterShape {
            nose_length: self.config.nose_length,
            base_half_width: self.config.base_half_width,
        }
    }

    /// Action step sizes from config
    pub fn action_steps(&self) -> ActionSteps {
        ActionSteps {
            speed: self.config.speed_increment,
            rotation: self.config.rotation_increment,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.time_ticks
    }

    /// Every polygonal object: characters first, then walls
    pub fn polygonal_objects(&self) -> impl Iterator<Item = PolygonalObject<'_>> {
        self.characters
            .iter()
            .map(PolygonalObject::Character)
            .chain(self.walls.iter().map(PolygonalObject::Wall))
    }

    /// Every polygonal object except the character at `skip`
    pub fn others(&self, skip: usize) -> impl Iterator<Item = PolygonalObject<'_>> {
        self.characters
            .iter()
            .enumerate()
            .filter(move |&(i, _)| i != skip)
            .map(|(_, c)| PolygonalObject::Character(c))
            .chain(self.walls.iter().map(PolygonalObject::Wall))
    }

    /// True if `point` is inside any object, ignoring character `skip` if given
    pub fn is_point_in_any(&self, point: Vec2, skip: Option<usize>) -> bool {
        match skip {
            Some(index) => self.others(index).any(|o| o.contains(point)),
            None => self.polygonal_objects().any(|o| o.contains(point)),
        }
    }

    /// Center-to-center distance from character `index` to its nearest other character
    pub fn nearest_character_distance(&self, index: usize) -> Option<f32> {
        let center = self.characters.get(index)?.position;
        self.characters
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, other)| center.distance(other.position))
            .min_by(f32::total_cmp)
    }
}
