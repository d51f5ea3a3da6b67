//! Per-character observations
//!
//! A character sees every other object as (kind, distance, angle) measured
//! from its center to the nearest point on the object's boundary. Only the
//! closest `observation_cap` entries are kept, nearest first.
//!
//! Cost is O(characters x objects) per tick with no spatial index; this is
//! the first thing to revisit for worlds much larger than a few dozen objects.

use serde::{Deserialize, Serialize};

use super::entity::ObjectKind;
use super::geometry::signed_angle;
use super::state::Arena;

/// Number of features per entry in [`Observation::to_features`]
pub const FEATURES_PER_ENTRY: usize = 3;

/// One observed object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationEntry {
    pub kind: ObjectKind,
    /// Distance from the observer's center to the object's boundary
    pub distance: f32,
    /// Angle from the observer's forward vector, in (-π, π]
    pub angle: f32,
}

/// A character's sorted, bounded view of its surroundings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Ascending by distance
    pub entries: Vec<ObservationEntry>,
}

impl Observation {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest observed object, if any
    pub fn nearest(&self) -> Option<&ObservationEntry> {
        self.entries.first()
    }

    /// Flatten to `[kind, distance, angle]` per entry, zero-padded to `cap` entries
    pub fn to_features(&self, cap: usize) -> Vec<f32> {
        let mut features = vec![0.0; cap * FEATURES_PER_ENTRY];
        for (slot, entry) in features
            .chunks_exact_mut(FEATURES_PER_ENTRY)
            .zip(&self.entries)
        {
            slot.copy_from_slice(&[entry.kind.feature(), entry.distance, entry.angle]);
        }
        features
    }
}

/// Observation for character `index`; empty if there is no such character
pub fn observe(arena: &Arena, index: usize) -> Observation {
    let Some(me) = arena.characters.get(index) else {
        return Observation::default();
    };
    let center = me.position;
    let forward = me.forward();

    let mut entries: Vec<ObservationEntry> = arena
        .others(index)
        .map(|object| {
            let closest = object.closest_point_to(center);
            ObservationEntry {
                kind: object.kind(),
                distance: closest.distance(center),
                angle: signed_angle(forward, closest - center),
            }
        })
        .collect();

    entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    entries.truncate(arena.config.observation_cap);

    Observation { entries }
}

/// Observations for every character, in character order
pub fn observe_all(arena: &Arena) -> Vec<Observation> {
    (0..arena.characters.len())
        .map(|i| observe(arena, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::sim::entity::{Character, Wall};
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_2;

    fn single(walls: Vec<Wall>) -> Arena {
        let config = ArenaConfig {
            teams: 1,
            characters_per_team: 1,
            ..Default::default()
        };
        let me = Character::new(Vec2::new(8.5, 8.5), 0.0, 0);
        Arena::from_parts(config, vec![me], walls).unwrap()
    }

    #[test]
    fn test_three_objects_sorted() {
        let arena = single(vec![Wall::cell(12, 8), Wall::cell(8, 10), Wall::cell(3, 8)]);
        let obs = observe(&arena, 0);

        assert_eq!(obs.len(), 3);
        let distances: Vec<f32> = obs.entries.iter().map(|e| e.distance).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert!((distances[0] - 1.5).abs() < 1e-5);
        assert!((distances[1] - 3.5).abs() < 1e-5);
        assert!((distances[2] - 4.5).abs() < 1e-5);
        assert!(obs.entries.iter().all(|e| e.kind == ObjectKind::Wall));
    }

    #[test]
    fn test_fifteen_objects_capped_at_ten() {
        let walls = (0..15).map(|row| Wall::cell(row, 0)).collect();
        let arena = single(walls);
        let obs = observe(&arena, 0);

        assert_eq!(obs.len(), 10);
        assert!(obs.entries.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_angles_relative_to_heading() {
        // Wall directly to the left (+y) of an east-facing character
        let arena = single(vec![Wall::cell(8, 10)]);
        let entry = observe(&arena, 0).entries[0];
        assert!((entry.angle - FRAC_PI_2).abs() < 1e-5);

        // Wall straight ahead
        let arena = single(vec![Wall::cell(11, 8)]);
        let entry = observe(&arena, 0).entries[0];
        assert!(entry.angle.abs() < 1e-5);
    }

    #[test]
    fn test_excludes_self_and_tags_characters() {
        let config = ArenaConfig {
            teams: 2,
            characters_per_team: 1,
            ..Default::default()
        };
        let characters = vec![
            Character::new(Vec2::new(5.0, 5.0), 0.0, 0),
            Character::new(Vec2::new(7.0, 5.0), 0.0, 1),
        ];
        let arena = Arena::from_parts(config, characters, vec![Wall::cell(0, 0)]).unwrap();
        let obs = observe(&arena, 0);

        assert_eq!(obs.len(), 2);
        let nearest = obs.nearest().unwrap();
        assert_eq!(nearest.kind, ObjectKind::Character);
        // Closest point on the other character is its center vertex
        assert!((nearest.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_lone_character_sees_nothing() {
        let arena = single(Vec::new());
        assert!(observe(&arena, 0).is_empty());
        assert!(observe(&arena, 5).is_empty());
        assert_eq!(observe_all(&arena).len(), 1);
    }

    #[test]
    fn test_to_features_pads() {
        let arena = single(vec![Wall::cell(12, 8)]);
        let features = observe(&arena, 0).to_features(3);

        assert_eq!(features.len(), 9);
        assert_eq!(features[0], 1.0);
        assert!((features[1] - 3.5).abs() < 1e-5);
        assert!(features[3..].iter().all(|&f| f == 0.0));
    }
}
