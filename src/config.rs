//! Arena configuration
//!
//! Every tunable constant lives here once. Loaded from JSON by the driver;
//! missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ArenaError;

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    // === Population ===
    /// Number of teams
    pub teams: usize,
    /// Characters spawned per team
    pub characters_per_team: usize,

    // === World ===
    /// World bound B (arena is [0, B] on both axes)
    pub world_bound: f32,
    /// Layout cell that marks a wall
    pub wall_marker: char,

    // === Kinematics ===
    pub speed_increment: f32,
    pub rotation_increment: f32,
    pub initial_speed: f32,
    pub initial_ammo: u32,

    // === Character shape ===
    pub nose_length: f32,
    pub base_half_width: f32,

    // === Rewards / observations ===
    /// Reward assessed on a collision tick (expected to be <= 0)
    pub collision_penalty: i32,
    /// Maximum observation entries per character
    pub observation_cap: usize,

    // === Ray-probe ===
    pub probe_step: f32,
    pub probe_max_steps: u32,
    pub probe_rays: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            teams: TEAMS,
            characters_per_team: CHARACTERS_PER_TEAM,

            world_bound: WORLD_BOUND,
            wall_marker: WALL_MARKER,

            speed_increment: SPEED_INCREMENT,
            rotation_increment: ROTATION_INCREMENT,
            initial_speed: INITIAL_SPEED,
            initial_ammo: INITIAL_AMMO,

            nose_length: NOSE_LENGTH,
            base_half_width: BASE_HALF_WIDTH,

            collision_penalty: COLLISION_PENALTY,
            observation_cap: OBSERVATION_CAP,

            probe_step: PROBE_STEP,
            probe_max_steps: PROBE_MAX_STEPS,
            probe_rays: PROBE_RAYS,
        }
    }
}

impl ArenaConfig {
    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of characters in an arena built from this config
    pub fn character_count(&self) -> usize {
        self.teams.saturating_mul(self.characters_per_team)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ArenaError> {
        let positive = [
            ("world_bound", self.world_bound),
            ("probe_step", self.probe_step),
            ("nose_length", self.nose_length),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ArenaError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("speed_increment", self.speed_increment),
            ("rotation_increment", self.rotation_increment),
            ("initial_speed", self.initial_speed),
            ("base_half_width", self.base_half_width),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ArenaError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.observation_cap == 0 {
            return Err(ArenaError::InvalidConfig(
                "observation_cap must be at least 1".into(),
            ));
        }
        if self.probe_rays == 0 {
            return Err(ArenaError::InvalidConfig(
                "probe_rays must be at least 1".into(),
            ));
        }

        // Team ids are stored as u8
        if self.teams > MAX_TEAMS {
            return Err(ArenaError::InvalidConfig(format!(
                "teams must be at most {MAX_TEAMS}, got {}",
                self.teams
            )));
        }
        if self.teams.checked_mul(self.characters_per_team).is_none() {
            return Err(ArenaError::InvalidConfig(format!(
                "{} teams x {} characters overflows",
                self.teams, self.characters_per_team
            )));
        }

        // Editors strip trailing whitespace, which would silently drop walls
        if self.wall_marker.is_whitespace() {
            return Err(ArenaError::InvalidConfig(format!(
                "wall_marker must not be whitespace, got {:?}",
                self.wall_marker
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.character_count(), 8);
        assert_eq!(config.observation_cap, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ArenaConfig::from_json(r#"{ "world_bound": 16.0, "teams": 2 }"#).unwrap();
        assert_eq!(config.world_bound, 16.0);
        assert_eq!(config.teams, 2);
        assert_eq!(config.characters_per_team, CHARACTERS_PER_TEAM);
        assert_eq!(config.wall_marker, 'X');
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = ArenaConfig::from_json(r#"{ "world_bound": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig(_)));

        let err = ArenaConfig::from_json(r#"{ "observation_cap": 0 }"#).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig(_)));

        let err = ArenaConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ArenaError::ConfigParse(_)));
    }

    #[test]
    fn test_team_count_fits_team_id() {
        let config = ArenaConfig {
            teams: 300,
            characters_per_team: 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ArenaError::InvalidConfig(_))));

        let config = ArenaConfig {
            teams: MAX_TEAMS,
            characters_per_team: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_character_count_overflow_rejected() {
        let config = ArenaConfig {
            teams: 2,
            characters_per_team: usize::MAX,
            ..Default::default()
        };
        assert_eq!(config.character_count(), usize::MAX);
        assert!(matches!(config.validate(), Err(ArenaError::InvalidConfig(_))));
    }

    #[test]
    fn test_whitespace_marker_rejected() {
        let err = ArenaConfig::from_json(r#"{ "wall_marker": " " }"#).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig(_)));
        assert!(ArenaConfig::from_json(r##"{ "wall_marker": "#" }"##).is_ok());
    }
}
