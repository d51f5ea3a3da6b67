//! Arena errors
//!
//! Every variant is a caller contract violation, reported before any world
//! state is touched. Degenerate geometry never surfaces here; the kernel
//! absorbs it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("got {found} actions for {expected} characters")]
    ActionCountMismatch { expected: usize, found: usize },

    #[error("action code {0} is outside 0..=5")]
    InvalidAction(u8),

    #[error("got {found} characters, configuration requires {expected}")]
    CharacterCountMismatch { expected: usize, found: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl ArenaError {
    /// True for errors caused by a bad tick input rather than bad setup
    pub fn is_tick_input(&self) -> bool {
        matches!(
            self,
            ArenaError::ActionCountMismatch { .. } | ArenaError::InvalidAction(_)
        )
    }
}
