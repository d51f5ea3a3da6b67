//! Grid layout parsing
//!
//! A layout is rectangular text, one row per line. Each marker cell becomes a
//! unit wall at (row, col); anything else is open floor.

use super::entity::Wall;
use crate::error::ArenaError;

/// Parsed wall layout
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    /// Occupied cells in row-major order
    pub cells: Vec<(usize, usize)>,
}

impl Layout {
    /// An empty layout (no walls)
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
        }
    }

    /// Parse layout text
    ///
    /// Trailing whitespace on each line is ignored unless the marker itself is
    /// whitespace, in which case only a trailing `'\r'` is dropped.
    pub fn parse(text: &str, marker: char) -> Result<Self, ArenaError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| {
                if marker.is_whitespace() {
                    line.trim_end_matches('\r')
                } else {
                    line.trim_end()
                }
            })
            .collect();
        // Trailing blank lines are file noise, not rows
        let rows = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |last| last + 1);
        let lines = &lines[..rows];

        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut cells = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ArenaError::RaggedLayout {
                    row,
                    expected: cols,
                    found,
                });
            }
            cells.extend(
                line.chars()
                    .enumerate()
                    .filter(|&(_, cell)| cell == marker)
                    .map(|(col, _)| (row, col)),
            );
        }

        Ok(Self { rows, cols, cells })
    }

    /// One unit wall per occupied cell, in row-major order
    pub fn walls(&self) -> Vec<Wall> {
        self.cells.iter().map(|&(row, col)| Wall::cell(row, col)).collect()
    }
}
