//! High score leaderboard
//!
//! Lives for the duration of the process and tracks the top 10 games.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u64,
    /// Fleets destroyed in that game
    pub fleets_cleared: u32,
    /// Simulation tick the game ended on
    pub tick: u64,
}

/// High score leaderboard, sorted best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished game. Scoreless games are ignored; ties rank below
    /// the entries already on the board. Returns the 1-based rank, or `None`
    /// if the game did not make the board.
    pub fn add_score(&mut self, score: u64, fleets_cleared: u32, tick: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let index = self.entries.partition_point(|e| e.score >= score);
        if index >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(
            index,
            HighScoreEntry {
                score,
                fleets_cleared,
                tick,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    /// Top score, or 0 with no entries
    pub fn best(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
