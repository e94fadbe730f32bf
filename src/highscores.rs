//! High score leaderboard
//!
//! Tracks the top 10 finished rounds. The round engine never touches it; a
//! host records finished rounds and may keep the board in a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{EndReason, RoundEnd};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the round
    pub score: u64,
    /// How the round ended
    pub reason: EndReason,
    /// Host timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard (sorted descending by score)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
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

    /// Index a score would be inserted at (ties go after existing entries),
    /// or None if it would fall off the board
    fn slot(&self, score: u64) -> Option<usize> {
        let slot = self.entries.partition_point(|e| e.score >= score);
        (score > 0 && slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        self.slot(score).is_some()
    }

    /// Whether `score` would beat every recorded round
    pub fn is_new_best(&self, score: u64) -> bool {
        self.slot(score) == Some(0)
    }

    /// Record a finished round.
    /// Returns the rank achieved (1 = new best) or None if it didn't qualify
    pub fn record(&mut self, end: &RoundEnd, timestamp: f64) -> Option<usize> {
        let slot = self.slot(end.final_score)?;
        self.entries.insert(
            slot,
            HighScoreEntry {
                score: end.final_score,
                reason: end.reason,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        if slot == 0 {
            log::info!("New high score: {}", end.final_score);
        }
        Some(slot + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a stored leaderboard, starting fresh if it is unreadable
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Unreadable high scores ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    /// Load the board from a JSON file. A missing file is an empty board.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", path.display());
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not read high scores from {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Write the board to a JSON file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
