//! Best runs table
//!
//! Kept as JSON next to the settings file, best ten runs first.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::sim::DeathCause;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Furthest forward distance in world units
    pub distance: f32,
    /// How the run ended
    pub cause: DeathCause,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Would this score earn a place? Zero never does.
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Has to beat the current tenth place
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// 1-based place a score would take, if any
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a finished run; returns its 1-based place if it made the table
    pub fn add_score(
        &mut self,
        score: u64,
        distance: f32,
        cause: DeathCause,
        timestamp: u64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            distance,
            cause,
            timestamp,
        };

        // Ties keep the older run ahead
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score so far
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Read the table, starting fresh if it is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<HighScores>(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(PersistError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not read high scores ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Current Unix time in seconds (0 if the clock is before the epoch)
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_sorted_and_trimmed() {
        let mut scores = HighScores::new();
        for score in 1..=12u64 {
            scores.add_score(score * 10, score as f32 * 20.0, DeathCause::RunOver, score);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(120));
        assert_eq!(scores.entries.last().map(|e| e.score), Some(30));
        assert!(scores.entries.windows(2).all(|w| w[0].score >= w[1].score));

        assert!(!scores.qualifies(30));
        assert_eq!(scores.potential_rank(35), Some(10));
        assert_eq!(scores.add_score(500, 1000.0, DeathCause::Drowned, 99), Some(1));
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");
        let mut scores = HighScores::new();
        scores.add_score(42, 84.0, DeathCause::Drowned, 1_700_000_000);
        scores.save(&path).unwrap();
        assert_eq!(HighScores::load(&path), scores);
    }
}
