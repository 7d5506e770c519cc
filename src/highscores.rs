//! High score ledger
//!
//! Top-10 table persisted as JSON next to the executable. A missing or
//! mangled file degrades to an empty ledger — never an error the player
//! sees.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_LEN;

/// Maximum number of entries the ledger retains
pub const MAX_HIGH_SCORES: usize = 10;

/// A single ledger row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    /// Unix seconds when the score was committed
    pub timestamp: u64,
}

/// Ranked high-score table, descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Empty ledger
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Default on-disk location, next to the executable
    pub fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join("tank_blitz_scores.json");
            }
        }
        PathBuf::from("tank_blitz_scores.json")
    }

    /// Load the ledger, degrading to empty on any read or parse failure
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("no high score file at {}, starting fresh", path.display());
                return Self::new();
            }
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                scores.normalize();
                log::info!("loaded {} high scores", scores.entries.len());
                scores
            }
            Err(err) => {
                log::warn!("high score file unreadable ({err}), starting fresh");
                Self::new()
            }
        }
    }

    /// Persist the ledger; failures are logged, not fatal
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("failed to save high scores: {err}");
                } else {
                    log::info!("high scores saved ({} entries)", self.entries.len());
                }
            }
            Err(err) => log::warn!("failed to encode high scores: {err}"),
        }
    }

    /// Insert a new entry in rank order, truncate to the cap, and return
    /// the 1-indexed rank it landed at (None if it fell off the bottom).
    /// Names longer than the buffer cap are truncated.
    pub fn add_entry(&mut self, name: &str, score: u32, timestamp: u64) -> Option<usize> {
        let name: String = name.chars().take(MAX_NAME_LEN).collect();
        let entry = HighScoreEntry {
            name,
            score,
            timestamp,
        };
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// The top `n` entries, best first
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..self.entries.len().min(n)]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-sort descending and clamp to the retained size. Applied after
    /// loading, since the file may have been edited by hand.
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tank_blitz_test_{tag}_{}.json", std::process::id()))
    }

    #[test]
    fn test_add_entry_keeps_descending_order_and_cap() {
        let mut scores = HighScores::new();
        let inputs = [
            50, 200, 10, 999, 400, 300, 120, 80, 700, 650, 20, 30, 40, 900, 5,
        ];
        for (i, s) in inputs.iter().enumerate() {
            scores.add_entry("p", *s, i as u64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        let kept: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(kept, vec![999, 900, 700, 650, 400, 300, 200, 120, 80, 50]);
    }

    #[test]
    fn test_add_entry_reports_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_entry("first", 100, 0), Some(1));
        assert_eq!(scores.add_entry("better", 200, 1), Some(1));
        assert_eq!(scores.add_entry("worse", 50, 2), Some(3));
    }

    #[test]
    fn test_low_score_falls_off_a_full_ledger() {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES {
            scores.add_entry("p", 100 + i as u32, i as u64);
        }
        assert_eq!(scores.add_entry("p", 1, 99), None);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(scores.entries.iter().all(|e| e.score > 1));
    }

    #[test]
    fn test_name_is_truncated_to_cap() {
        let mut scores = HighScores::new();
        scores.add_entry("a-very-long-name-well-past-the-buffer-cap", 10, 0);
        assert_eq!(scores.entries[0].name.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_top_n() {
        let mut scores = HighScores::new();
        for s in [10, 30, 20] {
            scores.add_entry("p", s, 0);
        }
        let top: Vec<u32> = scores.top(2).iter().map(|e| e.score).collect();
        assert_eq!(top, vec![30, 20]);
        assert_eq!(scores.top(99).len(), 3);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let path = temp_path("roundtrip");
        let mut scores = HighScores::new();
        scores.add_entry("Ada", 999, 1_700_000_000);
        scores.add_entry("Bob", 5, 1_700_000_001);
        scores.save(&path);

        let loaded = HighScores::load(&path);
        assert_eq!(loaded.entries, scores.entries);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let scores = HighScores::load(Path::new("/nonexistent/nowhere.json"));
        assert!(scores.is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json at all").unwrap();
        let scores = HighScores::load(&path);
        assert!(scores.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_hand_edited_file_is_renormalized() {
        let path = temp_path("normalize");
        std::fs::write(
            &path,
            r#"{"entries":[
                {"name":"low","score":1,"timestamp":0},
                {"name":"high","score":500,"timestamp":0}
            ]}"#,
        )
        .unwrap();
        let scores = HighScores::load(&path);
        assert_eq!(scores.entries[0].score, 500);
        let _ = std::fs::remove_file(&path);
    }

    proptest! {
        /// The ledger is always sorted descending and never over the cap.
        #[test]
        fn ledger_stays_sorted_and_capped(
            entries in proptest::collection::vec(0u32..10_000, 0..30)
        ) {
            let mut scores = HighScores::new();
            for (i, s) in entries.iter().enumerate() {
                scores.add_entry("p", *s, i as u64);
            }
            prop_assert!(scores.entries.len() <= MAX_HIGH_SCORES);
            prop_assert!(
                scores.entries.windows(2).all(|w| w[0].score >= w[1].score)
            );
        }
    }
}
