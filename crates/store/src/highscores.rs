//! Best-first table of finished games

use std::path::Path;

use anyhow::Result;

use crate::types::{HighScoreEntry, HIGH_SCORE_LIMIT};
use crate::{read_json, write_json};

/// Up to [`HIGH_SCORE_LIMIT`] entries ordered by score, highest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from arbitrary entries, normalizing order and length
    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut table = Self { entries };
        table.normalize();
        table
    }

    /// Load the table; any fault yields an empty table
    pub fn load(path: &Path) -> Self {
        read_json::<Vec<HighScoreEntry>>(path)
            .map(Self::from_entries)
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, &self.entries)
    }

    /// Insert a finished game
    ///
    /// Returns its 1-based rank, or None if it fell off the end of the table.
    /// Ties keep earlier entries ahead of the new one.
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        // The new entry is last among equal scores after a stable sort.
        let rank = self
            .entries
            .iter()
            .filter(|e| e.score >= entry.score)
            .count()
            + 1;

        self.entries.push(entry);
        self.normalize();

        (rank <= HIGH_SCORE_LIMIT).then_some(rank)
    }

    /// Whether `score` would make the table
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < HIGH_SCORE_LIMIT
            || self.entries.last().map_or(true, |last| score > last.score)
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_LIMIT);
    }
}
