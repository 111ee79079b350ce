use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub score: u32,
    pub date: String,
}

impl Entry {
    pub fn new(name: &str, score: u32) -> Self {
        Entry {
            name: name.trim().to_owned(),
            score,
            date: format_date(Local::now()),
        }
    }
}

/// "Sep 5, 2025, 08:30 PM" — the en-US medium date the original wrote.
pub fn format_date(at: DateTime<Local>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Top-10 score list, descending, at most one entry per player.
///
/// Player identity is the case-insensitive name. Deduplication happens on
/// every submit; the original only deduped in a separate cleanup pass, which
/// let duplicates crowd out the true top 10 until someone ran it.
/// [`Leaderboard::cleanup`] remains for lists persisted before that fix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<Entry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Leaderboard { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a score, keeping only the player's best, then re-sorts and
    /// truncates to the top 10.
    pub fn submit(&mut self, entry: Entry) {
        match self.find_player_mut(&entry.name) {
            Some(existing) => {
                if entry.score > existing.score {
                    *existing = entry;
                }
            }
            None => self.entries.push(entry),
        }
        self.normalize();
    }

    /// Collapses duplicate players down to their best score. Only needed for
    /// lists written before submit deduplicated; idempotent otherwise.
    /// Returns (entries before, entries after).
    pub fn cleanup(&mut self) -> (usize, usize) {
        let before = self.entries.len();
        let mut best: Vec<Entry> = Vec::new();
        for entry in self.entries.drain(..) {
            match best
                .iter_mut()
                .find(|b| b.name.to_lowercase() == entry.name.to_lowercase())
            {
                Some(b) => {
                    if entry.score > b.score {
                        *b = entry;
                    }
                }
                None => best.push(entry),
            }
        }
        self.entries = best;
        self.normalize();
        (before, self.entries.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn find_player_mut(&mut self, name: &str) -> Option<&mut Entry> {
        let key = name.to_lowercase();
        self.entries.iter_mut().find(|e| e.name.to_lowercase() == key)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }
}
