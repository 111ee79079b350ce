use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::warn;
use onam_core::leaderboard::{Entry, Leaderboard};
use serde::{Deserialize, Serialize};

const SLOTS_FILE: &str = "onam-snake.json";

/// Client-side persistence: the last-used player name, the best score seen
/// on this machine, and a mirror of the leaderboard for when the service is
/// unreachable or running without its KV.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSlots {
    pub name: String,
    pub high_score: u32,
    pub leaderboard: Vec<Entry>,
}

impl LocalSlots {
    pub fn load(path: &Path) -> LocalSlots {
        match Self::read(path) {
            Ok(slots) => slots,
            Err(e) => {
                warn!("Starting with fresh local slots: {e:#}");
                LocalSlots::default()
            }
        }
    }

    pub fn save(&self, path: &Path) {
        if let Err(e) = self.write(path) {
            warn!("Could not persist local slots: {e:#}");
        }
    }

    /// Folds a score into the local mirror, best score per player, top 10.
    pub fn merge_score(&mut self, name: &str, score: u32) {
        let mut board = Leaderboard::from_entries(std::mem::take(&mut self.leaderboard));
        board.submit(Entry::new(name, score));
        self.leaderboard = board.entries().to_vec();
    }

    // Stored next to the executable, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(SLOTS_FILE);
            }
        }
        PathBuf::from(SLOTS_FILE)
    }

    fn read(path: &Path) -> Result<LocalSlots> {
        if !path.exists() {
            return Ok(LocalSlots::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("corrupt slots at {}", path.display()))
    }

    fn write(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("could not write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_score_keeps_the_best_per_player_and_caps_at_ten() {
        let mut slots = LocalSlots::default();
        for i in 0..12u32 {
            slots.merge_score(&format!("player{i}"), 100 - i);
        }
        slots.merge_score("player0", 40); // lower, ignored
        slots.merge_score("PLAYER1", 150); // higher, replaces

        assert_eq!(slots.leaderboard.len(), 10);
        assert_eq!(slots.leaderboard[0].score, 150);
        assert!(
            slots
                .leaderboard
                .iter()
                .filter(|e| e.name.eq_ignore_ascii_case("player1"))
                .count()
                == 1
        );
    }

    #[test]
    fn slots_round_trip_through_disk() {
        let path = std::env::temp_dir().join(format!("onam-slots-{}.json", std::process::id()));
        let mut slots = LocalSlots {
            name: "Alice".to_owned(),
            high_score: 42,
            leaderboard: vec![],
        };
        slots.merge_score("Alice", 42);
        slots.write(&path).unwrap();

        let loaded = LocalSlots::read(&path).unwrap();
        assert_eq!(loaded.name, "Alice");
        assert_eq!(loaded.high_score, 42);
        assert_eq!(loaded.leaderboard.len(), 1);

        let _ = fs::remove_file(path);
    }
}
