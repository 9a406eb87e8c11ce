//! Records that outlive a single run: aggregate statistics, the hall of fame
//! and the last level each player reached.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{load_or_default, write_json, ConfigError};
use crate::entities::RunMetrics;

// ── Aggregate statistics ──────────────────────────────────────────────────────

/// Totals over every run ever played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub total_runs: u32,
    pub total_score: u64,
    pub total_jumps: u64,
    pub total_collisions: u64,
    pub total_obstacles_passed: u64,
    pub best_score: u32,
    pub best_streak: u32,
}

impl GameStats {
    pub fn load(path: &Path) -> Self {
        load_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_json(path, self)
    }

    /// Fold one finished run into the totals.
    pub fn record_run(&mut self, score: u32, metrics: &RunMetrics) {
        self.total_runs += 1;
        self.total_score += u64::from(score);
        self.total_jumps += u64::from(metrics.jumps);
        self.total_collisions += u64::from(metrics.collisions);
        self.total_obstacles_passed += u64::from(metrics.obstacles_passed);
        self.best_score = self.best_score.max(score);
        self.best_streak = self.best_streak.max(metrics.highest_streak);
    }

    pub fn average_score(&self) -> f64 {
        if self.total_runs == 0 {
            0.0
        } else {
            self.total_score as f64 / f64::from(self.total_runs)
        }
    }
}

// ── Hall of fame ──────────────────────────────────────────────────────────────

/// Best score per player, per level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallOfFame {
    /// nickname → level → best score
    entries: BTreeMap<String, BTreeMap<u32, u32>>,
}

impl HallOfFame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Self {
        let hof: HallOfFame = load_or_default(path);
        log::info!("hall of fame has {} players", hof.entries.len());
        hof
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_json(path, self)
    }

    /// Stored best for `nickname` on `level`, zero when there is none.
    pub fn best(&self, nickname: &str, level: u32) -> u32 {
        self.entries
            .get(nickname)
            .and_then(|levels| levels.get(&level))
            .copied()
            .unwrap_or(0)
    }

    /// Check if a score would replace the stored best
    pub fn qualifies(&self, nickname: &str, level: u32, score: u32) -> bool {
        score > 0 && score > self.best(nickname, level)
    }

    /// Record `score` if it beats the stored best. Returns whether it did.
    pub fn submit(&mut self, nickname: &str, level: u32, score: u32) -> bool {
        if !self.qualifies(nickname, level, score) {
            return false;
        }
        self.entries
            .entry(nickname.to_string())
            .or_default()
            .insert(level, score);
        true
    }

    /// Every player's best on `level`, highest first.
    pub fn ranking(&self, level: u32) -> Vec<(&str, u32)> {
        let mut rows: Vec<(&str, u32)> = self
            .entries
            .iter()
            .filter_map(|(name, levels)| levels.get(&level).map(|&s| (name.as_str(), s)))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

// ── Saves ─────────────────────────────────────────────────────────────────────

/// Last level each player started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Saves {
    last_level: BTreeMap<String, u32>,
}

impl Saves {
    pub fn load(path: &Path) -> Self {
        load_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_json(path, self)
    }

    pub fn last_level(&self, nickname: &str) -> Option<u32> {
        self.last_level.get(nickname).copied()
    }

    pub fn set_last_level(&mut self, nickname: &str, level: u32) {
        self.last_level.insert(nickname.to_string(), level);
    }

    /// Send `nickname` back to level 1 when their saved level turned out to be
    /// missing. Returns whether the save changed.
    pub fn reset_missing(&mut self, nickname: &str, missing: u32) -> bool {
        if self.last_level(nickname) != Some(missing) {
            return false;
        }
        if missing == 1 {
            self.last_level.remove(nickname);
        } else {
            self.set_last_level(nickname, 1);
        }
        true
    }
}
