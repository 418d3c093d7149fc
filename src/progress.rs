//! Progress/XP reporting boundary
//!
//! The engine never publishes itself on a global object: the embedder hands
//! a [`ProgressSink`] in at construction and receives one callback per
//! completed lesson or correct answer. What the rewards mean (XP, badges,
//! thresholds) is entirely the embedder's concern.
//!
//! The best-score table is the one piece the crate persists itself,
//! LocalStorage-backed on wasm.

use serde::{Deserialize, Serialize};

/// Receiver for reward events emitted by the demo loop and course engine
pub trait ProgressSink {
    fn on_reward(&mut self, amount: u32);
}

/// Sink that just tallies rewards (tests and the native smoke run)
#[derive(Debug, Default)]
pub struct TallySink {
    pub total: u32,
}

impl ProgressSink for TallySink {
    fn on_reward(&mut self, amount: u32) {
        self.total += amount;
    }
}

/// Maximum number of best scores to keep
pub const MAX_BEST_SCORES: usize = 10;

/// A single best-score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestScoreEntry {
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Top scores from past obstacle-course runs, sorted descending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestScores {
    pub entries: Vec<BestScoreEntry>,
}

impl BestScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "motion_lab_best_scores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the table
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_BEST_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score if it qualifies; returns the 1-indexed rank achieved
    pub fn add_score(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = BestScoreEntry { score, timestamp };
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
        self.entries.truncate(MAX_BEST_SCORES);
        Some(rank)
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(scores) = serde_json::from_str::<BestScores>(&json) {
                    log::info!("Loaded {} best scores", scores.entries.len());
                    return scores;
                }
            }
        }
        Self::new()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
