use log::{info, warn};

use super::store::{MemoryStore, TopScoreStore};

/// Tracks the best score and writes new records through to a store.
///
/// A store that fails to load is not trusted for the rest of the session:
/// the top score starts at 0 and later records stay in memory only.
pub struct Scoreboard {
    store: Box<dyn TopScoreStore + Send>,
    top_score: u32,
    persist: bool,
}

impl Scoreboard {
    pub fn new(store: impl TopScoreStore + Send + 'static) -> Self {
        let (top_score, persist) = match store.load() {
            Ok(score) => (score.unwrap_or(0), true),
            Err(e) => {
                warn!("Failed to load top score, keeping it in memory: {}", e);
                (0, false)
            }
        };
        Self {
            store: Box::new(store),
            top_score,
            persist,
        }
    }

    /// Scoreboard with nothing behind it
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn top_score(&self) -> u32 {
        self.top_score
    }

    /// Whether new records reach the store
    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    /// Offer a final score; returns true if it set a new record
    pub fn record_score(&mut self, score: u32) -> bool {
        if score <= self.top_score {
            return false;
        }
        info!("New top score {} (was {})", score, self.top_score);
        self.top_score = score;
        if self.persist {
            if let Err(e) = self.store.save(score) {
                warn!("Failed to save top score {}: {}", score, e);
            }
        }
        true
    }
}

impl std::fmt::Debug for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoreboard")
            .field("top_score", &self.top_score)
            .field("persist", &self.persist)
            .finish_non_exhaustive()
    }
}
