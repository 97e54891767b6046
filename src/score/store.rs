//! Storage backends for the top score
//!
//! The stored format is a single non-negative decimal integer. Missing or
//! unparseable contents read as "no score yet" rather than as an error.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Somewhere the top score survives between sessions
pub trait TopScoreStore {
    /// Read the saved score. `Ok(None)` means nothing usable is stored.
    fn load(&self) -> io::Result<Option<u32>>;

    fn save(&mut self, score: u32) -> io::Result<()>;
}

fn parse_score(contents: &str) -> Option<u32> {
    contents.trim().parse().ok()
}

/// Keeps the score in a plain text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TopScoreStore for FileStore {
    fn load(&self) -> io::Result<Option<u32>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(parse_score(&contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, score.to_string())
    }
}

/// In-process store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<u32>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(score))),
        }
    }

    /// The last saved value
    pub fn stored(&self) -> Option<u32> {
        self.slot.lock().map(|slot| *slot).unwrap_or(None)
    }
}

impl TopScoreStore for MemoryStore {
    fn load(&self) -> io::Result<Option<u32>> {
        self.slot
            .lock()
            .map(|slot| *slot)
            .map_err(|_| io::Error::other("score slot poisoned"))
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| io::Error::other("score slot poisoned"))?;
        *slot = Some(score);
        Ok(())
    }
}
