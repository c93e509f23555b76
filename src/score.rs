use std::fs;
use std::path::PathBuf;

use log::{info, warn};

const SCORE_FILE: &str = "high_score";

/// Persists the single high-score integer as a plain text file. Reads are
/// defensive: a missing or garbled file just means a high score of 0.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn open_default() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gridsnake")
            .join(SCORE_FILE);
        HighScoreStore { path }
    }

    pub fn at(path: PathBuf) -> Self {
        HighScoreStore { path }
    }

    pub fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Writes the new high score. Failures are logged and swallowed; a game
    /// in progress should not die because the disk did.
    pub fn save(&self, score: u32) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!("could not create {}: {}", parent.display(), err);
                return;
            }
        }
        match fs::write(&self.path, score.to_string()) {
            Ok(()) => info!("high score {} saved to {}", score, self.path.display()),
            Err(err) => warn!("could not save high score: {}", err),
        }
    }
}
