//! File-backed high scores keyed by player name, ignoring ASCII case.
//!
//! The store keeps the best score ever reported for each player. Changes are
//! serialized on the caller's thread and written by a background thread, so a
//! slow disk never stalls a tick.

use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScoreStoreError;
use crate::sinks::ScoreSink;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_name: String,
    pub high_score: u32,
}

/// Reads every entry from `path`; a missing or empty file holds no entries.
pub fn load_entries(path: &Path) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&text)?)
}

/// Writes `contents` next to `path` and renames it into place.
fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, contents)?;
    fs::rename(&staging, path)
}

/// Sorts best first, then by name ignoring case.
pub fn sort_leaderboard(entries: &mut [ScoreEntry]) {
    entries.sort_by_key(|entry| (Reverse(entry.high_score), entry.player_name.to_lowercase()));
}

struct Writer {
    tx: Option<Sender<String>>,
    handle: Option<JoinHandle<()>>,
}

impl Writer {
    fn spawn(path: PathBuf) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<String>();
        let handle = thread::Builder::new().name("score-writer".into()).spawn(move || {
            while let Ok(mut contents) = rx.recv() {
                // Only the newest snapshot matters
                while let Ok(newer) = rx.try_recv() {
                    contents = newer;
                }
                if let Err(e) = write_atomically(&path, &contents) {
                    warn!(path = %path.display(), "Failed to persist scores: {}", e);
                }
            }
        })?;
        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    fn submit(&self, contents: String) {
        if let Some(tx) = &self.tx {
            if tx.send(contents).is_err() {
                warn!("Score writer thread is gone; dropping update");
            }
        }
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        // Closing the channel lets the thread drain and exit
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Score writer thread panicked");
            }
        }
    }
}

/// High scores for every player, persisted as JSON.
pub struct ScoreStore {
    player: String,
    entries: Vec<ScoreEntry>,
    writer: Writer,
}

impl ScoreStore {
    /// Opens the score file at `path`, recording future scores under `player`.
    ///
    /// A malformed file is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>, player: impl Into<String>) -> Result<Self, ScoreStoreError> {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(ScoreStoreError::Json(e)) => {
                warn!(path = %path.display(), "Ignoring malformed score file: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        debug!(path = %path.display(), players = entries.len(), "Score store opened");

        Ok(Self {
            player: player.into(),
            entries,
            writer: Writer::spawn(path)?,
        })
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    /// Best score recorded for `name`.
    pub fn best(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.player_name.eq_ignore_ascii_case(name))
            .map(|entry| entry.high_score)
    }

    /// Every entry, best first.
    pub fn leaderboard(&self) -> Vec<ScoreEntry> {
        let mut entries = self.entries.clone();
        sort_leaderboard(&mut entries);
        entries
    }

    /// Records `score` for `name` if it beats the stored best. Returns whether it did.
    pub fn record(&mut self, name: &str, score: u32) -> bool {
        match self.entries.iter_mut().find(|entry| entry.player_name.eq_ignore_ascii_case(name)) {
            Some(entry) if entry.high_score >= score => return false,
            Some(entry) => entry.high_score = score,
            None => self.entries.push(ScoreEntry {
                player_name: name.to_string(),
                high_score: score,
            }),
        }
        self.persist();
        true
    }

    /// Sets `name`'s best back to zero.
    pub fn reset_player(&mut self, name: &str) {
        match self.entries.iter_mut().find(|entry| entry.player_name.eq_ignore_ascii_case(name)) {
            Some(entry) => entry.high_score = 0,
            None => self.entries.push(ScoreEntry {
                player_name: name.to_string(),
                high_score: 0,
            }),
        }
        self.persist();
    }

    fn persist(&self) {
        let mut snapshot = self.entries.clone();
        sort_leaderboard(&mut snapshot);
        match serde_json::to_string_pretty(&snapshot) {
            Ok(contents) => self.writer.submit(contents),
            Err(e) => warn!("Failed to serialize scores: {}", e),
        }
    }
}

impl ScoreSink for ScoreStore {
    fn update_score(&mut self, score: u32) {
        let player = self.player.clone();
        if self.record(&player, score) {
            debug!(player = %player, score, "New best score");
        }
    }
}
