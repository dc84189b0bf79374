use anyhow::{Context, Result};
use log::{error, info, warn};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const MAX_SCORE_KEY: &str = "maxScore";

/// A tiny persistent string map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// `key=value` lines in a plain text file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        Ok(text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        let mut keys: Vec<_> = entries.keys().collect();
        keys.sort();
        let text: String = keys
            .into_iter()
            .map(|k| format!("{}={}\n", k, entries[k]))
            .collect();
        fs::write(&self.path, text).with_context(|| format!("writing {}", self.path.display()))
    }
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The persisted best score. Best effort: store failures are logged and
/// play carries on.
pub struct HighScore {
    store: Box<dyn KeyValueStore>,
    best: u32,
}

impl HighScore {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let best = match store.get(MAX_SCORE_KEY) {
            Ok(None) => {
                info!("No saved max score, starting from 0");
                0
            }
            Ok(Some(raw)) => match raw.parse() {
                Ok(best) => best,
                Err(e) => {
                    warn!("Ignoring malformed max score {:?}: {}", raw, e);
                    0
                }
            },
            Err(e) => {
                error!("Error loading max score: {:#}", e);
                0
            }
        };
        HighScore { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Folds a finished game's score into the record and persists it.
    pub fn submit(&mut self, score: u32) -> u32 {
        if score > self.best {
            info!("New max score {} (was {})", score, self.best);
            self.best = score;
        }
        if let Err(e) = self.store.set(MAX_SCORE_KEY, &self.best.to_string()) {
            error!("Error saving max score: {:#}", e);
        }
        self.best
    }

    #[cfg(test)]
    pub fn stored(&self) -> Option<String> {
        self.store.get(MAX_SCORE_KEY).ok().flatten()
    }
}
