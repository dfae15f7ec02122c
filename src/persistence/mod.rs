//! Key-value persistence for the best score and settings
//!
//! Features:
//! - One small trait over string keys and values
//! - In-memory, file (native) and LocalStorage (web) backends
//! - Best-effort semantics: a broken store never stops a run

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

/// Errors a storage backend can report
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage that survives process restarts
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Persisted best score (a single scalar under one key)
pub struct BestScore {
    store: Box<dyn KeyValueStore>,
}

impl BestScore {
    /// Storage key for the best score
    pub const STORAGE_KEY: &'static str = "flappyHighScore";

    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Best score backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Read the best score; anything unreadable counts as 0
    pub fn load(&self) -> u64 {
        match self.store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(best) => best,
                Err(_) => {
                    log::warn!("Ignoring unparsable best score {:?}", raw);
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Best score unavailable: {}", e);
                0
            }
        }
    }

    /// Write the best score; failures are logged and dropped
    pub fn save(&mut self, best: u64) {
        match self.store.set(Self::STORAGE_KEY, &best.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", best),
            Err(e) => log::warn!("Failed to save best score: {}", e),
        }
    }

    /// Access the underlying store (settings share it)
    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        &mut *self.store
    }
}

impl std::fmt::Debug for BestScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestScore").finish_non_exhaustive()
    }
}
