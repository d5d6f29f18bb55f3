use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};

use crate::domain::inventory::{load_inventory, LoadedInventory, SourceError};

/// What a cached dataset was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceIdentity {
    path: PathBuf,
    modified: Option<SystemTime>,
}

struct Entry {
    identity: SourceIdentity,
    loaded_at: Instant,
    inventory: Arc<LoadedInventory>,
}

/// Bounded-lifetime cache of the loaded source.
///
/// Within `ttl` the cached dataset is returned without touching the file.
/// After that the file's modification time is checked and the source is
/// re-read only if it changed. The cached dataset is immutable and shared;
/// callers build their own filtered views from it.
pub struct SourceCache {
    path: PathBuf,
    ttl: Duration,
    entry: Mutex<Option<Entry>>,
}

impl SourceCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Current dataset, loading or reloading the source when needed.
    pub fn get(&self) -> Result<Arc<LoadedInventory>, SourceError> {
        let mut guard = self.entry.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(entry) = guard.as_ref() {
            if entry.loaded_at.elapsed() < self.ttl {
                return Ok(entry.inventory.clone());
            }
        }

        let identity = match self.identity() {
            Ok(identity) => identity,
            Err(e) => {
                *guard = None;
                return Err(e);
            }
        };

        if let Some(entry) = guard.as_mut() {
            if entry.identity == identity && identity.modified.is_some() {
                tracing::debug!("Source unchanged, extending cache: {}", self.path.display());
                entry.loaded_at = Instant::now();
                return Ok(entry.inventory.clone());
            }
        }

        let inventory = match load_inventory(&self.path) {
            Ok(inventory) => Arc::new(inventory),
            Err(e) => {
                *guard = None;
                return Err(e);
            }
        };

        *guard = Some(Entry {
            identity,
            loaded_at: Instant::now(),
            inventory: inventory.clone(),
        });

        Ok(inventory)
    }

    /// Forget the cached dataset; the next `get` reloads the source.
    pub fn invalidate(&self) {
        let mut guard = self.entry.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    fn identity(&self) -> Result<SourceIdentity, SourceError> {
        let metadata = std::fs::metadata(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(self.path.clone()),
            _ => SourceError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;

        Ok(SourceIdentity {
            path: self.path.clone(),
            modified: metadata.modified().ok(),
        })
    }
}
