use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use anyhow::Result;

use super::loader::load_file;
use super::model::Dataset;

/// How long a loaded dataset is served before it is read again.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

struct Entry {
    dataset: Arc<Dataset>,
    loaded_at: Instant,
}

/// Load-once cache for the dataset file with a time-based refresh window.
///
/// Callers hold the cache and pass the returned `Arc<Dataset>` into the
/// pure filter and view functions.
pub struct DatasetCache {
    path: PathBuf,
    ttl: Duration,
    entry: Mutex<Option<Entry>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached dataset, loading it if absent or expired.
    pub fn get(&self) -> Result<Arc<Dataset>> {
        self.get_at(Instant::now())
    }

    fn get_at(&self, now: Instant) -> Result<Arc<Dataset>> {
        let mut slot = self.slot();

        if let Some(entry) = slot.as_ref() {
            if now.saturating_duration_since(entry.loaded_at) < self.ttl {
                log::trace!("Dataset cache hit for {}", self.path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
            log::debug!("Dataset cache expired for {}", self.path.display());
        }

        let dataset = Arc::new(load_file(&self.path)?);
        *slot = Some(Entry {
            dataset: Arc::clone(&dataset),
            loaded_at: now,
        });
        Ok(dataset)
    }

    /// Drop the cached dataset so the next `get` reloads it.
    pub fn invalidate(&self) {
        *self.slot() = None;
    }

    // The slot only ever holds a fully loaded entry, so a poisoned lock is
    // still usable.
    fn slot(&self) -> MutexGuard<'_, Option<Entry>> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
