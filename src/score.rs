use crate::config::{HIGH_SCORES_KEY, MAX_HIGH_SCORES};
use crate::storage::{KeyValueStore, StorageError};

/// Bounded, descending best-scores list kept in a durable store.
///
/// The ledger is the only writer of its key. Persistence is best-effort:
/// unreadable data reads as an empty list and failed writes are dropped.
#[derive(Debug, Clone)]
pub struct ScoreLedger<K> {
    store: K,
    capacity: usize,
}

impl<K: KeyValueStore> ScoreLedger<K> {
    /// Creates a ledger keeping the reference number of entries.
    #[must_use]
    pub fn new(store: K) -> Self {
        Self::with_capacity(store, MAX_HIGH_SCORES)
    }

    #[must_use]
    pub fn with_capacity(store: K, capacity: usize) -> Self {
        Self { store, capacity }
    }

    /// Adds `score`, keeps the best `capacity` entries, and persists them.
    ///
    /// Malformed stored data is replaced. When the store cannot be read the
    /// write is skipped so the list it may still hold is not clobbered.
    pub fn record(&mut self, score: u32) {
        let mut scores = match self.try_snapshot() {
            Ok(scores) => scores,
            Err(StorageError::Malformed(error)) => {
                log::warn!("replacing malformed high scores: {error}");
                Vec::new()
            }
            Err(error) => {
                log::warn!("skipping high score write: {error}");
                return;
            }
        };
        scores.push(score);
        let scores = self.normalized(scores);

        if let Err(error) = self.persist(&scores) {
            log::warn!("dropping high score write: {error}");
        }
    }

    /// Returns the stored list, best first. Storage failures read as empty.
    #[must_use]
    pub fn snapshot(&self) -> Vec<u32> {
        self.try_snapshot().unwrap_or_else(|error| {
            log::warn!("high scores unavailable: {error}");
            Vec::new()
        })
    }

    /// Returns the stored list or the storage failure that prevented it.
    pub fn try_snapshot(&self) -> Result<Vec<u32>, StorageError> {
        let Some(raw) = self.store.get(HIGH_SCORES_KEY)? else {
            return Ok(Vec::new());
        };

        let scores = serde_json::from_str::<Vec<u32>>(&raw)?;
        Ok(self.normalized(scores))
    }

    #[must_use]
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Releases the backing store.
    #[must_use]
    pub fn into_store(self) -> K {
        self.store
    }

    fn normalized(&self, mut scores: Vec<u32>) -> Vec<u32> {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(self.capacity);
        scores
    }

    fn persist(&mut self, scores: &[u32]) -> Result<(), StorageError> {
        let json = serde_json::to_string(scores)?;
        self.store.set(HIGH_SCORES_KEY, &json)
    }
}
