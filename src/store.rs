use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::storage::Storage;

/// A record that lives in a named persisted collection.
pub trait Entity {
    const KEY: &'static str;

    fn id(&self) -> &str;
}

/// In-memory collection of one domain type, newest first, mirrored to
/// storage on every mutation. Instantiated per entity type and passed
/// explicitly to whatever needs it; there are no ambient singletons.
pub struct EntityStore<T: Entity> {
    storage: Storage,
    records: Vec<T>,
}

impl<T> EntityStore<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    /// Hydrates from storage, falling back to `seed` when nothing usable is
    /// persisted. Hydration itself never writes: saving the transient state
    /// here could clobber a previously persisted collection before it is read.
    pub fn open(storage: Storage, seed: impl FnOnce() -> Vec<T>) -> Self {
        let records = storage.load(T::KEY).unwrap_or_else(seed);
        Self { storage, records }
    }

    pub fn insert(&mut self, record: T) {
        self.records.insert(0, record);
        self.persist();
    }

    /// Applies `apply` to the matching record and persists. Returns `false`
    /// when the id is absent, in which case nothing is written.
    pub fn update(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                apply(record);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Applies `apply` to every record, persisting once at the end.
    pub fn update_all(&mut self, mut apply: impl FnMut(&mut T)) {
        for record in &mut self.records {
            apply(record);
        }
        self.persist();
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.records.iter().position(|r| r.id() == id)?;
        let removed = self.records.remove(idx);
        self.persist();
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) {
        // The in-memory collection stays authoritative when the write fails;
        // the mutation itself has already succeeded.
        if let Err(e) = self.storage.save(T::KEY, &self.records) {
            warn!(collection = T::KEY, error = %e, "failed to persist collection");
        }
    }
}
