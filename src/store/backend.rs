use crate::content::Entity;
use crate::store::StoreError;

/// Storage behind a collection. Keeps records in a stable order, newest first.
pub trait Backend<T: Entity>: Send {
    fn list(&self) -> Result<Vec<T>, StoreError>;

    fn get(&self, id: &str) -> Result<Option<T>, StoreError>;

    fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.get(id)?.is_some())
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.list()?.is_empty())
    }

    /// Insert at the head of the ordering. The id must not already be present.
    fn push_front(&mut self, record: T) -> Result<(), StoreError>;

    /// Overwrite the record with the same id in place. `false` if absent.
    fn replace(&mut self, record: T) -> Result<bool, StoreError>;

    /// Overwrite several existing records as one unit. Ids that are absent are
    /// skipped. Backends that can fail part-way must roll back on error.
    fn replace_all(&mut self, records: Vec<T>) -> Result<(), StoreError> {
        for record in records {
            self.replace(record)?;
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<bool, StoreError>;
}

/// Ordered vector; the canonical backend.
#[derive(Debug, Clone)]
pub struct MemoryBackend<T> {
    records: Vec<T>,
}

impl<T> MemoryBackend<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> Default for MemoryBackend<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Backend<T> for MemoryBackend<T> {
    fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.clone())
    }

    fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.records.iter().find(|r| r.id() == id).cloned())
    }

    fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.iter().any(|r| r.id() == id))
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.records.is_empty())
    }

    fn push_front(&mut self, record: T) -> Result<(), StoreError> {
        self.records.insert(0, record);
        Ok(())
    }

    fn replace(&mut self, record: T) -> Result<bool, StoreError> {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        Ok(self.records.len() != before)
    }
}
