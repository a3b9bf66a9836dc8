use chrono::Utc;
use std::collections::HashSet;

use crate::content::ids::generate_id;
use crate::content::Entity;
use crate::store::backend::Backend;
use crate::store::StoreError;

/// Ordered, id-keyed repository for one entity kind.
///
/// Mutations report whether their target existed instead of failing:
/// `update` yields `None` and `delete` yields `false` for an unknown id, and the
/// collection is left untouched.
pub struct Collection<T: Entity> {
    backend: Box<dyn Backend<T>>,
}

impl<T: Entity> Collection<T> {
    pub fn new(backend: Box<dyn Backend<T>>) -> Self {
        Self { backend }
    }

    /// Load seed records, keeping their order. Skipped when the backend already has rows.
    pub fn seed(&mut self, records: Vec<T>) -> Result<bool, StoreError> {
        if !self.backend.is_empty()? {
            return Ok(false);
        }
        for record in records.into_iter().rev() {
            self.backend.push_front(record)?;
        }
        Ok(true)
    }

    pub fn list(&self) -> Result<Vec<T>, StoreError> {
        self.backend.list()
    }

    pub fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        self.backend.get(id)
    }

    /// First record in list order carrying this slug.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<T>, StoreError> {
        Ok(self
            .backend
            .list()?
            .into_iter()
            .find(|r| r.slug() == Some(slug)))
    }

    pub fn add(&mut self, new: T::New) -> Result<T, StoreError> {
        let id = loop {
            let candidate = generate_id();
            if !self.backend.contains(&candidate)? {
                break candidate;
            }
        };

        let mut record = T::from_new(id, new, Utc::now());

        if let Some(slug) = record.slug().map(str::to_string) {
            let taken: HashSet<String> = self
                .backend
                .list()?
                .iter()
                .filter_map(|r| r.slug().map(str::to_string))
                .collect();
            record.set_slug(unique_slug(&slug, &taken));
        }

        self.backend.push_front(record.clone())?;
        tracing::debug!("Added {} {}", T::KIND, record.id());
        Ok(record)
    }

    pub fn update(&mut self, id: &str, patch: T::Patch) -> Result<Option<T>, StoreError> {
        let Some(mut record) = self.backend.get(id)? else {
            tracing::debug!("Update skipped, no {} with id {}", T::KIND, id);
            return Ok(None);
        };

        let previous_slug = record.slug().map(str::to_string);
        record.apply(patch);

        // An explicitly patched slug must not collide with another record's
        if let Some(slug) = record.slug().map(str::to_string) {
            if previous_slug.as_deref() != Some(slug.as_str()) {
                let taken: HashSet<String> = self
                    .backend
                    .list()?
                    .iter()
                    .filter(|r| r.id() != id)
                    .filter_map(|r| r.slug().map(str::to_string))
                    .collect();
                record.set_slug(unique_slug(&slug, &taken));
            }
        }

        self.backend.replace(record.clone())?;
        tracing::debug!("Updated {} {}", T::KIND, id);
        Ok(Some(record))
    }

    /// Swap in a whole record with the same id. `false` if absent.
    pub fn replace(&mut self, record: T) -> Result<bool, StoreError> {
        self.backend.replace(record)
    }

    /// Swap in several records at once; either all land or none do.
    pub fn replace_all(&mut self, records: Vec<T>) -> Result<(), StoreError> {
        self.backend.replace_all(records)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.backend.remove(id)?;
        if removed {
            tracing::debug!("Deleted {} {}", T::KIND, id);
        }
        Ok(removed)
    }
}

/// `base`, then `base-2`, `base-3`, ... until one is free.
fn unique_slug(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
