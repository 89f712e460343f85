//! In-memory repository backed by an ordered map.
//!
//! # Invariants
//! - Every operation holds the map lock for its whole duration, which
//!   makes insert-if-absent and remove-if-present atomic.
//! - Listing order is ascending by business key.
//! - Read paths reject stored entities that fail validation, matching the
//!   SQLite backend.

use crate::model::entity::Entity;
use crate::repo::entity_repo::{
    ensure_stored_valid, EntityRepository, InsertOutcome, RepoError, RepoResult,
};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

const LOCK_NAME: &str = "in-memory entity map";
const BACKEND: &str = "memory";

/// Thread-safe map store for tests and embedded use.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    rows: Mutex<BTreeMap<String, E>>,
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entities.
    pub fn len(&self) -> RepoResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, BTreeMap<String, E>>> {
        self.rows.lock().map_err(|_| RepoError::Poisoned(LOCK_NAME))
    }
}

impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    fn find_by_key(&self, key: &str) -> RepoResult<Option<E>> {
        self.lock()?
            .get(key)
            .map(|entity| ensure_stored_valid(entity.clone(), BACKEND))
            .transpose()
    }

    fn insert(&self, entity: &E) -> RepoResult<InsertOutcome> {
        match self.lock()?.entry(entity.key().to_string()) {
            Entry::Occupied(_) => Ok(InsertOutcome::KeyExists),
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    fn replace(&self, entity: &E) -> RepoResult<bool> {
        match self.lock()?.get_mut(entity.key()) {
            Some(stored) => {
                *stored = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn upsert(&self, entity: &E) -> RepoResult<()> {
        self.lock()?.insert(entity.key().to_string(), entity.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> RepoResult<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }

    fn find_all(&self) -> RepoResult<Vec<E>> {
        self.find_where(&|_| true)
    }

    fn find_where(&self, predicate: &dyn Fn(&E) -> bool) -> RepoResult<Vec<E>> {
        let mut matches = Vec::new();
        for entity in self.lock()?.values() {
            let entity = ensure_stored_valid(entity.clone(), BACKEND)?;
            if predicate(&entity) {
                matches.push(entity);
            }
        }
        Ok(matches)
    }
}
