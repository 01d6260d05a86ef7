//! Per-entity create/list/get on top of a [`Store`].

use crate::document::Entity;
use crate::error::{Error, Result};
use crate::store::Store;
use std::marker::PhantomData;
use tracing::debug;

/// Create, list and look up one kind of entity.
///
/// Get one from [`Store::posts`] or [`Store::users`]. It borrows the store and
/// is cheap to make, so build a fresh one per call site.
pub struct Repository<'s, E> {
    store: &'s Store,
    _marker: PhantomData<E>,
}

impl<'s, E: Entity> Repository<'s, E> {
    pub(crate) fn new(store: &'s Store) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Store a new entity under the next id (`count + 1`) and return it.
    ///
    /// Input is taken as-is; validate and filter before calling.
    pub fn create(&self, draft: E::Draft) -> Result<E> {
        self.store.update(|doc| {
            let table = E::table_mut(doc);
            let id = table.len() as u64 + 1;
            if table.contains_key(&id) {
                return Err(Error::Corrupt(format!(
                    "{} ids are not dense, {id} already taken",
                    E::KIND
                )));
            }
            let entity = E::build(id, draft);
            table.insert(id, entity.clone());
            debug!(kind = E::KIND, id, "entity created");
            Ok(entity)
        })
    }

    /// Every entity, ordered by ascending id.
    pub fn list(&self) -> Result<Vec<E>> {
        self.store.read(|doc| {
            let mut all: Vec<E> = E::table(doc).values().cloned().collect();
            all.sort_unstable_by_key(|e| e.id());
            Ok(all)
        })
    }

    /// The entity with `id`, or [`Error::NotFound`].
    pub fn get(&self, id: u64) -> Result<E> {
        self.store.read(|doc| {
            E::table(doc)
                .get(&id)
                .cloned()
                .ok_or(Error::NotFound { kind: E::KIND, id })
        })
    }

    /// Number of stored entities.
    pub fn count(&self) -> Result<usize> {
        self.store.read(|doc| Ok(E::table(doc).len()))
    }
}

impl<E: Entity> std::fmt::Debug for Repository<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("kind", &E::KIND)
            .field("store", self.store)
            .finish()
    }
}
