//! Client-side query cache
//!
//! Results of reads are stored under a [`QueryKey`]. After any successful
//! mutation the entity is invalidated: its entries are dropped and its
//! generation counter moves forward, which is what list views watch to know
//! they must refetch. Mutation responses are only ever stored under their own
//! detail key, never spliced into a list.

use crate::{Entity, EntityId, EntityKind};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List(EntityKind),
    Detail(EntityKind, EntityId),
}

impl QueryKey {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::List(kind) | Self::Detail(kind, _) => *kind,
        }
    }

    pub fn detail_of<E: Entity>(entity: &E) -> Self {
        Self::Detail(E::KIND, entity.id())
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(kind) => write!(f, "[{}]", kind.cache_key()),
            Self::Detail(kind, id) => write!(f, "[{}, {}]", kind.cache_key(), id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, serde_json::Value>,
    generations: HashMap<EntityKind, u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, if present and still shaped like `T`
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set_query_data<T: Serialize>(&mut self, key: QueryKey, data: &T) {
        if let Ok(value) = serde_json::to_value(data) {
            self.entries.insert(key, value);
        }
    }

    /// Store a freshly created or updated record under its detail key
    pub fn store_record<E: Entity>(&mut self, record: &E) {
        self.set_query_data(QueryKey::detail_of(record), record);
    }

    /// Drop every entry of `kind` and mark its queries stale
    pub fn invalidate(&mut self, kind: EntityKind) {
        self.entries.retain(|key, _| key.kind() != kind);
        *self.generations.entry(kind).or_insert(0) += 1;
    }

    /// Record the mutation result and force list views to refetch
    pub fn after_save<E: Entity>(&mut self, record: &E) {
        self.invalidate(E::KIND);
        self.store_record(record);
    }

    pub fn generation(&self, kind: EntityKind) -> u64 {
        self.generations.get(&kind).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
