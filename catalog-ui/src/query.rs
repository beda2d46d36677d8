///! Reactive wrapper around the shared query cache
///!
///! List pages subscribe to the generation of their entity kind, so any
///! mutation that invalidates the kind refetches every mounted list.

use crate::api::{self, EntityApi};
use crate::error::LoadFailure;
use catalog_common::query::{QueryCache, QueryKey};
use catalog_common::{Entity, EntityId, EntityKind};
use leptos::*;

#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: RwSignal<QueryCache>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: create_rw_signal(QueryCache::new()),
        }
    }

    pub fn provide() -> Self {
        let client = Self::new();
        provide_context(client);
        client
    }

    /// Tracked read; refetch triggers key off this
    pub fn generation(&self, kind: EntityKind) -> u64 {
        self.cache.with(|cache| cache.generation(kind))
    }

    pub fn cached<E: Entity>(&self, key: &QueryKey) -> Option<E> {
        self.cache.with_untracked(|cache| cache.get(key))
    }

    pub fn set_query_data<T: serde::Serialize>(&self, key: QueryKey, data: &T) {
        self.cache
            .update_untracked(|cache| cache.set_query_data(key, data));
    }

    pub fn invalidate(&self, kind: EntityKind) {
        self.cache.update(|cache| cache.invalidate(kind));
    }

    pub fn after_save<E: Entity>(&self, record: &E) {
        self.cache.update(|cache| cache.after_save(record));
    }
}

pub fn use_query_client() -> QueryClient {
    expect_context::<QueryClient>()
}

pub type Query<S, T> = Resource<S, Result<T, LoadFailure>>;

/// All records of a kind, refetched whenever the kind is invalidated
pub fn use_list<E: EntityApi>() -> Query<u64, Vec<E>> {
    let query = use_query_client();

    create_local_resource(
        move || query.generation(E::KIND),
        move |_| async move {
            match E::resource(&api::client()).get_all().await {
                Ok(rows) => {
                    query.set_query_data(QueryKey::List(E::KIND), &rows);
                    Ok(rows)
                }
                Err(error) => Err(LoadFailure::from(&error)),
            }
        },
    )
}

/// One record, served from the cache when a recent save stored it
pub fn use_detail<E: EntityApi>(
    id: impl Fn() -> Option<EntityId> + 'static,
) -> Query<(Option<EntityId>, u64), E> {
    let query = use_query_client();

    create_local_resource(
        move || (id(), query.generation(E::KIND)),
        move |(id, _)| async move {
            let Some(id) = id else {
                return Err(LoadFailure {
                    status: Some(404),
                    message: "Invalid record id".to_string(),
                });
            };

            let key = QueryKey::Detail(E::KIND, id);
            if let Some(record) = query.cached::<E>(&key) {
                return Ok(record);
            }

            match E::resource(&api::client()).get_one_by_id(id).await {
                Ok(record) => {
                    query.set_query_data(key, &record);
                    Ok(record)
                }
                Err(error) => Err(LoadFailure::from(&error)),
            }
        },
    )
}
