///! Backend access for the dashboard
///!
///! Builds a `CatalogClient` from build-time settings plus the session token,
///! and exposes the per-entity resources the pages need

use catalog_client::{CatalogClient, ClientConfig, Resource, DEFAULT_API_URL, DEFAULT_STATIC_URL};
use catalog_common::{Entity, EntityId, EntityKind, Expert, Price, Service};
use gloo_storage::{LocalStorage, Storage};
use leptos::*;

const TOKEN_KEY: &str = "catalog.accessToken";

pub fn client_config(token: Option<String>) -> ClientConfig {
    ClientConfig {
        base_url: option_env!("CATALOG_API_URL")
            .unwrap_or(DEFAULT_API_URL)
            .to_string(),
        static_url: option_env!("CATALOG_STATIC_URL")
            .unwrap_or(DEFAULT_STATIC_URL)
            .to_string(),
        token,
    }
}

/// Client carrying whatever token the session currently holds
pub fn client() -> CatalogClient {
    CatalogClient::new(client_config(stored_token()))
}

pub fn stored_token() -> Option<String> {
    LocalStorage::get::<String>(TOKEN_KEY)
        .ok()
        .filter(|token| !token.is_empty())
}

/// Reactive login state shared through context
#[derive(Clone, Copy)]
pub struct Session {
    token: RwSignal<Option<String>>,
}

impl Session {
    pub fn provide() -> Self {
        let session = Self {
            token: create_rw_signal(stored_token()),
        };
        provide_context(session);
        session
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.with(Option::is_some)
    }

    pub fn sign_in(&self, token: String) {
        if let Err(error) = LocalStorage::set(TOKEN_KEY, &token) {
            logging::error!("failed to persist access token: {}", error);
        }
        self.token.set(Some(token));
    }

    pub fn sign_out(&self) {
        LocalStorage::delete(TOKEN_KEY);
        self.token.set(None);
    }
}

pub fn use_session() -> Session {
    expect_context::<Session>()
}

/// Entities the dashboard can list, edit and delete
pub trait EntityApi: Entity {
    fn resource(client: &CatalogClient) -> Resource<Self>;
}

impl EntityApi for Expert {
    fn resource(client: &CatalogClient) -> Resource<Self> {
        client.experts()
    }
}

impl EntityApi for Service {
    fn resource(client: &CatalogClient) -> Resource<Self> {
        client.services()
    }
}

impl EntityApi for Price {
    fn resource(client: &CatalogClient) -> Resource<Self> {
        client.prices()
    }
}

/// Delete by kind, for table rows that only know their kind and id
pub async fn delete_entity(kind: EntityKind, id: EntityId) -> catalog_client::Result<()> {
    let client = client();
    match kind {
        EntityKind::Expert => client.experts().delete(id).await,
        EntityKind::Service => client.services().delete(id).await,
        EntityKind::Price => client.prices().delete(id).await,
    }
}
