//! Per-entity service module
//!
//! Reads go through the public host; writes and deletes need the protected
//! host. Read failures are logged here before being returned, so the caller
//! can tell an empty list from a failed one.

use crate::error::Result;
use crate::CatalogClient;
use catalog_common::payload::RequestBody;
use catalog_common::{Entity, EntityId, SlugAddressable};
use reqwest::Method;
use std::marker::PhantomData;

pub struct Resource<E> {
    client: CatalogClient,
    _entity: PhantomData<E>,
}

impl<E> Clone for Resource<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Resource<E> {
    pub(crate) fn new(client: CatalogClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn collection(&self) -> &'static str {
        E::KIND.api_path()
    }

    fn member(&self, id: EntityId) -> String {
        format!("{}/{}", self.collection(), id)
    }

    async fn read<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.host(Method::GET, path);
        let result = self.client.execute(request).await;
        if let Err(error) = &result {
            tracing::error!(entity = %E::KIND, path, "read failed: {}", error);
        }
        result
    }

    /// GET `/{entity}`
    pub async fn get_all(&self) -> Result<Vec<E>> {
        self.read(self.collection()).await
    }

    /// GET `/{entity}/{id}`
    pub async fn get_one_by_id(&self, id: EntityId) -> Result<E> {
        self.read(&self.member(id)).await
    }

    /// POST `/{entity}`
    pub async fn create(&self, body: RequestBody) -> Result<E> {
        let request = self.client.protected_host(Method::POST, self.collection())?;
        let request = crate::attach_body(request, body)?;
        let created: E = self.client.execute(request).await?;
        tracing::info!(entity = %E::KIND, id = created.id(), "created");
        Ok(created)
    }

    /// PATCH `/{entity}/{id}` with the changed fields
    pub async fn update(&self, id: EntityId, body: RequestBody) -> Result<E> {
        let request = self.client.protected_host(Method::PATCH, &self.member(id))?;
        let request = crate::attach_body(request, body)?;
        let updated: E = self.client.execute(request).await?;
        tracing::info!(entity = %E::KIND, id, "updated");
        Ok(updated)
    }

    /// DELETE `/{entity}/{id}`; whatever the backend echoes back is discarded
    pub async fn delete(&self, id: EntityId) -> Result<()> {
        let request = self.client.protected_host(Method::DELETE, &self.member(id))?;
        self.client.execute_discarding(request).await?;
        tracing::info!(entity = %E::KIND, id, "deleted");
        Ok(())
    }
}

impl<E: SlugAddressable> Resource<E> {
    /// GET `/{entity}/slug/{slug}`
    pub async fn get_one_by_slug(&self, slug: &str) -> Result<E> {
        let path = format!("{}/slug/{}", self.collection(), urlencoding::encode(slug));
        self.read(&path).await
    }
}
