// ── Resource service seam ──
//
// The controller talks to the backend only through `ResourceService`.
// `ApiService` is the real implementation over `ApiClient`; tests can
// substitute their own.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use taller_api::ApiClient;

use crate::error::CoreError;
use crate::model::EntityId;
use crate::resource::Resource;

/// Query-string filters for a list call, as `(name, value)` pairs.
pub type ListParams = Vec<(String, String)>;

/// The five CRUD verbs for one resource, in domain types.
pub trait ResourceService<R: Resource>: Send + Sync {
    /// Every entity matching `params`; an empty slice lists them all.
    fn list(
        &self,
        params: &[(String, String)],
    ) -> impl Future<Output = Result<Vec<R::Entity>, CoreError>> + Send;

    fn get(&self, id: EntityId) -> impl Future<Output = Result<R::Entity, CoreError>> + Send;

    /// The created entity when the backend echoes it back.
    fn create(
        &self,
        payload: &R::Payload,
    ) -> impl Future<Output = Result<Option<R::Entity>, CoreError>> + Send;

    fn update(
        &self,
        id: EntityId,
        payload: &R::Payload,
    ) -> impl Future<Output = Result<Option<R::Entity>, CoreError>> + Send;

    fn remove(&self, id: EntityId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// [`ResourceService`] backed by the REST client.
pub struct ApiService<R> {
    client: Arc<ApiClient>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> ApiService<R> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }
}

impl<R> Clone for ApiService<R> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.client))
    }
}

impl<R: Resource> ResourceService<R> for ApiService<R> {
    async fn list(&self, params: &[(String, String)]) -> Result<Vec<R::Entity>, CoreError> {
        let records: Vec<R::Record> = self.client.list_records(R::ENDPOINT, params).await?;
        debug!(kind = R::KIND, count = records.len(), "list fetched");
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: EntityId) -> Result<R::Entity, CoreError> {
        let record: R::Record = self
            .client
            .get_record(R::ENDPOINT, id.get())
            .await
            .map_err(|e| not_found_as::<R>(e, id))?;
        Ok(record.into())
    }

    async fn create(&self, payload: &R::Payload) -> Result<Option<R::Entity>, CoreError> {
        let created: Option<R::Record> = self.client.create_record(R::ENDPOINT, payload).await?;
        Ok(created.map(Into::into))
    }

    async fn update(
        &self,
        id: EntityId,
        payload: &R::Payload,
    ) -> Result<Option<R::Entity>, CoreError> {
        let updated: Option<R::Record> = self
            .client
            .update_record(R::ENDPOINT, id.get(), payload)
            .await
            .map_err(|e| not_found_as::<R>(e, id))?;
        Ok(updated.map(Into::into))
    }

    async fn remove(&self, id: EntityId) -> Result<(), CoreError> {
        self.client
            .delete_record(R::ENDPOINT, id.get())
            .await
            .map_err(|e| not_found_as::<R>(e, id))
    }
}

/// Name the resource in a 404 instead of echoing the request path.
fn not_found_as<R: Resource>(err: taller_api::Error, id: EntityId) -> CoreError {
    if err.is_not_found() {
        CoreError::NotFound {
            entity_type: capitalize(R::KIND),
            identifier: id.to_string(),
        }
    } else {
        err.into()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
