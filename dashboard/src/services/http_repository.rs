//! [`Repository`] over the REST API.
//!
//! Plugging an `HttpRepository<T>` into a `ResourceService<T>` gives the
//! dashboard the same service API the server uses internally, with the
//! same error signaling: a 404 from the server becomes
//! [`ServiceError::NotFound`] carrying the record's label.

use async_trait::async_trait;
use church_admin_core::domain::{Record, ResourceService, ServiceError};
use church_admin_core::storage::Repository;
use log::debug;
use shared::{ListResponse, SearchParams, MAX_PAGE_SIZE};
use std::marker::PhantomData;
use std::sync::Arc;

use super::api::ApiClient;

pub struct HttpRepository<T: Record> {
    api: ApiClient,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> HttpRepository<T> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _record: PhantomData,
        }
    }

    /// A resource service talking to the server through `api`
    pub fn service(api: ApiClient) -> ResourceService<T> {
        ResourceService::new(Arc::new(Self::new(api)))
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", T::PATH, id)
    }

    fn not_found_as_record(id: &str, error: ServiceError) -> ServiceError {
        if error.is_not_found() {
            ServiceError::not_found(T::LABEL, id)
        } else {
            error
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for HttpRepository<T> {
    async fn list(&self, params: &SearchParams) -> Result<ListResponse<T>, ServiceError> {
        self.api.get(T::PATH, &params.to_pairs()).await
    }

    async fn get(&self, id: &str) -> Result<T, ServiceError> {
        self.api
            .get(&Self::item_path(id), &[])
            .await
            .map_err(|e| Self::not_found_as_record(id, e))
    }

    async fn create(&self, draft: T::Create) -> Result<T, ServiceError> {
        self.api.post(T::PATH, &draft).await
    }

    async fn update(&self, id: &str, patch: T::Update) -> Result<T, ServiceError> {
        self.api
            .patch(&Self::item_path(id), &patch)
            .await
            .map_err(|e| Self::not_found_as_record(id, e))
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.api
            .delete(&Self::item_path(id))
            .await
            .map_err(|e| Self::not_found_as_record(id, e))
    }

    async fn all(&self) -> Result<Vec<T>, ServiceError> {
        let mut records = Vec::new();
        let mut page = 1;
        loop {
            let params = SearchParams::new().with_page(page, MAX_PAGE_SIZE);
            let response = self.list(&params).await?;
            debug!(
                "Fetched page {}/{} of {}",
                page,
                response.total_pages,
                T::PATH
            );
            let has_next = response.has_next_page() && !response.data.is_empty();
            records.extend(response.data);
            if !has_next {
                return Ok(records);
            }
            page += 1;
        }
    }
}
