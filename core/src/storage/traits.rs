//! # Storage Traits
//!
//! The [`Repository`] trait is the seam between the domain services and
//! wherever records actually live. The backend ships an in-memory
//! implementation; the dashboard implements it over the REST API. Services
//! only ever hold an `Arc<dyn Repository<T>>`, so both variants are
//! interchangeable and report failures the same way.

use async_trait::async_trait;
use shared::{ListResponse, SearchParams};

use crate::domain::error::ServiceError;
use crate::domain::models::Record;

/// CRUD access to one kind of record
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// One page of records matching `params`
    async fn list(&self, params: &SearchParams) -> Result<ListResponse<T>, ServiceError>;

    /// Fails with [`ServiceError::NotFound`] when no record has this id
    async fn get(&self, id: &str) -> Result<T, ServiceError>;

    /// Store a new record built from an already validated draft
    async fn create(&self, draft: T::Create) -> Result<T, ServiceError>;

    /// Merge the fields present in `patch` into the stored record
    async fn update(&self, id: &str, patch: T::Update) -> Result<T, ServiceError>;

    /// Deleting an id that does not exist is [`ServiceError::NotFound`]
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;

    /// Every stored record, used by reports and exports
    async fn all(&self) -> Result<Vec<T>, ServiceError>;
}
