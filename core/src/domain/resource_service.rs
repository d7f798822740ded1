//! # Resource Service
//!
//! `ResourceService<T>` is the one CRUD service every resource uses. It
//! validates drafts and patches, delegates storage to an injected
//! [`Repository`], and logs each operation. Resource-specific behavior
//! (statistics, exports, publishing) is added with inherent impls on the
//! concrete service type in the per-domain modules.
//!
//! Validation runs before the repository is touched, so a rejected
//! request never stores anything regardless of which repository variant is
//! in use.

use log::{error, info, warn};
use shared::{ListResponse, SearchParams};
use std::sync::Arc;
use std::time::Duration;

use super::error::ServiceError;
use super::models::Record;
use crate::storage::traits::Repository;
use crate::storage::{InMemoryRepository, RecordClock};

pub struct ResourceService<T: Record> {
    repository: Arc<dyn Repository<T>>,
}

impl<T: Record> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<T: Record> ResourceService<T> {
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Self { repository }
    }

    /// A service over a fresh in-memory repository
    pub fn in_memory(clock: Arc<RecordClock>, latency: Duration) -> Self {
        Self::new(Arc::new(InMemoryRepository::new(clock).with_latency(latency)))
    }

    pub async fn list(&self, params: &SearchParams) -> Result<ListResponse<T>, ServiceError> {
        info!("Listing {} records: {:?}", T::LABEL, params);
        self.repository.list(params).await.map_err(|e| {
            error!("Failed to list {} records: {}", T::LABEL, e);
            e
        })
    }

    pub async fn get(&self, id: &str) -> Result<T, ServiceError> {
        info!("Fetching {} {}", T::LABEL, id);
        self.repository.get(id).await
    }

    pub async fn create(&self, draft: T::Create) -> Result<T, ServiceError> {
        let errors = T::validate_create(&draft);
        if !errors.is_empty() {
            warn!("Rejected new {}: {}", T::LABEL, errors.join("; "));
            return Err(ServiceError::Validation(errors));
        }

        let record = self.repository.create(draft).await.map_err(|e| {
            error!("Failed to create {}: {}", T::LABEL, e);
            e
        })?;
        info!("✅ Created {} {}", T::LABEL, record.id());
        Ok(record)
    }

    pub async fn update(&self, id: &str, patch: T::Update) -> Result<T, ServiceError> {
        let errors = T::validate_update(&patch);
        if !errors.is_empty() {
            warn!("Rejected update of {} {}: {}", T::LABEL, id, errors.join("; "));
            return Err(ServiceError::Validation(errors));
        }

        let record = self.repository.update(id, patch).await?;
        info!("✅ Updated {} {}", T::LABEL, id);
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.repository.delete(id).await?;
        info!("🗑️ Deleted {} {}", T::LABEL, id);
        Ok(())
    }

    /// The full dataset, for aggregates and exports
    pub async fn all(&self) -> Result<Vec<T>, ServiceError> {
        self.repository.all().await
    }
}
