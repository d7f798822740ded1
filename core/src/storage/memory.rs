//! # In-Memory Repository
//!
//! Keeps records in an `Arc<RwLock<Vec<T>>>` owned by whoever builds the
//! repository; there is no process-global state, so every test and every
//! server instance gets its own data.
//!
//! Insertion order is preserved, which is also the order lists come back in
//! when no `sortBy` is given. An optional simulated latency is awaited
//! before every operation to mimic a remote backend.

use async_trait::async_trait;
use log::{debug, info, warn};
use shared::{ListResponse, SearchParams};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::clock::RecordClock;
use super::query;
use super::traits::Repository;
use crate::domain::error::ServiceError;
use crate::domain::models::Record;

pub struct InMemoryRepository<T: Record> {
    records: Arc<RwLock<Vec<T>>>,
    clock: Arc<RecordClock>,
    latency: Duration,
}

impl<T: Record> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            clock: Arc::clone(&self.clock),
            latency: self.latency,
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new(clock: Arc<RecordClock>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            clock,
            latency: Duration::ZERO,
        }
    }

    /// Await `latency` before every operation
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Start from existing records instead of an empty store
    pub fn with_records(mut self, records: Vec<T>) -> Self {
        self.records = Arc::new(RwLock::new(records));
        self
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn not_found(id: &str) -> ServiceError {
        warn!("{} {} not found", T::LABEL, id);
        ServiceError::not_found(T::LABEL, id)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn list(&self, params: &SearchParams) -> Result<ListResponse<T>, ServiceError> {
        self.simulate_latency().await;
        let snapshot = self.records.read().await.clone();
        let page = query::run(snapshot, params);
        debug!(
            "Listed {} of {} {} records (page {}, limit {})",
            page.data.len(),
            page.total,
            T::LABEL,
            page.page,
            page.limit
        );
        Ok(page)
    }

    async fn get(&self, id: &str) -> Result<T, ServiceError> {
        self.simulate_latency().await;
        let records = self.records.read().await;
        records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: T::Create) -> Result<T, ServiceError> {
        self.simulate_latency().await;
        let stamp = self.clock.tick();
        let record = T::from_create(draft, stamp.id(T::ID_PREFIX), &stamp.timestamp);

        self.records.write().await.push(record.clone());
        info!("Stored {} {}", T::LABEL, record.id());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: T::Update) -> Result<T, ServiceError> {
        self.simulate_latency().await;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        record.apply_update(patch);
        record.touch(self.clock.tick().timestamp);
        info!("Updated {} {}", T::LABEL, id);
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.simulate_latency().await;
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        records.remove(position);
        info!("Deleted {} {}", T::LABEL, id);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<T>, ServiceError> {
        self.simulate_latency().await;
        Ok(self.records.read().await.clone())
    }
}
