//! # List Controller
//!
//! Page state for a searchable, filterable, paginated resource list.
//!
//! The controller owns the current [`SearchParams`] and publishes
//! [`LoadState`] snapshots on a watch channel. Every fetch takes a new
//! generation number and its result is published only if no newer fetch
//! has started since, so a slow response can never overwrite a newer one.
//!
//! - search text is debounced; only the last keystroke fetches
//! - filter, sort and page changes fetch immediately
//! - search and filter changes go back to page 1
//! - successful mutations reload the current page
//!
//! Create and edit forms go through `submit_create`/`submit_update`, which
//! publish a [`FormState`] on a second channel.

use church_admin_core::domain::{Record, ResourceService, ServiceError};
use log::{debug, info};
use shared::{ListResponse, SearchParams, SortOrder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::debounce::Debouncer;
use super::load_state::{FormState, LoadState};

pub type ListState<T> = LoadState<ListResponse<T>>;

pub struct ListController<T: Record> {
    service: ResourceService<T>,
    params: Arc<Mutex<SearchParams>>,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<ListState<T>>>,
    form: Arc<watch::Sender<FormState<T>>>,
    in_flight: Arc<Mutex<Option<JoinHandle<()>>>>,
    debouncer: Debouncer,
}

impl<T: Record> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            params: Arc::clone(&self.params),
            generation: Arc::clone(&self.generation),
            state: Arc::clone(&self.state),
            form: Arc::clone(&self.form),
            in_flight: Arc::clone(&self.in_flight),
            debouncer: self.debouncer.clone(),
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: Record> ListController<T> {
    pub fn new(service: ResourceService<T>, search_debounce: Duration) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        let (form, _) = watch::channel(FormState::Idle);
        Self {
            service,
            params: Arc::new(Mutex::new(SearchParams::new())),
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
            form: Arc::new(form),
            in_flight: Arc::new(Mutex::new(None)),
            debouncer: Debouncer::new(search_debounce),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ListState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe_form(&self) -> watch::Receiver<FormState<T>> {
        self.form.subscribe()
    }

    pub fn form_state(&self) -> FormState<T> {
        self.form.borrow().clone()
    }

    /// Back to [`FormState::Idle`], e.g. when the form is closed
    pub fn reset_form(&self) {
        self.form.send_replace(FormState::Idle);
    }

    pub fn params(&self) -> SearchParams {
        lock(&self.params).clone()
    }

    fn update_params<F: FnOnce(&mut SearchParams)>(&self, change: F) {
        change(&mut lock(&self.params));
    }

    /// Fetch the current page and publish the result unless superseded
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let params = self.params();
        self.state.send_replace(LoadState::Loading);

        let result = self.service.list(&params).await;

        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = LoadState::from(result);
            true
        });
        if !published {
            debug!("Discarded stale {} list (generation {})", T::PATH, generation);
        }
    }

    /// Refresh in the background, aborting a background refresh still running
    pub fn reload(&self) {
        let controller = self.clone();
        let handle = tokio::spawn(async move { controller.refresh().await });
        if let Some(previous) = lock(&self.in_flight).replace(handle) {
            previous.abort();
        }
    }

    /// Update the search text and fetch once typing pauses. Returns whether
    /// this call was the one that fetched.
    pub async fn set_search(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update_params(|params| {
            params.search = Some(text).filter(|text| !text.is_empty());
            params.page = Some(1);
        });
        if !self.debouncer.settle().await {
            return false;
        }
        self.refresh().await;
        true
    }

    /// Set or, with an empty value, clear one filter
    pub async fn set_filter(&self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        self.update_params(|params| {
            if value.is_empty() {
                params.filters.remove(&key);
            } else {
                params.filters.insert(key, value);
            }
            params.page = Some(1);
        });
        self.refresh().await;
    }

    pub async fn clear_filters(&self) {
        self.debouncer.cancel();
        self.update_params(|params| {
            params.filters.clear();
            params.search = None;
            params.page = Some(1);
        });
        self.refresh().await;
    }

    pub async fn set_sort(&self, key: impl Into<String>, order: SortOrder) {
        let key = key.into();
        self.update_params(|params| {
            params.sort_by = Some(key);
            params.sort_order = Some(order);
        });
        self.refresh().await;
    }

    pub async fn set_page(&self, page: u32) {
        self.update_params(|params| params.page = Some(page.max(1)));
        self.refresh().await;
    }

    pub async fn set_page_size(&self, limit: u32) {
        self.update_params(|params| {
            params.limit = Some(limit);
            params.page = Some(1);
        });
        self.refresh().await;
    }

    pub async fn create(&self, draft: T::Create) -> Result<T, ServiceError> {
        let record = self.service.create(draft).await?;
        info!("Created {} {}", T::LABEL, record.id());
        self.refresh().await;
        Ok(record)
    }

    pub async fn update(&self, id: &str, patch: T::Update) -> Result<T, ServiceError> {
        let record = self.service.update(id, patch).await?;
        self.refresh().await;
        Ok(record)
    }

    /// [`create`](Self::create) from a form, tracking its [`FormState`]
    pub async fn submit_create(&self, draft: T::Create) -> FormState<T> {
        self.form.send_replace(FormState::Submitting);
        let outcome = FormState::from(self.create(draft).await);
        self.form.send_replace(outcome.clone());
        outcome
    }

    /// [`update`](Self::update) from an edit form, tracking its [`FormState`]
    pub async fn submit_update(&self, id: &str, patch: T::Update) -> FormState<T> {
        self.form.send_replace(FormState::Submitting);
        let outcome = FormState::from(self.update(id, patch).await);
        self.form.send_replace(outcome.clone());
        outcome
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.service.delete(id).await?;
        info!("Deleted {} {}", T::LABEL, id);
        self.refresh().await;
        Ok(())
    }
}
