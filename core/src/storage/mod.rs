//! # Storage Module
//!
//! Repository abstraction plus the in-memory implementation used by the
//! server and by tests.
//!
//! - [`traits::Repository`]: async CRUD seam injected into services
//! - [`memory::InMemoryRepository`]: `Arc<RwLock<Vec<T>>>` store with
//!   optional simulated latency
//! - [`query`]: search, filter, sort and pagination over in-memory data
//! - [`clock::RecordClock`]: collision-free ids and timestamps

pub mod clock;
pub mod memory;
pub mod query;
pub mod traits;

pub use clock::{RecordClock, Stamp};
pub use memory::InMemoryRepository;
pub use traits::Repository;
