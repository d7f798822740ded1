//! # Church Admin Core
//!
//! Everything about the church's records that does not depend on how they
//! travel:
//!
//! ```text
//! Domain Layer (records, resource services, statistics, reports)
//!     ↓
//! Storage Layer (repository trait, in-memory repository, list queries)
//! ```
//!
//! The server exposes these services over REST; the dashboard runs the
//! same services over a repository that talks to that REST API.

pub mod domain;
pub mod storage;
