//! # Church Admin Dashboard
//!
//! Client side of the church administration dashboard, without any UI:
//!
//! - [`services`]: the REST client, session store and network-backed
//!   resource services
//! - [`state`]: page controller state built on top of those services
//! - [`config`]: where the server is and how patient to be with it
//!
//! ```text
//! ListController → ResourceService → HttpRepository → ApiClient → /api
//! ```

pub mod config;
pub mod services;
pub mod state;

pub use config::DashboardConfig;
pub use services::{session::SessionStore, DashboardServices};
pub use state::{FormState, ListController, LoadState};
