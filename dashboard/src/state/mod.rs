//! # Page State
//!
//! Controller-side state shared by every dashboard page: tagged load and
//! form states, the generation-guarded list controller and the search
//! debouncer.

pub mod debounce;
pub mod list_controller;
pub mod load_state;

pub use debounce::Debouncer;
pub use list_controller::{ListController, ListState};
pub use load_state::{FormState, LoadState};
