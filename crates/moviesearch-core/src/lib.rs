//! Search state management for moviesearch.
//!
//! Everything here is UI-agnostic: the controller consumes events and
//! emits commands, and `Controller::view` describes what to render.

/// Query cache keyed by (query, page).
pub mod cache;
/// Application controller.
pub mod controller;
/// Remote fetch adapter.
pub mod fetch;
/// User-visible notifications.
pub mod notification;
/// Page strip model.
pub mod pagination;
/// Query state and keys.
pub mod query;
/// Search input component.
pub mod search_bar;
/// View derivation.
pub mod view;

pub use cache::{QueryCache, QuerySnapshot};
pub use controller::{Command, Controller, Event};
pub use fetch::{FetchError, FetchOutcome, fetch_page};
pub use notification::Notification;
pub use pagination::{PageItem, PaginationConfig, PaginationView};
pub use query::{QueryKey, QueryState};
pub use search_bar::{SearchBar, Submission};
pub use view::{ERROR_MESSAGE, Phase, View};
