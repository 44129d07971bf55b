//! verdant - data layer for the Verdant plant-identification client.
//!
//! ## Architecture
//!
//! - **ApiClient**: one GET per resource against the plant API, every
//!   failure classified into a fixed taxonomy before it reaches state
//! - **Store**: composes the resource slices (categories, questions) and
//!   the UI slices (app, user) under one state tree; dispatches are
//!   serialized and subscribers are notified synchronously
//!
//! ## Fetch lifecycle
//!
//! `fetch_*` applies the pending transition before any I/O, runs the
//! request on a spawned task, and settles the slice with either the new
//! collection or a classified error message. A failed fetch keeps the
//! previously loaded items; overlapping fetches resolve last-write-wins.

pub mod client;
pub mod models;
pub mod store;

// Re-exports for convenience
pub use client::{is_valid_url, normalize_url, validate_external_url, ApiClient};
pub use models::{
    ApiConfig, Category, Config, ConfigError, FetchError, Question, Resource, Result, VerdantError,
};
pub use store::{
    Action, AppAction, AppState, NetworkStatus, ResourceAction, ResourceState, RootState, Store,
    Subscription, UserAction, UserState,
};
