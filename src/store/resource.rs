//! Generic resource slice: one collection's data, loading, and error state.
//!
//! Invariants:
//! - a rejected fetch drops `loading` in the same transition that sets `error`
//! - a fulfilled fetch replaces `items` wholesale and clears `error`
//! - `items` changes only through a fulfilled fetch or an explicit clear

use serde::Serialize;

/// State owned by one resource slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceState<T> {
    /// Collection in server response order
    pub items: Vec<T>,
    /// True strictly while a fetch is in flight
    pub loading: bool,
    /// Classified message from the most recent failed fetch
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// Externally dispatchable actions on a resource slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAction {
    /// Empty the collection and clear any error. An in-flight fetch is not
    /// cancelled; its completion still applies afterward.
    Clear,
    /// Override the error message directly.
    SetError(String),
    /// Reset the error state.
    ClearError,
}

/// Fetch lifecycle transitions, applied only by the store's fetch
/// operations. Not part of the public dispatch surface.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FetchLifecycle<T> {
    Pending,
    Fulfilled(Vec<T>),
    Rejected(String),
}

impl<T> ResourceState<T> {
    /// Apply an externally dispatched action.
    pub fn apply(&mut self, action: ResourceAction) {
        match action {
            ResourceAction::Clear => {
                self.items.clear();
                self.error = None;
            }
            ResourceAction::SetError(message) => self.error = Some(message),
            ResourceAction::ClearError => self.error = None,
        }
    }

    /// Apply a fetch lifecycle transition.
    pub(crate) fn apply_lifecycle(&mut self, transition: FetchLifecycle<T>) {
        match transition {
            FetchLifecycle::Pending => {
                self.loading = true;
                self.error = None;
            }
            FetchLifecycle::Fulfilled(items) => {
                self.items = items;
                self.loading = false;
                self.error = None;
            }
            FetchLifecycle::Rejected(message) => {
                // items stay as they are: stale data beats a blank screen
                self.loading = false;
                self.error = Some(message);
            }
        }
    }
}
