//! Process-wide state container.
//!
//! Composes the independent slices under one state tree. Reducer
//! application is serialized: a dispatch takes the state lock, mutates
//! exactly one slice, and notifies every subscriber synchronously with a
//! snapshot before returning. The only suspension point in the whole data
//! layer is the network call inside a spawned fetch task.

use crate::client::ApiClient;
use crate::models::{Category, Question};
use crate::store::app::{AppAction, AppState};
use crate::store::resource::{FetchLifecycle, ResourceAction, ResourceState};
use crate::store::user::{UserAction, UserState};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Complete state tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootState {
    pub categories: ResourceState<Category>,
    pub questions: ResourceState<Question>,
    pub user: UserState,
    pub app: AppState,
}

/// Dispatchable actions, each routed to exactly one slice.
///
/// Fetch lifecycle transitions are not here: they are applied internally
/// by [`Store::fetch_categories`] and [`Store::fetch_questions`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Categories(ResourceAction),
    Questions(ResourceAction),
    User(UserAction),
    App(AppAction),
}

impl RootState {
    fn apply(&mut self, action: Action) {
        match action {
            Action::Categories(action) => self.categories.apply(action),
            Action::Questions(action) => self.questions.apply(action),
            Action::User(action) => self.user.apply(action),
            Action::App(action) => self.app.apply(action),
        }
    }
}

type SubscriberFn = Arc<dyn Fn(&RootState) + Send + Sync>;

/// Handle returned by [`Store::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// State container composing all slices.
///
/// Held behind an `Arc` and passed explicitly to whoever needs it; there
/// is no global instance.
pub struct Store {
    state: Mutex<RootState>,
    subscribers: Mutex<Vec<(u64, SubscriberFn)>>,
    next_subscription: AtomicU64,
    client: ApiClient,
}

impl Store {
    /// Create a store over the given API client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: Mutex::new(RootState::default()),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            client,
        }
    }

    /// Snapshot of the current state tree.
    pub fn state(&self) -> RootState {
        self.state.lock().expect("state lock poisoned").clone()
    }

    /// Read the state without cloning the tree.
    pub fn with_state<R>(&self, f: impl FnOnce(&RootState) -> R) -> R {
        f(&self.state.lock().expect("state lock poisoned"))
    }

    /// Register a callback invoked synchronously after every mutation.
    pub fn subscribe(&self, callback: impl Fn(&RootState) + Send + Sync + 'static) -> Subscription {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push((id, Arc::new(callback)));
        Subscription(id)
    }

    /// Remove a previously registered callback.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .retain(|(id, _)| *id != subscription.0);
    }

    /// Dispatch an action: mutate the owning slice, then notify.
    pub fn dispatch(&self, action: Action) {
        debug!(?action, "dispatch");
        self.mutate(|state| state.apply(action));
    }

    /// Trigger the categories fetch.
    ///
    /// The pending transition is applied synchronously before any I/O; the
    /// request itself runs on a spawned task. The returned handle may be
    /// awaited or dropped (fire-and-forget). Overlapping fetches race
    /// last-write-wins: whichever completion lands last owns the slice.
    pub fn fetch_categories(self: &Arc<Self>) -> JoinHandle<()> {
        self.mutate(|state| state.categories.apply_lifecycle(FetchLifecycle::Pending));

        let store = Arc::clone(self);
        tokio::spawn(async move {
            let transition = match store.client.fetch_categories().await {
                Ok(items) => {
                    debug!(count = items.len(), "categories fetch fulfilled");
                    FetchLifecycle::Fulfilled(items)
                }
                Err(e) => {
                    warn!(error = %e, "categories fetch rejected");
                    FetchLifecycle::Rejected(e.to_string())
                }
            };
            store.mutate(|state| state.categories.apply_lifecycle(transition));
        })
    }

    /// Trigger the questions fetch. Same lifecycle contract as
    /// [`Store::fetch_categories`].
    pub fn fetch_questions(self: &Arc<Self>) -> JoinHandle<()> {
        self.mutate(|state| state.questions.apply_lifecycle(FetchLifecycle::Pending));

        let store = Arc::clone(self);
        tokio::spawn(async move {
            let transition = match store.client.fetch_questions().await {
                Ok(items) => {
                    debug!(count = items.len(), "questions fetch fulfilled");
                    FetchLifecycle::Fulfilled(items)
                }
                Err(e) => {
                    warn!(error = %e, "questions fetch rejected");
                    FetchLifecycle::Rejected(e.to_string())
                }
            };
            store.mutate(|state| state.questions.apply_lifecycle(transition));
        })
    }

    /// The API client in use.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Serialized mutation followed by synchronous notification.
    fn mutate(&self, f: impl FnOnce(&mut RootState)) {
        let snapshot = {
            let mut state = self.state.lock().expect("state lock poisoned");
            f(&mut state);
            state.clone()
        };
        self.notify(&snapshot);
    }

    fn notify(&self, snapshot: &RootState) {
        // The list is cloned out of the lock so a callback may subscribe,
        // unsubscribe, or dispatch without deadlocking.
        let subscribers: Vec<SubscriberFn> = self
            .subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in subscribers {
            callback(snapshot);
        }
    }
}
