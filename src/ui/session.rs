//! Session context for the component tree
//!
//! Wraps the core [`SessionStore`] so components get:
//! - a reactive session snapshot, fed by store subscriptions
//! - the navigation guard configured with the application titles
//! - the API client with its request interceptors
//! - the persisted navbar preference

use std::sync::Arc;

use leptos::logging::error;
use leptos::prelude::*;

use crate::core::AppConfig;
use crate::core::guard::NavigationGuard;
use crate::core::http::RequestPipeline;
use crate::core::navbar::{NavbarState, NavbarStore};
use crate::core::session::{KeyValueStorage, SessionError, SessionProfile, SessionSnapshot, SessionStore};
use crate::ui::http::ApiClient;

/// Session context providing session state and actions
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Latest session snapshot
    pub snapshot: RwSignal<SessionSnapshot>,
    /// Current navbar mode
    pub navbar: RwSignal<NavbarState>,
    store: StoredValue<SessionStore>,
    guard: StoredValue<NavigationGuard>,
    client: StoredValue<ApiClient>,
    navbar_store: StoredValue<NavbarStore>,
}

impl SessionContext {
    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }

    pub fn guard(&self) -> NavigationGuard {
        self.guard.get_value()
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.get().authenticated
    }

    pub fn profile(&self) -> Option<SessionProfile> {
        self.snapshot.get().profile
    }

    /// Verify and store a freshly issued access token
    pub fn sign_in(&self, token: &str) -> Result<SessionProfile, SessionError> {
        self.store.with_value(|store| store.set_access_token(token))
    }

    /// Forget the current session
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.store.with_value(|store| store.clean())
    }

    pub fn toggle_navbar(&self) {
        let next = self.navbar_store.with_value(|navbar| navbar.toggle());
        self.navbar.set(next);
    }
}

#[cfg(feature = "hydrate")]
fn browser_storage() -> Arc<dyn KeyValueStorage> {
    Arc::new(crate::core::session::LocalStorage)
}

#[cfg(not(feature = "hydrate"))]
fn browser_storage() -> Arc<dyn KeyValueStorage> {
    Arc::new(crate::core::session::MemoryStorage::new())
}

/// Provide session context to the component tree
pub fn provide_session_context(config: &AppConfig) -> SessionContext {
    let codec = match config.token_codec() {
        Ok(codec) => Some(codec),
        Err(e) => {
            error!("Access tokens cannot be verified: {}", e);
            None
        }
    };

    let storage = browser_storage();
    let store = SessionStore::new(Arc::clone(&storage), codec);
    let navbar_store = NavbarStore::new(storage);
    let client = ApiClient::new(RequestPipeline::new(store.clone(), config.endpoints()));

    // Start anonymous on both server and client to avoid hydration mismatch
    let snapshot = RwSignal::new(SessionSnapshot::default());
    let navbar = RwSignal::new(NavbarState::default());

    let subscription = store.subscribe(move |current| snapshot.set(current.clone()));
    {
        let store = store.clone();
        on_cleanup(move || {
            store.unsubscribe(subscription);
        });
    }

    #[cfg(feature = "hydrate")]
    {
        let store = store.clone();
        let navbar_store = navbar_store.clone();
        Effect::new(move |_| {
            snapshot.set(store.snapshot());
            navbar.set(navbar_store.state());
        });
    }

    let ctx = SessionContext {
        snapshot,
        navbar,
        store: StoredValue::new(store),
        guard: StoredValue::new(config.navigation_guard()),
        client: StoredValue::new(client),
        navbar_store: StoredValue::new(navbar_store),
    };

    provide_context(ctx);
    ctx
}

/// Get session context from the component tree
pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}
