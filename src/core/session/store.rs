//! Session store
//!
//! Owns the persisted access token and user profile. Tokens are verified before
//! anything is written: a token that fails verification is never stored and
//! leaves the session cleaned. Reads derive from storage every time, so every
//! consumer sees the same state without a cache to invalidate.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::logging::{error, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::storage::{ACCESS_TOKEN_KEY, CSRF_KEY, KeyValueStorage, StorageError, USER_KEY};
use crate::core::auth::{TokenCodec, UserClaims};

/// User profile derived from an accepted token
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SessionProfile {
    /// "First Last", skipping missing parts
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&UserClaims> for SessionProfile {
    fn from(user: &UserClaims) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
        }
    }
}

/// Point-in-time copy of the session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub profile: Option<SessionProfile>,
}

impl SessionSnapshot {
    /// Roles held, empty when there is no profile
    pub fn roles(&self) -> &[String] {
        self.profile
            .as_ref()
            .map(|p| p.roles.as_slice())
            .unwrap_or_default()
    }
}

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Access token rejected")]
    Rejected,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to serialize session profile: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type SubscriptionId = u64;

type Listener = Arc<dyn Fn(&SessionSnapshot) + Send + Sync>;

struct Inner {
    storage: Arc<dyn KeyValueStorage>,
    codec: Option<TokenCodec>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

/// Shared handle to the session; clones observe the same state
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Create a store over `storage`.
    ///
    /// Without a codec every token is rejected.
    pub fn new(storage: Arc<dyn KeyValueStorage>, codec: Option<TokenCodec>) -> Self {
        Self {
            inner: Arc::new(Inner {
                storage,
                codec,
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub(crate) fn storage(&self) -> Arc<dyn KeyValueStorage> {
        Arc::clone(&self.inner.storage)
    }

    /// Verify `token` and, if valid, persist it with its derived profile
    pub fn set_access_token(&self, token: &str) -> Result<SessionProfile, SessionError> {
        let claims = self
            .inner
            .codec
            .as_ref()
            .and_then(|codec| codec.verify(token));

        let Some(claims) = claims else {
            self.clean()?;
            return Err(SessionError::Rejected);
        };

        let profile = SessionProfile::from(&claims.user);
        let serialized = serde_json::to_string(&profile)?;

        let written = self
            .inner
            .storage
            .set(ACCESS_TOKEN_KEY, token)
            .and_then(|()| self.inner.storage.set(USER_KEY, &serialized));

        // A token must never sit next to another session's profile.
        if let Err(e) = written {
            log_session_error("Failed to roll back session", self.clean());
            return Err(e.into());
        }
        self.notify();

        Ok(profile)
    }

    /// Forget the token and profile
    pub fn clean(&self) -> Result<(), SessionError> {
        self.remove_keys(&[ACCESS_TOKEN_KEY, USER_KEY])
    }

    /// Forget the token, profile and anti-forgery expiry
    pub fn purge(&self) -> Result<(), SessionError> {
        self.remove_keys(&[ACCESS_TOKEN_KEY, USER_KEY, CSRF_KEY])
    }

    fn remove_keys(&self, keys: &[&str]) -> Result<(), SessionError> {
        for key in keys {
            self.inner.storage.remove(key)?;
        }
        self.notify();
        Ok(())
    }

    /// Currently stored access token
    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    /// Currently stored profile; unreadable data counts as no profile
    pub fn profile(&self) -> Option<SessionProfile> {
        let raw = self.read(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn roles(&self) -> Vec<String> {
        self.profile().map(|p| p.roles).unwrap_or_default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: self.is_authenticated(),
            profile: self.profile(),
        }
    }

    /// Register a callback run after every session change
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a callback; returns false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.inner.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Session storage read failed: {}", e);
                None
            }
        }
    }

    fn notify(&self) {
        // Listeners may call back into the store, so run them unlocked.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        if listeners.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("verifier", &self.inner.codec.is_some())
            .finish()
    }
}

/// Log a failed session write without interrupting the caller
pub(crate) fn log_session_error(context: &str, result: Result<(), SessionError>) {
    if let Err(e) = result {
        error!("{}: {}", context, e);
    }
}
