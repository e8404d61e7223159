//! Request/response interceptors
//!
//! Two independent hooks wrap every API call:
//! - before a state-mutating request, decide whether the anti-forgery cookie
//!   must be refreshed (the refresh itself is fire-and-forget)
//! - after a failed request, wipe the session on 403 or network failure

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use derive_more::Display;

use super::endpoints::Endpoints;
use crate::core::session::{
    CSRF_KEY, KeyValueStorage, SessionStore, StorageError, log_session_error,
};

/// Lifetime assumed for a freshly issued anti-forgery cookie
pub const CSRF_REFRESH_MINUTES: i64 = 50;

/// HTTP methods used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HttpMethod {
    #[display("GET")]
    Get,
    #[display("HEAD")]
    Head,
    #[display("OPTIONS")]
    Options,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("PATCH")]
    Patch,
    #[display("DELETE")]
    Delete,
}

impl HttpMethod {
    /// Methods that need an anti-forgery token
    pub fn is_state_mutating(self) -> bool {
        matches!(
            self,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete
        )
    }
}

/// A pending anti-forgery refresh; record it once the refresh call succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsrfRefresh {
    pub expires_at: DateTime<Utc>,
}

/// Why a request failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFailure {
    /// The server answered with a non-success status
    Status(u16),
    /// The request never reached the server
    Network(String),
    /// Anything else (body decoding, request construction)
    Other(String),
}

/// What the client must do after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Hand the error to the caller untouched
    PassThrough,
    /// Session was purged; the page must be reloaded
    Reload,
}

/// Interceptor state shared by all requests
#[derive(Clone)]
pub struct RequestPipeline {
    session: SessionStore,
    storage: Arc<dyn KeyValueStorage>,
    endpoints: Endpoints,
}

impl RequestPipeline {
    pub fn new(session: SessionStore, endpoints: Endpoints) -> Self {
        Self {
            storage: session.storage(),
            session,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Stored anti-forgery expiry, if present and parseable
    pub fn csrf_expiry(&self) -> Option<DateTime<Utc>> {
        let raw = self.storage.get(CSRF_KEY).ok().flatten()?;
        DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|date| date.with_timezone(&Utc))
    }

    /// Outgoing hook: a refresh to start for `method` at `now`, if any
    pub fn before_request(&self, method: HttpMethod, now: DateTime<Utc>) -> Option<CsrfRefresh> {
        if !method.is_state_mutating() {
            return None;
        }

        match self.csrf_expiry() {
            Some(expires_at) if expires_at >= now => None,
            _ => Some(CsrfRefresh {
                expires_at: now + Duration::minutes(CSRF_REFRESH_MINUTES),
            }),
        }
    }

    /// Persist the expiry of a completed refresh
    pub fn record_csrf_refresh(&self, refresh: CsrfRefresh) -> Result<(), StorageError> {
        self.storage.set(CSRF_KEY, &refresh.expires_at.to_rfc3339())
    }

    /// Incoming hook: purge the session on 403 and network failures
    pub fn after_failure(&self, failure: &ResponseFailure) -> FailureAction {
        match failure {
            ResponseFailure::Status(403) | ResponseFailure::Network(_) => {
                log_session_error("Failed to purge session", self.session.purge());
                FailureAction::Reload
            }
            _ => FailureAction::PassThrough,
        }
    }
}
