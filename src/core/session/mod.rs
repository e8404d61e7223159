//! Client session state
//!
//! The session is the accepted access token plus the profile derived from it,
//! both kept in persistent key/value storage so they survive reloads.

mod storage;
mod store;

#[cfg(feature = "hydrate")]
pub use storage::LocalStorage;
pub use storage::{
    ACCESS_TOKEN_KEY, CSRF_KEY, KeyValueStorage, MemoryStorage, NAVBAR_KEY, StorageError, USER_KEY,
};
pub(crate) use store::log_session_error;
pub use store::{SessionError, SessionProfile, SessionSnapshot, SessionStore, SubscriptionId};
