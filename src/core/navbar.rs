//! Navigation bar display preference

use std::sync::Arc;

use leptos::logging::warn;

use super::session::{KeyValueStorage, NAVBAR_KEY};

/// Navbar display modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NavbarState {
    /// Follow the viewport width
    #[default]
    Auto,
    Open,
    Close,
}

impl NavbarState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavbarState::Auto => "auto",
            NavbarState::Open => "open",
            NavbarState::Close => "close",
        }
    }

    /// Unknown values read as `Auto`
    pub fn from_str(s: &str) -> Self {
        match s {
            "open" => NavbarState::Open,
            "close" => NavbarState::Close,
            _ => NavbarState::Auto,
        }
    }

    /// Next state in the toggle cycle
    pub fn next(self) -> Self {
        match self {
            NavbarState::Auto => NavbarState::Open,
            NavbarState::Open => NavbarState::Close,
            NavbarState::Close => NavbarState::Auto,
        }
    }
}

/// Persisted navbar preference
#[derive(Clone)]
pub struct NavbarStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl NavbarStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub fn state(&self) -> NavbarState {
        match self.storage.get(NAVBAR_KEY) {
            Ok(Some(value)) => NavbarState::from_str(&value),
            Ok(None) => NavbarState::Auto,
            Err(e) => {
                warn!("Failed to read navbar state: {}", e);
                NavbarState::Auto
            }
        }
    }

    /// Advance to the next state and persist it
    pub fn toggle(&self) -> NavbarState {
        let next = self.state().next();
        if let Err(e) = self.storage.set(NAVBAR_KEY, next.as_str()) {
            warn!("Failed to persist navbar state: {}", e);
        }
        next
    }
}
