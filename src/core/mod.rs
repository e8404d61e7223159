//! Core session, authorization and request logic for the admin dashboard

pub mod auth;
pub mod config;
pub mod guard;
pub mod http;
pub mod navbar;
pub mod routes;
pub mod session;
pub mod utils;
#[cfg(test)]
mod tests;

pub use config::{AppConfig, ConfigError};
pub use guard::{Decision, GuardOutcome, NavigationGuard};
pub use routes::{RouteName, RouteSpec};
