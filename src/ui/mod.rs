pub mod auth;
pub mod guard;
pub mod http;
pub mod navbar;
pub mod pages;
pub mod session;

pub use guard::RouteGuard;
pub use http::{ApiClient, ApiError};
pub use navbar::Navbar;
pub use session::{SessionContext, provide_session_context, use_session_context};
