//! Application pages module
//!
//! This module contains the page components registered by the router:
//! - Login and session check pages
//! - Section pages for the dashboard areas
//! - Forbidden and not found error pages

mod check;
mod errors;
mod login;
mod section;

pub use check::CheckPage;
pub use errors::{ForbiddenPage, NotFoundPage};
pub use login::LoginPage;
pub use section::SectionPage;
