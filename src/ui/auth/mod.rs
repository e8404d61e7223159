//! Authentication UI module
//!
//! Components that obtain an access token and hand it to the session store.

mod login_form;

pub use login_form::LoginForm;
