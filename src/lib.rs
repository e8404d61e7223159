//! Adminboard - Administration Dashboard
//!
//! Browser front-end for an administration API, built with Leptos and
//! WebAssembly. Access is controlled by encrypted, signed access tokens that
//! are verified in the browser before a session is started.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
