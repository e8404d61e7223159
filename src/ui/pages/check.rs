//! Session check page
//!
//! Shown after sign-in redirects: asks the API whether the stored session is
//! still accepted, then continues home or back to the login page.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::core::routes::{RouteName, by_name};
use crate::core::session::log_session_error;
use crate::ui::session::use_session_context;

#[component]
pub fn CheckPage() -> impl IntoView {
    let session = use_session_context();

    Effect::new(move |_| {
        let client = session.client();
        let navigate = use_navigate();

        spawn_local(async move {
            let target = match client.check().await {
                Ok(()) => RouteName::Home,
                Err(e) => {
                    warn!("Session check failed: {}", e);
                    log_session_error("Failed to clear session", session.sign_out());
                    RouteName::AuthLogin
                }
            };

            navigate(
                by_name(target).path,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        });
    });

    view! {
        <main class="auth-page">
            <p class="auth-status">"Validating user session..."</p>
        </main>
    }
}
