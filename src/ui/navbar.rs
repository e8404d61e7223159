//! Navigation bar

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::auth::has_permission;
use crate::core::navbar::NavbarState;
use crate::core::routes::{ADMIN_ROLES, RouteName, by_name};
use crate::core::session::log_session_error;
use crate::ui::session::use_session_context;

/// Side navigation with the links the current user may open
#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session_context();

    let is_admin = move || {
        let snapshot = session.snapshot.get();
        has_permission(ADMIN_ROLES, snapshot.roles())
    };

    let display_name = move || {
        session
            .profile()
            .map(|profile| profile.display_name())
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        let client = session.client();
        let navigate = use_navigate();
        spawn_local(async move {
            // The local session is dropped even when revocation fails
            if let Err(e) = client.logout().await {
                warn!("Session revocation failed: {}", e);
            }
            log_session_error("Failed to clear session", session.sign_out());
            navigate(by_name(RouteName::AuthLogin).path, Default::default());
        });
    };

    view! {
        <nav
            class="navbar"
            class:navbar-open=move || session.navbar.get() == NavbarState::Open
            class:navbar-close=move || session.navbar.get() == NavbarState::Close
            data-state=move || session.navbar.get().as_str()
        >
            <div class="navbar-header">
                <button
                    type="button"
                    class="navbar-toggle"
                    title="Toggle navigation"
                    on:click=move |_| session.toggle_navbar()
                >
                    "☰"
                </button>
                <span class="navbar-user">{display_name}</span>
            </div>

            <ul class="navbar-links">
                <li><A href=by_name(RouteName::Home).path>"Home"</A></li>
                <li><A href=by_name(RouteName::System).path>"System"</A></li>
                <Show when=is_admin>
                    <li><A href=by_name(RouteName::AdminUsers).path>"Users"</A></li>
                    <li><A href=by_name(RouteName::AdminUsersReview).path>"Pending activation"</A></li>
                </Show>
            </ul>

            <button type="button" class="navbar-logout" on:click=on_logout>
                "Sign out"
            </button>
        </nav>
    }
}
