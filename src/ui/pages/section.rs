//! Dashboard section placeholder

use leptos::prelude::*;

use crate::core::routes::RouteSpec;
use crate::ui::navbar::Navbar;
use crate::ui::session::use_session_context;

/// Page frame for a dashboard section, with the navbar for signed-in users
#[component]
pub fn SectionPage(route: &'static RouteSpec) -> impl IntoView {
    let session = use_session_context();
    let heading = route.title.unwrap_or_default();

    view! {
        <div class="layout" data-route=route.name.to_string()>
            <Show when=move || session.is_authenticated()>
                <Navbar />
            </Show>
            <main class="layout-content">
                <h1>{heading}</h1>
            </main>
        </div>
    }
}
