//! Router integration of the navigation guard

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::core::guard::Decision;
use crate::core::routes::{by_name, resolve};
use crate::core::session::log_session_error;
use crate::ui::session::use_session_context;

/// Evaluates the navigation guard on every location change and renders its
/// children only once the transition is allowed
#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let session = use_session_context();
    let location = use_location();
    let navigate = use_navigate();

    let allowed = RwSignal::new(false);
    let title = RwSignal::new(String::new());

    Effect::new(move |_| {
        let path = location.pathname.get();
        let route = resolve(&path);

        // Session state is read live so sign-in and sign-out are seen by the
        // very next transition.
        let outcome = session
            .guard()
            .evaluate(route, &session.store().snapshot());

        title.set(outcome.title);

        if outcome.clear_session {
            log_session_error("Failed to clear session", session.sign_out());
        }

        match outcome.decision {
            Decision::Allow => allowed.set(true),
            Decision::RedirectTo(target) => {
                allowed.set(false);
                navigate(
                    by_name(target).path,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        }
    });

    view! {
        <Title text=move || title.get() />
        <Show when=move || allowed.get()>
            {children()}
        </Show>
    }
}
