//! Error pages

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::routes::{RouteName, by_name};

#[component]
fn ErrorPage(code: &'static str, title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <main class="error-page">
            <h1 class="error-code">{code}</h1>
            <h2>{title}</h2>
            <p>{description}</p>
            <A href=by_name(RouteName::Home).path attr:class="error-home">"Go Home"</A>
        </main>
    }
}

/// Forbidden (403) page component
#[component]
pub fn ForbiddenPage() -> impl IntoView {
    view! {
        <ErrorPage
            code="403"
            title="Forbidden"
            description="You don't have permission to open this page. Sign in with another account."
        />
    }
}

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <ErrorPage
            code="404"
            title="Page Not Found"
            description="The page you're looking for doesn't exist or has been moved."
        />
    }
}
