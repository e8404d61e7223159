//! Login page component
//!
//! A standalone page for user login, redirects home on success.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::routes::{RouteName, by_name};
use crate::ui::auth::LoginForm;

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let on_success = move |_| {
        let navigate = use_navigate();
        navigate(by_name(RouteName::Home).path, Default::default());
    };

    view! {
        <main class="auth-page">
            <div class="auth-card">
                <LoginForm on_success=Callback::new(on_success) />
                <nav class="auth-links">
                    <A href=by_name(RouteName::AuthRecover).path>"Forgot your password?"</A>
                    <A href=by_name(RouteName::AuthRegister).path>"Create an account"</A>
                </nav>
            </div>
        </main>
    }
}
