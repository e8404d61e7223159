//! Login form component
//!
//! Posts the credentials to the login endpoint and stores the returned access
//! token. A token the session store rejects is reported like a failed login.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::ui::http::ApiError;
use crate::ui::session::use_session_context;

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let session = use_session_context();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);

    // Form validation
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let form_error = RwSignal::new(None::<String>);

    let validate_email = move || {
        let value = email.get();
        if value.is_empty() {
            email_error.set(Some("Email is required".to_string()));
            false
        } else if !value.contains('@') || !value.contains('.') {
            email_error.set(Some("Please enter a valid email".to_string()));
            false
        } else {
            email_error.set(None);
            true
        }
    };

    let validate_password = move || {
        if password.get().is_empty() {
            password_error.set(Some("Password is required".to_string()));
            false
        } else {
            password_error.set(None);
            true
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form_error.set(None);

        let email_valid = validate_email();
        let password_valid = validate_password();
        if !email_valid || !password_valid {
            return;
        }

        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        let client = session.client();
        loading.set(true);

        spawn_local(async move {
            let result = match client.login(&email_val, &password_val).await {
                Ok(response) => session.sign_in(&response.access_token).map_err(|e| {
                    warn!("Login returned an unusable token: {}", e);
                    "Your session could not be started. Please try again.".to_string()
                }),
                Err(ApiError::Status(401 | 422)) => Err("Invalid email or password".to_string()),
                Err(e) => Err(e.to_string()),
            };

            loading.set(false);
            match result {
                Ok(_) => {
                    password.set(String::new());
                    if let Some(callback) = on_success {
                        callback.run(());
                    }
                }
                Err(message) => form_error.set(Some(message)),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="login-form">
            <h2>"Sign in"</h2>

            {move || {
                form_error.get().map(|error| {
                    view! { <p class="form-error" role="alert">{error}</p> }
                })
            }}

            <div class="form-field">
                <label for="email">"Email"</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    class:invalid=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                    on:blur=move |_| { validate_email(); }
                />
                {move || {
                    email_error.get().map(|error| view! { <p class="field-error">{error}</p> })
                }}
            </div>

            <div class="form-field">
                <label for="password">"Password"</label>
                <input
                    type="password"
                    id="password"
                    name="password"
                    autocomplete="current-password"
                    class:invalid=move || password_error.get().is_some()
                    prop:value=move || password.get()
                    on:input=move |ev| {
                        password.set(event_target_value(&ev));
                        password_error.set(None);
                    }
                    on:blur=move |_| { validate_password(); }
                />
                {move || {
                    password_error.get().map(|error| view! { <p class="field-error">{error}</p> })
                }}
            </div>

            <button type="submit" disabled=move || loading.get()>
                {move || if loading.get() { "Signing in..." } else { "Sign in" }}
            </button>
        </form>
    }
}
