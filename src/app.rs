use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::AppConfig;
use crate::core::routes::{RouteName, by_name};
use crate::ui::pages::{CheckPage, ForbiddenPage, LoginPage, NotFoundPage, SectionPage};
use crate::ui::{RouteGuard, provide_session_context};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    let config = AppConfig::from_build_env();

    view! {
        <!DOCTYPE html>
        <html lang=config.locale>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

fn section(name: RouteName) -> impl Fn() -> AnyView + Clone + Send + Sync + 'static {
    move || view! { <SectionPage route=by_name(name) /> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let config = AppConfig::from_build_env();
    provide_session_context(&config);

    view! {
        <Stylesheet id="leptos" href="/pkg/adminboard.css"/>

        <Router>
            <RouteGuard>
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=section(RouteName::Home) />
                    <Route path=path!("/system") view=section(RouteName::System) />
                    <Route path=path!("/auth/login") view=LoginPage />
                    <Route path=path!("/auth/check") view=CheckPage />
                    <Route path=path!("/auth/register") view=section(RouteName::AuthRegister) />
                    <Route path=path!("/auth/recover") view=section(RouteName::AuthRecover) />
                    <Route path=path!("/admin/users") view=section(RouteName::AdminUsers) />
                    <Route
                        path=path!("/admin/users/review")
                        view=section(RouteName::AdminUsersReview)
                    />
                    <Route path=path!("/403") view=ForbiddenPage />
                </Routes>
            </RouteGuard>
        </Router>
    }
}
