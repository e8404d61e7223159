//! Navigation guard
//!
//! Decides, for each route transition, whether the target may be shown or
//! where to send the user instead. The guard is pure: it reads a session
//! snapshot and route metadata and returns a decision. Applying the decision
//! (navigating, clearing the session, setting the title) is up to the router
//! integration in `ui::guard`.

use super::auth::has_route_access;
use super::routes::{RouteName, RouteSpec};
use super::session::SessionSnapshot;

/// Outcome of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(RouteName),
}

/// Lifecycle of a single transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Evaluating,
    Allowed,
    Redirected(RouteName),
}

impl From<Decision> for GuardState {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Allow => GuardState::Allowed,
            Decision::RedirectTo(route) => GuardState::Redirected(route),
        }
    }
}

/// Everything the router needs to apply a decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub decision: Decision,
    /// Document title for the target route
    pub title: String,
    /// Session must be cleared before redirecting
    pub clear_session: bool,
}

/// Route access guard with the application's title settings
#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    app_title: String,
    app_description: String,
}

impl NavigationGuard {
    pub fn new(app_title: impl Into<String>, app_description: impl Into<String>) -> Self {
        Self {
            app_title: app_title.into(),
            app_description: app_description.into(),
        }
    }

    /// Document title for `route`
    pub fn page_title(&self, route: &RouteSpec) -> String {
        match route.title {
            Some(title) if !title.is_empty() => format!("{} - {}", title, self.app_title),
            _ => format!("{} - {}", self.app_title, self.app_description),
        }
    }

    /// Evaluate a transition to `route`
    pub fn evaluate(&self, route: &RouteSpec, session: &SessionSnapshot) -> GuardOutcome {
        Transition::begin(route).resolve(self, session)
    }

    fn decide(route: &RouteSpec, session: &SessionSnapshot) -> (Decision, bool) {
        if !session.authenticated {
            if route.access.public || route.name == RouteName::AuthLogin {
                return (Decision::Allow, false);
            }
            return (Decision::RedirectTo(RouteName::AuthLogin), false);
        }

        if matches!(route.name, RouteName::AuthLogin | RouteName::AuthRegister) {
            return (Decision::RedirectTo(RouteName::AuthCheck), false);
        }

        if !route.access.roles.is_empty() && !has_route_access(route.access.roles, session.roles())
        {
            return (Decision::RedirectTo(RouteName::Forbidden), true);
        }

        (Decision::Allow, false)
    }
}

/// A single transition moving from `Evaluating` to its final state
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    route: &'a RouteSpec,
    state: GuardState,
}

impl<'a> Transition<'a> {
    pub fn begin(route: &'a RouteSpec) -> Self {
        Self {
            route,
            state: GuardState::Evaluating,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn route(&self) -> &'a RouteSpec {
        self.route
    }

    /// Decide the transition. Resolving twice returns the same outcome.
    pub fn resolve(&mut self, guard: &NavigationGuard, session: &SessionSnapshot) -> GuardOutcome {
        let (decision, clear_session) = NavigationGuard::decide(self.route, session);
        self.state = decision.into();

        GuardOutcome {
            decision,
            title: guard.page_title(self.route),
            clear_session,
        }
    }
}
