//! Route table
//!
//! Static metadata for every page: where it lives, its title, and who may open
//! it. The view layer registers one route per entry; the navigation guard
//! reads the metadata.

use derive_more::Display;

/// Roles allowed to manage users
pub const ADMIN_ROLES: &[&str] = &["superadmin", "admin"];

/// Route identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RouteName {
    #[display("home")]
    Home,
    #[display("system")]
    System,
    #[display("auth_login")]
    AuthLogin,
    #[display("auth_check")]
    AuthCheck,
    #[display("auth_register")]
    AuthRegister,
    #[display("auth_recover")]
    AuthRecover,
    #[display("admin_users")]
    AdminUsers,
    #[display("admin_users_review")]
    AdminUsersReview,
    #[display("403")]
    Forbidden,
    #[display("404")]
    NotFound,
}

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteAccessSpec {
    /// Reachable without a session
    pub public: bool,
    /// Roles of which the user needs at least one; empty means any
    /// authenticated user
    pub roles: &'static [&'static str],
}

impl RouteAccessSpec {
    pub const PUBLIC: Self = Self {
        public: true,
        roles: &[],
    };

    pub const AUTHENTICATED: Self = Self {
        public: false,
        roles: &[],
    };

    pub const fn restricted(roles: &'static [&'static str]) -> Self {
        Self {
            public: false,
            roles,
        }
    }
}

impl Default for RouteAccessSpec {
    fn default() -> Self {
        Self::AUTHENTICATED
    }
}

/// A page of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub name: RouteName,
    /// Absolute path; `*` marks the fallback route
    pub path: &'static str,
    pub title: Option<&'static str>,
    pub access: RouteAccessSpec,
}

impl RouteSpec {
    const fn new(
        name: RouteName,
        path: &'static str,
        title: &'static str,
        access: RouteAccessSpec,
    ) -> Self {
        Self {
            name,
            path,
            title: Some(title),
            access,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.path == "*"
    }
}

pub static ROUTES: &[RouteSpec] = &[
    RouteSpec::new(RouteName::Home, "/", "Home", RouteAccessSpec::AUTHENTICATED),
    // System
    RouteSpec::new(
        RouteName::System,
        "/system",
        "System settings",
        RouteAccessSpec::AUTHENTICATED,
    ),
    // Auth
    RouteSpec::new(
        RouteName::AuthLogin,
        "/auth/login",
        "Login",
        RouteAccessSpec::PUBLIC,
    ),
    RouteSpec::new(
        RouteName::AuthCheck,
        "/auth/check",
        "Validating user session",
        RouteAccessSpec::PUBLIC,
    ),
    RouteSpec::new(
        RouteName::AuthRegister,
        "/auth/register",
        "Register",
        RouteAccessSpec::PUBLIC,
    ),
    RouteSpec::new(
        RouteName::AuthRecover,
        "/auth/recover",
        "Password recovery",
        RouteAccessSpec::PUBLIC,
    ),
    // Administrator
    RouteSpec::new(
        RouteName::AdminUsers,
        "/admin/users",
        "Manage users",
        RouteAccessSpec::restricted(ADMIN_ROLES),
    ),
    RouteSpec::new(
        RouteName::AdminUsersReview,
        "/admin/users/review",
        "Users pending activation",
        RouteAccessSpec::restricted(ADMIN_ROLES),
    ),
    // Errors
    RouteSpec::new(
        RouteName::Forbidden,
        "/403",
        "Forbidden - HTTP 403",
        RouteAccessSpec::PUBLIC,
    ),
    RouteSpec::new(
        RouteName::NotFound,
        "*",
        "Not Found - HTTP 404",
        RouteAccessSpec::PUBLIC,
    ),
];

/// Route for a location path; unknown paths resolve to the 404 route
pub fn resolve(path: &str) -> &'static RouteSpec {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };

    ROUTES
        .iter()
        .find(|route| route.path == normalized)
        .unwrap_or_else(|| by_name(RouteName::NotFound))
}

/// Route with the given name
pub fn by_name(name: RouteName) -> &'static RouteSpec {
    ROUTES
        .iter()
        .find(|route| route.name == name)
        .unwrap_or(&ROUTES[ROUTES.len() - 1])
}
