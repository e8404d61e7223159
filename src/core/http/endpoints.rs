//! API endpoint paths

/// Version prefix appended to the configured API host
pub const API_PREFIX: &str = "/api/v1";

/// Absolute URLs of the API endpoints used by the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    root: String,
}

impl Endpoints {
    /// `api_host` may be empty for same-origin deployments
    pub fn new(api_host: &str) -> Self {
        Self {
            root: format!("{}{}", api_host.trim_end_matches('/'), API_PREFIX),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    // System

    pub fn csrf(&self) -> String {
        self.url("/system/csrf")
    }

    pub fn cache_purge(&self) -> String {
        self.url("/system/cache/purge")
    }

    // Auth

    pub fn login(&self) -> String {
        self.url("/auth/login")
    }

    pub fn check(&self) -> String {
        self.url("/auth/check")
    }

    pub fn logout(&self) -> String {
        self.url("/auth/revoke")
    }

    pub fn register(&self) -> String {
        self.url("/auth/register")
    }

    pub fn recover(&self) -> String {
        self.url("/auth/recover")
    }

    pub fn recover_validate(&self) -> String {
        self.url("/auth/recover/validate")
    }

    pub fn recover_update(&self) -> String {
        self.url("/auth/recover/update")
    }

    // Activations

    pub fn activations(&self) -> String {
        self.url("/activations/users/all")
    }

    pub fn activation_review(&self, id: &str) -> String {
        self.url(&format!("/activations/review/{id}"))
    }

    // CSP

    pub fn csp_reports(&self) -> String {
        self.url("/csp/reports/all")
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_origin_paths() {
        let endpoints = Endpoints::default();

        assert_eq!(endpoints.root(), "/api/v1");
        assert_eq!(endpoints.login(), "/api/v1/auth/login");
        assert_eq!(endpoints.check(), "/api/v1/auth/check");
        assert_eq!(endpoints.logout(), "/api/v1/auth/revoke");
        assert_eq!(endpoints.register(), "/api/v1/auth/register");
        assert_eq!(endpoints.csrf(), "/api/v1/system/csrf");
    }

    #[test]
    fn test_api_host_prefix() {
        let endpoints = Endpoints::new("https://api.example.com/");

        assert_eq!(
            endpoints.recover_validate(),
            "https://api.example.com/api/v1/auth/recover/validate"
        );
        assert_eq!(
            endpoints.activation_review("5f0e4c9a-3b1d-4e8a-9c2f-7a6b5d4c3e21"),
            "https://api.example.com/api/v1/activations/review/5f0e4c9a-3b1d-4e8a-9c2f-7a6b5d4c3e21"
        );
        assert_eq!(
            endpoints.csp_reports(),
            "https://api.example.com/api/v1/csp/reports/all"
        );
    }
}
