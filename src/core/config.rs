//! Application configuration.
//!
//! The browser bundle reads its settings at compile time with
//! `AppConfig::from_build_env()`. The server host uses `AppConfig::from_env()`
//! after calling `dotenvy::dotenv()`.

use super::auth::{TokenCodec, TokenError};
use super::guard::NavigationGuard;
use super::http::Endpoints;

pub const API_HOST_VAR: &str = "ADMINBOARD_API_HOST";
pub const APP_TITLE_VAR: &str = "ADMINBOARD_APP_TITLE";
pub const APP_DESC_VAR: &str = "ADMINBOARD_APP_DESC";
pub const LOCALE_VAR: &str = "ADMINBOARD_LOCALE";
pub const DECRYPTION_JWK_VAR: &str = "ADMINBOARD_DECRYPTION_JWK";
pub const VERIFICATION_JWK_VAR: &str = "ADMINBOARD_VERIFICATION_JWK";

pub const DEFAULT_LOCALE: &str = "en-US";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid token key: {0}")]
    Key(#[from] TokenError),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API origin, e.g. `https://api.example.com`; empty for same-origin
    pub api_host: String,

    /// Shown in every page title
    pub app_title: String,

    /// Title suffix for pages without their own title
    pub app_description: String,

    pub locale: String,

    /// EC P-256 private JWK used to decrypt access tokens
    pub decryption_jwk: Option<String>,

    /// OKP Ed25519 public JWK used to verify access tokens
    pub verification_jwk: Option<String>,
}

impl AppConfig {
    /// Build from a variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            api_host: var(API_HOST_VAR).unwrap_or_default(),
            app_title: var(APP_TITLE_VAR).unwrap_or_default(),
            app_description: var(APP_DESC_VAR).unwrap_or_default(),
            locale: var(LOCALE_VAR).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            decryption_jwk: var(DECRYPTION_JWK_VAR),
            verification_jwk: var(VERIFICATION_JWK_VAR),
        }
    }

    /// Settings baked in when the crate was compiled.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                API_HOST_VAR => option_env!("ADMINBOARD_API_HOST"),
                APP_TITLE_VAR => option_env!("ADMINBOARD_APP_TITLE"),
                APP_DESC_VAR => option_env!("ADMINBOARD_APP_DESC"),
                LOCALE_VAR => option_env!("ADMINBOARD_LOCALE"),
                DECRYPTION_JWK_VAR => option_env!("ADMINBOARD_DECRYPTION_JWK"),
                VERIFICATION_JWK_VAR => option_env!("ADMINBOARD_VERIFICATION_JWK"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Load from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    #[cfg(feature = "ssr")]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Check if both token keys are configured
    pub fn has_keys(&self) -> bool {
        self.decryption_jwk.is_some() && self.verification_jwk.is_some()
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.api_host)
    }

    pub fn navigation_guard(&self) -> NavigationGuard {
        NavigationGuard::new(&self.app_title, &self.app_description)
    }

    /// Build the token codec from the configured keys
    pub fn token_codec(&self) -> Result<TokenCodec, ConfigError> {
        let decryption = self
            .decryption_jwk
            .as_deref()
            .ok_or(ConfigError::Missing(DECRYPTION_JWK_VAR))?;
        let verification = self
            .verification_jwk
            .as_deref()
            .ok_or(ConfigError::Missing(VERIFICATION_JWK_VAR))?;

        Ok(TokenCodec::from_jwks(decryption, verification)?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::core::auth::testing::TestKeys;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.api_host, "");
        assert_eq!(config.app_title, "");
        assert_eq!(config.locale, "en-US");
        assert!(config.decryption_jwk.is_none());
        assert!(config.verification_jwk.is_none());
        assert!(!config.has_keys());
    }

    #[test]
    fn test_with_all_fields() {
        let config = config_from(&[
            (API_HOST_VAR, "https://api.example.com"),
            (APP_TITLE_VAR, "Adminboard"),
            (APP_DESC_VAR, "Operations console"),
            (LOCALE_VAR, "es-ES"),
            (DECRYPTION_JWK_VAR, "{}"),
            (VERIFICATION_JWK_VAR, "{}"),
        ]);

        assert_eq!(config.api_host, "https://api.example.com");
        assert_eq!(config.app_title, "Adminboard");
        assert_eq!(config.app_description, "Operations console");
        assert_eq!(config.locale, "es-ES");
        assert!(config.has_keys());
        assert_eq!(
            config.endpoints().login(),
            "https://api.example.com/api/v1/auth/login"
        );
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[(LOCALE_VAR, "  "), (DECRYPTION_JWK_VAR, "")]);

        assert_eq!(config.locale, "en-US");
        assert!(config.decryption_jwk.is_none());
    }

    #[test]
    fn test_partial_keys() {
        let config = config_from(&[(DECRYPTION_JWK_VAR, "{}")]);

        assert!(!config.has_keys());
        assert_eq!(
            config.token_codec().unwrap_err(),
            ConfigError::Missing(VERIFICATION_JWK_VAR)
        );
        assert_eq!(
            AppConfig::default().token_codec().unwrap_err(),
            ConfigError::Missing(DECRYPTION_JWK_VAR)
        );
    }

    #[test]
    fn test_token_codec_from_keys() {
        let keys = TestKeys::new();
        let decryption = keys.decryption_jwk();
        let verification = keys.verification_jwk();
        let config = config_from(&[
            (DECRYPTION_JWK_VAR, decryption.as_str()),
            (VERIFICATION_JWK_VAR, verification.as_str()),
        ]);

        assert!(config.token_codec().is_ok());
    }

    #[test]
    fn test_invalid_key_is_reported() {
        let config = config_from(&[
            (DECRYPTION_JWK_VAR, "not a key"),
            (VERIFICATION_JWK_VAR, "not a key"),
        ]);

        assert!(matches!(config.token_codec(), Err(ConfigError::Key(_))));
    }

    #[test]
    fn test_navigation_guard_uses_titles() {
        let config = config_from(&[(APP_TITLE_VAR, "Adminboard"), (APP_DESC_VAR, "Console")]);
        let guard = config.navigation_guard();

        assert_eq!(
            guard.page_title(crate::core::routes::by_name(crate::core::routes::RouteName::Home)),
            "Home - Adminboard"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::Missing(DECRYPTION_JWK_VAR).to_string(),
            "ADMINBOARD_DECRYPTION_JWK is not set"
        );
    }
}
