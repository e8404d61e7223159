#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use crate::core::auth::testing::{SUBJECT, TestKeys, claims_for};
    use crate::core::guard::Decision;
    use crate::core::http::{Endpoints, FailureAction, HttpMethod, RequestPipeline, ResponseFailure};
    use crate::core::routes::{RouteName, resolve};
    use crate::core::session::{ACCESS_TOKEN_KEY, KeyValueStorage, MemoryStorage, SessionStore};
    use crate::core::{AppConfig, NavigationGuard};

    struct Harness {
        keys: TestKeys,
        storage: Arc<MemoryStorage>,
        store: SessionStore,
        guard: NavigationGuard,
    }

    impl Harness {
        fn new() -> Self {
            let keys = TestKeys::new();
            let storage = Arc::new(MemoryStorage::new());
            let store = SessionStore::new(storage.clone(), Some(keys.codec()));
            Self {
                keys,
                storage,
                store,
                guard: NavigationGuard::new("Adminboard", "Operations console"),
            }
        }

        fn sign_in(&self, roles: &[&str]) {
            let claims = claims_for(SUBJECT, roles, Utc::now().timestamp() - 10);
            let token = self.keys.mint(&claims);
            self.store.set_access_token(&token).unwrap();
        }

        fn navigate(&self, path: &str) -> Decision {
            let outcome = self.guard.evaluate(resolve(path), &self.store.snapshot());
            if outcome.clear_session {
                self.store.clean().unwrap();
            }
            outcome.decision
        }
    }

    #[test]
    fn test_anonymous_user_is_sent_to_login() {
        let harness = Harness::new();

        assert_eq!(
            harness.navigate("/admin/users"),
            Decision::RedirectTo(RouteName::AuthLogin)
        );
        assert_eq!(harness.navigate("/auth/login"), Decision::Allow);
    }

    #[test]
    fn test_login_then_admin_pages() {
        let harness = Harness::new();
        harness.sign_in(&["admin"]);

        assert_eq!(harness.navigate("/"), Decision::Allow);
        assert_eq!(harness.navigate("/admin/users/review"), Decision::Allow);
        assert_eq!(
            harness.navigate("/auth/login"),
            Decision::RedirectTo(RouteName::AuthCheck)
        );
        assert!(harness.store.is_authenticated());
    }

    #[test]
    fn test_viewer_is_forbidden_and_signed_out() {
        let harness = Harness::new();
        harness.sign_in(&["viewer"]);

        assert_eq!(
            harness.navigate("/admin/users"),
            Decision::RedirectTo(RouteName::Forbidden)
        );
        assert!(!harness.store.is_authenticated());
        assert_eq!(
            harness.navigate("/"),
            Decision::RedirectTo(RouteName::AuthLogin)
        );
    }

    #[test]
    fn test_guard_sees_logout_on_next_transition() {
        let harness = Harness::new();
        harness.sign_in(&["admin"]);
        assert_eq!(harness.navigate("/system"), Decision::Allow);

        harness.store.clean().unwrap();
        assert_eq!(
            harness.navigate("/system"),
            Decision::RedirectTo(RouteName::AuthLogin)
        );
    }

    #[test]
    fn test_token_from_other_issuer_is_rejected() {
        let harness = Harness::new();
        let stranger = TestKeys::with_seed(9);
        let claims = claims_for(SUBJECT, &["admin"], Utc::now().timestamp() - 10);

        assert!(harness.store.set_access_token(&stranger.mint(&claims)).is_err());
        assert!(harness.storage.get(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert_eq!(
            harness.navigate("/"),
            Decision::RedirectTo(RouteName::AuthLogin)
        );
    }

    #[test]
    fn test_parse_round_trip_ten_seconds_after_issue() {
        let keys = TestKeys::new();
        let issued_at = Utc::now().timestamp() - 10;
        let claims = claims_for(SUBJECT, &["superadmin", "viewer"], issued_at);
        let token = keys.mint(&claims);

        let codec = keys.codec();
        assert_eq!(codec.parse(&token).unwrap(), Some(claims.clone()));
        assert_eq!(codec.verify(&token), Some(claims));
        assert!(codec.validate(&token));
    }

    #[test]
    fn test_clean_twice_equals_once() {
        let harness = Harness::new();
        harness.sign_in(&["admin"]);

        harness.store.clean().unwrap();
        let once = harness.store.snapshot();
        harness.store.clean().unwrap();

        assert_eq!(harness.store.snapshot(), once);
        assert!(harness.storage.is_empty());
    }

    #[test]
    fn test_network_failure_signs_out() {
        let harness = Harness::new();
        harness.sign_in(&["admin"]);
        let pipeline = RequestPipeline::new(harness.store.clone(), Endpoints::default());

        assert!(pipeline.before_request(HttpMethod::Post, Utc::now()).is_some());
        let action = pipeline.after_failure(&ResponseFailure::Network("offline".to_string()));

        assert_eq!(action, FailureAction::Reload);
        assert_eq!(
            harness.navigate("/"),
            Decision::RedirectTo(RouteName::AuthLogin)
        );
    }

    #[test]
    fn test_unconfigured_app_rejects_all_tokens() {
        let keys = TestKeys::new();
        let config = AppConfig::default();
        let store = SessionStore::new(Arc::new(MemoryStorage::new()), config.token_codec().ok());
        let claims = claims_for(SUBJECT, &["admin"], Utc::now().timestamp() - 10);

        assert!(store.set_access_token(&keys.mint(&claims)).is_err());
        assert!(!store.is_authenticated());
    }
}
