//! Browser API client
//!
//! Every request goes through the [`RequestPipeline`] hooks:
//! - state-mutating requests start an anti-forgery refresh when the stored
//!   expiry is missing or past, without waiting for it
//! - 403 responses and network failures purge the session and reload the page

use chrono::Utc;
use leptos::logging::error;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::http::{
    CsrfRefresh, Endpoints, FailureAction, HttpMethod, RequestPipeline, ResponseFailure,
};

/// API errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request body: {0}")]
    Body(String),

    #[error("Invalid response: {0}")]
    Response(String),

    #[error("Requests are only available in the browser")]
    Unavailable,
}

impl ApiError {
    fn failure(&self) -> ResponseFailure {
        match self {
            ApiError::Status(status) => ResponseFailure::Status(*status),
            ApiError::Network(message) => ResponseFailure::Network(message.clone()),
            other => ResponseFailure::Other(other.to_string()),
        }
    }
}

/// Response body returned by the login endpoint
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Credentials posted to the login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// HTTP client bound to the dashboard API
#[derive(Clone)]
pub struct ApiClient {
    pipeline: RequestPipeline,
}

impl ApiClient {
    pub fn new(pipeline: RequestPipeline) -> Self {
        Self { pipeline }
    }

    pub fn endpoints(&self) -> &Endpoints {
        self.pipeline.endpoints()
    }

    /// Send a request and decode its JSON response
    pub async fn json<B, T>(&self, method: HttpMethod, url: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.start_csrf_refresh(method);
        let response = self.dispatch(method, url, body).await?;
        decode_body(response).await
    }

    /// Send a request, ignoring the response body
    pub async fn send<B>(&self, method: HttpMethod, url: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize,
    {
        let body = encode_body(body)?;
        self.start_csrf_refresh(method);
        self.dispatch(method, url, body).await.map(|_| ())
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let url = self.endpoints().login();
        self.json(HttpMethod::Post, &url, Some(&request)).await
    }

    /// Ask the API whether the current session is still accepted
    pub async fn check(&self) -> Result<(), ApiError> {
        let url = self.endpoints().check();
        self.send::<()>(HttpMethod::Get, &url, None).await
    }

    /// Revoke the current session on the API
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoints().logout();
        self.send::<()>(HttpMethod::Post, &url, None).await
    }

    fn start_csrf_refresh(&self, method: HttpMethod) {
        let Some(refresh) = self.pipeline.before_request(method, Utc::now()) else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            let client = self.clone();
            leptos::task::spawn_local(async move {
                client.refresh_csrf(refresh).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh;
        }
    }

    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    async fn refresh_csrf(&self, refresh: CsrfRefresh) {
        let url = self.endpoints().csrf();
        match self.dispatch(HttpMethod::Get, &url, None).await {
            Ok(_) => {
                if let Err(e) = self.pipeline.record_csrf_refresh(refresh) {
                    error!("Failed to store anti-forgery expiry: {}", e);
                }
            }
            Err(e) => error!("Anti-forgery refresh failed: {}", e),
        }
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let result = fetch(method, url, body).await;

        if let Err(e) = &result {
            if self.pipeline.after_failure(&e.failure()) == FailureAction::Reload {
                reload_page();
            }
        }

        result
    }
}

fn encode_body<B: Serialize>(body: Option<&B>) -> Result<Option<serde_json::Value>, ApiError> {
    body.map(serde_json::to_value)
        .transpose()
        .map_err(|e| ApiError::Body(e.to_string()))
}

#[cfg(feature = "hydrate")]
type Response = gloo_net::http::Response;

#[cfg(not(feature = "hydrate"))]
type Response = ();

#[cfg(feature = "hydrate")]
async fn fetch(
    method: HttpMethod,
    url: &str,
    body: Option<serde_json::Value>,
) -> Result<Response, ApiError> {
    use gloo_net::http::{Method, RequestBuilder};

    let method = match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    };

    let builder = RequestBuilder::new(url)
        .method(method)
        .header("X-Requested-With", "XMLHttpRequest")
        .header("Accept", "application/json");

    // Cross-origin cookies are only sent by release builds
    #[cfg(not(debug_assertions))]
    let builder = builder.credentials(web_sys::RequestCredentials::Include);

    let request = match body {
        Some(body) => builder.json(&body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Body(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    Ok(response)
}

#[cfg(not(feature = "hydrate"))]
async fn fetch(
    _method: HttpMethod,
    _url: &str,
    _body: Option<serde_json::Value>,
) -> Result<Response, ApiError> {
    Err(ApiError::Unavailable)
}

#[cfg(feature = "hydrate")]
async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Response(e.to_string()))
}

#[cfg(not(feature = "hydrate"))]
async fn decode_body<T: DeserializeOwned>(_response: Response) -> Result<T, ApiError> {
    Err(ApiError::Unavailable)
}

fn reload_page() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                error!("Failed to reload page: {:?}", e);
            }
        }
    }
}
