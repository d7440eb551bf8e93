use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Method, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;

use crate::{
    api::types::*,
    config::{self, BackendConfig},
    utils::{storage, time},
};

pub const SESSION_STORAGE_KEY: &str = "lab_access.session";

/// Seconds before the recorded expiry at which a token is treated as stale.
const EXPIRY_MARGIN_SECS: i64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Service {
    Auth,
    Rest,
}

impl Service {
    fn error_category(self) -> ErrorCategory {
        match self {
            Service::Auth => ErrorCategory::Auth,
            Service::Rest => ErrorCategory::Data,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Option<BackendConfig>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            config: None,
        }
    }

    pub fn new_with_config(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config: Some(config),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self::new_with_config(BackendConfig::new(base_url, anon_key))
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_config(&self) -> BackendConfig {
        if let Some(cfg) = &self.config {
            cfg.clone()
        } else {
            config::await_backend_config().await
        }
    }

    /// `apikey` always carries the anon key; the bearer is the user's access
    /// token when one is known, otherwise the anon key again.
    fn headers(config: &BackendConfig, access_token: Option<&str>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.anon_key)
            .map_err(|_| ApiError::unknown("Invalid anon key format"))?;
        let bearer = access_token.unwrap_or(&config.anon_key);
        let authorization = HeaderValue::from_str(&format!("Bearer {}", bearer))
            .map_err(|_| ApiError::unknown("Invalid token format"))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, authorization);
        Ok(headers)
    }

    pub(crate) async fn auth_request(
        &self,
        method: Method,
        path: &str,
        access_token: Option<&str>,
    ) -> Result<RequestBuilder, ApiError> {
        let config = self.resolved_config().await;
        let headers = Self::headers(&config, access_token)?;
        Ok(self
            .http_client()
            .request(method, config.auth_url(path))
            .headers(headers))
    }

    pub(crate) async fn rest_request(
        &self,
        method: Method,
        table: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let config = self.resolved_config().await;
        let token = load_session().map(|session| session.access_token);
        let headers = Self::headers(&config, token.as_deref())?;
        Ok(self
            .http_client()
            .request(method, config.rest_url(table))
            .headers(headers))
    }

    pub(crate) async fn send(builder: RequestBuilder, service: Service) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            log::warn!("{service:?} request failed: {e}");
            ApiError::request_failed(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), &body, service.error_category());
        log::warn!("{service:?} request rejected ({}): {}", status.as_u16(), error.error);
        Err(error)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        builder: RequestBuilder,
        service: Service,
    ) -> Result<T, ApiError> {
        Self::send(builder, service)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
    }

    pub(crate) async fn send_empty(builder: RequestBuilder, service: Service) -> Result<(), ApiError> {
        Self::send(builder, service).await.map(|_| ())
    }
}

pub fn load_session() -> Option<AuthSession> {
    let raw = storage::get_item(SESSION_STORAGE_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Discarding unreadable stored session: {e}");
            storage::remove_item(SESSION_STORAGE_KEY);
            None
        }
    }
}

pub fn persist_session(session: &AuthSession) -> Result<(), ApiError> {
    let raw = serde_json::to_string(session)
        .map_err(|e| ApiError::unknown(format!("Failed to serialize session: {}", e)))?;
    storage::set_item(SESSION_STORAGE_KEY, &raw).map_err(ApiError::unknown)
}

pub fn clear_session() {
    storage::remove_item(SESSION_STORAGE_KEY);
}

/// Fills in `expires_at` from `expires_in`, or from the token's `exp` claim.
pub fn with_expiry(mut session: AuthSession) -> AuthSession {
    if session.expires_at.is_none() {
        session.expires_at = session
            .expires_in
            .map(|secs| time::now_unix() + secs)
            .or_else(|| decode_exp(&session.access_token));
    }
    session
}

pub fn is_session_expired(session: &AuthSession, now: i64) -> bool {
    session
        .expires_at
        .or_else(|| decode_exp(&session.access_token))
        .map(|expires_at| expires_at - EXPIRY_MARGIN_SECS <= now)
        .unwrap_or(false)
}

fn decode_exp(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    value.get("exp").and_then(|v| v.as_i64())
}
