//! HTTP transport for the JATS API.
//!
//! Every endpoint shares the `{success, data, message}` envelope; this
//! module performs the request, enforces the error taxonomy (transport,
//! HTTP status, envelope rejection), and hands typed payloads back to the
//! operation layer.

use super::error::ApiError;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Per-request timeout; doubles as the only cancellation mechanism.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cookie carrying the session token on login.
const SESSION_COOKIE: &str = "session_token";

/// Response envelope shared by all endpoints.
///
// No serde defaults here: they would put a `T: Default` bound on the
// derived impl, and a missing `Option` field decodes as `None` anyway.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Low-level client: base URL, optional bearer token, cookie-aware
/// transport.
///
pub(crate) struct Client {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl Client {
    pub(crate) fn new(base_url: &str, token: Option<String>) -> Result<Client, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform a request and decode the envelope. `operation` names the
    /// call in rejection and decode errors.
    ///
    pub(crate) async fn request<T, B>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!("{} {} ({})", method, path, operation);
        let mut request = self.http.request(method, self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if status.as_u16() >= 400 {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)
            .map_err(|source| ApiError::Decode { operation, source })?;
        if !envelope.success {
            return Err(ApiError::Rejected {
                operation,
                message: envelope
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        envelope.data.ok_or(ApiError::Rejected {
            operation,
            message: "response contained no data".to_string(),
        })
    }

    /// Authenticate and extract the session cookie. The cookie has to be
    /// read before the body is consumed, so this cannot go through
    /// [`Client::request`].
    ///
    pub(crate) async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let token = response
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());
        let text = response.text().await?;
        if status.as_u16() >= 400 {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: Envelope<serde_json::Value> = serde_json::from_str(&text)
            .map_err(|source| ApiError::Decode {
                operation: "login",
                source,
            })?;
        if !envelope.success {
            return Err(ApiError::Rejected {
                operation: "login",
                message: envelope
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        token.ok_or(ApiError::MissingSessionToken)
    }
}
