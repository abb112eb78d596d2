//! Authenticated request executor
//!
//! One thin wrapper around `reqwest` that stamps every call with the API key
//! and, when a session is in play, the session cookie. One attempt per call;
//! this is a deterministic contract check, not a resilience test, so there
//! are no retries.

use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::error::{ProbeError, Result};
use crate::session::SessionToken;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// JSON bodies are sent with an explicit charset, matching what the service
/// emits on its own responses.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP client bound to one target deployment
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    config: HarnessConfig,
}

impl AuthClient {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    fn authed(&self, req: RequestBuilder, session: Option<&SessionToken>) -> RequestBuilder {
        let req = req.header(API_KEY_HEADER, &self.config.api_key);
        match session {
            Some(s) => req.header(COOKIE, s.cookie_header()),
            None => req,
        }
    }

    async fn send(&self, url: &str, req: RequestBuilder) -> Result<Response> {
        debug!(url, "issuing request");
        req.send().await.map_err(|source| ProbeError::Transport {
            endpoint: url.to_string(),
            source,
        })
    }

    /// Unauthenticated GET to an absolute URL. Used by the liveness probes,
    /// which carry neither API key nor session.
    pub async fn get_plain(&self, url: &str) -> Result<Response> {
        self.send(url, self.http.get(url)).await
    }

    /// GET with API key and optional session cookie.
    pub async fn get(&self, url: &str, session: Option<&SessionToken>) -> Result<Response> {
        let req = self.authed(self.http.get(url), session);
        self.send(url, req).await
    }

    /// POST a JSON body with API key and optional session cookie.
    pub async fn post_json<B: Serialize>(
        &self,
        url: &str,
        session: Option<&SessionToken>,
        body: &B,
    ) -> Result<Response> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| ProbeError::Fixture(format!("unserializable request body: {}", e)))?;
        let req = self
            .authed(self.http.post(url), session)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload);
        self.send(url, req).await
    }

    /// POST a multipart form with API key and session cookie. No content-type
    /// override here; reqwest sets the multipart boundary itself.
    pub async fn post_multipart(
        &self,
        url: &str,
        session: Option<&SessionToken>,
        form: Form,
    ) -> Result<Response> {
        let req = self.authed(self.http.post(url), session).multipart(form);
        self.send(url, req).await
    }

    /// Absolute URL for a path under the auth service.
    pub fn auth_url(&self, path: &str) -> String {
        self.config.auth_url(path)
    }

    /// Absolute URL for a path under the heartbeat service.
    pub fn heartbeat_url(&self, path: &str) -> String {
        self.config.heartbeat_url(path)
    }
}
