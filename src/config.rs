//! Harness configuration
//!
//! All external coordinates (service base URLs, API key) live here and are
//! passed in explicitly, so independent scenario runners can target
//! different service instances.

/// Default base URL of the authentication service.
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:8081/api/auth";

/// Default base URL of the standalone heartbeat service.
pub const DEFAULT_HEARTBEAT_BASE_URL: &str = "http://localhost:8080";

/// Default API key, matching the value the service is seeded with in the
/// local compose deployment.
pub const DEFAULT_API_KEY: &str = "authprobe-dev-key";

/// Coordinates and credentials for one target deployment.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the auth service, including the `/api/auth` prefix.
    pub auth_base_url: String,
    /// Base URL of the heartbeat service (no path prefix).
    pub heartbeat_base_url: String,
    /// Static API key sent as `X-API-Key` on every authenticated call.
    pub api_key: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            heartbeat_base_url: DEFAULT_HEARTBEAT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `AUTH_SERVICE_URL`, `HEARTBEAT_URL` and
    /// `X_API_KEY` when set. The env names match the ones the service
    /// deployment itself uses.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("AUTH_SERVICE_URL") {
            cfg.auth_base_url = v;
        }
        if let Ok(v) = std::env::var("HEARTBEAT_URL") {
            cfg.heartbeat_base_url = v;
        }
        if let Ok(v) = std::env::var("X_API_KEY") {
            cfg.api_key = v;
        }
        cfg
    }

    /// Absolute URL for a path under the auth service.
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}{}", self.auth_base_url.trim_end_matches('/'), path)
    }

    /// Absolute URL for a path under the heartbeat service.
    pub fn heartbeat_url(&self, path: &str) -> String {
        format!("{}{}", self.heartbeat_base_url.trim_end_matches('/'), path)
    }
}
