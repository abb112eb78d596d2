//! Session extraction
//!
//! Turns a sign-in response's `Set-Cookie` header into a reusable
//! session-credential pair. Parsing is typed end to end: a malformed or
//! absent header surfaces as `ProbeError::MissingSession`, never as a slice
//! panic.

use reqwest::header::SET_COOKIE;
use reqwest::Response;

use crate::error::{ProbeError, Result};

/// The session credential issued at sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Cookie name as issued by the service.
    pub name: String,
    /// Opaque cookie value. The harness never interprets it.
    pub value: String,
}

impl SessionToken {
    /// Value for a `Cookie` request header carrying this session.
    pub fn cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Parse one `Set-Cookie` header value of the form `<name>=<value>; <attrs>`.
///
/// The name is everything before the first `=`; the value runs to the first
/// `;` (attributes such as Path and Expires are dropped). Returns the reason
/// string on malformed input.
pub fn parse_set_cookie(header: &str) -> std::result::Result<SessionToken, String> {
    let (name, rest) = header
        .split_once('=')
        .ok_or_else(|| format!("no `=` in Set-Cookie value {:?}", header))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("empty cookie name".to_string());
    }
    let value = rest.split(';').next().unwrap_or(rest).trim();
    if value.is_empty() {
        return Err(format!("cookie {:?} has an empty value", name));
    }
    Ok(SessionToken {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Extract the session token from a sign-in response.
///
/// Callers should have checked the sign-in status first; an absent header
/// here still fails with a diagnostic naming the endpoint rather than a
/// generic crash.
pub fn extract_session(response: &Response) -> Result<SessionToken> {
    let endpoint = response.url().path().to_string();
    let header = response
        .headers()
        .get(SET_COOKIE)
        .ok_or_else(|| ProbeError::MissingSession {
            endpoint: endpoint.clone(),
            reason: "response carries no Set-Cookie header".to_string(),
        })?;
    let raw = header.to_str().map_err(|_| ProbeError::MissingSession {
        endpoint: endpoint.clone(),
        reason: "Set-Cookie header is not valid UTF-8".to_string(),
    })?;
    parse_set_cookie(raw).map_err(|reason| ProbeError::MissingSession { endpoint, reason })
}
