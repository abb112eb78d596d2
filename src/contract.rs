//! Assertion engine
//!
//! Compares observed responses against declared contracts. Every mismatch is
//! a `ProbeError::Contract` naming the endpoint, the expected value and the
//! observed one; checks never panic.

use reqwest::Response;
use serde_json::Value;

use crate::error::{ProbeError, Result};

/// Declarative expectation for one response
#[derive(Debug, Clone)]
pub struct ExpectedContract {
    pub status: u16,
    /// Exact-match body fields, checked at the top level of a JSON object.
    /// `None` skips body decoding entirely.
    pub body_fields: Option<Vec<(&'static str, &'static str)>>,
}

impl ExpectedContract {
    /// A plain status-code expectation with no body check.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body_fields: None,
        }
    }

    /// A status expectation plus exact-match top-level body fields.
    pub fn with_fields(status: u16, fields: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            status,
            body_fields: Some(fields),
        }
    }
}

fn violation(endpoint: &str, detail: String) -> ProbeError {
    ProbeError::Contract {
        endpoint: endpoint.to_string(),
        detail,
    }
}

/// Check the status code without consuming the response.
pub fn check_status(response: &Response, expected: u16) -> Result<()> {
    let observed = response.status().as_u16();
    if observed != expected {
        return Err(violation(
            response.url().path(),
            format!("expected status {}, observed {}", expected, observed),
        ));
    }
    Ok(())
}

/// Decode the body as JSON and check each declared field by exact match.
/// A missing field is a failure; extra fields are ignored.
///
/// Consumes the response, so run `check_status` first.
pub async fn check_body_fields(
    response: Response,
    fields: &[(&str, &str)],
) -> Result<()> {
    let endpoint = response.url().path().to_string();
    let body: Value = response
        .json()
        .await
        .map_err(|e| violation(&endpoint, format!("body is not valid JSON: {}", e)))?;
    for (field, expected) in fields {
        match body.get(field) {
            None => {
                return Err(violation(
                    &endpoint,
                    format!("field {:?} missing from body {}", field, body),
                ))
            }
            Some(Value::String(observed)) if observed == expected => {}
            Some(observed) => {
                return Err(violation(
                    &endpoint,
                    format!(
                        "field {:?}: expected {:?}, observed {}",
                        field, expected, observed
                    ),
                ))
            }
        }
    }
    Ok(())
}

/// Verify a response against a full contract: status first, then body fields
/// when the contract declares any.
pub async fn verify(response: Response, expected: &ExpectedContract) -> Result<()> {
    check_status(&response, expected.status)?;
    if let Some(fields) = &expected.body_fields {
        check_body_fields(response, fields).await?;
    }
    Ok(())
}
