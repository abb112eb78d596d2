//! Workflow chains
//!
//! Each chain is a short, self-contained sequence of dependent HTTP calls:
//! it signs in itself, threads the resulting session cookie through every
//! later step, and verifies each response as it arrives. Nothing leaks
//! between chains, so they can run in any order or in parallel against
//! independent service instances. A failed step aborts its chain with the
//! offending error; there is no partial credit.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::json;
use tracing::debug;

use crate::catalog::heartbeat_catalog;
use crate::client::AuthClient;
use crate::contract::{check_status, verify};
use crate::error::{ProbeError, Result};
use crate::fixtures::{admin_credential, colliding_user, generate_user, ADMIN_EMAIL};
use crate::session::{extract_session, SessionToken};

/// Sign in as the admin and extract the session cookie.
///
/// Sign-in answers 202 (accepted, not plain 200) and the session arrives
/// exclusively via `Set-Cookie`. A rejected sign-in fails here with the
/// status diagnostic before extraction is even attempted.
pub async fn sign_in(client: &AuthClient) -> Result<SessionToken> {
    let url = client.auth_url("/signin");
    let response = client
        .post_json(&url, None, &admin_credential())
        .await?;
    check_status(&response, 202)?;
    let session = extract_session(&response)?;
    debug!(cookie = %session.name, "authenticated");
    Ok(session)
}

/// Liveness probes, driven by the scenario catalog. Unauthenticated; known
/// endpoints answer 200 (with the documented body on the bare heartbeat
/// service), unknown paths answer 404.
pub async fn heartbeat(client: &AuthClient) -> Result<()> {
    for entry in heartbeat_catalog() {
        let url = entry.url(client.config());
        let response = client.get_plain(&url).await?;
        verify(response, &entry.expect).await?;
    }
    Ok(())
}

/// Sign in, then log out with the session cookie and the admin email in the
/// body. Logout answers 200.
pub async fn signin_logout(client: &AuthClient) -> Result<()> {
    let session = sign_in(client).await?;
    let url = client.auth_url("/logout");
    let response = client
        .post_json(&url, Some(&session), &json!({ "email": ADMIN_EMAIL }))
        .await?;
    check_status(&response, 200)
}

/// Sign in, then list all users. Answers 200 for an authenticated admin.
pub async fn signin_list_users(client: &AuthClient) -> Result<()> {
    let session = sign_in(client).await?;
    let url = client.auth_url("/listusers");
    let response = client.get(&url, Some(&session)).await?;
    check_status(&response, 200)
}

/// Sign in, then upload an avatar image as a multipart form. The file is
/// read up front into memory so the handle is closed before the request is
/// issued, whatever the outcome of the call.
pub async fn signin_upload_avatar(client: &AuthClient, avatar: &Path) -> Result<()> {
    let bytes = std::fs::read(avatar).map_err(|e| {
        ProbeError::Fixture(format!("cannot read avatar fixture {}: {}", avatar.display(), e))
    })?;
    let session = sign_in(client).await?;
    let part = Part::bytes(bytes)
        .file_name("avatar.png")
        .mime_str("image/png")
        .map_err(|e| ProbeError::Fixture(format!("bad fixture mime type: {}", e)))?;
    let form = Form::new().part("file", part);
    let url = client.auth_url("/upload");
    let response = client.post_multipart(&url, Some(&session), form).await?;
    check_status(&response, 200)
}

/// Sign in, then fetch the admin's avatar addressed by email. Answers 200.
pub async fn signin_fetch_avatar(client: &AuthClient) -> Result<()> {
    let session = sign_in(client).await?;
    let url = client.auth_url(&format!("/avatar/{}", ADMIN_EMAIL));
    let response = client.get(&url, Some(&session)).await?;
    check_status(&response, 200)
}

/// Sign in, then add a freshly generated user. Answers 200.
pub async fn signin_add_user(client: &AuthClient) -> Result<()> {
    let session = sign_in(client).await?;
    let url = client.auth_url("/adduser");
    let response = client
        .post_json(&url, Some(&session), &generate_user())
        .await?;
    check_status(&response, 200)
}

/// Sign in, then add a user whose email collides with the admin account.
///
/// The service answers 500 on a duplicate email, not a structured 409. That
/// is the observed behavior of the deployed service and is asserted exactly
/// as such here, as a regression baseline; it looks like a service-side
/// defect and should move to 409 there first, not in this assertion.
pub async fn signin_add_duplicate_user(client: &AuthClient) -> Result<()> {
    let session = sign_in(client).await?;
    let url = client.auth_url("/adduser");
    let response = client
        .post_json(&url, Some(&session), &colliding_user())
        .await?;
    check_status(&response, 500)
}
