//! Identity provider REST calls (password and custom-token sign-in, account
//! lookup, token refresh).

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::Deserialize;
use serde_json::{Value, json};

use super::error::ApiError;
use super::http::{Method, send_json};
use crate::config::BackendConfig;

/// Tokens issued by a sign-in or refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenGrant {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in_secs: i64,
}

impl TokenGrant {
    /// Absolute expiry in epoch milliseconds.
    #[must_use]
    pub fn expires_at_ms(&self, now_ms: i64) -> i64 {
        now_ms + self.expires_in_secs * 1000
    }
}

/// Account profile resolved from an id token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Role from custom claims (`{"role": "..."}` or `{"superAdmin": true}`).
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    display_name: Option<String>,
    custom_attributes: Option<String>,
}

/// Expiry arrives as a decimal string of seconds; default to one hour.
pub(crate) fn parse_expires_in(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(3600)
}

/// Extract the role from the serialized custom-claims JSON.
pub(crate) fn parse_role_claim(custom_attributes: Option<&str>) -> Option<String> {
    let claims: Value = serde_json::from_str(custom_attributes?).ok()?;
    if let Some(role) = claims.get("role").and_then(Value::as_str) {
        return Some(role.to_owned());
    }
    if claims.get("superAdmin").and_then(Value::as_bool) == Some(true) {
        return Some("superadmin".to_owned());
    }
    None
}

pub(crate) fn grant_from_sign_in(body: Value) -> Result<TokenGrant, ApiError> {
    let resp: SignInResponse = serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(TokenGrant {
        id_token: resp.id_token,
        refresh_token: resp.refresh_token,
        expires_in_secs: parse_expires_in(&resp.expires_in),
    })
}

pub(crate) fn grant_from_refresh(body: Value) -> Result<TokenGrant, ApiError> {
    let resp: RefreshResponse = serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(TokenGrant {
        id_token: resp.id_token,
        refresh_token: resp.refresh_token,
        expires_in_secs: parse_expires_in(&resp.expires_in),
    })
}

pub(crate) fn account_from_lookup(body: Value) -> Result<AccountInfo, ApiError> {
    let resp: LookupResponse = serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let user = resp
        .users
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Decode("account lookup returned no user".to_owned()))?;
    Ok(AccountInfo {
        uid: user.local_id,
        email: user.email,
        display_name: user.display_name,
        role: parse_role_claim(user.custom_attributes.as_deref()),
    })
}

/// Email + password sign-in.
///
/// # Errors
///
/// Provider rejections (`INVALID_PASSWORD`, `EMAIL_NOT_FOUND`, ...) surface as
/// [`ApiError::Http`].
pub async fn sign_in_with_password(config: &BackendConfig, email: &str, password: &str) -> Result<TokenGrant, ApiError> {
    let body = json!({ "email": email, "password": password, "returnSecureToken": true });
    let resp = send_json(Method::Post, &config.identity_url("accounts:signInWithPassword"), None, Some(&body)).await?;
    grant_from_sign_in(resp)
}

/// Exchange a backend-minted custom token for a session.
///
/// # Errors
///
/// Invalid or already-used tokens surface as [`ApiError::Http`].
pub async fn sign_in_with_custom_token(config: &BackendConfig, token: &str) -> Result<TokenGrant, ApiError> {
    let body = json!({ "token": token, "returnSecureToken": true });
    let resp = send_json(Method::Post, &config.identity_url("accounts:signInWithCustomToken"), None, Some(&body)).await?;
    grant_from_sign_in(resp)
}

/// Resolve uid, email and role claim for an id token.
///
/// # Errors
///
/// Transport errors, or [`ApiError::Decode`] when no account is returned.
pub async fn lookup_account(config: &BackendConfig, id_token: &str) -> Result<AccountInfo, ApiError> {
    let body = json!({ "idToken": id_token });
    let resp = send_json(Method::Post, &config.identity_url("accounts:lookup"), None, Some(&body)).await?;
    account_from_lookup(resp)
}

/// Trade a refresh token for a fresh id token.
///
/// # Errors
///
/// Revoked refresh tokens surface as [`ApiError::Http`].
pub async fn refresh(config: &BackendConfig, refresh_token: &str) -> Result<TokenGrant, ApiError> {
    let body = json!({ "grant_type": "refresh_token", "refresh_token": refresh_token });
    let resp = send_json(Method::Post, &config.token_refresh_url(), None, Some(&body)).await?;
    grant_from_refresh(resp)
}
