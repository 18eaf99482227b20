//! Callable backend functions.
//!
//! Wire protocol: `POST {functions_base}/{name}` with `{"data": payload}`;
//! success is `{"result": ...}`, failure is `{"error": {"status", "message"}}`
//! (sometimes with a non-2xx HTTP status, sometimes not).

#[cfg(test)]
#[path = "functions_test.rs"]
mod functions_test;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::Remote;
use super::error::ApiError;
use super::http::{Method, parse_json_body, send_raw};

pub const CREATE_IMPERSONATION_TOKEN: &str = "createImpersonationToken";
pub const SET_CLIENT_DISABLED: &str = "setClientDisabled";

/// Unwrap a callable response envelope.
pub(crate) fn parse_callable_response(body: &Value) -> Result<Value, ApiError> {
    if let Some(err) = body.get("error") {
        let status = err.get("status").and_then(Value::as_str).unwrap_or("INTERNAL").to_owned();
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("function call failed")
            .to_owned();
        return Err(ApiError::Function { status, message });
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| ApiError::Decode("callable response missing `result`".to_owned()))
}

/// Invoke `name` with `payload` and decode its result.
///
/// # Errors
///
/// Transport errors from [`send_raw`], [`ApiError::Function`] for errors the
/// function reports, [`ApiError::Decode`] when the result does not fit `T`.
pub async fn call<T: DeserializeOwned>(remote: &Remote, name: &str, payload: Value) -> Result<T, ApiError> {
    let url = remote.config.function_url(name);
    let body = json!({ "data": payload });
    let (status, text) = send_raw(Method::Post, &url, Some(&remote.id_token), Some(&body)).await?;
    let result = decode_callable(status, &text)?;
    serde_json::from_value(result).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a finished callable response of any status.
///
/// Callable errors can arrive with a 4xx/5xx status or inside a 2xx body. An
/// error envelope with its own `status` code wins; otherwise the code is
/// derived from the HTTP status.
pub(crate) fn decode_callable(status: u16, text: &str) -> Result<Value, ApiError> {
    if (200..300).contains(&status) {
        let body = parse_json_body(status, text)?;
        return parse_callable_response(&body);
    }
    let envelope = serde_json::from_str::<Value>(text).ok();
    let has_code = envelope
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| e.get("status"))
        .is_some_and(Value::is_string);
    match envelope {
        Some(body) if has_code => parse_callable_response(&body),
        _ => match ApiError::from_response(status, text) {
            ApiError::Http { status, message } => Err(callable_error_from_http(status, &message)),
            other => Err(other),
        },
    }
}

pub(crate) fn callable_error_from_http(status: u16, message: &str) -> ApiError {
    let code = match status {
        400 => "INVALID_ARGUMENT",
        403 => "PERMISSION_DENIED",
        404 => "NOT_FOUND",
        _ => return ApiError::Http { status, message: message.to_owned() },
    };
    ApiError::Function { status: code.to_owned(), message: message.to_owned() }
}

#[derive(Debug, Deserialize)]
struct TokenResult {
    token: String,
}

/// Ask the backend for a one-time custom token that signs in as `uid`.
///
/// # Errors
///
/// See [`call`]; an empty token is reported as [`ApiError::Decode`].
pub async fn create_impersonation_token(remote: &Remote, uid: &str) -> Result<String, ApiError> {
    let result: TokenResult = call(remote, CREATE_IMPERSONATION_TOKEN, json!({ "uid": uid })).await?;
    if result.token.trim().is_empty() {
        return Err(ApiError::Decode("empty impersonation token".to_owned()));
    }
    Ok(result.token)
}

/// Enable or disable a client account.
///
/// # Errors
///
/// See [`call`].
pub async fn set_client_disabled(remote: &Remote, uid: &str, disabled: bool) -> Result<(), ApiError> {
    let _: Value = call(remote, SET_CLIENT_DISABLED, json!({ "uid": uid, "disabled": disabled })).await?;
    Ok(())
}
