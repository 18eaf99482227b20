//! JSON-over-HTTP transport shared by the database, function and identity
//! clients.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call returns
//! [`ApiError::Unavailable`], since remote data is only fetched in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde_json::Value;

use super::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a finished response to JSON, turning non-2xx statuses into errors.
/// An empty 2xx body decodes to `Value::Null`.
pub(crate) fn parse_json_body(status: u16, text: &str) -> Result<Value, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Send a request with an optional JSON body and bearer token.
///
/// # Errors
///
/// Returns [`ApiError::Network`] when the request cannot be sent, the mapped
/// HTTP error for non-2xx statuses, or [`ApiError::Decode`] for invalid JSON.
pub async fn send_json(method: Method, url: &str, bearer: Option<&str>, body: Option<&Value>) -> Result<Value, ApiError> {
    let (status, text) = send_raw(method, url, bearer, body).await?;
    parse_json_body(status, &text)
}

/// Like [`send_json`] but hands back the status and body text untouched, for
/// callers with their own error envelope.
///
/// # Errors
///
/// [`ApiError::Network`] when the request cannot be sent or read.
pub async fn send_raw(method: Method, url: &str, bearer: Option<&str>, body: Option<&Value>) -> Result<(u16, String), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::Request;

        let mut builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Patch => Request::patch(url),
        };
        if let Some(token) = bearer {
            builder = builder.header("Authorization", &bearer_header(token));
        }
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if !(200..300).contains(&status) {
            log::warn!("{method:?} {url} -> {status}");
        }
        Ok((status, text))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, url, bearer, body);
        Err(ApiError::Unavailable)
    }
}

/// POST a multipart form (file uploads). Browser-only.
///
/// # Errors
///
/// Same failure classes as [`send_json`].
#[cfg(feature = "hydrate")]
pub async fn send_form(url: &str, bearer: Option<&str>, form: web_sys::FormData) -> Result<Value, ApiError> {
    use gloo_net::http::Request;

    let mut builder = Request::post(url);
    if let Some(token) = bearer {
        builder = builder.header("Authorization", &bearer_header(token));
    }
    let request = builder.body(form).map_err(|e| ApiError::Network(e.to_string()))?;
    let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
    parse_json_body(status, &text)
}
