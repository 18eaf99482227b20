#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn bearer_header_prefixes_token() {
    assert_eq!(bearer_header("abc"), "Bearer abc");
}

#[test]
fn parse_json_body_decodes_success() {
    let value = parse_json_body(200, r#"{"ok":true}"#).unwrap();
    assert_eq!(value, serde_json::json!({ "ok": true }));
}

#[test]
fn parse_json_body_empty_success_is_null() {
    assert_eq!(parse_json_body(204, "  ").unwrap(), Value::Null);
}

#[test]
fn parse_json_body_maps_error_status() {
    let err = parse_json_body(403, r#"{"error":{"message":"PERMISSION_DENIED"}}"#).unwrap_err();
    assert_eq!(err, ApiError::Http { status: 403, message: "PERMISSION_DENIED".to_owned() });
}

#[test]
fn parse_json_body_rejects_invalid_json() {
    assert!(matches!(parse_json_body(200, "<html>"), Err(ApiError::Decode(_))));
}

#[test]
fn send_json_is_unavailable_outside_browser() {
    let result = futures::executor::block_on(send_json(Method::Get, "https://example.test", None, None));
    assert_eq!(result, Err(ApiError::Unavailable));
}
