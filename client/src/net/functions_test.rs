use super::*;

#[test]
fn parse_callable_response_returns_result() {
    let body = json!({ "result": { "token": "abc" } });
    assert_eq!(parse_callable_response(&body).unwrap(), json!({ "token": "abc" }));
}

#[test]
fn parse_callable_response_null_result_is_ok() {
    assert_eq!(parse_callable_response(&json!({ "result": null })).unwrap(), Value::Null);
}

#[test]
fn parse_callable_response_maps_error_envelope() {
    let body = json!({ "error": { "status": "PERMISSION_DENIED", "message": "super admin only" } });
    assert_eq!(
        parse_callable_response(&body),
        Err(ApiError::Function { status: "PERMISSION_DENIED".to_owned(), message: "super admin only".to_owned() })
    );
}

#[test]
fn parse_callable_response_error_defaults() {
    let body = json!({ "error": {} });
    assert_eq!(
        parse_callable_response(&body),
        Err(ApiError::Function { status: "INTERNAL".to_owned(), message: "function call failed".to_owned() })
    );
}

#[test]
fn parse_callable_response_missing_result_is_decode_error() {
    assert!(matches!(parse_callable_response(&json!({})), Err(ApiError::Decode(_))));
}

#[test]
fn callable_error_from_http_maps_known_statuses() {
    assert_eq!(
        callable_error_from_http(403, "nope"),
        ApiError::Function { status: "PERMISSION_DENIED".to_owned(), message: "nope".to_owned() }
    );
    assert_eq!(
        callable_error_from_http(503, "down"),
        ApiError::Http { status: 503, message: "down".to_owned() }
    );
}

#[test]
fn decode_callable_keeps_backend_status_on_error_response() {
    let text = r#"{"error":{"status":"FAILED_PRECONDITION","message":"client has no subscription"}}"#;
    assert_eq!(
        decode_callable(400, text),
        Err(ApiError::Function {
            status: "FAILED_PRECONDITION".to_owned(),
            message: "client has no subscription".to_owned()
        })
    );
    let unauth = decode_callable(401, r#"{"error":{"status":"UNAUTHENTICATED","message":"expired"}}"#).unwrap_err();
    assert!(unauth.is_auth_failure());
}

#[test]
fn decode_callable_derives_code_without_envelope_status() {
    assert_eq!(
        decode_callable(403, r#"{"error":{"message":"nope"}}"#),
        Err(ApiError::Function { status: "PERMISSION_DENIED".to_owned(), message: "nope".to_owned() })
    );
    assert_eq!(decode_callable(502, "Bad Gateway"), Err(ApiError::Http { status: 502, message: "Bad Gateway".to_owned() }));
    assert_eq!(decode_callable(401, ""), Err(ApiError::Unauthenticated));
}

#[test]
fn decode_callable_unwraps_success_and_in_band_errors() {
    assert_eq!(decode_callable(200, r#"{"result":{"token":"t"}}"#).unwrap(), json!({ "token": "t" }));
    assert_eq!(
        decode_callable(200, r#"{"error":{"status":"NOT_FOUND","message":"no such user"}}"#),
        Err(ApiError::Function { status: "NOT_FOUND".to_owned(), message: "no such user".to_owned() })
    );
}
