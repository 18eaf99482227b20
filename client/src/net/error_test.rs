use super::*;

#[test]
fn from_response_reads_google_error_message() {
    let body = r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","status":"INVALID_ARGUMENT"}}"#;
    assert_eq!(
        ApiError::from_response(400, body),
        ApiError::Http { status: 400, message: "EMAIL_NOT_FOUND".to_owned() }
    );
}

#[test]
fn from_response_accepts_plain_string_error() {
    let body = r#"{"error":"upload rejected"}"#;
    assert_eq!(
        ApiError::from_response(413, body),
        ApiError::Http { status: 413, message: "upload rejected".to_owned() }
    );
}

#[test]
fn from_response_falls_back_to_body_text() {
    assert_eq!(
        ApiError::from_response(502, "  Bad Gateway \n"),
        ApiError::Http { status: 502, message: "Bad Gateway".to_owned() }
    );
    assert_eq!(
        ApiError::from_response(500, ""),
        ApiError::Http { status: 500, message: "no response body".to_owned() }
    );
}

#[test]
fn from_response_maps_401_to_unauthenticated() {
    assert_eq!(ApiError::from_response(401, "{}"), ApiError::Unauthenticated);
    let body = r#"{"error":{"code":401,"message":"Request had invalid authentication credentials."}}"#;
    assert_eq!(ApiError::from_response(401, body), ApiError::Unauthenticated);
    assert_eq!(ApiError::from_response(401, "not json"), ApiError::Unauthenticated);
}

#[test]
fn auth_failure_covers_function_status() {
    assert!(ApiError::Unauthenticated.is_auth_failure());
    let err = ApiError::Function { status: "UNAUTHENTICATED".to_owned(), message: "expired".to_owned() };
    assert!(err.is_auth_failure());
    assert!(!ApiError::Network("offline".to_owned()).is_auth_failure());
}

#[test]
fn display_is_readable_for_toasts() {
    let err = ApiError::Function { status: "PERMISSION_DENIED".to_owned(), message: "super admin only".to_owned() };
    assert_eq!(err.to_string(), "PERMISSION_DENIED: super admin only");
    assert_eq!(
        ApiError::Http { status: 404, message: "missing".to_owned() }.to_string(),
        "request failed (404): missing"
    );
}
