use super::*;

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("  ", "secret"), Err("Enter your email and password."));
    assert_eq!(validate_credentials("a@b.com", ""), Err("Enter your email and password."));
    assert_eq!(validate_credentials("ab.com", "secret"), Err("Enter a valid email address."));
    assert_eq!(validate_credentials(" a@b.com ", "secret"), Ok(()));
}

#[test]
fn sign_in_message_maps_credential_errors() {
    let err = ApiError::Http { status: 400, message: "INVALID_LOGIN_CREDENTIALS".to_owned() };
    assert_eq!(sign_in_message(&err), "Incorrect email or password.");

    let err = ApiError::Http { status: 400, message: "USER_DISABLED".to_owned() };
    assert_eq!(sign_in_message(&err), "This account has been disabled.");
}

#[test]
fn sign_in_message_strips_provider_detail() {
    let err = ApiError::Http {
        status: 400,
        message: "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled".to_owned(),
    };
    assert_eq!(sign_in_message(&err), "Too many attempts. Try again later.");
}

#[test]
fn sign_in_message_falls_back_to_error_text() {
    assert_eq!(sign_in_message(&ApiError::Network("offline".to_owned())), "Sign-in failed: network error: offline");
    let err = ApiError::Http { status: 500, message: "boom".to_owned() };
    assert_eq!(sign_in_message(&err), "Sign-in failed: boom");
}
