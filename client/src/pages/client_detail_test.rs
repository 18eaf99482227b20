use super::*;

#[test]
fn toggle_copy_offers_the_opposite_of_the_current_state() {
    assert_eq!(toggle_copy(false).0, "Disable account");
    assert_eq!(toggle_copy(true).0, "Enable account");
}

#[test]
fn disabling_warns_about_sign_out() {
    assert!(toggle_copy(false).1.contains("signed out"));
    assert!(!toggle_copy(true).1.contains("signed out"));
}
