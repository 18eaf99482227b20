use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;
use crate::util::storage::MemoryStore;

// =============================================================
// begin (admin tab)
// =============================================================

#[test]
fn begin_stages_token_only_while_opening() {
    let tab = MemoryStore::new();
    let seen_at_open = RefCell::new(None);
    let opened_path = RefCell::new(String::new());

    let result = block_on(begin(
        &tab,
        "client-7",
        |uid| async move {
            assert_eq!(uid, "client-7");
            Ok("tok-123".to_owned())
        },
        |path| {
            *seen_at_open.borrow_mut() = tab.get(HANDOFF_TOKEN_KEY);
            *opened_path.borrow_mut() = path.to_owned();
            true
        },
    ));

    assert_eq!(result, Ok(()));
    assert_eq!(seen_at_open.borrow().as_deref(), Some("tok-123"));
    assert_eq!(opened_path.borrow().as_str(), HANDOFF_PATH);
    assert_eq!(tab.get(HANDOFF_TOKEN_KEY), None);
}

#[test]
fn begin_releases_token_when_popup_blocked() {
    let tab = MemoryStore::new();
    let result = block_on(begin(&tab, "c", |_| async { Ok("tok".to_owned()) }, |_| false));
    assert_eq!(result, Err(HandoffError::PopupBlocked));
    assert!(tab.is_empty());
}

#[test]
fn begin_token_failure_never_opens_tab() {
    let tab = MemoryStore::new();
    let opened = Cell::new(false);
    let result = block_on(begin(
        &tab,
        "c",
        |_| async { Err(ApiError::Function { status: "permission-denied".into(), message: "no".into() }) },
        |_| {
            opened.set(true);
            true
        },
    ));
    assert!(matches!(result, Err(HandoffError::Token(ApiError::Function { .. }))));
    assert!(!opened.get());
    assert!(tab.is_empty());
}

// =============================================================
// consume (hand-off tab)
// =============================================================

#[test]
fn consume_success_removes_token() {
    let tab = MemoryStore::new();
    stage_token(&tab, "tok-1");
    let outcome = block_on(consume(&tab, |token| async move { Ok::<_, ApiError>(format!("session for {token}")) }));
    assert_eq!(outcome, HandoffOutcome::Established("session for tok-1".to_owned()));
    assert_eq!(tab.get(HANDOFF_TOKEN_KEY), None);
}

#[test]
fn consume_failure_still_removes_token() {
    let tab = MemoryStore::new();
    stage_token(&tab, "tok-1");
    let outcome: HandoffOutcome<()> = block_on(consume(&tab, |_| async {
        Err(ApiError::Http { status: 400, message: "INVALID_CUSTOM_TOKEN".into() })
    }));
    assert_eq!(outcome, HandoffOutcome::Failed("request failed (400): INVALID_CUSTOM_TOKEN".to_owned()));
    assert_eq!(tab.get(HANDOFF_TOKEN_KEY), None);
}

#[test]
fn consume_without_token_never_signs_in() {
    let tab = MemoryStore::new();
    let called = Cell::new(false);
    let outcome: HandoffOutcome<()> = block_on(consume(&tab, |_| {
        called.set(true);
        async { Ok(()) }
    }));
    assert_eq!(outcome, HandoffOutcome::MissingToken);
    assert!(!called.get());
}

#[test]
fn consume_treats_empty_token_as_missing() {
    let tab = MemoryStore::new();
    stage_token(&tab, "");
    let outcome: HandoffOutcome<()> = block_on(consume(&tab, |_| async { Ok(()) }));
    assert_eq!(outcome, HandoffOutcome::MissingToken);
    assert!(tab.is_empty());
}

#[test]
fn token_is_single_use() {
    let tab = MemoryStore::new();
    stage_token(&tab, "tok-1");
    let first: HandoffOutcome<()> = block_on(consume(&tab, |_| async { Ok(()) }));
    let second: HandoffOutcome<()> = block_on(consume(&tab, |_| async { Ok(()) }));
    assert_eq!(first, HandoffOutcome::Established(()));
    assert_eq!(second, HandoffOutcome::MissingToken);
}
