use super::*;

const NOW: &str = "2026-03-01T10:00:00Z";

fn item(id: &str, requires_photo: bool) -> ChecklistItem {
    ChecklistItem { id: id.into(), label: format!("Item {id}"), requires_photo, ..ChecklistItem::default() }
}

fn task(items: Vec<ChecklistItem>) -> Task {
    Task { id: "t1".into(), title: "Turnover".into(), checklist: items, ..Task::default() }
}

// =============================================================
// set_completed
// =============================================================

#[test]
fn plain_item_completes_without_proof() {
    let mut it = item("a", false);
    it.set_completed(true, None, "u1", NOW).unwrap();
    assert!(it.completed);
    assert_eq!(it.completed_at.as_deref(), Some(NOW));
    assert_eq!(it.completed_by.as_deref(), Some("u1"));
}

#[test]
fn photo_item_without_proof_is_rejected_and_untouched() {
    let mut it = item("a", true);
    let before = it.clone();
    assert_eq!(it.set_completed(true, None, "u1", NOW), Err(ChecklistError::ProofRequired("Item a".into())));
    assert_eq!(it.set_completed(true, Some("  "), "u1", NOW), Err(ChecklistError::ProofRequired("Item a".into())));
    assert_eq!(it, before);
}

#[test]
fn photo_item_completes_with_new_proof() {
    let mut it = item("a", true);
    it.set_completed(true, Some("https://cdn/p.jpg"), "u1", NOW).unwrap();
    assert!(it.completed);
    assert_eq!(it.proof_url.as_deref(), Some("https://cdn/p.jpg"));
}

#[test]
fn photo_item_completes_with_existing_proof() {
    let mut it = ChecklistItem { proof_url: Some("https://cdn/old.jpg".into()), ..item("a", true) };
    it.set_completed(true, None, "u1", NOW).unwrap();
    assert_eq!(it.proof_url.as_deref(), Some("https://cdn/old.jpg"));
}

#[test]
fn uncomplete_is_always_allowed_and_keeps_proof() {
    let mut it = item("a", true);
    it.set_completed(true, Some("https://cdn/p.jpg"), "u1", NOW).unwrap();
    it.set_completed(false, None, "u1", NOW).unwrap();
    assert!(!it.completed);
    assert_eq!(it.completed_at, None);
    assert_eq!(it.proof_url.as_deref(), Some("https://cdn/p.jpg"));

    let mut never_done = item("b", true);
    assert_eq!(never_done.set_completed(false, None, "u1", NOW), Ok(()));
}

#[test]
fn photo_item_never_completes_without_proof_in_any_sequence() {
    let proofs = [None, Some(""), Some("https://cdn/p.jpg")];
    for first in proofs {
        for second in proofs {
            let mut it = item("a", true);
            let _ = it.set_completed(true, first, "u", NOW);
            let _ = it.set_completed(false, None, "u", NOW);
            let _ = it.set_completed(true, second, "u", NOW);
            if it.completed {
                assert!(it.has_proof(), "completed without proof: {first:?} then {second:?}");
            }
        }
    }
}

// =============================================================
// progress + status
// =============================================================

#[test]
fn progress_counts_completed_items() {
    let mut items = vec![item("a", false), item("b", false), item("c", false)];
    items[0].completed = true;
    let p = progress(&items);
    assert_eq!(p, ChecklistProgress { done: 1, total: 3 });
    assert_eq!(p.percent(), 33);
    assert_eq!(progress(&[]).percent(), 100);
}

#[test]
fn derived_status_follows_checklist() {
    let mut t = task(vec![item("a", false), item("b", true)]);
    assert_eq!(derived_status(&t.checklist), TaskStatus::Pending);
    assert_eq!(apply_toggle(&mut t, "a", true, None, "u", NOW), Ok(TaskStatus::InProgress));
    assert_eq!(t.completed_at, None);
    assert_eq!(apply_toggle(&mut t, "b", true, Some("https://cdn/p.jpg"), "u", NOW), Ok(TaskStatus::Completed));
    assert_eq!(t.completed_at.as_deref(), Some(NOW));
    assert_eq!(apply_toggle(&mut t, "a", false, None, "u", NOW), Ok(TaskStatus::InProgress));
    assert_eq!(t.completed_at, None);
}

#[test]
fn completed_photo_item_without_proof_blocks_all_required() {
    // A stored document may already be inconsistent.
    let items = vec![ChecklistItem { completed: true, ..item("a", true) }];
    assert!(!all_required_complete(&items));
    assert_eq!(derived_status(&items), TaskStatus::InProgress);
}

#[test]
fn apply_toggle_rejects_unknown_item() {
    let mut t = task(vec![item("a", false)]);
    assert_eq!(apply_toggle(&mut t, "zz", true, None, "u", NOW), Err(ChecklistError::UnknownItem("zz".into())));
}

#[test]
fn apply_toggle_failure_leaves_status() {
    let mut t = task(vec![item("a", true)]);
    assert!(apply_toggle(&mut t, "a", true, None, "u", NOW).is_err());
    assert_eq!(t.status, TaskStatus::Pending);
    assert!(!t.checklist[0].completed);
}

// =============================================================
// proof files
// =============================================================

#[test]
fn proof_file_accepts_images_up_to_limit() {
    assert_eq!(validate_proof_file("image/jpeg", 1024), Ok(()));
    assert_eq!(validate_proof_file("IMAGE/PNG", MAX_PROOF_BYTES), Ok(()));
}

#[test]
fn proof_file_rejections() {
    assert_eq!(validate_proof_file("image/jpeg", 0), Err(ProofFileError::Empty));
    assert_eq!(validate_proof_file("application/pdf", 10), Err(ProofFileError::NotAnImage("application/pdf".into())));
    assert_eq!(validate_proof_file("", 10), Err(ProofFileError::NotAnImage("unknown type".into())));
    assert_eq!(
        validate_proof_file("image/heic", MAX_PROOF_BYTES + 1),
        Err(ProofFileError::TooLarge { size: MAX_PROOF_BYTES + 1, max: MAX_PROOF_BYTES })
    );
}
