use super::*;
use crate::config::BackendConfig;
use crate::net::types::{ChecklistItem, TaskStatus};

fn remote() -> Remote {
    Remote { config: BackendConfig::for_project("p", "k"), id_token: "tok".to_owned() }
}

#[test]
fn decode_all_skips_documents_that_do_not_fit() {
    let docs = vec![
        json!({ "id": "s1", "amountCents": 1000 }),
        json!({ "id": "s2", "amountCents": "lots" }),
    ];
    let subs: Vec<Subscription> = decode_all(docs);
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].id, "s1");
}

#[test]
fn decode_one_reads_rest_document() {
    let doc = json!({
        "name": "projects/p/databases/(default)/documents/bookings/b7",
        "fields": {
            "guestName": { "stringValue": "Rivera" },
            "guestCount": { "integerValue": "3" }
        }
    });
    let booking: Booking = decode_one(&doc).unwrap();
    assert_eq!(booking.id, "b7");
    assert_eq!(booking.guest_name, "Rivera");
    assert_eq!(booking.guest_count, 3);
}

#[test]
fn decode_one_rejects_non_document() {
    let result: Result<Booking, _> = decode_one(&json!({ "error": "x" }));
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn patch_url_lists_each_field_in_mask() {
    let mut fields = Map::new();
    fields.insert("guestName".to_owned(), json!("A"));
    fields.insert("notes".to_owned(), json!("late arrival"));
    let url = patch_url(&remote(), BOOKINGS, "b1", &fields);
    assert!(url.ends_with("/documents/bookings/b1?updateMask.fieldPaths=guestName&updateMask.fieldPaths=notes"));
}

#[test]
fn checklist_patch_fields_writes_checklist_status_and_completion() {
    let task = Task {
        id: "t1".to_owned(),
        status: TaskStatus::Completed,
        completed_at: Some("2026-03-01T10:00:00Z".to_owned()),
        checklist: vec![ChecklistItem { id: "c1".to_owned(), completed: true, ..ChecklistItem::default() }],
        ..Task::default()
    };
    let fields = checklist_patch_fields(&task);
    assert_eq!(fields["status"], json!("completed"));
    assert_eq!(fields["checklist"][0]["id"], "c1");
    assert_eq!(fields["checklist"][0]["completed"], true);
    assert_eq!(fields["completedAt"], json!("2026-03-01T10:00:00Z"));
}

#[test]
fn checklist_patch_fields_clears_completion_when_reopened() {
    let task = Task { id: "t1".to_owned(), status: TaskStatus::InProgress, ..Task::default() };
    assert_eq!(checklist_patch_fields(&task)["completedAt"], Value::Null);
}

#[test]
fn save_booking_fields_with_nothing_changed_is_a_noop() {
    let result = futures::executor::block_on(save_booking_fields(&remote(), "b1", &Map::new()));
    assert_eq!(result, Ok(()));
}

#[test]
fn reads_are_unavailable_outside_browser() {
    let result = futures::executor::block_on(list_clients(&remote()));
    assert_eq!(result, Err(ApiError::Unavailable));
}
