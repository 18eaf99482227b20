use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut q = ToastQueue::default();
    let a = q.error("boom");
    let b = q.success("saved");
    assert!(b > a);
    assert_eq!(q.items().len(), 2);
    assert_eq!(q.items()[0].kind, ToastKind::Error);
}

#[test]
fn queue_is_bounded_and_drops_oldest() {
    let mut q = ToastQueue::default();
    for i in 0..(MAX_TOASTS + 3) {
        q.error(format!("failure {i}"));
    }
    assert_eq!(q.items().len(), MAX_TOASTS);
    assert_eq!(q.items()[0].message, "failure 3");
}

#[test]
fn repeated_message_is_collapsed() {
    let mut q = ToastQueue::default();
    let a = q.error("offline");
    let b = q.error("offline");
    assert_eq!(a, b);
    assert_eq!(q.items().len(), 1);
    q.success("offline");
    assert_eq!(q.items().len(), 2);
}

#[test]
fn dismiss_removes_by_id_and_ignores_unknown() {
    let mut q = ToastQueue::default();
    let a = q.error("a");
    let _b = q.error("b");
    q.dismiss(a);
    q.dismiss(999);
    assert_eq!(q.items().len(), 1);
    assert_eq!(q.items()[0].message, "b");
    q.dismiss(q.items()[0].id);
    assert!(q.is_empty());
}
