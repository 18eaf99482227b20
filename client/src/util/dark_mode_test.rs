use super::*;
use crate::util::storage::MemoryStore;

#[test]
fn stored_choice_beats_system_preference() {
    let store = MemoryStore::new();
    assert!(stored_preference(&store, true));
    assert!(!stored_preference(&store, false));
    save_preference(&store, false);
    assert!(!stored_preference(&store, true));
    save_preference(&store, true);
    assert!(stored_preference(&store, false));
}

#[test]
fn garbage_value_falls_back_to_system() {
    let store = MemoryStore::new();
    store.set(STORAGE_KEY, "yes");
    assert!(stored_preference(&store, true));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn toggle_flips_boolean_value() {
    assert!(toggle(false));
    assert!(!toggle(true));
    assert!(!read_preference());
}
