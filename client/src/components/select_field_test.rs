use super::*;

fn opts(values: &[&str]) -> Vec<SelectOption> {
    values.iter().map(|v| SelectOption::new(*v, v.to_uppercase())).collect()
}

#[test]
fn exactly_one_option_is_marked() {
    let options = opts(&["a", "b", "c"]);
    for selected in ["a", "b", "c", "zzz", ""] {
        let marks = option_marks(&options, selected);
        assert_eq!(marks.iter().filter(|m| **m).count(), 1, "selected={selected:?}");
    }
    assert_eq!(option_marks(&options, "b"), vec![false, true, false]);
}

#[test]
fn unknown_selection_marks_first_option() {
    assert_eq!(selected_index(&opts(&["a", "b"]), "x"), Some(0));
}

#[test]
fn duplicate_values_mark_first_match_only() {
    let options = opts(&["a", "b", "b"]);
    assert_eq!(option_marks(&options, "b"), vec![false, true, false]);
}

#[test]
fn empty_options_mark_nothing() {
    assert_eq!(selected_index(&[], "a"), None);
    assert!(option_marks(&[], "a").is_empty());
}

#[test]
fn change_yields_the_option_value_string() {
    let options = vec![SelectOption::new("past_due", "Past due"), SelectOption::new("active", "Active")];
    assert_eq!(value_for_dom(&options, "0"), Some("past_due".to_owned()));
    assert_eq!(value_for_dom(&options, "1"), Some("active".to_owned()));
    assert_eq!(value_for_dom(&options, "2"), None);
    assert_eq!(value_for_dom(&options, "Active"), None);
}
