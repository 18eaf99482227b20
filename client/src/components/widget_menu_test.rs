use super::*;

#[test]
fn hidden_summary_with_everything_shown() {
    assert_eq!(hidden_summary(&WidgetVisibility::default()), "All widgets shown");
}

#[test]
fn hidden_summary_lists_hidden_titles_in_widget_order() {
    let mut vis = WidgetVisibility::default();
    vis.toggle(WidgetKey::TaskOverview);
    vis.toggle(WidgetKey::Revenue);
    assert_eq!(
        hidden_summary(&vis),
        format!("Hidden: {}, {}", WidgetKey::Revenue.title(), WidgetKey::TaskOverview.title())
    );
}
