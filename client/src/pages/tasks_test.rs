use super::*;

fn task(id: &str, property: &str, status: TaskStatus, due: Option<&str>) -> Task {
    Task {
        id: id.to_owned(),
        property_id: property.to_owned(),
        status,
        due_date: due.map(str::to_owned),
        ..Task::default()
    }
}

#[test]
fn property_ids_are_distinct_and_ordered() {
    let tasks = vec![
        task("t1", "p2", TaskStatus::Pending, None),
        task("t2", "p1", TaskStatus::Pending, None),
        task("t3", "p2", TaskStatus::Pending, None),
        task("t4", "", TaskStatus::Pending, None),
    ];
    assert_eq!(property_ids(&tasks), vec!["p2".to_owned(), "p1".to_owned()]);
}

#[test]
fn sorted_tasks_puts_open_work_first_by_due_date() {
    let tasks = vec![
        task("done", "p", TaskStatus::Completed, Some("2026-01-01T00:00:00Z")),
        task("undated", "p", TaskStatus::Pending, None),
        task("later", "p", TaskStatus::InProgress, Some("2026-03-01T00:00:00Z")),
        task("sooner", "p", TaskStatus::Pending, Some("2026-02-01T00:00:00Z")),
    ];
    let ids: Vec<String> = sorted_tasks(tasks).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["sooner", "later", "undated", "done"]);
}

#[test]
fn status_labels_are_human_readable() {
    assert_eq!(task_status_label(TaskStatus::InProgress), "In progress");
    assert_eq!(task_status_label(TaskStatus::Unknown), "Unknown");
}
