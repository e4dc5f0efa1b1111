use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use taskcache_domain::{zero_time, Task, TaskList};

fn completed_task() -> Task {
    let now = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap()
        + chrono::Duration::nanoseconds(123_456_789);
    Task {
        id: 7,
        title: "ship it".to_string(),
        updated: now,
        completed: Some(now),
        complete: true,
    }
}

#[test]
fn test_unset_completed_is_encoded_as_zero_time() {
    let task = Task {
        id: 1,
        title: "write a basic test".to_string(),
        updated: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        completed: None,
        complete: false,
    };

    let value: Value = serde_json::to_value(&task).unwrap();

    assert_eq!(
        value,
        json!({
            "id": 1,
            "title": "write a basic test",
            "updated": "2021-01-01T00:00:00Z",
            "completed": "0001-01-01T00:00:00Z",
            "complete": false
        })
    );
}

#[test]
fn test_zero_time_decodes_as_unset() {
    let raw = r#"{"id":3,"title":"t","updated":"2021-01-01T00:00:00Z","completed":"0001-01-01T00:00:00Z","complete":false}"#;

    let task: Task = serde_json::from_str(raw).unwrap();

    assert_eq!(task.completed, None);
    assert!(task.is_consistent());
}

#[test]
fn test_null_completed_decodes_as_unset() {
    let raw = r#"{"id":3,"title":"t","updated":"2021-01-01T00:00:00Z","completed":null,"complete":false}"#;

    let task: Task = serde_json::from_str(raw).unwrap();

    assert_eq!(task.completed, None);
}

#[test]
fn test_completed_keeps_nanosecond_precision() {
    let task = completed_task();

    let encoded = serde_json::to_string(&task).unwrap();
    let decoded: Task = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, task);
    assert!(encoded.contains("2021-03-04T05:06:07.123456789Z"));
}

#[test]
fn test_list_encodes_as_array_in_order() {
    let newer = completed_task();
    let mut older = Task::for_update(2, "older", false);
    older.updated = newer.updated - chrono::Duration::hours(1);
    let list: TaskList = vec![newer.clone(), older.clone()];

    let value: Value = serde_json::to_value(&list).unwrap();
    let decoded: TaskList = serde_json::from_value(value.clone()).unwrap();

    assert!(value.is_array());
    assert_eq!(value[0]["id"], 7);
    assert_eq!(value[1]["id"], 2);
    assert_eq!(value[1]["completed"], "0001-01-01T00:00:00Z");
    assert_eq!(decoded, list);
}

#[test]
fn test_unsaved_task_updated_is_zero_time() {
    let value = serde_json::to_value(Task::new("draft", false)).unwrap();
    assert_eq!(value["updated"], zero_time().to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true));
}
