use serde_json::json;

use super::journal_harness::Harness;

#[tokio::test]
async fn no_objectives_leaves_task_file_untouched() {
    let h = Harness::new();
    let before = std::fs::read_to_string(h.tmp.path().join("tasks.json")).unwrap();

    let body = h.ok("create_tasks_from_objectives", json!({})).await;
    assert_eq!(body, json!({"info": "no_objectives"}));
    assert_eq!(
        std::fs::read_to_string(h.tmp.path().join("tasks.json")).unwrap(),
        before
    );
}

#[tokio::test]
async fn objectives_become_tasks_linked_to_checkin() {
    let h = Harness::new();
    h.ok(
        "set_checkin_field",
        json!({"field": "objectives", "value": "drink water, 10 min walk"}),
    )
    .await;
    let checkin_id = h.ok("get_checkin_file_info", json!({})).await["checkin_id"]
        .as_str()
        .unwrap()
        .to_string();

    let body = h.ok("create_tasks_from_objectives", json!({})).await;
    assert_eq!(body["count"], 2);
    let created = body["created"].as_array().unwrap();
    assert_eq!(created[0]["title"], "drink water");
    assert_eq!(created[1]["title"], "10 min walk");
    for task in created {
        assert_eq!(task["done"], false);
        assert_eq!(task["note"], format!("From checkin {checkin_id}"));
    }

    assert_eq!(h.read_file("tasks.json"), body["created"]);
}

#[tokio::test]
async fn mark_done_updates_only_target() {
    let h = Harness::new();
    h.ok("set_checkin_field", json!({"field": "objectives", "value": "a, b, c"}))
        .await;
    h.ok("create_tasks_from_objectives", json!({})).await;

    let tasks = h.ok("list_tasks", json!({})).await;
    let target = tasks[1]["id"].as_str().unwrap().to_string();

    let done = h.ok("mark_task_done", json!({"task_id": target})).await;
    assert_eq!(done["success"], true);
    assert_eq!(done["task"]["title"], "b");

    let tasks = h.ok("list_tasks", json!({})).await;
    let flags: Vec<_> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["done"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![false, true, false]);
}

#[tokio::test]
async fn mark_done_errors() {
    let h = Harness::new();
    assert_eq!(
        h.err_code("mark_task_done", json!({"task_id": "0000"})).await,
        "task_not_found"
    );

    let missing = h.call("mark_task_done", json!({})).await;
    assert!(!missing.success);
    assert!(missing.error.unwrap().contains("task_id"));
}
