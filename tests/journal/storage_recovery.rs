use std::fs;

use serde_json::json;

use super::journal_harness::Harness;

#[tokio::test]
async fn malformed_history_reads_as_empty_and_next_save_repairs_it() {
    let h = Harness::new();
    let log = h.tmp.path().join("wellness_log.json");
    fs::write(&log, "{ this is not json").unwrap();

    assert_eq!(h.ok("get_history", json!({})).await, json!([]));

    h.ok("set_checkin_field", json!({"field": "mood_text", "value": "ok"}))
        .await;
    h.ok("save_checkin", json!({})).await;

    let history = h.read_file("wellness_log.json");
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleted_files_are_recreated_on_read() {
    let h = Harness::new();
    fs::remove_file(h.tmp.path().join("tasks.json")).unwrap();

    assert_eq!(h.ok("list_tasks", json!({})).await, json!([]));
    assert_eq!(h.read_file("tasks.json"), json!([]));
}

#[tokio::test]
async fn blank_task_file_reads_as_empty() {
    let h = Harness::new();
    fs::write(h.tmp.path().join("tasks.json"), "   \n").unwrap();
    assert_eq!(h.ok("list_tasks", json!({})).await, json!([]));
}

#[tokio::test]
async fn no_temp_files_left_behind() {
    let h = Harness::new();
    h.ok("set_checkin_field", json!({"field": "objectives", "value": "x"}))
        .await;
    h.ok("create_tasks_from_objectives", json!({})).await;
    h.ok("save_checkin", json!({})).await;

    let leftovers: Vec<_> = fs::read_dir(h.tmp.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn history_survives_reopen() {
    let h = Harness::new();
    h.ok("set_checkin_field", json!({"field": "mood_score", "value": 3}))
        .await;
    h.ok("save_checkin", json!({"client_entry_id": "persist"})).await;

    let reopened = h.reopen();
    let entry = reopened.last_entry().unwrap();
    assert_eq!(entry.client_entry_id.as_deref(), Some("persist"));
    assert_eq!(entry.mood_score, Some(3));
}

#[tokio::test]
async fn unreadable_entry_does_not_wipe_history_on_next_save() {
    let h = Harness::new();
    let log = h.tmp.path().join("wellness_log.json");
    let kept = uuid::Uuid::new_v4();
    let seeded = json!([
        {
            "id": kept,
            "client_entry_id": "morning",
            "timestamp": "2026-03-01T08:00:00",
            "mood_text": "calm",
            "mood_score": 7,
            "energy": null,
            "stress": null,
            "objectives": [],
            "agent_summary": null
        },
        {
            "id": uuid::Uuid::new_v4(),
            "timestamp": "2026-03-02T08:00:00",
            "mood_score": 7.5
        }
    ]);
    fs::write(&log, serde_json::to_string_pretty(&seeded).unwrap()).unwrap();

    let history = h.ok("get_history", json!({})).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["client_entry_id"], "morning");

    h.ok("set_checkin_field", json!({"field": "mood_text", "value": "tired"}))
        .await;
    h.ok("save_checkin", json!({"client_entry_id": "evening"}))
        .await;

    let on_disk = h.read_file("wellness_log.json");
    let on_disk = on_disk.as_array().unwrap();
    assert_eq!(on_disk.len(), 3);
    assert_eq!(on_disk[0]["id"], json!(kept));
    assert_eq!(on_disk[1]["mood_score"], 7.5);
    assert_eq!(on_disk[2]["client_entry_id"], "evening");
}
