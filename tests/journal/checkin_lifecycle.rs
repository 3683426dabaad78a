use serde_json::{Value, json};

use super::journal_harness::Harness;

const TEXT_FIELDS: [&str; 5] = [
    "client_entry_id",
    "mood_text",
    "energy",
    "stress",
    "agent_summary",
];

#[tokio::test]
async fn text_fields_are_stored_verbatim_and_touch_updated_at() {
    let h = Harness::new();
    let mut previous_updated_at = String::new();

    for field in TEXT_FIELDS {
        let raw = format!("  {field} value, with commas  ");
        let body = h.ok("set_checkin_field", json!({"field": field, "value": raw.as_str()})).await;
        assert_eq!(body["updatedState"][field], Value::String(raw));

        let current = h.ok("get_current_checkin", json!({})).await;
        let updated_at = current["meta"]["updated_at"].as_str().unwrap().to_string();
        assert!(updated_at >= previous_updated_at);
        previous_updated_at = updated_at;
    }
}

#[tokio::test]
async fn mood_score_validation() {
    let h = Harness::new();

    assert_eq!(
        h.err_code("set_checkin_field", json!({"field": "mood_score", "value": "11"}))
            .await,
        "invalid_value"
    );
    assert_eq!(
        h.err_code("set_checkin_field", json!({"field": "mood_score", "value": "abc"}))
            .await,
        "invalid_value"
    );

    // Rejected values never start a check-in.
    assert_eq!(h.err_code("get_checkin_file_info", json!({})).await, "no_checkin_started");

    let body = h
        .ok("set_checkin_field", json!({"field": "mood_score", "value": "7"}))
        .await;
    assert_eq!(body["updatedState"]["mood_score"], 7);
}

#[tokio::test]
async fn objectives_are_split_and_trimmed() {
    let h = Harness::new();

    let body = h
        .ok("set_checkin_field", json!({"field": "objectives", "value": "a, b ,, c"}))
        .await;
    assert_eq!(body["updatedState"]["objectives"], json!(["a", "b", "c"]));

    let body = h
        .ok("set_checkin_field", json!({"field": "objectives", "value": ""}))
        .await;
    assert_eq!(body["updatedState"]["objectives"], json!([]));
}

#[tokio::test]
async fn unknown_field_is_rejected() {
    let h = Harness::new();
    assert_eq!(
        h.err_code("set_checkin_field", json!({"field": "hydration", "value": "2l"}))
            .await,
        "invalid_field"
    );
}

#[tokio::test]
async fn snapshot_tracks_draft_and_completion() {
    let h = Harness::new();

    let body = h
        .ok("set_checkin_field", json!({"field": "mood_text", "value": "steady"}))
        .await;
    let filepath = body["filepath"].as_str().unwrap().to_string();
    let snapshot: Value =
        serde_json::from_str(&std::fs::read_to_string(&filepath).unwrap()).unwrap();
    assert_eq!(snapshot["status"], "in_progress");
    assert_eq!(snapshot["checkin"]["mood_text"], "steady");

    let info = h.ok("get_checkin_file_info", json!({})).await;
    assert_eq!(info["filepath"].as_str().unwrap(), filepath);
    assert_eq!(info["checkin_id"], snapshot["checkin_id"]);

    h.ok("save_checkin", json!({})).await;
    let snapshot: Value =
        serde_json::from_str(&std::fs::read_to_string(&filepath).unwrap()).unwrap();
    assert_eq!(snapshot["status"], "complete");
}

#[tokio::test]
async fn save_is_idempotent_per_client_entry_id() {
    let h = Harness::new();
    h.ok("set_checkin_field", json!({"field": "mood_score", "value": 4}))
        .await;

    let first = h.ok("save_checkin", json!({"client_entry_id": "morning-1"})).await;
    assert_eq!(first["success"], true);

    // A different draft under the same key still returns the first entry.
    h.ok("set_checkin_field", json!({"field": "mood_score", "value": 9}))
        .await;
    let second = h.ok("save_checkin", json!({"client_entry_id": "morning-1"})).await;
    assert_eq!(second["info"], "already_saved");
    assert_eq!(second["entry"], first["saved_entry"]);
    assert_eq!(second["entry"]["mood_score"], 4);

    let history = h.read_file("wellness_log.json");
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn saved_entry_matches_what_is_read_back() {
    let h = Harness::new();
    h.ok("set_checkin_field", json!({"field": "mood_text", "value": "bright"}))
        .await;
    h.ok("set_checkin_field", json!({"field": "objectives", "value": "run, cook"}))
        .await;

    let saved = h.ok("save_checkin", json!({"client_entry_id": "e1"})).await;
    let last = h.ok("get_last_checkin", json!({})).await;
    assert_eq!(last, saved["saved_entry"]);

    let on_disk = h.read_file("wellness_log.json");
    assert_eq!(on_disk[0], saved["saved_entry"]);
    assert_eq!(on_disk[0]["objectives"], json!(["run", "cook"]));
    assert_eq!(on_disk[0]["client_entry_id"], "e1");
}

#[tokio::test]
async fn finalize_uses_draft_client_entry_id() {
    let h = Harness::new();
    h.ok(
        "set_checkin_field",
        json!({"field": "client_entry_id", "value": "evening-7"}),
    )
    .await;

    let first = h.ok("finalize_checkin", json!({})).await;
    assert_eq!(first["finalize_result"]["saved_entry"]["client_entry_id"], "evening-7");
    assert_eq!(first["meta"]["status"], "complete");

    let again = h.ok("finalize_checkin", json!({})).await;
    assert_eq!(again["finalize_result"]["info"], "already_saved");
    assert_eq!(h.journal.history(None).len(), 1);
}

#[tokio::test]
async fn reset_clears_draft_and_meta() {
    let h = Harness::new();
    h.ok("set_checkin_field", json!({"field": "energy", "value": "low"}))
        .await;
    h.ok("set_checkin_field", json!({"field": "objectives", "value": "nap"}))
        .await;

    let reset = h.ok("reset_current_checkin", json!({})).await;
    assert_eq!(reset["reset"], true);

    let current = h.ok("get_current_checkin", json!({})).await;
    for field in TEXT_FIELDS {
        assert!(current["checkin"][field].is_null(), "{field}");
    }
    assert!(current["checkin"]["mood_score"].is_null());
    assert_eq!(current["checkin"]["objectives"], json!([]));
    assert!(current["meta"]["checkin_id"].is_null());
    assert_eq!(current["meta"]["status"], "in_progress");
    assert_eq!(h.err_code("get_checkin_file_info", json!({})).await, "no_checkin_started");
}

#[tokio::test]
async fn reset_without_clearing_keeps_fields() {
    let h = Harness::new();
    h.ok("set_checkin_field", json!({"field": "stress", "value": "high"}))
        .await;
    let before = h.ok("get_current_checkin", json!({})).await;

    h.ok("reset_current_checkin", json!({"clear_fields": false}))
        .await;
    let after = h.ok("get_current_checkin", json!({})).await;
    assert_eq!(after["checkin"], before["checkin"]);
    assert!(after["meta"]["checkin_id"].is_null());

    // The next mutation starts a fresh check-in.
    h.ok("set_checkin_field", json!({"field": "stress", "value": "medium"}))
        .await;
    let restarted = h.ok("get_current_checkin", json!({})).await;
    assert_ne!(restarted["meta"]["checkin_id"], before["meta"]["checkin_id"]);
}

#[tokio::test]
async fn draft_is_not_shared_between_processes() {
    let h = Harness::new();
    h.ok("set_checkin_field", json!({"field": "mood_text", "value": "fine"}))
        .await;

    let reopened = h.reopen();
    assert!(reopened.checkins().current().meta.checkin_id.is_none());
    assert!(reopened.checkins().current().checkin.mood_text.is_none());
}
