use axum::http::StatusCode;
use opdslot_core::models::window::{ListWindowsResponse, WindowResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_create_window_decodes_days() {
    let ctx = TestContext::new();
    let practitioner_id = Uuid::new_v4();

    let response = ctx
        .server
        .post("/api/windows")
        .json(&json!({
            "practitioner_id": practitioner_id,
            "name": "Alternate days",
            "start_time": "10:00:00",
            "end_time": "13:00:00",
            "days": [4, 0, 2, 2]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let window = response.json::<WindowResponse>();
    assert_eq!(window.practitioner_id, practitioner_id);
    assert_eq!(window.days, vec![0, 2, 4]);
    assert_eq!(window.slot_minutes, 5);
    assert!(window.active);
}

#[rstest]
#[case::end_before_start(json!({"start_time": "12:00:00", "end_time": "09:00:00", "days": [1]}))]
#[case::equal_bounds(json!({"start_time": "09:00:00", "end_time": "09:00:00", "days": [1]}))]
#[case::slot_too_long(json!({"start_time": "09:00:00", "end_time": "12:00:00", "slot_minutes": 61, "days": [1]}))]
#[case::zero_slot(json!({"start_time": "09:00:00", "end_time": "12:00:00", "slot_minutes": 0, "days": [1]}))]
#[case::name_too_long(json!({"name": "n".repeat(101), "start_time": "09:00:00", "end_time": "12:00:00", "days": [1]}))]
#[case::blank_name(json!({"name": "  ", "start_time": "09:00:00", "end_time": "12:00:00", "days": [1]}))]
#[case::bad_day_index(json!({"start_time": "09:00:00", "end_time": "12:00:00", "days": [7]}))]
#[tokio::test]
async fn test_create_window_rejects_invalid_definitions(#[case] fields: Value) {
    let ctx = TestContext::new();
    let mut body = json!({
        "practitioner_id": Uuid::new_v4(),
        "name": "Broken OPD"
    });
    body.as_object_mut()
        .unwrap()
        .extend(fields.as_object().unwrap().clone());

    let response = ctx.server.post("/api/windows").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let error = response.json::<Value>();
    assert!(error["error"].as_str().unwrap().contains("Invalid schedule window"));
}

#[tokio::test]
async fn test_list_windows_for_practitioner() {
    let ctx = TestContext::new();
    let practitioner_id = Uuid::new_v4();
    let first = ctx.create_morning_window(practitioner_id).await;
    let second = ctx.create_morning_window(practitioner_id).await;
    ctx.create_morning_window(Uuid::new_v4()).await;

    let response = ctx
        .server
        .get(&format!("/api/practitioners/{}/windows", practitioner_id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let ids: Vec<Uuid> = response
        .json::<ListWindowsResponse>()
        .windows
        .into_iter()
        .map(|window| window.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[rstest]
#[case::monday("2026-10-19", 1)]
#[case::sunday("2026-10-18", 0)]
#[tokio::test]
async fn test_windows_running_on_date(#[case] date: &str, #[case] expected: usize) {
    let ctx = TestContext::new();
    let practitioner_id = Uuid::new_v4();
    ctx.create_morning_window(practitioner_id).await;

    let response = ctx
        .server
        .get(&format!("/api/practitioners/{}/windows/today", practitioner_id))
        .add_query_param("date", date)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<ListWindowsResponse>().windows.len(), expected);
}
