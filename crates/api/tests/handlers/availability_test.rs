use axum::http::StatusCode;
use opdslot_core::models::slot::AvailabilityResponse;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::TestContext;

fn availability_path(practitioner_id: Uuid) -> String {
    format!("/api/practitioners/{}/availability", practitioner_id)
}

#[tokio::test]
async fn test_availability_lists_grid_for_each_weekday() {
    let ctx = TestContext::new();
    let practitioner_id = Uuid::new_v4();
    let window = ctx.create_morning_window(practitioner_id).await;

    // Monday through Sunday
    let response = ctx
        .server
        .get(&availability_path(practitioner_id))
        .add_query_param("start_date", "2026-10-19")
        .add_query_param("end_date", "2026-10-25")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<AvailabilityResponse>();
    assert_eq!(body.slots.len(), 15);
    assert!(body.slots.iter().all(|slot| slot.window_id == window.id));
    assert!(body.slots.iter().all(|slot| slot.practitioner_id == practitioner_id));
}

#[tokio::test]
async fn test_availability_omits_reserved_slot() {
    let ctx = TestContext::new();
    let practitioner_id = Uuid::new_v4();
    let window = ctx.create_morning_window(practitioner_id).await;

    let reserve = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "window_id": window.id,
            "slot_start": "2026-10-19T09:15:00",
            "patient_id": Uuid::new_v4()
        }))
        .await;
    assert_eq!(reserve.status_code(), StatusCode::CREATED);

    let response = ctx
        .server
        .get(&availability_path(practitioner_id))
        .add_query_param("start_date", "2026-10-19")
        .add_query_param("end_date", "2026-10-19")
        .await;

    let body = response.json::<Value>();
    let starts: Vec<&str> = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|slot| slot["start_time"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["09:00:00", "09:30:00"]);
}

#[tokio::test]
async fn test_availability_rejects_reversed_range() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&availability_path(Uuid::new_v4()))
        .add_query_param("start_date", "2026-10-19")
        .add_query_param("end_date", "2026-10-18")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("Invalid date range"));
}

#[tokio::test]
async fn test_availability_for_unknown_practitioner_is_empty() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&availability_path(Uuid::new_v4()))
        .add_query_param("start_date", "2026-10-19")
        .add_query_param("end_date", "2026-10-25")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<AvailabilityResponse>().slots.is_empty());
}
