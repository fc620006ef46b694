use axum::http::StatusCode;
use opdslot_core::models::booking::{
    Booking, BookingStatus, ListBookingsResponse, ReserveResponse, UpcomingBookingsResponse,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_reserve_returns_booking_identity() {
    let ctx = TestContext::new();
    let window = ctx.create_morning_window(Uuid::new_v4()).await;
    let patient_id = Uuid::new_v4();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "window_id": window.id,
            "slot_start": "2026-10-19T09:00:00",
            "patient_id": patient_id
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<ReserveResponse>();
    assert_eq!(body.window_id, window.id);
    assert_eq!(body.slot_start.to_string(), "2026-10-19 09:00:00");

    let stored = ctx.store.bookings().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, body.booking_id);
    assert_eq!(stored[0].patient_id, patient_id);
}

#[tokio::test]
async fn test_double_booking_is_conflict() {
    let ctx = TestContext::new();
    let window = ctx.create_morning_window(Uuid::new_v4()).await;
    let request = |patient_id: Uuid| {
        json!({
            "window_id": window.id,
            "slot_start": "2026-10-20T09:30:00",
            "patient_id": patient_id
        })
    };

    let first = ctx.server.post("/api/bookings").json(&request(Uuid::new_v4())).await;
    let second = ctx.server.post("/api/bookings").json(&request(Uuid::new_v4())).await;

    assert_eq!(first.status_code(), StatusCode::CREATED);
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    assert_eq!(ctx.store.bookings().await.len(), 1);
}

#[rstest]
#[case::off_grid("2026-10-19T09:07:00", StatusCode::BAD_REQUEST)]
#[case::past_window_end("2026-10-19T09:45:00", StatusCode::BAD_REQUEST)]
#[case::weekend("2026-10-24T09:00:00", StatusCode::BAD_REQUEST)]
#[tokio::test]
async fn test_reserve_rejects_timestamps_off_the_grid(
    #[case] slot_start: &str,
    #[case] expected: StatusCode,
) {
    let ctx = TestContext::new();
    let window = ctx.create_morning_window(Uuid::new_v4()).await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "window_id": window.id,
            "slot_start": slot_start,
            "patient_id": Uuid::new_v4()
        }))
        .await;

    assert_eq!(response.status_code(), expected);
    assert!(ctx.store.bookings().await.is_empty());
}

#[tokio::test]
async fn test_reserve_on_unknown_window_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "window_id": Uuid::new_v4(),
            "slot_start": "2026-10-19T09:00:00",
            "patient_id": Uuid::new_v4()
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_booking() {
    let ctx = TestContext::new();
    let window = ctx.create_morning_window(Uuid::new_v4()).await;
    let reserved = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "window_id": window.id,
            "slot_start": "2026-10-21T09:15:00",
            "patient_id": Uuid::new_v4()
        }))
        .await
        .json::<ReserveResponse>();

    let found = ctx
        .server
        .get(&format!("/api/bookings/{}", reserved.booking_id))
        .await;
    let missing = ctx
        .server
        .get(&format!("/api/bookings/{}", Uuid::new_v4()))
        .await;

    assert_eq!(found.status_code(), StatusCode::OK);
    let booking = found.json::<Booking>();
    assert_eq!(booking.id, reserved.booking_id);
    assert_eq!(booking.status, BookingStatus::Active);
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancelled_slot_can_be_rebooked() {
    let ctx = TestContext::new();
    let window = ctx.create_morning_window(Uuid::new_v4()).await;
    let patient_id = Uuid::new_v4();
    let body = json!({
        "window_id": window.id,
        "slot_start": "2026-10-22T09:00:00",
        "patient_id": patient_id
    });
    let reserved = ctx
        .server
        .post("/api/bookings")
        .json(&body)
        .await
        .json::<ReserveResponse>();

    let cancel = ctx
        .server
        .post(&format!("/api/bookings/{}/cancel", reserved.booking_id))
        .json(&json!({ "patient_id": patient_id }))
        .await;
    let rebook = ctx.server.post("/api/bookings").json(&body).await;

    assert_eq!(cancel.status_code(), StatusCode::OK);
    assert_eq!(rebook.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancel_unknown_booking_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post(&format!("/api/bookings/{}/cancel", Uuid::new_v4()))
        .json(&json!({ "patient_id": Uuid::new_v4() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

async fn reserve(ctx: &TestContext, window_id: Uuid, slot_start: &str, patient_id: Uuid) -> Uuid {
    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({
            "window_id": window_id,
            "slot_start": slot_start,
            "patient_id": patient_id
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<ReserveResponse>().booking_id
}

#[tokio::test]
async fn test_cancel_by_another_patient_is_not_found() {
    let ctx = TestContext::new();
    let window = ctx.create_morning_window(Uuid::new_v4()).await;
    let booking_id = reserve(&ctx, window.id, "2026-10-19T09:00:00", Uuid::new_v4()).await;

    let response = ctx
        .server
        .post(&format!("/api/bookings/{}/cancel", booking_id))
        .json(&json!({ "patient_id": Uuid::new_v4() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(ctx.store.bookings().await[0].is_active());
}

#[tokio::test]
async fn test_check_in_marks_booking() {
    let ctx = TestContext::new();
    let practitioner_id = Uuid::new_v4();
    let window = ctx.create_morning_window(practitioner_id).await;
    let booking_id = reserve(&ctx, window.id, "2026-10-19T09:15:00", Uuid::new_v4()).await;

    let other = ctx
        .server
        .post(&format!("/api/bookings/{}/check-in", booking_id))
        .json(&json!({ "practitioner_id": Uuid::new_v4() }))
        .await;
    let owner = ctx
        .server
        .post(&format!("/api/bookings/{}/check-in", booking_id))
        .json(&json!({ "practitioner_id": practitioner_id }))
        .await;

    assert_eq!(other.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(owner.status_code(), StatusCode::OK);
    let booking = owner.json::<Booking>();
    assert_eq!(booking.id, booking_id);
    assert!(booking.checked_in);
}

#[tokio::test]
async fn test_practitioner_day_list() {
    let ctx = TestContext::new();
    let practitioner_id = Uuid::new_v4();
    let window = ctx.create_morning_window(practitioner_id).await;
    let second = reserve(&ctx, window.id, "2026-10-19T09:30:00", Uuid::new_v4()).await;
    let first = reserve(&ctx, window.id, "2026-10-19T09:00:00", Uuid::new_v4()).await;
    reserve(&ctx, window.id, "2026-10-20T09:00:00", Uuid::new_v4()).await;

    let response = ctx
        .server
        .get(&format!("/api/practitioners/{}/bookings", practitioner_id))
        .add_query_param("date", "2026-10-19")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let ids: Vec<Uuid> = response
        .json::<ListBookingsResponse>()
        .bookings
        .into_iter()
        .map(|booking| booking.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_patient_upcoming_bookings() {
    let ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    let window = ctx.create_morning_window(Uuid::new_v4()).await;
    reserve(&ctx, window.id, "2020-01-06T09:00:00", patient_id).await;
    let later = reserve(&ctx, window.id, "2030-01-08T09:00:00", patient_id).await;
    let sooner = reserve(&ctx, window.id, "2030-01-07T09:15:00", patient_id).await;
    reserve(&ctx, window.id, "2030-01-07T09:30:00", Uuid::new_v4()).await;

    let response = ctx
        .server
        .get(&format!("/api/patients/{}/bookings/upcoming", patient_id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let upcoming = response.json::<UpcomingBookingsResponse>();
    assert_eq!(upcoming.count, 2);
    let ids: Vec<Uuid> = upcoming.bookings.iter().map(|booking| booking.id).collect();
    assert_eq!(ids, vec![sooner, later]);
}
