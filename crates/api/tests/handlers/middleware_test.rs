use axum::http::StatusCode;
use opdslot_api::middleware::error_handling::{AppError, map_error};
use opdslot_core::errors::SlotError;
use rstest::rstest;

#[rstest]
#[case(SlotError::InvalidRange("end before start".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::InvalidWindow("bad duration".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::InvalidSlotBoundary("09:07".into()), StatusCode::BAD_REQUEST)]
#[case(SlotError::WindowUnavailable("inactive".into()), StatusCode::NOT_FOUND)]
#[case(SlotError::NotFound("booking".into()), StatusCode::NOT_FOUND)]
#[case(SlotError::SlotAlreadyBooked("09:15".into()), StatusCode::CONFLICT)]
#[case(SlotError::StorageUnavailable(eyre::eyre!("pool closed")), StatusCode::SERVICE_UNAVAILABLE)]
fn test_error_status_mapping(#[case] error: SlotError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[test]
fn test_report_converts_to_storage_error() {
    let error = AppError::from(eyre::eyre!("connection reset"));

    assert!(matches!(error.0, SlotError::StorageUnavailable(_)));
    assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
}
