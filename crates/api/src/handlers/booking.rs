use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Local, NaiveDate};
use opdslot_core::{
    booking::BookingArbiter,
    errors::SlotError,
    models::booking::{
        Booking, CancelBookingRequest, CancelBookingResponse, CheckInRequest,
        ListBookingsResponse, ReserveRequest, ReserveResponse, UpcomingBookingsResponse,
    },
};
use opdslot_db::ClinicStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct BookingDateQuery {
    /// Defaults to the server's local date
    pub date: Option<NaiveDate>,
}

/// Reserves one slot for a patient.
///
/// Answers 201 with the booking identity, 404 when the window is missing or inactive,
/// 400 when `slot_start` is not on the window's grid and 409 when the slot is taken.
/// A 409 is final for that slot; the client should pick another one.
#[axum::debug_handler]
pub async fn reserve_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ReserveRequest>,
) -> Result<(StatusCode, Json<ReserveResponse>), AppError> {
    let store = state.store.as_ref();
    let booking = BookingArbiter::new(store, store)
        .reserve(payload.window_id, payload.slot_start, payload.patient_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ReserveResponse::from(booking))))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .store
        .get_booking(id)
        .await?
        .ok_or_else(|| SlotError::NotFound(format!("Booking with ID {} not found", id)))?;

    Ok(Json(booking))
}

/// Cancels a booking on behalf of the patient holding it.
///
/// Another patient's booking answers 404 exactly like an unknown id.
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<Json<CancelBookingResponse>, AppError> {
    let booking = state
        .store
        .cancel_booking(id, payload.patient_id)
        .await?
        .ok_or_else(|| SlotError::NotFound(format!("Booking with ID {} not found", id)))?;

    info!(booking_id = %booking.id, window_id = %booking.window_id, "Booking cancelled");
    Ok(Json(CancelBookingResponse {
        booking_id: booking.id,
        status: booking.status,
    }))
}

#[axum::debug_handler]
pub async fn check_in_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CheckInRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .store
        .check_in(id, payload.practitioner_id)
        .await?
        .ok_or_else(|| SlotError::NotFound(format!("Active booking with ID {} not found", id)))?;

    info!(
        booking_id = %booking.id,
        practitioner_id = %payload.practitioner_id,
        "Patient checked in"
    );
    Ok(Json(booking))
}

/// A practitioner's day list: every booking starting on the requested date (today by
/// default), cancelled ones included.
#[axum::debug_handler]
pub async fn practitioner_bookings(
    State(state): State<Arc<ApiState>>,
    Path(practitioner_id): Path<Uuid>,
    Query(query): Query<BookingDateQuery>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let bookings = state.store.practitioner_bookings(practitioner_id, date).await?;

    Ok(Json(ListBookingsResponse { bookings }))
}

#[axum::debug_handler]
pub async fn patient_upcoming_bookings(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<UpcomingBookingsResponse>, AppError> {
    let now = Local::now().naive_local();
    let bookings = state.store.upcoming_bookings(patient_id, now).await?;

    Ok(Json(UpcomingBookingsResponse::from(bookings)))
}
