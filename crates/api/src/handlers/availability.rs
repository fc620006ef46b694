//! # Availability Handlers
//!
//! Serves a practitioner's free slots over an inclusive date range. The computation
//! itself lives in `opdslot_core::availability`; this handler only adapts HTTP input
//! and output.
//!
//! Results are a point-in-time snapshot. A slot listed here can still be taken by
//! another patient before the client reserves it, in which case the reservation
//! answers 409.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use opdslot_core::{
    availability::AvailabilityCalculator,
    models::slot::{AvailabilityQuery, AvailabilityResponse},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Lists free slots for a practitioner
///
/// # Endpoint
///
/// ```text
/// GET /api/practitioners/:practitioner_id/availability?start_date=2026-10-19&end_date=2026-10-23
/// ```
///
/// Slots are ordered by date, then by window creation order, then by start time.
///
/// # Errors
///
/// * `SlotError::InvalidRange` - `end_date` is before `start_date` (400)
/// * `SlotError::StorageUnavailable` - a store call failed (503)
#[axum::debug_handler]
pub async fn practitioner_availability(
    State(state): State<Arc<ApiState>>,
    Path(practitioner_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let store = state.store.as_ref();
    let slots = AvailabilityCalculator::new(store, store)
        .query(practitioner_id, query.start_date, query.end_date)
        .await?;

    Ok(Json(AvailabilityResponse { slots }))
}
