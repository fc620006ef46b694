use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", post(handlers::booking::reserve_slot))
        .route("/api/bookings/:id", get(handlers::booking::get_booking))
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route(
            "/api/bookings/:id/check-in",
            post(handlers::booking::check_in_booking),
        )
        .route(
            "/api/practitioners/:practitioner_id/bookings",
            get(handlers::booking::practitioner_bookings),
        )
        .route(
            "/api/patients/:patient_id/bookings/upcoming",
            get(handlers::booking::patient_upcoming_bookings),
        )
}
