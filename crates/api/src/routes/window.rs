use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/windows", post(handlers::window::create_window))
        .route(
            "/api/practitioners/:practitioner_id/windows",
            get(handlers::window::list_windows),
        )
        .route(
            "/api/practitioners/:practitioner_id/windows/today",
            get(handlers::window::list_windows_running_on),
        )
}
