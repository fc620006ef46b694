use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Local, NaiveDate};
use opdslot_core::{
    models::window::{CreateWindowRequest, ListWindowsResponse, NewScheduleWindow, WindowResponse},
    store::ScheduleStore,
};
use opdslot_db::ClinicStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct RunningOnQuery {
    /// Defaults to the server's local date
    pub date: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn create_window(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateWindowRequest>,
) -> Result<(StatusCode, Json<WindowResponse>), AppError> {
    let new_window = NewScheduleWindow::try_from(payload)?;
    let window = state.store.create_window(new_window).await?;

    info!(
        window_id = %window.id,
        practitioner_id = %window.practitioner_id,
        days = %window.days,
        "Schedule window created"
    );
    Ok((StatusCode::CREATED, Json(WindowResponse::from(window))))
}

#[axum::debug_handler]
pub async fn list_windows(
    State(state): State<Arc<ApiState>>,
    Path(practitioner_id): Path<Uuid>,
) -> Result<Json<ListWindowsResponse>, AppError> {
    let windows = state.store.list_windows(practitioner_id).await?;

    Ok(Json(ListWindowsResponse {
        windows: windows.into_iter().map(WindowResponse::from).collect(),
    }))
}

/// Active windows of a practitioner that run on the requested date (today by default).
#[axum::debug_handler]
pub async fn list_windows_running_on(
    State(state): State<Arc<ApiState>>,
    Path(practitioner_id): Path<Uuid>,
    Query(query): Query<RunningOnQuery>,
) -> Result<Json<ListWindowsResponse>, AppError> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let windows = state.store.active_windows(practitioner_id).await?;

    Ok(Json(ListWindowsResponse {
        windows: windows
            .into_iter()
            .filter(|window| window.days.runs_on(date))
            .map(WindowResponse::from)
            .collect(),
    }))
}
