use crate::models::DbScheduleWindow;
use chrono::Utc;
use eyre::Result;
use opdslot_core::models::window::NewScheduleWindow;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_window(
    pool: &Pool<Postgres>,
    window: &NewScheduleWindow,
) -> Result<DbScheduleWindow> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating schedule window: id={}, practitioner_id={}, name={}, days={}",
        id,
        window.practitioner_id,
        window.name,
        window.days
    );

    let created = sqlx::query_as::<_, DbScheduleWindow>(
        r#"
        INSERT INTO schedule_windows
            (id, practitioner_id, name, start_time, end_time, slot_minutes, day_mask, is_active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, practitioner_id, name, start_time, end_time, slot_minutes, day_mask, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(window.practitioner_id)
    .bind(&window.name)
    .bind(window.start_time)
    .bind(window.end_time)
    .bind(window.slot_minutes as i32)
    .bind(i16::from(window.days.bits()))
    .bind(window.active)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_window_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbScheduleWindow>> {
    tracing::debug!("Getting schedule window by id: {}", id);

    let window = sqlx::query_as::<_, DbScheduleWindow>(
        r#"
        SELECT id, practitioner_id, name, start_time, end_time, slot_minutes, day_mask, is_active, created_at
        FROM schedule_windows
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(window)
}

pub async fn get_windows_by_practitioner_id(
    pool: &Pool<Postgres>,
    practitioner_id: Uuid,
) -> Result<Vec<DbScheduleWindow>> {
    let windows = sqlx::query_as::<_, DbScheduleWindow>(
        r#"
        SELECT id, practitioner_id, name, start_time, end_time, slot_minutes, day_mask, is_active, created_at
        FROM schedule_windows
        WHERE practitioner_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(practitioner_id)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

pub async fn get_active_windows_by_practitioner_id(
    pool: &Pool<Postgres>,
    practitioner_id: Uuid,
) -> Result<Vec<DbScheduleWindow>> {
    let windows = sqlx::query_as::<_, DbScheduleWindow>(
        r#"
        SELECT id, practitioner_id, name, start_time, end_time, slot_minutes, day_mask, is_active, created_at
        FROM schedule_windows
        WHERE practitioner_id = $1 AND is_active
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(practitioner_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        "Found {} active windows for practitioner {}",
        windows.len(),
        practitioner_id
    );
    Ok(windows)
}
