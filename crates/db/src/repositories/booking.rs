use crate::models::DbBooking;
use chrono::{NaiveDateTime, Utc};
use eyre::Result;
use opdslot_core::models::booking::NewBooking;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts an active booking unless one already holds the same (window, slot start).
///
/// The partial unique index `uq_bookings_active_slot` decides the conflict inside the
/// INSERT itself, so concurrent callers for one slot resolve to exactly one row.
/// Returns `None` when the slot was taken.
pub async fn insert_booking_if_absent(
    pool: &Pool<Postgres>,
    booking: &NewBooking,
) -> Result<Option<DbBooking>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let inserted = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, window_id, patient_id, slot_start, status, created_at)
        VALUES ($1, $2, $3, $4, 'active', $5)
        ON CONFLICT (window_id, slot_start) WHERE status = 'active'
        DO NOTHING
        RETURNING id, window_id, patient_id, slot_start, status, checked_in, created_at
        "#,
    )
    .bind(id)
    .bind(booking.window_id)
    .bind(booking.patient_id)
    .bind(booking.slot_start)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    match &inserted {
        Some(row) => tracing::debug!("Booking inserted: id={}", row.id),
        None => tracing::debug!(
            "Booking conflict: window_id={}, slot_start={}",
            booking.window_id,
            booking.slot_start
        ),
    }

    Ok(inserted)
}

pub async fn get_booked_slots(
    pool: &Pool<Postgres>,
    window_ids: &[Uuid],
    from: NaiveDateTime,
    until: NaiveDateTime,
) -> Result<Vec<(Uuid, NaiveDateTime)>> {
    let booked = sqlx::query_as::<_, (Uuid, NaiveDateTime)>(
        r#"
        SELECT window_id, slot_start
        FROM bookings
        WHERE window_id = ANY($1)
          AND slot_start >= $2
          AND slot_start < $3
          AND status = 'active'
        "#,
    )
    .bind(window_ids)
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await?;

    Ok(booked)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, window_id, patient_id, slot_start, status, checked_in, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Cancels a booking held by `patient_id`. `None` when no such booking belongs to them.
pub async fn cancel_booking(
    pool: &Pool<Postgres>,
    id: Uuid,
    patient_id: Uuid,
) -> Result<Option<DbBooking>> {
    let cancelled = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = 'cancelled'
        WHERE id = $1 AND patient_id = $2
        RETURNING id, window_id, patient_id, slot_start, status, checked_in, created_at
        "#,
    )
    .bind(id)
    .bind(patient_id)
    .fetch_optional(pool)
    .await?;

    Ok(cancelled)
}

pub async fn get_bookings_by_practitioner_id(
    pool: &Pool<Postgres>,
    practitioner_id: Uuid,
    from: NaiveDateTime,
    until: NaiveDateTime,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT b.id, b.window_id, b.patient_id, b.slot_start, b.status, b.checked_in, b.created_at
        FROM bookings b
        JOIN schedule_windows w ON w.id = b.window_id
        WHERE w.practitioner_id = $1
          AND b.slot_start >= $2
          AND b.slot_start < $3
        ORDER BY b.slot_start, b.created_at
        "#,
    )
    .bind(practitioner_id)
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_upcoming_bookings_by_patient_id(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
    after: NaiveDateTime,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, window_id, patient_id, slot_start, status, checked_in, created_at
        FROM bookings
        WHERE patient_id = $1
          AND slot_start > $2
          AND status = 'active'
        ORDER BY slot_start
        "#,
    )
    .bind(patient_id)
    .bind(after)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Checks in an active booking on one of `practitioner_id`'s windows.
pub async fn check_in_booking(
    pool: &Pool<Postgres>,
    id: Uuid,
    practitioner_id: Uuid,
) -> Result<Option<DbBooking>> {
    let checked_in = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings b
        SET checked_in = TRUE
        FROM schedule_windows w
        WHERE b.id = $1
          AND w.id = b.window_id
          AND w.practitioner_id = $2
          AND b.status = 'active'
        RETURNING b.id, b.window_id, b.patient_id, b.slot_start, b.status, b.checked_in, b.created_at
        "#,
    )
    .bind(id)
    .bind(practitioner_id)
    .fetch_optional(pool)
    .await?;

    Ok(checked_in)
}
