use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create schedule_windows table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_windows (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            practitioner_id UUID NOT NULL,
            name VARCHAR(100) NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            slot_minutes INTEGER NOT NULL DEFAULT 5,
            day_mask SMALLINT NOT NULL DEFAULT 0,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_window_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_slot_minutes CHECK (slot_minutes BETWEEN 1 AND 60),
            CONSTRAINT valid_day_mask CHECK (day_mask BETWEEN 0 AND 127)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            window_id UUID NOT NULL REFERENCES schedule_windows(id),
            patient_id UUID NOT NULL,
            slot_start TIMESTAMP WITHOUT TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'active',
            checked_in BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_booking_status CHECK (status IN ('active', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one active booking per (window, slot start). Cancelled rows stay for
    // history and release the slot.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS uq_bookings_active_slot
            ON bookings(window_id, slot_start)
            WHERE status = 'active';
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_schedule_windows_practitioner_id ON schedule_windows(practitioner_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_window_id ON bookings(window_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_slot_start ON bookings(slot_start);
        CREATE INDEX IF NOT EXISTS idx_bookings_patient_id ON bookings(patient_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
