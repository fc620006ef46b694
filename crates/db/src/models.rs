use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use eyre::{Result, eyre};
use opdslot_core::{
    models::{
        booking::{Booking, BookingStatus},
        window::ScheduleWindow,
    },
    week_mask::WeekMask,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleWindow {
    pub id: Uuid,
    pub practitioner_id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_minutes: i32,
    pub day_mask: i16,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbScheduleWindow> for ScheduleWindow {
    type Error = eyre::Report;

    fn try_from(row: DbScheduleWindow) -> Result<Self> {
        let slot_minutes = u32::try_from(row.slot_minutes)
            .map_err(|_| eyre!("Window {} has negative slot length {}", row.id, row.slot_minutes))?;
        let bits = u8::try_from(row.day_mask)
            .map_err(|_| eyre!("Window {} has day mask {} out of range", row.id, row.day_mask))?;
        let days = WeekMask::new(bits).map_err(|e| eyre!("Window {}: {}", row.id, e))?;

        Ok(ScheduleWindow {
            id: row.id,
            practitioner_id: row.practitioner_id,
            name: row.name,
            start_time: row.start_time,
            end_time: row.end_time,
            slot_minutes,
            days,
            active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub window_id: Uuid,
    pub patient_id: Uuid,
    pub slot_start: NaiveDateTime,
    pub status: String,
    pub checked_in: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> Result<Self> {
        let status: BookingStatus = row.status.parse()?;

        Ok(Booking {
            id: row.id,
            window_id: row.window_id,
            patient_id: row.patient_id,
            slot_start: row.slot_start,
            status,
            checked_in: row.checked_in,
            created_at: row.created_at,
        })
    }
}
