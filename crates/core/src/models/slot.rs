use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable candidate derived from a schedule window. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub window_id: Uuid,
    pub practitioner_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Slot {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn key(&self) -> SlotKey {
        SlotKey {
            window_id: self.window_id,
            start: self.starts_at(),
        }
    }
}

/// Identity of an occupied slot: one window, one start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub window_id: Uuid,
    pub start: NaiveDateTime,
}

impl SlotKey {
    pub fn new(window_id: Uuid, start: NaiveDateTime) -> Self {
        Self { window_id, start }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<Slot>,
}
