use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{SlotError, SlotResult},
    week_mask::WeekMask,
};

/// Shortest and longest slot a window may be divided into, in minutes.
pub const MIN_SLOT_MINUTES: u32 = 1;
pub const MAX_SLOT_MINUTES: u32 = 60;

/// Slot length used when a new window does not specify one.
pub const DEFAULT_SLOT_MINUTES: u32 = 5;

/// Longest window name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// A practitioner's recurring weekly OPD session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub id: Uuid,
    pub practitioner_id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_minutes: u32,
    pub days: WeekMask,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl ScheduleWindow {
    /// Checks the window's internal consistency.
    ///
    /// These are the same rules applied before a window is persisted, re-run by the
    /// booking path before a window's grid is trusted.
    pub fn validate(&self) -> SlotResult<()> {
        validate_fields(
            &self.name,
            self.start_time,
            self.end_time,
            self.slot_minutes,
            self.days,
        )
    }
}

fn validate_fields(
    name: &str,
    start_time: NaiveTime,
    end_time: NaiveTime,
    slot_minutes: u32,
    days: WeekMask,
) -> SlotResult<()> {
    if name.trim().is_empty() {
        return Err(SlotError::InvalidWindow("name must not be blank".to_string()));
    }
    let name_chars = name.chars().count();
    if name_chars > MAX_NAME_CHARS {
        return Err(SlotError::InvalidWindow(format!(
            "name is {} characters, at most {} allowed",
            name_chars, MAX_NAME_CHARS
        )));
    }
    if end_time <= start_time {
        return Err(SlotError::InvalidWindow(format!(
            "end time {} must be after start time {}",
            end_time, start_time
        )));
    }
    if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&slot_minutes) {
        return Err(SlotError::InvalidWindow(format!(
            "slot duration {} minutes is outside {}..={}",
            slot_minutes, MIN_SLOT_MINUTES, MAX_SLOT_MINUTES
        )));
    }
    if days.bits() > WeekMask::ALL.bits() {
        return Err(SlotError::InvalidWindow(format!(
            "day mask {} is outside 0..=127",
            days.bits()
        )));
    }
    Ok(())
}

/// A window that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleWindow {
    pub practitioner_id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_minutes: u32,
    pub days: WeekMask,
    pub active: bool,
}

impl NewScheduleWindow {
    pub fn validate(&self) -> SlotResult<()> {
        validate_fields(
            &self.name,
            self.start_time,
            self.end_time,
            self.slot_minutes,
            self.days,
        )
    }
}

fn default_slot_minutes() -> u32 {
    DEFAULT_SLOT_MINUTES
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWindowRequest {
    pub practitioner_id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Canonical weekday indices, Sunday = 0 .. Saturday = 6.
    #[serde(default)]
    pub days: Vec<u8>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl TryFrom<CreateWindowRequest> for NewScheduleWindow {
    type Error = SlotError;

    fn try_from(request: CreateWindowRequest) -> SlotResult<Self> {
        let window = NewScheduleWindow {
            practitioner_id: request.practitioner_id,
            name: request.name,
            start_time: request.start_time,
            end_time: request.end_time,
            slot_minutes: request.slot_minutes,
            days: WeekMask::from_day_indices(&request.days)?,
            active: request.active,
        };
        window.validate()?;
        Ok(window)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowResponse {
    pub id: Uuid,
    pub practitioner_id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_minutes: u32,
    pub days: Vec<u8>,
    pub active: bool,
}

impl From<ScheduleWindow> for WindowResponse {
    fn from(window: ScheduleWindow) -> Self {
        Self {
            id: window.id,
            practitioner_id: window.practitioner_id,
            name: window.name,
            start_time: window.start_time,
            end_time: window.end_time,
            slot_minutes: window.slot_minutes,
            days: window.days.day_indices(),
            active: window.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListWindowsResponse {
    pub windows: Vec<WindowResponse>,
}
