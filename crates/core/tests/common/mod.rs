#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use opdslot_core::{models::window::ScheduleWindow, week_mask::WeekMask};
use uuid::Uuid;

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_time(time(hour, minute))
}

/// Monday 19 October 2026.
pub fn monday() -> NaiveDate {
    date(2026, 10, 19)
}

pub fn window(start: NaiveTime, end: NaiveTime, slot_minutes: u32, days: &[u8]) -> ScheduleWindow {
    ScheduleWindow {
        id: Uuid::new_v4(),
        practitioner_id: Uuid::new_v4(),
        name: "General OPD".to_string(),
        start_time: start,
        end_time: end,
        slot_minutes,
        days: WeekMask::from_day_indices(days).unwrap(),
        active: true,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn weekday_window(start: NaiveTime, end: NaiveTime, slot_minutes: u32) -> ScheduleWindow {
    window(start, end, slot_minutes, &[1, 2, 3, 4, 5])
}
