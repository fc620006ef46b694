//! Expansion of a schedule window into concrete slots for one date.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::models::{slot::Slot, window::ScheduleWindow};

/// Lazily yields the slots of one window on one date, earliest first.
///
/// A slot is emitted only when it ends at or before the window's end time; a trailing
/// remainder shorter than the slot duration is dropped.
#[derive(Debug, Clone)]
pub struct SlotIter {
    window_id: Uuid,
    practitioner_id: Uuid,
    date: NaiveDate,
    next_start: NaiveDateTime,
    limit: NaiveDateTime,
    step: Duration,
}

impl SlotIter {
    fn empty(window: &ScheduleWindow, date: NaiveDate) -> Self {
        let at = date.and_time(window.start_time);
        Self {
            window_id: window.id,
            practitioner_id: window.practitioner_id,
            date,
            next_start: at,
            limit: at,
            step: Duration::zero(),
        }
    }
}

impl Iterator for SlotIter {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.step <= Duration::zero() {
            return None;
        }
        let end = self.next_start + self.step;
        if end > self.limit {
            return None;
        }
        let slot = Slot {
            window_id: self.window_id,
            practitioner_id: self.practitioner_id,
            date: self.date,
            start_time: self.next_start.time(),
            end_time: end.time(),
        };
        self.next_start = end;
        Some(slot)
    }
}

/// Slots of `window` on `date`. Empty when the window does not run on that weekday.
///
/// The result depends only on the arguments, so calling again restarts the sequence.
pub fn generate(window: &ScheduleWindow, date: NaiveDate) -> SlotIter {
    if !window.days.runs_on(date) {
        return SlotIter::empty(window, date);
    }
    SlotIter {
        window_id: window.id,
        practitioner_id: window.practitioner_id,
        date,
        next_start: date.and_time(window.start_time),
        limit: date.and_time(window.end_time),
        step: Duration::minutes(i64::from(window.slot_minutes)),
    }
}
