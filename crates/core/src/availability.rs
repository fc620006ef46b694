//! # Availability
//!
//! Free slots are the grid of every active window, expanded day by day over the query
//! range, minus the (window, start) pairs that already carry an active booking.
//!
//! Output order is ascending by date, then by the order the windows were supplied in,
//! then by slot start. Identical inputs always produce identical output.

use std::{collections::HashSet, panic};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use eyre::eyre;
use tokio::task;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    errors::{SlotError, SlotResult},
    models::{
        slot::{Slot, SlotKey},
        window::ScheduleWindow,
    },
    slots::generate,
    store::{BookingStore, ScheduleStore},
};

fn check_range(start_date: NaiveDate, end_date: NaiveDate) -> SlotResult<()> {
    if end_date < start_date {
        return Err(SlotError::InvalidRange(format!(
            "end date {} is before start date {}",
            end_date, start_date
        )));
    }
    Ok(())
}

/// Computes the free slots of `windows` between `start_date` and `end_date` inclusive.
///
/// Inactive windows contribute nothing. A window failing validation is skipped with a
/// warning rather than failing the whole query.
pub fn available_slots(
    windows: &[ScheduleWindow],
    booked: &HashSet<SlotKey>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> SlotResult<Vec<Slot>> {
    check_range(start_date, end_date)?;

    let usable: Vec<&ScheduleWindow> = windows
        .iter()
        .filter(|window| window.active)
        .filter(|window| match window.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(window_id = %window.id, "Skipping malformed schedule window: {}", e);
                false
            }
        })
        .collect();

    let mut slots = Vec::new();
    for date in start_date.iter_days().take_while(|date| *date <= end_date) {
        for window in &usable {
            slots.extend(generate(window, date).filter(|slot| !booked.contains(&slot.key())));
        }
    }
    Ok(slots)
}

/// Half-open timestamp span `[start of start_date, start of the day after end_date)`.
///
/// The last representable date has no successor; its span ends at `NaiveDateTime::MAX`.
pub fn booking_span(start_date: NaiveDate, end_date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let until = end_date
        .succ_opt()
        .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));
    (start_date.and_time(NaiveTime::MIN), until)
}

/// Answers availability queries against the schedule and booking stores.
pub struct AvailabilityCalculator<'a, S: ?Sized, B: ?Sized> {
    schedules: &'a S,
    bookings: &'a B,
}

impl<'a, S, B> AvailabilityCalculator<'a, S, B>
where
    S: ScheduleStore + ?Sized,
    B: BookingStore + ?Sized,
{
    pub fn new(schedules: &'a S, bookings: &'a B) -> Self {
        Self {
            schedules,
            bookings,
        }
    }

    /// Free slots of a practitioner between two dates, inclusive.
    ///
    /// The range is checked before either store is consulted. Results are a snapshot:
    /// a slot reported free may be taken before the caller reserves it.
    pub async fn query(
        &self,
        practitioner_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> SlotResult<Vec<Slot>> {
        check_range(start_date, end_date)?;
        let (from, until) = booking_span(start_date, end_date);

        let windows = self
            .schedules
            .active_windows(practitioner_id)
            .await
            .map_err(SlotError::StorageUnavailable)?;
        if windows.is_empty() {
            debug!(%practitioner_id, "No active schedule windows");
            return Ok(Vec::new());
        }

        let window_ids: Vec<Uuid> = windows.iter().map(|window| window.id).collect();
        let booked = self
            .bookings
            .booked_slots(&window_ids, from, until)
            .await
            .map_err(SlotError::StorageUnavailable)?;

        let (window_count, booked_count) = (windows.len(), booked.len());

        // Expansion grows with range length times slots per day; keep it off the async workers.
        let expansion =
            task::spawn_blocking(move || available_slots(&windows, &booked, start_date, end_date));
        let slots = match expansion.await {
            Ok(result) => result?,
            Err(e) if e.is_panic() => panic::resume_unwind(e.into_panic()),
            Err(e) => {
                return Err(SlotError::StorageUnavailable(eyre!(
                    "Slot expansion did not complete: {}",
                    e
                )));
            }
        };
        debug!(
            %practitioner_id,
            windows = window_count,
            booked = booked_count,
            free = slots.len(),
            "Computed availability"
        );
        Ok(slots)
    }
}
