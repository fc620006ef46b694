//! # Booking arbitration
//!
//! A (window, start) pair moves from free to reserved exactly once while its booking is
//! active. The arbiter checks the request against the window's grid and then hands the
//! reservation to [`BookingStore::insert_if_absent`], which must decide the conflict and
//! write the row in one step.
//!
//! The arbiter never reads the booked set before inserting. Two racing callers would
//! both observe a free slot and both insert, so the store's uniqueness guarantee is the
//! only conflict check.

use chrono::NaiveDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::{SlotError, SlotResult},
    models::booking::{Booking, NewBooking},
    slots::generate,
    store::{BookingStore, ScheduleStore},
};

pub struct BookingArbiter<'a, S: ?Sized, B: ?Sized> {
    schedules: &'a S,
    bookings: &'a B,
}

impl<'a, S, B> BookingArbiter<'a, S, B>
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

    /// Reserves the slot starting at `slot_start` on `window_id` for `patient_id`.
    ///
    /// # Errors
    ///
    /// * `SlotError::WindowUnavailable` - the window does not exist or is inactive
    /// * `SlotError::InvalidWindow` - the stored window is malformed
    /// * `SlotError::InvalidSlotBoundary` - `slot_start` is not on the window's grid for that date
    /// * `SlotError::SlotAlreadyBooked` - an active booking already holds the slot; not retryable
    /// * `SlotError::StorageUnavailable` - a store call failed
    pub async fn reserve(
        &self,
        window_id: Uuid,
        slot_start: NaiveDateTime,
        patient_id: Uuid,
    ) -> SlotResult<Booking> {
        let window = self
            .schedules
            .window(window_id)
            .await
            .map_err(SlotError::StorageUnavailable)?
            .filter(|window| window.active)
            .ok_or_else(|| {
                SlotError::WindowUnavailable(format!(
                    "Schedule window {} not found or inactive",
                    window_id
                ))
            })?;
        window.validate()?;

        let on_grid =
            generate(&window, slot_start.date()).any(|slot| slot.starts_at() == slot_start);
        if !on_grid {
            return Err(SlotError::InvalidSlotBoundary(format!(
                "{} is not a slot start of window {}",
                slot_start, window_id
            )));
        }

        let request = NewBooking {
            window_id,
            patient_id,
            slot_start,
        };
        match self
            .bookings
            .insert_if_absent(request)
            .await
            .map_err(SlotError::StorageUnavailable)?
        {
            Some(booking) => {
                info!(
                    booking_id = %booking.id,
                    %window_id,
                    %slot_start,
                    "Slot reserved"
                );
                Ok(booking)
            }
            None => {
                warn!(%window_id, %slot_start, "Reservation conflict");
                Err(SlotError::SlotAlreadyBooked(format!(
                    "{} on window {} is already booked",
                    slot_start, window_id
                )))
            }
        }
    }
}
