//! Storage contracts consumed by the availability and booking services.
//!
//! Implementations report infrastructure failures as `eyre::Report`; the services wrap
//! them in [`SlotError::StorageUnavailable`](crate::errors::SlotError) untouched.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use eyre::Result;
use uuid::Uuid;

use crate::models::{
    booking::{Booking, NewBooking},
    slot::SlotKey,
    window::ScheduleWindow,
};

/// Read-only view of practitioners' schedule windows.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Active windows of a practitioner, in a stable order (oldest first).
    async fn active_windows(&self, practitioner_id: Uuid) -> Result<Vec<ScheduleWindow>>;

    /// Looks a window up by id regardless of its active flag.
    async fn window(&self, window_id: Uuid) -> Result<Option<ScheduleWindow>>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Keys of active bookings on `window_ids` with `from <= start < until`.
    async fn booked_slots(
        &self,
        window_ids: &[Uuid],
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<HashSet<SlotKey>>;

    /// Inserts the booking unless an active booking already holds its
    /// (window, start) pair, as a single indivisible operation.
    ///
    /// Returns `Ok(None)` when the pair is taken.
    async fn insert_if_absent(&self, booking: NewBooking) -> Result<Option<Booking>>;
}
