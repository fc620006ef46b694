use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use eyre::Result;
use opdslot_core::{
    availability::booking_span,
    models::{
        booking::{Booking, NewBooking},
        slot::SlotKey,
        window::{NewScheduleWindow, ScheduleWindow},
    },
    store::{BookingStore, ScheduleStore},
};
use uuid::Uuid;

use crate::{DbPool, repositories};

/// Everything the HTTP surface needs from storage: the read/reserve contracts used by
/// the core plus window administration and booking lifecycle.
///
/// Cancelled bookings never appear in `booked_slots` and never block `insert_if_absent`.
#[async_trait]
pub trait ClinicStore: ScheduleStore + BookingStore {
    async fn create_window(&self, window: NewScheduleWindow) -> Result<ScheduleWindow>;

    /// All windows of a practitioner, active or not, oldest first.
    async fn list_windows(&self, practitioner_id: Uuid) -> Result<Vec<ScheduleWindow>>;

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>>;

    /// Marks a booking cancelled, releasing its slot. `None` unless `patient_id` holds it.
    async fn cancel_booking(&self, booking_id: Uuid, patient_id: Uuid) -> Result<Option<Booking>>;

    /// Bookings of any status on the practitioner's windows starting on `date`, earliest first.
    async fn practitioner_bookings(
        &self,
        practitioner_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>>;

    /// Active bookings of a patient starting strictly after `after`, earliest first.
    async fn upcoming_bookings(
        &self,
        patient_id: Uuid,
        after: NaiveDateTime,
    ) -> Result<Vec<Booking>>;

    /// Marks an active booking on one of the practitioner's windows as checked in.
    /// `None` when there is no such booking.
    async fn check_in(&self, booking_id: Uuid, practitioner_id: Uuid) -> Result<Option<Booking>>;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ScheduleStore for PgStore {
    async fn active_windows(&self, practitioner_id: Uuid) -> Result<Vec<ScheduleWindow>> {
        repositories::window::get_active_windows_by_practitioner_id(&self.pool, practitioner_id)
            .await?
            .into_iter()
            .map(ScheduleWindow::try_from)
            .collect()
    }

    async fn window(&self, window_id: Uuid) -> Result<Option<ScheduleWindow>> {
        repositories::window::get_window_by_id(&self.pool, window_id)
            .await?
            .map(ScheduleWindow::try_from)
            .transpose()
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn booked_slots(
        &self,
        window_ids: &[Uuid],
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<HashSet<SlotKey>> {
        let rows =
            repositories::booking::get_booked_slots(&self.pool, window_ids, from, until).await?;
        Ok(rows
            .into_iter()
            .map(|(window_id, start)| SlotKey::new(window_id, start))
            .collect())
    }

    async fn insert_if_absent(&self, booking: NewBooking) -> Result<Option<Booking>> {
        repositories::booking::insert_booking_if_absent(&self.pool, &booking)
            .await?
            .map(Booking::try_from)
            .transpose()
    }
}

#[async_trait]
impl ClinicStore for PgStore {
    async fn create_window(&self, window: NewScheduleWindow) -> Result<ScheduleWindow> {
        let row = repositories::window::create_window(&self.pool, &window).await?;
        ScheduleWindow::try_from(row)
    }

    async fn list_windows(&self, practitioner_id: Uuid) -> Result<Vec<ScheduleWindow>> {
        repositories::window::get_windows_by_practitioner_id(&self.pool, practitioner_id)
            .await?
            .into_iter()
            .map(ScheduleWindow::try_from)
            .collect()
    }

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>> {
        repositories::booking::get_booking_by_id(&self.pool, booking_id)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn cancel_booking(&self, booking_id: Uuid, patient_id: Uuid) -> Result<Option<Booking>> {
        repositories::booking::cancel_booking(&self.pool, booking_id, patient_id)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn practitioner_bookings(
        &self,
        practitioner_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let (from, until) = booking_span(date, date);
        repositories::booking::get_bookings_by_practitioner_id(
            &self.pool,
            practitioner_id,
            from,
            until,
        )
        .await?
        .into_iter()
        .map(Booking::try_from)
        .collect()
    }

    async fn upcoming_bookings(
        &self,
        patient_id: Uuid,
        after: NaiveDateTime,
    ) -> Result<Vec<Booking>> {
        repositories::booking::get_upcoming_bookings_by_patient_id(&self.pool, patient_id, after)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    async fn check_in(&self, booking_id: Uuid, practitioner_id: Uuid) -> Result<Option<Booking>> {
        repositories::booking::check_in_booking(&self.pool, booking_id, practitioner_id)
            .await?
            .map(Booking::try_from)
            .transpose()
    }
}
