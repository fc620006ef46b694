use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use eyre::Result;
use opdslot_core::{
    availability::booking_span,
    models::{
        booking::{Booking, BookingStatus, NewBooking},
        slot::SlotKey,
        window::{NewScheduleWindow, ScheduleWindow},
    },
    store::{BookingStore, ScheduleStore},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::ClinicStore;

/// Process-local store for tests and demos.
///
/// Windows keep insertion order. `insert_if_absent` checks and inserts under one write
/// lock, which gives the same at-most-one guarantee as the database's unique index.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    windows: RwLock<Vec<ScheduleWindow>>,
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fully formed window as-is, including invalid or inactive ones.
    pub async fn insert_window(&self, window: ScheduleWindow) {
        self.windows.write().await.push(window);
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    async fn window_ids_of(&self, practitioner_id: Uuid) -> HashSet<Uuid> {
        self.windows
            .read()
            .await
            .iter()
            .filter(|window| window.practitioner_id == practitioner_id)
            .map(|window| window.id)
            .collect()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn active_windows(&self, practitioner_id: Uuid) -> Result<Vec<ScheduleWindow>> {
        Ok(self
            .windows
            .read()
            .await
            .iter()
            .filter(|window| window.practitioner_id == practitioner_id && window.active)
            .cloned()
            .collect())
    }

    async fn window(&self, window_id: Uuid) -> Result<Option<ScheduleWindow>> {
        Ok(self
            .windows
            .read()
            .await
            .iter()
            .find(|window| window.id == window_id)
            .cloned())
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn booked_slots(
        &self,
        window_ids: &[Uuid],
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<HashSet<SlotKey>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .filter(|booking| booking.is_active())
            .filter(|booking| window_ids.contains(&booking.window_id))
            .filter(|booking| booking.slot_start >= from && booking.slot_start < until)
            .map(Booking::key)
            .collect())
    }

    async fn insert_if_absent(&self, booking: NewBooking) -> Result<Option<Booking>> {
        let mut bookings = self.bookings.write().await;
        let key = booking.key();
        if bookings.iter().any(|existing| existing.is_active() && existing.key() == key) {
            return Ok(None);
        }
        let created = Booking {
            id: Uuid::new_v4(),
            window_id: booking.window_id,
            patient_id: booking.patient_id,
            slot_start: booking.slot_start,
            status: BookingStatus::Active,
            checked_in: false,
            created_at: Utc::now(),
        };
        bookings.push(created.clone());
        Ok(Some(created))
    }
}

#[async_trait]
impl ClinicStore for InMemoryStore {
    async fn create_window(&self, window: NewScheduleWindow) -> Result<ScheduleWindow> {
        let created = ScheduleWindow {
            id: Uuid::new_v4(),
            practitioner_id: window.practitioner_id,
            name: window.name,
            start_time: window.start_time,
            end_time: window.end_time,
            slot_minutes: window.slot_minutes,
            days: window.days,
            active: window.active,
            created_at: Utc::now(),
        };
        self.windows.write().await.push(created.clone());
        Ok(created)
    }

    async fn list_windows(&self, practitioner_id: Uuid) -> Result<Vec<ScheduleWindow>> {
        Ok(self
            .windows
            .read()
            .await
            .iter()
            .filter(|window| window.practitioner_id == practitioner_id)
            .cloned()
            .collect())
    }

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .find(|booking| booking.id == booking_id)
            .cloned())
    }

    async fn cancel_booking(&self, booking_id: Uuid, patient_id: Uuid) -> Result<Option<Booking>> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings
            .iter_mut()
            .find(|booking| booking.id == booking_id && booking.patient_id == patient_id)
            .map(|booking| {
                booking.status = BookingStatus::Cancelled;
                booking.clone()
            }))
    }

    async fn practitioner_bookings(
        &self,
        practitioner_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let window_ids = self.window_ids_of(practitioner_id).await;
        let (from, until) = booking_span(date, date);

        let mut day: Vec<Booking> = self
            .bookings
            .read()
            .await
            .iter()
            .filter(|booking| window_ids.contains(&booking.window_id))
            .filter(|booking| booking.slot_start >= from && booking.slot_start < until)
            .cloned()
            .collect();
        day.sort_by_key(|booking| booking.slot_start);
        Ok(day)
    }

    async fn upcoming_bookings(
        &self,
        patient_id: Uuid,
        after: NaiveDateTime,
    ) -> Result<Vec<Booking>> {
        let mut upcoming: Vec<Booking> = self
            .bookings
            .read()
            .await
            .iter()
            .filter(|booking| booking.patient_id == patient_id && booking.is_active())
            .filter(|booking| booking.slot_start > after)
            .cloned()
            .collect();
        upcoming.sort_by_key(|booking| booking.slot_start);
        Ok(upcoming)
    }

    async fn check_in(&self, booking_id: Uuid, practitioner_id: Uuid) -> Result<Option<Booking>> {
        let window_ids = self.window_ids_of(practitioner_id).await;

        let mut bookings = self.bookings.write().await;
        Ok(bookings
            .iter_mut()
            .find(|booking| {
                booking.id == booking_id
                    && booking.is_active()
                    && window_ids.contains(&booking.window_id)
            })
            .map(|booking| {
                booking.checked_in = true;
                booking.clone()
            }))
    }
}
