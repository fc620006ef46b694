use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use mockall::mock;
use opdslot_core::{
    models::{
        booking::{Booking, NewBooking},
        slot::SlotKey,
        window::ScheduleWindow,
    },
    store::{BookingStore, ScheduleStore},
};
use uuid::Uuid;

// Mock stores for testing
mock! {
    pub ScheduleRepo {}

    #[async_trait]
    impl ScheduleStore for ScheduleRepo {
        async fn active_windows(&self, practitioner_id: Uuid) -> eyre::Result<Vec<ScheduleWindow>>;

        async fn window(&self, window_id: Uuid) -> eyre::Result<Option<ScheduleWindow>>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingStore for BookingRepo {
        async fn booked_slots(
            &self,
            window_ids: &[Uuid],
            from: NaiveDateTime,
            until: NaiveDateTime,
        ) -> eyre::Result<HashSet<SlotKey>>;

        async fn insert_if_absent(&self, booking: NewBooking) -> eyre::Result<Option<Booking>>;
    }
}
