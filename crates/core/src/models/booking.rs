use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::slot::SlotKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BookingStatus::Active),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(eyre::eyre!("Unknown booking status: {}", other)),
        }
    }
}

/// A patient's claim on one slot of one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub window_id: Uuid,
    pub patient_id: Uuid,
    pub slot_start: NaiveDateTime,
    pub status: BookingStatus,
    /// Set by the practitioner when the patient arrives.
    pub checked_in: bool,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.window_id, self.slot_start)
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }
}

/// Booking payload handed to the store's conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub window_id: Uuid,
    pub patient_id: Uuid,
    pub slot_start: NaiveDateTime,
}

impl NewBooking {
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.window_id, self.slot_start)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub window_id: Uuid,
    pub slot_start: NaiveDateTime,
    pub patient_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub booking_id: Uuid,
    pub window_id: Uuid,
    pub slot_start: NaiveDateTime,
}

impl From<Booking> for ReserveResponse {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.id,
            window_id: booking.window_id,
            slot_start: booking.slot_start,
        }
    }
}

/// Cancellation is only honoured for the patient holding the booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    pub patient_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub practitioner_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingBookingsResponse {
    pub count: usize,
    pub bookings: Vec<Booking>,
}

impl From<Vec<Booking>> for UpcomingBookingsResponse {
    fn from(bookings: Vec<Booking>) -> Self {
        Self {
            count: bookings.len(),
            bookings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingResponse {
    pub booking_id: Uuid,
    pub status: BookingStatus,
}
