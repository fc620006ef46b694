//! # opdslot core
//!
//! Slot computation and booking arbitration for outpatient (OPD) clinic schedules.
//!
//! A practitioner publishes recurring weekly [`ScheduleWindow`]s. For any date range the
//! [`availability`] module expands those windows into discrete slots and subtracts the
//! slots that already carry an active booking. The [`booking`] module reserves a single
//! slot for a patient, relying on the [`store::BookingStore`] to make the
//! check-and-insert indivisible.
//!
//! Storage is not owned here. Both services borrow implementations of the narrow
//! contracts in [`store`], which keeps them usable against PostgreSQL in production and
//! against in-memory fakes in tests.
//!
//! [`ScheduleWindow`]: models::window::ScheduleWindow

pub mod availability;
pub mod booking;
pub mod errors;
pub mod models;
pub mod slots;
pub mod store;
pub mod week_mask;

pub use availability::{AvailabilityCalculator, available_slots};
pub use booking::BookingArbiter;
pub use errors::{SlotError, SlotResult};
pub use slots::{SlotIter, generate};
pub use week_mask::WeekMask;
