/// Free-slot queries
pub mod availability;
/// Reservation and booking lifecycle
pub mod booking;
/// Schedule window administration
pub mod window;
