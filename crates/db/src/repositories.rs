pub mod booking;
pub mod window;
