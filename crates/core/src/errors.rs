use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid schedule window: {0}")]
    InvalidWindow(String),

    #[error("Schedule window unavailable: {0}")]
    WindowUnavailable(String),

    #[error("Invalid slot boundary: {0}")]
    InvalidSlotBoundary(String),

    #[error("Slot already booked: {0}")]
    SlotAlreadyBooked(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] eyre::Report),
}

pub type SlotResult<T> = Result<T, SlotError>;
