//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] unievent_storage::StorageError),

    #[error("Remote store error: {0}")]
    Remote(#[from] unievent_remote::RemoteError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid registration number: {0:?}")]
    InvalidRegistrationNumber(String),

    #[error("Registration number for ticket {0} is missing")]
    MissingRegistrationNumber(usize),

    #[error("Ticket count must be between 1 and {max}, got {requested}")]
    TicketCount { requested: usize, max: usize },

    #[error("Ticket count {ticket_count} does not match {registration_numbers} registration numbers")]
    TicketCountMismatch {
        ticket_count: u32,
        registration_numbers: usize,
    },

    #[error("No ticket slot at index {0}")]
    SlotOutOfRange(usize),
}
