//! UniEvent Core
//!
//! Wires the local mirror, the remote store, the event catalog and the
//! session manager into one [`App`], and exposes the read-only views the
//! booking pages are built from.

mod app;
mod config;
mod error;
mod views;

pub use app::App;
pub use config::Config;
pub use error::CoreError;
pub use views::{BookingConfirmation, BookingHistoryEntry, RECOMMENDATION_LIMIT};

// Re-export core components
pub use unievent_catalog::{CatalogError, DutyLeave, Event, EventCatalog, EventFilter};
pub use unievent_remote::{MemoryStore, RecordStore, RemoteError, RestStore};
pub use unievent_session::{
    Booking, BookingDraft, BookingStatus, LocalMirror, LoginCredentials, SessionError,
    SessionManager, SessionState, User,
};
pub use unievent_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
