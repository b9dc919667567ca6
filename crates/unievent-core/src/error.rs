//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] unievent_storage::StorageError),

    #[error("Remote store error: {0}")]
    Remote(#[from] unievent_remote::RemoteError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] unievent_catalog::CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] unievent_session::SessionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Not logged in")]
    NotAuthenticated,
}
