//! Remote store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Remote store returned no row for {0}")]
    EmptyResponse(&'static str),

    #[error("Duplicate key: {0}")]
    Conflict(String),

    #[error("Remote store unavailable: {0}")]
    Unavailable(String),
}
