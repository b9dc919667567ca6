//! UniEvent Event Catalog
//!
//! Events are reference data supplied from outside the app. Nothing here
//! mutates them: ticket availability is display data only and is never
//! decremented by a booking.

mod catalog;
mod error;
mod event;
mod filter;

pub use catalog::EventCatalog;
pub use error::CatalogError;
pub use event::{DutyLeave, Event};
pub use filter::EventFilter;

pub type Result<T> = std::result::Result<T, CatalogError>;
