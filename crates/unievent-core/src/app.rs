//! Main application state container
//!
//! Owns the event catalog and the session manager. Presentation code reads
//! through here and never mutates session state directly.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use unievent_catalog::{Event, EventCatalog, EventFilter};
use unievent_remote::{RecordStore, RestStore};
use unievent_session::{Booking, BookingDraft, LocalMirror, LoginCredentials, SessionManager};
use unievent_storage::Database;

use crate::config::Config;
use crate::error::CoreError;
use crate::views::{self, BookingConfirmation, BookingHistoryEntry};
use crate::Result;

pub struct App {
    catalog: EventCatalog,
    session_manager: SessionManager,
}

impl App {
    /// Build the app from configuration. Invalid configuration is fatal and
    /// nothing is opened or connected.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let db = Database::open(&config.database_path)?;
        let store = RestStore::new(config.remote_url.clone(), config.anon_key.clone())?;
        let catalog = match &config.catalog_path {
            Some(path) => EventCatalog::from_path(path)?,
            None => EventCatalog::builtin()?,
        };

        Self::with_parts(db, Arc::new(store), catalog)
    }

    /// Build the app around an already opened database and any record store
    pub fn with_parts(
        db: Database,
        store: Arc<dyn RecordStore>,
        catalog: EventCatalog,
    ) -> Result<Self> {
        let session_manager = SessionManager::new(store, LocalMirror::new(db));
        let state = session_manager.rehydrate()?;

        tracing::info!(
            state = %state,
            event_count = catalog.len(),
            "App initialized"
        );

        Ok(Self {
            catalog,
            session_manager,
        })
    }

    // === Session operations ===

    pub fn session_manager(&self) -> &SessionManager {
        &self.session_manager
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> bool {
        self.session_manager.login(credentials).await
    }

    pub fn logout(&self) {
        self.session_manager.logout();
    }

    // === Catalog operations ===

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn events(&self, filter: &EventFilter) -> Vec<&Event> {
        self.catalog.filter(filter)
    }

    // === Booking operations ===

    /// Open a booking form for an event, prefilled with the student's number
    pub fn start_booking(&self, event_id: &str) -> Result<BookingDraft> {
        let user = self
            .session_manager
            .user()
            .ok_or(CoreError::NotAuthenticated)?;

        if self.catalog.get(event_id).is_none() {
            return Err(CoreError::EventNotFound(event_id.to_string()));
        }

        Ok(BookingDraft::new(event_id, user.registration_number))
    }

    /// Validate the form and record the booking.
    ///
    /// Succeeds as soon as the booking is stored locally, whether or not the
    /// remote store accepted it.
    pub async fn submit_booking(&self, draft: &BookingDraft, now: DateTime<Utc>) -> Result<Booking> {
        let booking = draft.submit(now)?;
        self.session_manager.add_booking(booking.clone()).await;

        tracing::info!(
            booking_id = %booking.id,
            event_id = %booking.event_id,
            ticket_count = booking.ticket_count,
            "Booking submitted"
        );

        Ok(booking)
    }

    pub fn booking_history(&self) -> Vec<BookingHistoryEntry> {
        views::booking_history(self.session_manager.bookings(), &self.catalog)
    }

    pub fn booking_confirmation(
        &self,
        booking_id: &str,
        today: NaiveDate,
    ) -> Option<BookingConfirmation> {
        views::booking_confirmation(
            self.session_manager.find_booking(booking_id),
            &self.catalog,
            today,
        )
    }
}
