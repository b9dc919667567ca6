//! Session Manager
//!
//! Keeps the in-memory session, the local mirror and the remote store in
//! step. Every mutation of the session goes through this type.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use unievent_remote::RecordStore;

use crate::booking::Booking;
use crate::mirror::LocalMirror;
use crate::state::SessionState;
use crate::user::{LoginCredentials, User};
use crate::Result;

#[derive(Default)]
struct SessionInner {
    user: Option<User>,
    bookings: Vec<Booking>,
    /// Bumped by every login and logout; a booking load only lands if the
    /// generation it started under is still current
    generation: u64,
}

pub struct SessionManager {
    inner: Arc<RwLock<SessionInner>>,
    store: Arc<dyn RecordStore>,
    mirror: LocalMirror,
    /// Booking load spawned by the most recent login
    booking_load: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SessionManager {
    /// Starts logged out; call [`rehydrate`](Self::rehydrate) to pick up a
    /// session left in the local mirror
    pub fn new(store: Arc<dyn RecordStore>, mirror: LocalMirror) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner::default())),
            store,
            mirror,
            booking_load: Arc::new(Mutex::new(None)),
        }
    }

    /// Restore the session stored in the local mirror.
    ///
    /// Bookings come from the mirror only; the remote store is not consulted.
    pub fn rehydrate(&self) -> Result<SessionState> {
        let Some(user) = self.mirror.load_user()? else {
            debug!("No stored user, starting logged out");
            return Ok(SessionState::LoggedOut);
        };
        let bookings = self.mirror.load_bookings()?;

        info!(
            registration_number = %user.registration_number,
            booking_count = bookings.len(),
            "Restored session from local mirror"
        );

        let mut inner = self.inner.write();
        inner.generation += 1;
        inner.user = Some(user);
        inner.bookings = bookings;

        Ok(SessionState::LoggedIn)
    }

    /// Sign in, creating the student on first login.
    ///
    /// Returns `true` once the user is established. The booking list is
    /// loaded in the background and may not be populated yet when this
    /// returns; see [`wait_for_bookings`](Self::wait_for_bookings).
    pub async fn login(&self, credentials: &LoginCredentials) -> bool {
        if !credentials.is_well_formed() {
            debug!("Rejected malformed credentials");
            return false;
        }

        let registration_number = credentials.registration_number.as_str();

        let user = match self.establish_user(registration_number).await {
            Ok(user) => user,
            Err(e) => {
                error!(
                    registration_number = %registration_number,
                    error = %e,
                    "Login failed"
                );
                return false;
            }
        };

        let generation = {
            let mut inner = self.inner.write();
            inner.generation += 1;
            inner.user = Some(user.clone());
            inner.generation
        };

        if let Err(e) = self.mirror.store_user(&user) {
            warn!(error = %e, "Failed to mirror user locally");
        }

        info!(
            registration_number = %user.registration_number,
            generation,
            "Logged in"
        );

        self.spawn_booking_load(user.registration_number, generation);

        true
    }

    /// Fetch the user row, inserting a placeholder student if there is none
    async fn establish_user(&self, registration_number: &str) -> Result<User> {
        if let Some(row) = self.store.find_user(registration_number).await? {
            return Ok(row.into());
        }

        let row = self
            .store
            .insert_user(User::placeholder(registration_number))
            .await?;

        info!(registration_number = %registration_number, "Created new user");

        Ok(row.into())
    }

    fn spawn_booking_load(&self, registration_number: String, generation: u64) {
        let manager = self.clone();
        let handle = tokio::spawn(async move {
            manager
                .load_user_bookings(&registration_number, generation)
                .await;
        });

        if let Some(previous) = self.booking_load.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Replace the booking list with the remote one, unless the session has
    /// moved on since `generation`. Failures keep the current list.
    async fn load_user_bookings(&self, registration_number: &str, generation: u64) {
        let rows = match self.store.bookings_for_registration(registration_number).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(
                    registration_number = %registration_number,
                    error = %e,
                    "Failed to load bookings"
                );
                return;
            }
        };

        let bookings: Vec<Booking> = rows
            .into_iter()
            .map(|row| Booking::from_row(row, registration_number))
            .collect();

        let mut inner = self.inner.write();
        if inner.generation != generation {
            debug!(
                registration_number = %registration_number,
                generation,
                current = inner.generation,
                "Discarding stale booking load"
            );
            return;
        }

        // Mirror under the lock so a concurrent logout cannot be overwritten
        if let Err(e) = self.mirror.store_bookings(&bookings) {
            warn!(error = %e, "Failed to mirror bookings locally");
        }

        debug!(
            registration_number = %registration_number,
            count = bookings.len(),
            "Loaded bookings"
        );
        inner.bookings = bookings;
    }

    /// Wait for the booking load started by the last login, if any
    pub async fn wait_for_bookings(&self) {
        let handle = self.booking_load.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!(error = %e, "Booking load task failed");
                }
            }
        }
    }

    /// Clear the session and the local mirror. Never fails; safe to repeat.
    pub fn logout(&self) {
        if let Some(handle) = self.booking_load.lock().take() {
            handle.abort();
        }

        {
            let mut inner = self.inner.write();
            inner.generation += 1;
            if let Some(user) = inner.user.take() {
                info!(registration_number = %user.registration_number, "Logged out");
            }
            inner.bookings.clear();
        }

        if let Err(e) = self.mirror.clear() {
            warn!(error = %e, "Failed to clear local mirror");
        }
    }

    /// Append a booking locally, then try to save it remotely.
    ///
    /// The local list and mirror are updated first and are not rolled back
    /// if the remote insert fails.
    pub async fn add_booking(&self, booking: Booking) {
        let owner = {
            let mut inner = self.inner.write();
            inner.bookings.push(booking.clone());
            if let Err(e) = self.mirror.store_bookings(&inner.bookings) {
                warn!(error = %e, "Failed to mirror bookings locally");
            }
            inner
                .user
                .as_ref()
                .map(|u| u.registration_number.clone())
        };

        let row = booking.to_new_booking(owner.as_deref());
        match self.store.insert_booking(row).await {
            Ok(()) => debug!(booking_id = %booking.id, "Saved booking"),
            Err(e) => error!(
                booking_id = %booking.id,
                error = %e,
                "Failed to save booking remotely, keeping local copy"
            ),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.inner.read().user.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.inner.read().bookings.clone()
    }

    pub fn find_booking(&self, booking_id: &str) -> Option<Booking> {
        self.inner
            .read()
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .cloned()
    }

    pub fn mirror(&self) -> &LocalMirror {
        &self.mirror
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            store: Arc::clone(&self.store),
            mirror: self.mirror.clone(),
            booking_load: Arc::clone(&self.booking_load),
        }
    }
}
