use std::sync::Arc;

use chrono::Utc;
use unievent_remote::{MemoryStore, NewBooking, NewUser, RecordStore};
use unievent_session::{
    Booking, BookingDraft, BookingStatus, LocalMirror, LoginCredentials, SessionManager,
    SessionState, BOOKINGS_KEY, USER_KEY,
};
use unievent_storage::Database;

fn setup(store: MemoryStore) -> (Arc<MemoryStore>, SessionManager, Database) {
    let store = Arc::new(store);
    let db = Database::open_in_memory().unwrap();
    let manager = SessionManager::new(store.clone(), LocalMirror::new(db.clone()));
    (store, manager, db)
}

fn sample_booking() -> Booking {
    Booking {
        id: "1700000000000".to_string(),
        event_id: "e1".to_string(),
        user_id: "12345".to_string(),
        registration_numbers: vec!["12345".to_string()],
        booking_date: Utc::now(),
        status: BookingStatus::Confirmed,
        ticket_count: 1,
    }
}

#[tokio::test]
async fn malformed_registration_numbers_never_log_in() {
    let (store, manager, db) = setup(MemoryStore::new());

    for reg in ["", "123456789", "12a45", " 1234", "1234 ", "+123", "12.5"] {
        assert!(
            !manager.login(&LoginCredentials::new(reg, "secret")).await,
            "{reg:?} should be rejected"
        );
    }
    assert!(!manager.login(&LoginCredentials::new("12345", "")).await);

    assert_eq!(manager.state(), SessionState::LoggedOut);
    assert!(manager.user().is_none());
    assert_eq!(store.user_inserts(), 0);
    assert_eq!(db.get_entry(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn first_login_creates_placeholder_user() {
    let (store, manager, db) = setup(MemoryStore::new());

    assert!(manager.login(&LoginCredentials::new("12345", "x")).await);

    let user = manager.user().unwrap();
    assert_eq!(user.registration_number, "12345");
    assert_eq!(user.name, "Student 12345");
    assert_eq!(user.email, "12345@lpu.in");
    assert_eq!(user.department, "Computer Science");

    assert_eq!(store.user_inserts(), 1);
    assert_eq!(store.users().len(), 1);
    assert!(db.get_entry(USER_KEY).unwrap().is_some());
    assert_eq!(manager.state(), SessionState::LoggedIn);
}

#[tokio::test]
async fn existing_user_is_adopted_without_insert() {
    let (store, manager, _db) = setup(MemoryStore::new().with_user(NewUser {
        registration_number: "87654321".to_string(),
        name: "Asha Verma".to_string(),
        email: "asha.verma@lpu.in".to_string(),
        department: "Physics".to_string(),
    }));

    assert!(manager.login(&LoginCredentials::new("87654321", "pw")).await);

    let user = manager.user().unwrap();
    assert_eq!(user.name, "Asha Verma");
    assert_eq!(user.email, "asha.verma@lpu.in");
    assert_eq!(user.department, "Physics");
    assert_eq!(store.user_inserts(), 0);
}

#[tokio::test]
async fn failed_user_insert_fails_login() {
    let store = MemoryStore::new();
    store.set_fail_user_inserts(true);
    let (_store, manager, db) = setup(store);

    assert!(!manager.login(&LoginCredentials::new("12345", "x")).await);
    assert!(!manager.is_authenticated());
    assert_eq!(db.get_entry(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn logout_clears_everything_and_is_idempotent() {
    let (_store, manager, db) = setup(MemoryStore::new());

    assert!(manager.login(&LoginCredentials::new("12345", "x")).await);
    manager.wait_for_bookings().await;
    manager.add_booking(sample_booking()).await;

    manager.logout();
    assert!(!manager.is_authenticated());
    assert!(manager.user().is_none());
    assert!(manager.bookings().is_empty());
    assert_eq!(db.get_entry(USER_KEY).unwrap(), None);
    assert_eq!(db.get_entry(BOOKINGS_KEY).unwrap(), None);

    manager.logout();
    assert_eq!(manager.state(), SessionState::LoggedOut);
    assert!(manager.bookings().is_empty());
    assert_eq!(db.get_entry(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn add_booking_appends_even_when_remote_fails() {
    let store = MemoryStore::new();
    store.set_fail_booking_inserts(true);
    let (store, manager, _db) = setup(store);

    assert!(manager.login(&LoginCredentials::new("12345", "x")).await);
    manager.wait_for_bookings().await;

    let before = manager.bookings().len();
    let booking = sample_booking();
    manager.add_booking(booking.clone()).await;

    let bookings = manager.bookings();
    assert_eq!(bookings.len(), before + 1);
    assert_eq!(bookings.last(), Some(&booking));
    assert_eq!(manager.mirror().load_bookings().unwrap().last(), Some(&booking));
    assert!(store.bookings().is_empty());
}

#[tokio::test]
async fn add_booking_reaches_remote_and_does_not_dedup() {
    let (store, manager, _db) = setup(MemoryStore::new());

    assert!(manager.login(&LoginCredentials::new("12345", "x")).await);
    manager.wait_for_bookings().await;

    manager.add_booking(sample_booking()).await;
    manager.add_booking(sample_booking()).await;

    // Same id twice stays twice locally; the remote keeps one row
    assert_eq!(manager.bookings().len(), 2);
    assert_eq!(store.bookings().len(), 1);
    assert_eq!(store.bookings()[0].user_id.as_deref(), Some("12345"));
}

#[tokio::test]
async fn rehydrate_restores_mirror_without_remote_fetch() {
    let (store, manager, db) = setup(MemoryStore::new());

    assert!(manager.login(&LoginCredentials::new("12345", "x")).await);
    manager.wait_for_bookings().await;
    let mut draft = BookingDraft::new("e1", "12345");
    draft.set_ticket_count(2).unwrap();
    draft.set_registration_number(1, "4242").unwrap();
    manager.add_booking(draft.submit(Utc::now()).unwrap()).await;

    // A booking made elsewhere after this device last fetched
    store
        .insert_booking(NewBooking {
            id: "remote-only".to_string(),
            event_id: "e2".to_string(),
            user_id: "12345".to_string(),
            registration_numbers: vec!["12345".to_string()],
            booking_date: Utc::now(),
            status: BookingStatus::Confirmed,
            ticket_count: 1,
        })
        .await
        .unwrap();
    assert_eq!(store.bookings().len(), 2);

    let restarted = SessionManager::new(store.clone(), LocalMirror::new(db.clone()));
    assert_eq!(restarted.state(), SessionState::LoggedOut);
    assert_eq!(restarted.rehydrate().unwrap(), SessionState::LoggedIn);
    restarted.wait_for_bookings().await;

    assert_eq!(restarted.user(), manager.user());
    assert_eq!(restarted.bookings(), manager.bookings());
    assert_eq!(restarted.bookings().len(), 1);
    assert!(restarted.find_booking("remote-only").is_none());
}

#[tokio::test]
async fn rehydrate_without_stored_user_stays_logged_out() {
    let (_store, manager, _db) = setup(MemoryStore::new());
    assert_eq!(manager.rehydrate().unwrap(), SessionState::LoggedOut);
    assert!(manager.bookings().is_empty());
}

#[tokio::test]
async fn relogin_as_other_user_ignores_previous_load() {
    let (store, manager, _db) = setup(MemoryStore::new());

    assert!(manager.login(&LoginCredentials::new("111", "x")).await);
    manager.wait_for_bookings().await;
    manager.add_booking(Booking {
        user_id: "111".to_string(),
        registration_numbers: vec!["111".to_string()],
        ..sample_booking()
    })
    .await;

    store.set_booking_query_delay(Some(std::time::Duration::from_millis(150)));
    manager.logout();
    assert!(manager.login(&LoginCredentials::new("222", "x")).await);
    manager.wait_for_bookings().await;

    assert_eq!(manager.user().unwrap().registration_number, "222");
    assert!(manager.bookings().is_empty());
}
