use eventconnect_core::db::migrations::latest_version;
use eventconnect_core::db::open_db_in_memory;
use eventconnect_core::{
    validate_form, EventDraft, EventRepository, EventStore, EventValidationError, FormInput,
    PickedDate, RepoError, SqliteEventRepository, StoreError, DEFAULT_CATEGORY,
};
use chrono::NaiveDate;
use rusqlite::Connection;

fn store() -> EventStore {
    EventStore::open_in_memory().unwrap()
}

#[test]
fn create_assigns_id_and_defaults() {
    let store = store();

    let event = store
        .create(&EventDraft::new("Jazz night", "2030-04-01").with_location("Le Duc"))
        .unwrap();

    assert!(event.id > 0);
    assert_eq!(event.category, DEFAULT_CATEGORY);
    assert!(!event.is_participating);
    assert!(event.coordinates.is_none());

    let loaded = store.get_by_id(event.id).unwrap().unwrap();
    assert_eq!(loaded, event);
}

#[test]
fn get_all_contains_created_event_exactly_once() {
    let store = store();
    store.create(&EventDraft::new("A", "2030-01-02")).unwrap();
    let created = store.create(&EventDraft::new("B", "2030-01-03")).unwrap();

    let all = store.get_all().unwrap();
    assert_eq!(all.iter().filter(|event| event.id == created.id).count(), 1);
    assert_eq!(all.len(), 2);
}

#[test]
fn get_all_orders_by_date_then_id() {
    let store = store();
    let late = store.create(&EventDraft::new("late", "2031-01-01")).unwrap();
    let early_first = store.create(&EventDraft::new("early 1", "2030-02-10")).unwrap();
    let early_second = store.create(&EventDraft::new("early 2", "2030-02-10")).unwrap();
    let middle = store.create(&EventDraft::new("middle", "2030-11-30")).unwrap();

    let ids: Vec<_> = store.get_all().unwrap().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![early_first.id, early_second.id, middle.id, late.id]);
}

#[test]
fn coordinates_round_trip_as_a_pair() {
    let store = store();
    let event = store
        .create(&EventDraft::new("Picnic", "2030-06-01").with_coordinates(48.8566, 2.3522))
        .unwrap();

    let loaded = store.get_by_id(event.id).unwrap().unwrap();
    let coordinates = loaded.coordinates.unwrap();
    assert_eq!(coordinates.latitude, 48.8566);
    assert_eq!(coordinates.longitude, 2.3522);
}

#[test]
fn delete_by_id_is_idempotent() {
    let store = store();
    let event = store.create(&EventDraft::new("Once", "2030-01-01")).unwrap();

    store.delete_by_id(event.id).unwrap();
    store.delete_by_id(event.id).unwrap();
    store.delete_by_id(9_999).unwrap();

    assert!(store.get_by_id(event.id).unwrap().is_none());
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn delete_all_clears_and_never_reuses_ids() {
    let store = store();
    let first = store.create(&EventDraft::new("one", "2030-01-01")).unwrap();
    let second = store.create(&EventDraft::new("two", "2030-01-01")).unwrap();

    store.delete_all().unwrap();
    assert!(store.get_all().unwrap().is_empty());

    let third = store.create(&EventDraft::new("three", "2030-01-01")).unwrap();
    assert!(third.id > second.id);
    assert!(third.id > first.id);
}

#[test]
fn invalid_drafts_are_rejected_without_writing() {
    let store = store();

    let blank = store.create(&EventDraft::new("   ", "2030-01-01")).unwrap_err();
    assert!(matches!(blank, StoreError::Invalid(EventValidationError::BlankTitle)));

    let malformed = store.create(&EventDraft::new("Talk", "2030-1-5")).unwrap_err();
    assert!(matches!(
        malformed,
        StoreError::Invalid(EventValidationError::MalformedDate(_))
    ));

    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn past_date_never_reaches_the_store() {
    let store = store();
    let today = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
    let input = FormInput {
        title: "Yesterday".to_string(),
        date: Some(PickedDate {
            year: 2030,
            month: 6,
            day: 14,
        }),
        ..FormInput::default()
    };

    if let Ok(form) = validate_form(&input, today) {
        store.create(&form.into_draft()).unwrap();
    }

    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn validated_form_creates_normalized_event() {
    let store = store();
    let today = NaiveDate::from_ymd_opt(2030, 3, 1).unwrap();
    let input = FormInput {
        title: "Derby".to_string(),
        date: Some(PickedDate {
            year: 2030,
            month: 3,
            day: 5,
        }),
        category: Some("Sport".to_string()),
        ..FormInput::default()
    };

    let draft = validate_form(&input, today).unwrap().into_draft();
    let event = store.create(&draft).unwrap();

    assert_eq!(event.date, "2030-03-05");
    assert_eq!(event.category, "Sport");
}

#[test]
fn data_survives_reopening_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.sqlite3");

    let created = {
        let store = EventStore::open(&path).unwrap();
        let event = store.create(&EventDraft::new("Kept", "2030-08-08")).unwrap();
        store.set_participation(event.id, true).unwrap()
    };

    let reopened = EventStore::open(&path).unwrap();
    assert_eq!(reopened.get_all().unwrap(), vec![created]);
}

#[test]
fn corrupted_row_surfaces_as_storage_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO events (title, date) VALUES ('bad date', '2030/01/01');",
        [],
    )
    .unwrap();

    let err = EventStore::from_connection(conn).err().unwrap();
    assert!(matches!(err, StoreError::Storage(RepoError::InvalidData(_))));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteEventRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_events_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteEventRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("events"))
    ));
}

#[test]
fn repository_participation_on_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let err = repo.set_participation(42, true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
    assert!(!repo.delete_event(42).unwrap());
}
