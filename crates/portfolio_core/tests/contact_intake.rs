use portfolio_core::db::{ensure_schema, open_db, open_db_in_memory, DbLocation};
use portfolio_core::{
    submit_contact, ContactRepository, ContactService, ContactServiceError, ContactSubmission,
    RepoError, SqliteContactRepository, ValidatedContact,
};
use std::collections::HashSet;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

fn validated(name: &str, email: &str, message: &str) -> ValidatedContact {
    ContactSubmission::new(name, email, message)
        .validate()
        .expect("fixture should be valid")
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let contact = validated("Test User", "test@example.com", "Hello!");
    let id = repo.create_contact(&contact).unwrap();

    let loaded = repo.get_contact(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Test User");
    assert_eq!(loaded.email, "test@example.com");
    assert_eq!(loaded.message, "Hello!");
    assert!(loaded.created_at > 0);
}

fn now_epoch_ms() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after unix epoch");
    i64::try_from(elapsed.as_millis()).expect("epoch millis fit in i64")
}

#[test]
fn created_at_has_millisecond_precision() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let before = now_epoch_ms();
    let id = repo
        .create_contact(&validated("Test User", "test@example.com", "Hello!"))
        .unwrap();
    let after = now_epoch_ms();

    let created_at = repo.get_contact(id).unwrap().unwrap().created_at;
    // Second-truncated timestamps would land up to 999 ms before `before`.
    assert!(
        created_at >= before - 2 && created_at <= after + 2,
        "created_at {created_at} outside [{before}, {after}]"
    );
}

#[test]
fn get_missing_contact_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    assert!(repo.get_contact(42).unwrap().is_none());
}

#[test]
fn ids_are_unique_and_increasing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let first = repo
        .create_contact(&validated("A", "a@example.com", "one"))
        .unwrap();
    let second = repo
        .create_contact(&validated("B", "b@example.com", "two"))
        .unwrap();
    assert!(second > first);

    let all = repo.list_contacts().unwrap();
    let ids: Vec<_> = all.iter().map(|contact| contact.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn service_submit_appends_exactly_one_row() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::new(&conn));

    let stored = service
        .submit(&validated("Test User", "test@example.com", "Hello!"))
        .unwrap();

    let repo = SqliteContactRepository::new(&conn);
    let all = repo.list_contacts().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], stored);
}

#[test]
fn list_rejects_rows_that_break_constraints() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO contact_messages (name, email, message) VALUES ('', 'broken', '');",
        [],
    )
    .unwrap();

    let repo = SqliteContactRepository::new(&conn);
    let err = repo.list_contacts().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn submit_contact_persists_through_scoped_connection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.db");
    let location = DbLocation::File(path.clone());
    ensure_schema(&location).unwrap();

    let stored = submit_contact(
        &location,
        &validated("Test User", "test@example.com", "Hello!"),
    )
    .unwrap();

    let conn = open_db(&path).unwrap();
    let all = SqliteContactRepository::new(&conn).list_contacts().unwrap();
    assert_eq!(all, vec![stored]);
}

#[test]
fn submit_contact_surfaces_unreachable_store() {
    let dir = tempfile::tempdir().unwrap();
    let location = DbLocation::File(dir.path().join("missing-dir").join("portfolio.db"));

    let err = submit_contact(
        &location,
        &validated("Test User", "test@example.com", "Hello!"),
    )
    .unwrap_err();
    assert!(matches!(err, ContactServiceError::Repo(RepoError::Db(_))));
}

#[test]
fn concurrent_submissions_each_produce_their_own_row() {
    let dir = tempfile::tempdir().unwrap();
    let location = DbLocation::File(dir.path().join("portfolio.db"));
    ensure_schema(&location).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let location = location.clone();
            thread::spawn(move || {
                let contact = validated(
                    &format!("User {index}"),
                    &format!("user{index}@example.com"),
                    &format!("Message {index}"),
                );
                submit_contact(&location, &contact).expect("concurrent submit should succeed")
            })
        })
        .collect();

    let stored: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("writer thread should not panic"))
        .collect();
    let ids: HashSet<_> = stored.iter().map(|contact| contact.id).collect();
    assert_eq!(ids.len(), 8);

    let DbLocation::File(path) = &location else {
        panic!("file location expected");
    };
    let conn = open_db(path).unwrap();
    let all = SqliteContactRepository::new(&conn).list_contacts().unwrap();
    assert_eq!(all.len(), 8);
    let names: HashSet<_> = all.iter().map(|contact| contact.name.clone()).collect();
    for index in 0..8 {
        assert!(names.contains(&format!("User {index}")));
    }
}
