//! Contact message repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Append contact messages to `contact_messages` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Inserts run inside a transaction; a failed write leaves no row behind.
//! - Read paths reject persisted rows that break the model constraints
//!   instead of masking them.

use crate::db::DbError;
use crate::model::contact::{
    ContactMessage, ContactMessageId, ContactSubmission, ValidatedContact,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    message,
    created_at
FROM contact_messages";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted contact data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact messages.
pub trait ContactRepository {
    fn create_contact(&self, contact: &ValidatedContact) -> RepoResult<ContactMessageId>;
    fn get_contact(&self, id: ContactMessageId) -> RepoResult<Option<ContactMessage>>;
    fn list_contacts(&self) -> RepoResult<Vec<ContactMessage>>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, contact: &ValidatedContact) -> RepoResult<ContactMessageId> {
        // IMMEDIATE takes the write lock up front so concurrent writers wait
        // on the busy timeout. Dropping without commit rolls the insert back.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO contact_messages (
                name,
                email,
                message
            ) VALUES (?1, ?2, ?3);",
            params![contact.name(), contact.email(), contact.message()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn get_contact(&self, id: ContactMessageId) -> RepoResult<Option<ContactMessage>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn list_contacts(&self) -> RepoResult<Vec<ContactMessage>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<ContactMessage> {
    let id: ContactMessageId = row.get("id")?;
    let name: String = row.get("name")?;
    let email: String = row.get("email")?;
    let message: String = row.get("message")?;

    // Rows written outside this service must still satisfy the gate.
    let validated = ContactSubmission::new(name, email, message)
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("row {id}: {err}")))?;

    Ok(ContactMessage {
        id,
        name: validated.name().to_string(),
        email: validated.email().to_string(),
        message: validated.message().to_string(),
        created_at: row.get("created_at")?,
    })
}
