//! Contact intake use-case service.
//!
//! # Responsibility
//! - Persist validated contact submissions.
//! - Confirm each write by reading the stored row back.
//! - Scope one store connection to one submission.
//!
//! # Invariants
//! - Only `ValidatedContact` values reach the repository.
//! - A submission is acknowledged only after its row is readable and matches.
//! - Persistence failures are returned to the caller, never swallowed.

use crate::db::{open_location, DbLocation};
use crate::model::contact::{ContactMessage, ValidatedContact};
use crate::repo::contact_repo::{ContactRepository, RepoError, SqliteContactRepository};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for contact intake.
#[derive(Debug)]
pub enum ContactServiceError {
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent contact state: {details}")
            }
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for contact intake.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores one contact message and returns the confirmed record.
    ///
    /// # Contract
    /// - Appends exactly one row on success.
    /// - Fails with `InconsistentState` when the stored row is missing or
    ///   differs from the submission.
    pub fn submit(&self, contact: &ValidatedContact) -> Result<ContactMessage, ContactServiceError> {
        let id = self.repo.create_contact(contact)?;
        let stored = self
            .repo
            .get_contact(id)?
            .ok_or(ContactServiceError::InconsistentState(
                "created contact message is not readable",
            ))?;

        if !stored.matches(contact) {
            return Err(ContactServiceError::InconsistentState(
                "stored contact message differs from submission",
            ));
        }

        Ok(stored)
    }
}

/// Opens a connection to `location`, stores `contact`, and releases the
/// connection on every exit path.
pub fn submit_contact(
    location: &DbLocation,
    contact: &ValidatedContact,
) -> Result<ContactMessage, ContactServiceError> {
    let started_at = Instant::now();
    let result = open_location(location)
        .map_err(RepoError::from)
        .map_err(ContactServiceError::from)
        .and_then(|conn| {
            let service = ContactService::new(SqliteContactRepository::new(&conn));
            service.submit(contact)
        });

    match &result {
        Ok(stored) => info!(
            "event=contact_submit module=service status=ok id={} duration_ms={}",
            stored.id,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=contact_submit module=service status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}
