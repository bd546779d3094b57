//! Core domain logic for the portfolio backend.
//! This crate owns the publication catalog, contact intake rules and storage.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{ensure_schema, DbError, DbLocation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    ContactField, ContactMessage, ContactMessageId, ContactSubmission, ContactValidationError,
    FieldViolation, ValidatedContact,
};
pub use model::publication::Publication;
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::{submit_contact, ContactService, ContactServiceError};
pub use service::publication_service::list_publications;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
