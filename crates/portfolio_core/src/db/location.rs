//! Connection-string parsing for the SQLite store.
//!
//! Accepted forms:
//! - `sqlite:///relative/or/./path.db` and `sqlite:////absolute/path.db`
//! - `sqlite://path.db` and `sqlite:path.db`
//! - `sqlite::memory:`, `sqlite://:memory:` and `:memory:`
//! - a bare filesystem path
//!
//! Query strings (`?mode=rwc`) are ignored.

use super::{DbError, DbResult};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const MEMORY_MARKER: &str = ":memory:";

/// Resolved store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// On-disk database file; survives process restarts.
    File(PathBuf),
    /// Private in-memory database; each connection sees its own copy.
    Memory,
}

impl DbLocation {
    /// Parses a connection string into a store location.
    ///
    /// # Errors
    /// - Returns `DbError::InvalidUrl` for non-SQLite schemes or empty paths.
    pub fn parse(url: &str) -> DbResult<Self> {
        let trimmed = url.trim();
        let without_query = trimmed.split('?').next().unwrap_or_default();

        let target = match without_query.split_once(':') {
            Some(("sqlite", rest)) => strip_sqlite_prefix(rest),
            Some((scheme, rest)) if rest.starts_with("//") && is_scheme(scheme) => {
                return Err(DbError::InvalidUrl(format!(
                    "unsupported scheme `{scheme}`; only sqlite is available"
                )));
            }
            _ => without_query,
        };

        if target == MEMORY_MARKER {
            return Ok(Self::Memory);
        }
        if target.is_empty() {
            return Err(DbError::InvalidUrl(format!(
                "no database path in `{trimmed}`"
            )));
        }

        Ok(Self::File(PathBuf::from(target)))
    }

    /// Returns whether every connection to this location shares one store.
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl Display for DbLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => f.write_str(MEMORY_MARKER),
        }
    }
}

// `sqlite:///x` keeps `x`, so `sqlite:////abs` keeps `/abs`.
fn strip_sqlite_prefix(rest: &str) -> &str {
    if let Some(path) = rest.strip_prefix("///") {
        path
    } else if let Some(path) = rest.strip_prefix("//") {
        path
    } else {
        rest
    }
}

fn is_scheme(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::DbLocation;
    use crate::db::DbError;
    use std::path::PathBuf;

    #[test]
    fn parses_relative_sqlalchemy_style_url() {
        let location = DbLocation::parse("sqlite:///./test.db").unwrap();
        assert_eq!(location, DbLocation::File(PathBuf::from("./test.db")));
    }

    #[test]
    fn parses_absolute_url_with_four_slashes() {
        let location = DbLocation::parse("sqlite:////var/lib/portfolio.db").unwrap();
        assert_eq!(
            location,
            DbLocation::File(PathBuf::from("/var/lib/portfolio.db"))
        );
    }

    #[test]
    fn parses_short_forms_and_strips_query() {
        assert_eq!(
            DbLocation::parse("sqlite://data.db?mode=rwc").unwrap(),
            DbLocation::File(PathBuf::from("data.db"))
        );
        assert_eq!(
            DbLocation::parse("sqlite:data.db").unwrap(),
            DbLocation::File(PathBuf::from("data.db"))
        );
        assert_eq!(
            DbLocation::parse("/tmp/plain.db").unwrap(),
            DbLocation::File(PathBuf::from("/tmp/plain.db"))
        );
    }

    #[test]
    fn parses_memory_markers() {
        for url in ["sqlite::memory:", "sqlite://:memory:", ":memory:"] {
            let location = DbLocation::parse(url).unwrap();
            assert_eq!(location, DbLocation::Memory, "url {url}");
            assert!(!location.is_shared());
        }
    }

    #[test]
    fn rejects_other_schemes_and_empty_paths() {
        let err = DbLocation::parse("postgres://user@localhost/portfolio").unwrap_err();
        assert!(matches!(err, DbError::InvalidUrl(message) if message.contains("postgres")));

        let err = DbLocation::parse("sqlite:///").unwrap_err();
        assert!(matches!(err, DbError::InvalidUrl(_)));

        let err = DbLocation::parse("   ").unwrap_err();
        assert!(matches!(err, DbError::InvalidUrl(_)));
    }
}
