//! Publication record served by the read path.

use serde::{Deserialize, Serialize};

/// One entry of the publication list.
///
/// `url` is serialized as `null` when absent so clients always see the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    /// Free-form author list, e.g. `"U. Developer, A. Designer"`.
    pub authors: String,
    pub year: i32,
    pub url: Option<String>,
}

impl Publication {
    /// Creates a publication without a link.
    pub fn new(title: impl Into<String>, authors: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            year,
            url: None,
        }
    }
}
