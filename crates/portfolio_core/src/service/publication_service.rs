//! Publication read path.
//!
//! # Responsibility
//! - Serve the fixed publication catalog in declaration order.
//!
//! # Invariants
//! - The catalog is built at most once per process and never mutated.
//! - Concurrent first callers all observe the same fully built value.
//! - The catalog is never empty.

use crate::model::publication::Publication;
use log::debug;
use once_cell::sync::Lazy;

static PUBLICATIONS: Lazy<Vec<Publication>> = Lazy::new(|| {
    let catalog = vec![
        Publication::new(
            "Interactive 3D Web Portfolios",
            "U. Developer, A. Designer",
            2024,
        ),
        Publication::new("WebGL for Data Visualization", "U. Developer", 2023),
        Publication::new("Accessible 3D UI Patterns", "A. Designer", 2022),
    ];
    debug!(
        "event=publications_cache module=service status=ok count={}",
        catalog.len()
    );
    catalog
});

/// Returns the publication catalog.
///
/// The first call materializes the catalog; later calls return the same
/// slice without recomputation.
pub fn list_publications() -> &'static [Publication] {
    PUBLICATIONS.as_slice()
}
