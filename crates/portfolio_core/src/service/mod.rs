//! Core use-case services.
//!
//! # Responsibility
//! - Serve the memoized publication catalog.
//! - Orchestrate contact intake writes into confirmed records.
//! - Keep HTTP layers decoupled from storage details.

pub mod contact_service;
pub mod publication_service;
