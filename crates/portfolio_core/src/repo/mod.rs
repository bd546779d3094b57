//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths only accept values that already passed the validation gate.
//! - A missing row is `Ok(None)`; rows that break model constraints are
//!   `InvalidData`, separate from DB transport errors.

pub mod contact_repo;
