//! Domain model for the portfolio backend.
//!
//! # Responsibility
//! - Define the publication record served by the read path.
//! - Define contact intake input, the validation gate, and the stored shape.
//!
//! # Invariants
//! - Publications and contact messages are independent aggregates.
//! - A `ContactMessage` is only ever built from a `ValidatedContact`.

pub mod contact;
pub mod publication;
