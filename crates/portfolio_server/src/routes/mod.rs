mod contact;
mod health;
mod publications;

pub use contact::{contact_handler, ContactAccepted};
pub use health::{health_handler, Health};
pub use publications::publications_handler;
