//! Domain layer for docbridge
//!
//! Events read from WhatsApp webhooks, the outbound messages sent in reply,
//! and the value objects both are made of. No I/O lives here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
