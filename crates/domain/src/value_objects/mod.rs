//! Value Objects - Immutable, identity-less domain primitives

mod delivery_status;
mod document_source;
mod message_kind;

pub use delivery_status::DeliveryStatus;
pub use document_source::DocumentSource;
pub use message_kind::MessageKind;
