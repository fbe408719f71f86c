//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod document_readiness_port;
mod document_store_port;
mod outbound_messenger_port;

pub use document_readiness_port::{DocumentReadiness, DocumentReadinessPort};
#[cfg(test)]
pub use document_readiness_port::MockDocumentReadinessPort;
pub use document_store_port::DocumentStorePort;
#[cfg(test)]
pub use document_store_port::MockDocumentStorePort;
pub use outbound_messenger_port::{OutboundMessengerPort, ProviderResponse};
#[cfg(test)]
pub use outbound_messenger_port::MockOutboundMessengerPort;
