//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod document_readiness_adapter;
mod file_document_store;
mod whatsapp_adapter;

pub use document_readiness_adapter::HttpDocumentReadinessAdapter;
pub use file_document_store::{DocumentStoreError, FileDocumentStore};
pub use whatsapp_adapter::{UnconfiguredMessengerAdapter, WhatsAppMessengerAdapter};
