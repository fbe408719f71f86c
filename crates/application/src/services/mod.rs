//! Application services - Use case implementations

mod dispatch_service;
mod document_service;

pub use dispatch_service::{
    DispatchConfig, DispatchService, NAME_PLACEHOLDER, Outcome, SendKind, SendReport,
    render_template,
};
pub use document_service::{DocumentService, validate_number};
