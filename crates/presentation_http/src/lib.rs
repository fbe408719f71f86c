//! Docbridge HTTP presentation layer
//!
//! Exposes the WhatsApp webhook, its verification handshake and the
//! document hosting endpoints over axum.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
