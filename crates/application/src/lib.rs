//! Application layer - Use cases and orchestration
//!
//! Defines the ports the outside world is reached through and the services
//! that route parsed webhook events and hosted documents over them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
