//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the WhatsApp sender,
//! the HTTP readiness probe and the filesystem document store. Also owns
//! configuration loading and telemetry setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, DocumentsConfig, LegacyEnv, ServerConfig, TelemetryAppConfig, WhatsAppConfig,
};
pub use telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
