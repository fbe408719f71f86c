//! Application state shared across handlers

use std::sync::Arc;

use application::{DispatchService, DocumentService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Routes parsed webhook events to outbound sends
    pub dispatch: Arc<DispatchService>,
    /// Stores and serves hosted documents
    pub documents: Arc<DocumentService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Token expected in `hub.verify_token`, if one is configured
    #[must_use]
    pub fn verify_token(&self) -> Option<&str> {
        self.config.whatsapp.verify_token_str()
    }
}
