//! Outbound messenger port - Sending replies to a messaging provider
//!
//! The dispatch service only ever needs two operations from the provider:
//! send a text and send a document. Both answer with a typed
//! [`ProviderResponse`] instead of the provider's raw JSON map.

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use domain::{DocumentMessage, TextMessage};
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// What the provider answered to an accepted send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// HTTP status code returned by the provider
    pub status_code: u16,
    /// Provider message ID, when the response carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Raw response body, kept for logging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ProviderResponse {
    /// Create a response with just a status code
    #[must_use]
    pub const fn new(status_code: u16) -> Self {
        Self {
            status_code,
            message_id: None,
            raw: None,
        }
    }

    /// Attach the provider message ID
    #[must_use]
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Attach the raw response body
    #[must_use]
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Whether the provider accepted the message
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }
}

/// Port for sending outbound messages
///
/// Implementations make exactly one attempt per call. Retries, if any, are
/// the transport's business, not the caller's.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OutboundMessengerPort: Send + Sync {
    /// Send a plain text message
    async fn send_text(&self, message: &TextMessage) -> Result<ProviderResponse, ApplicationError>;

    /// Send a document by link or media id
    async fn send_document(
        &self,
        message: &DocumentMessage,
    ) -> Result<ProviderResponse, ApplicationError>;
}
