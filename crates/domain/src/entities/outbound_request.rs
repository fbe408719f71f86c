//! Outbound requests
//!
//! Messages the dispatch logic asks the provider to deliver.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::DocumentSource;

/// A single outbound send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundRequest {
    Text(TextMessage),
    Document(DocumentMessage),
}

impl OutboundRequest {
    #[must_use]
    pub fn recipient_id(&self) -> &str {
        match self {
            Self::Text(m) => &m.recipient_id,
            Self::Document(m) => &m.recipient_id,
        }
    }
}

/// Plain text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessage {
    pub recipient_id: String,
    pub body: String,
}

impl TextMessage {
    /// Create a text message; recipient and body must not be blank
    pub fn new(
        recipient_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let recipient_id = recipient_id.into();
        let body = body.into();
        if recipient_id.trim().is_empty() {
            return Err(DomainError::InvalidRecipient(recipient_id));
        }
        if body.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "text body must not be empty".to_string(),
            ));
        }
        Ok(Self { recipient_id, body })
    }
}

/// Document message with an optional caption (empty = none)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMessage {
    pub recipient_id: String,
    pub source: DocumentSource,
    pub caption: String,
}

impl DocumentMessage {
    pub fn new(
        recipient_id: impl Into<String>,
        source: DocumentSource,
        caption: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let recipient_id = recipient_id.into();
        if recipient_id.trim().is_empty() {
            return Err(DomainError::InvalidRecipient(recipient_id));
        }
        Ok(Self {
            recipient_id,
            source,
            caption: caption.into(),
        })
    }
}

impl From<TextMessage> for OutboundRequest {
    fn from(message: TextMessage) -> Self {
        Self::Text(message)
    }
}

impl From<DocumentMessage> for OutboundRequest {
    fn from(message: DocumentMessage) -> Self {
        Self::Document(message)
    }
}
