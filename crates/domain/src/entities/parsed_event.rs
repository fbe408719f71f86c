//! Parsed webhook event
//!
//! The typed result of reading a webhook envelope. Built fresh for every
//! delivery and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{DeliveryStatus, MessageKind};

/// Category of a webhook delivery together with the fields read from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ParsedEvent {
    /// A user sent a message to the business number
    NewMessage(InboundMessage),
    /// The provider reports the state of a message we sent earlier
    DeliveryUpdate(DeliveryUpdate),
    /// Anything else (other change fields, empty value, unknown shapes)
    Unrecognized,
}

impl ParsedEvent {
    /// Short name used in logs and response bodies
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NewMessage(_) => "new_message",
            Self::DeliveryUpdate(_) => "delivery_update",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Fields of a new inbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// WhatsApp id of the sender (`contacts[0].wa_id`)
    pub sender_id: String,
    /// Profile name of the sender (`contacts[0].profile.name`)
    pub sender_name: String,
    /// Kind of message (`messages[0].type`)
    pub message_type: MessageKind,
    /// Business number that received the message, empty when not reported
    pub business_number: String,
    /// Provider message id, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

/// A delivery status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryUpdate {
    pub status: DeliveryStatus,
    /// Id of the message this status refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl DeliveryUpdate {
    /// Status-only update
    #[must_use]
    pub const fn new(status: DeliveryStatus) -> Self {
        Self {
            status,
            message_id: None,
            recipient_id: None,
            timestamp: None,
        }
    }
}
