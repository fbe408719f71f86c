//! WhatsApp integration
//!
//! Decodes WhatsApp Business API webhooks and sends messages through the
//! Graph API.

pub mod client;
pub mod webhook;

pub use client::{SentMessage, WhatsAppClient, WhatsAppClientConfig, WhatsAppError, validate_recipient};
pub use webhook::{
    DecodeError, ExtractionError, VerificationError, WebhookEnvelope, decode_envelope, extract,
    verify_subscription,
};
