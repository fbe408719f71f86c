//! WhatsApp messenger adapter
//!
//! Implements the `OutboundMessengerPort` trait using the WhatsApp integration crate.

use application::error::ApplicationError;
use application::ports::{OutboundMessengerPort, ProviderResponse};
use async_trait::async_trait;
use domain::{DocumentMessage, TextMessage};
use integration_whatsapp::{SentMessage, WhatsAppClient, WhatsAppClientConfig, WhatsAppError};
use tracing::{debug, instrument};

use crate::config::WhatsAppConfig;

/// Adapter that implements `OutboundMessengerPort` using `WhatsAppClient`
#[derive(Debug)]
pub struct WhatsAppMessengerAdapter {
    /// The underlying WhatsApp client
    client: WhatsAppClient,
}

impl WhatsAppMessengerAdapter {
    /// Create a new WhatsApp messenger adapter
    ///
    /// # Errors
    /// Returns an error if the client configuration is invalid.
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        let client = WhatsAppClient::new(config)?;
        Ok(Self { client })
    }

    /// Create an adapter from the application configuration
    pub fn from_config(config: &WhatsAppConfig) -> Result<Self, WhatsAppError> {
        Self::new(WhatsAppClientConfig {
            access_token: config.access_token_str().unwrap_or_default().to_string(),
            phone_number_id: config.phone_number_id.clone().unwrap_or_default(),
            api_version: config.api_version.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        })
    }
}

fn to_provider_response(sent: SentMessage) -> ProviderResponse {
    let response = ProviderResponse::new(sent.status).with_raw(sent.raw);
    match sent.message_id {
        Some(id) => response.with_message_id(id),
        None => response,
    }
}

fn map_error(e: WhatsAppError) -> ApplicationError {
    match e {
        WhatsAppError::InvalidPhoneNumber(number) => {
            ApplicationError::InvalidInput(format!("invalid recipient: {number}"))
        },
        WhatsAppError::Configuration(msg) => ApplicationError::Configuration(msg),
        e => ApplicationError::ExternalService(format!("WhatsApp send failed: {e}")),
    }
}

#[async_trait]
impl OutboundMessengerPort for WhatsAppMessengerAdapter {
    #[instrument(skip(self, message), fields(recipient = %message.recipient_id))]
    async fn send_text(&self, message: &TextMessage) -> Result<ProviderResponse, ApplicationError> {
        let sent = self
            .client
            .send_text(&message.recipient_id, &message.body)
            .await
            .map_err(map_error)?;

        debug!(message_id = ?sent.message_id, raw = %sent.raw, "WhatsApp text message sent");
        Ok(to_provider_response(sent))
    }

    #[instrument(skip(self, message), fields(recipient = %message.recipient_id, source = %message.source))]
    async fn send_document(
        &self,
        message: &DocumentMessage,
    ) -> Result<ProviderResponse, ApplicationError> {
        let sent = self
            .client
            .send_document(&message.recipient_id, &message.source, &message.caption)
            .await
            .map_err(map_error)?;

        debug!(message_id = ?sent.message_id, raw = %sent.raw, "WhatsApp document sent");
        Ok(to_provider_response(sent))
    }
}

/// Stand-in used when WhatsApp credentials are missing
///
/// Every send fails with a configuration error, so webhooks are still
/// acknowledged and the failure shows up in the outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredMessengerAdapter;

#[async_trait]
impl OutboundMessengerPort for UnconfiguredMessengerAdapter {
    async fn send_text(&self, _message: &TextMessage) -> Result<ProviderResponse, ApplicationError> {
        Err(ApplicationError::Configuration(
            "WhatsApp access token or phone number id not configured".to_string(),
        ))
    }

    async fn send_document(
        &self,
        _message: &DocumentMessage,
    ) -> Result<ProviderResponse, ApplicationError> {
        Err(ApplicationError::Configuration(
            "WhatsApp access token or phone number id not configured".to_string(),
        ))
    }
}
