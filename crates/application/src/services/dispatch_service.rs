//! Dispatch service
//!
//! Routes a [`ParsedEvent`] to its outbound effects. A new message gets one
//! acknowledgment text and, when the sender's document is ready, one
//! link-based document. Delivery updates and unrecognized callbacks send
//! nothing.
//!
//! Sends are sequential and never retried. A failed send is logged and
//! reported in the [`Outcome`]; it does not stop the next send and never
//! fails the webhook request.

use std::sync::Arc;

use domain::{
    DeliveryStatus, DeliveryUpdate, DocumentMessage, DocumentSource, InboundMessage, ParsedEvent,
    TextMessage,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DocumentReadiness, DocumentReadinessPort, OutboundMessengerPort, ProviderResponse};

/// Placeholder replaced by the sender's display name
pub const NAME_PLACEHOLDER: &str = "{name}";

const DEFAULT_READY_TEXT: &str = "Hormetli {name}. Analiz neticeleriniz hazirdir";
const DEFAULT_NOT_READY_TEXT: &str = "Hormetli {name}. Analiz neticeleriniz hazir degildir";
const DEFAULT_DOCUMENT_CAPTION: &str = "Analiz neticeleri: {name}";

/// Reply templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Text sent when the document is ready
    #[serde(default = "default_ready_text")]
    pub ready_text: String,

    /// Text sent when the document is not ready
    #[serde(default = "default_not_ready_text")]
    pub not_ready_text: String,

    /// Caption attached to the document
    #[serde(default = "default_document_caption")]
    pub document_caption: String,
}

fn default_ready_text() -> String {
    DEFAULT_READY_TEXT.to_string()
}

fn default_not_ready_text() -> String {
    DEFAULT_NOT_READY_TEXT.to_string()
}

fn default_document_caption() -> String {
    DEFAULT_DOCUMENT_CAPTION.to_string()
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            ready_text: default_ready_text(),
            not_ready_text: default_not_ready_text(),
            document_caption: default_document_caption(),
        }
    }
}

/// Fill the `{name}` placeholder of a template
#[must_use]
pub fn render_template(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

/// Which outbound operation a report is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendKind {
    Text,
    Document,
}

/// Result of one outbound send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReport {
    pub kind: SendKind,
    /// Provider accepted the message
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendReport {
    fn from_result(kind: SendKind, result: Result<ProviderResponse, ApplicationError>) -> Self {
        match result {
            Ok(response) => Self {
                kind,
                delivered: response.is_success(),
                status_code: Some(response.status_code),
                message_id: response.message_id,
                error: None,
            },
            Err(e) => Self::failed(kind, &e),
        }
    }

    fn failed(kind: SendKind, error: &ApplicationError) -> Self {
        Self {
            kind,
            delivered: false,
            status_code: None,
            message_id: None,
            error: Some(error.to_string()),
        }
    }
}

/// What handling one webhook event did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A new message was answered
    Replied {
        recipient_id: String,
        document_ready: bool,
        sends: Vec<SendReport>,
    },
    /// A delivery status was observed
    Delivery {
        status: DeliveryStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
    },
    /// Nothing to do
    Ignored,
}

impl Outcome {
    /// Number of outbound calls attempted
    #[must_use]
    pub fn send_count(&self) -> usize {
        match self {
            Self::Replied { sends, .. } => sends.len(),
            Self::Delivery { .. } | Self::Ignored => 0,
        }
    }
}

/// Service turning parsed webhook events into outbound sends
pub struct DispatchService {
    messenger: Arc<dyn OutboundMessengerPort>,
    readiness: Arc<dyn DocumentReadinessPort>,
    config: DispatchConfig,
}

impl std::fmt::Debug for DispatchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchService")
            .field("messenger", &"<OutboundMessengerPort>")
            .field("readiness", &"<DocumentReadinessPort>")
            .field("config", &self.config)
            .finish()
    }
}

impl DispatchService {
    #[must_use]
    pub fn new(
        messenger: Arc<dyn OutboundMessengerPort>,
        readiness: Arc<dyn DocumentReadinessPort>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            messenger,
            readiness,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Handle one parsed webhook event
    #[instrument(skip(self, event), fields(event = event.kind()))]
    pub async fn handle(&self, event: &ParsedEvent) -> Outcome {
        match event {
            ParsedEvent::NewMessage(message) => self.reply(message).await,
            ParsedEvent::DeliveryUpdate(update) => Self::observe(update),
            ParsedEvent::Unrecognized => {
                info!("No new message in webhook");
                Outcome::Ignored
            },
        }
    }

    fn observe(update: &DeliveryUpdate) -> Outcome {
        if update.status.is_failure() {
            warn!(status = %update.status, message_id = ?update.message_id, "Message delivery failed");
        } else {
            info!(status = %update.status, message_id = ?update.message_id, "Delivery status update");
        }
        Outcome::Delivery {
            status: update.status.clone(),
            message_id: update.message_id.clone(),
        }
    }

    async fn reply(&self, message: &InboundMessage) -> Outcome {
        let recipient = message.sender_id.as_str();
        info!(
            sender = %recipient,
            message_type = %message.message_type,
            business_number = %message.business_number,
            "New message received"
        );

        let readiness = match self.readiness.check(recipient).await {
            Ok(readiness) => readiness,
            Err(e) => {
                warn!(error = %e, sender = %recipient, "Readiness check failed, treating as not ready");
                DocumentReadiness::NotReady
            },
        };
        debug!(ready = readiness.is_ready(), "Readiness check finished");

        let template = match readiness {
            DocumentReadiness::Ready { .. } => &self.config.ready_text,
            DocumentReadiness::NotReady => &self.config.not_ready_text,
        };
        let body = render_template(template, &message.sender_name);

        let mut sends = Vec::with_capacity(2);
        sends.push(self.send_text(recipient, body).await);

        if let DocumentReadiness::Ready { link } = &readiness {
            let caption = render_template(&self.config.document_caption, &message.sender_name);
            sends.push(self.send_document(recipient, link, caption).await);
        }

        Outcome::Replied {
            recipient_id: recipient.to_string(),
            document_ready: readiness.is_ready(),
            sends,
        }
    }

    async fn send_text(&self, recipient: &str, body: String) -> SendReport {
        let result = match TextMessage::new(recipient, body) {
            Ok(text) => self.messenger.send_text(&text).await,
            Err(e) => Err(e.into()),
        };
        Self::report(SendKind::Text, result)
    }

    async fn send_document(&self, recipient: &str, link: &str, caption: String) -> SendReport {
        let document = DocumentSource::link(link)
            .and_then(|source| DocumentMessage::new(recipient, source, caption));
        let result = match document {
            Ok(document) => self.messenger.send_document(&document).await,
            Err(e) => Err(e.into()),
        };
        Self::report(SendKind::Document, result)
    }

    fn report(kind: SendKind, result: Result<ProviderResponse, ApplicationError>) -> SendReport {
        let report = SendReport::from_result(kind, result);
        if report.delivered {
            info!(kind = ?kind, message_id = ?report.message_id, "Message sent");
        } else {
            warn!(
                kind = ?kind,
                status_code = ?report.status_code,
                error = ?report.error,
                "Message send failed"
            );
        }
        report
    }
}
