//! WhatsApp client for sending messages
//!
//! Uses the Meta Graph API (`{base_url}/{api_version}/{phone_number_id}/messages`)
//! to send text, document and template messages.

use std::time::Duration;

use domain::DocumentSource;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Default Graph API host
pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";

/// Default Graph API version
pub const DEFAULT_API_VERSION: &str = "v16.0";

/// WhatsApp API errors
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {code} - {message}")]
    Api {
        status: u16,
        code: i32,
        message: String,
    },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),
}

/// WhatsApp client configuration
#[derive(Clone)]
pub struct WhatsAppClientConfig {
    /// Meta Graph API access token
    pub access_token: String,
    /// Phone number ID from WhatsApp Business
    pub phone_number_id: String,
    /// API version (default: v16.0)
    pub api_version: String,
    /// Graph API host, overridable for tests
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for WhatsAppClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            phone_number_id: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for WhatsAppClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClientConfig")
            .field("access_token", &"[REDACTED]")
            .field("phone_number_id", &self.phone_number_id)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// WhatsApp client for the Meta Graph API
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    client: Client,
    config: WhatsAppClientConfig,
    messages_url: String,
}

/// Result of an accepted send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// HTTP status returned by the provider
    pub status: u16,
    /// Provider message id (`messages[0].id`), when present
    pub message_id: Option<String>,
    /// Raw response body
    pub raw: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient_type: Option<&'static str>,
    to: &'a str,
    #[serde(flatten)]
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum MessageContent<'a> {
    Text { text: TextContent<'a> },
    Document { document: DocumentContent<'a> },
    Template { template: TemplateContent<'a> },
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    preview_url: bool,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct DocumentContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    caption: &'a str,
}

#[derive(Debug, Serialize)]
struct TemplateContent<'a> {
    name: &'a str,
    language: TemplateLanguage<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateLanguage<'a> {
    code: &'a str,
}

/// API response for sent message
#[derive(Debug, Default, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    messages: Vec<MessageInfo>,
}

#[derive(Debug, Deserialize)]
struct MessageInfo {
    id: String,
}

/// API error response
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Validate a recipient and return it without the optional `+` prefix
///
/// Accepts 7 to 15 digits, optionally prefixed with `+`.
pub fn validate_recipient(to: &str) -> Result<&str, WhatsAppError> {
    let digits = to.strip_prefix('+').unwrap_or(to);
    let valid = (7..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(digits)
    } else {
        Err(WhatsAppError::InvalidPhoneNumber(to.to_string()))
    }
}

impl WhatsAppClient {
    /// Create a new WhatsApp client
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        if config.access_token.is_empty() {
            return Err(WhatsAppError::Configuration(
                "access_token is required".to_string(),
            ));
        }
        if config.phone_number_id.is_empty() {
            return Err(WhatsAppError::Configuration(
                "phone_number_id is required".to_string(),
            ));
        }

        let messages_url = format!(
            "{}/{}/{}/messages",
            config.base_url.trim_end_matches('/'),
            config.api_version,
            config.phone_number_id
        );

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            config,
            messages_url,
        })
    }

    /// Endpoint messages are posted to
    #[must_use]
    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    /// Send a plain text message
    #[instrument(skip(self, body), fields(to = %to))]
    pub async fn send_text(&self, to: &str, body: &str) -> Result<SentMessage, WhatsAppError> {
        let phone = validate_recipient(to)?;
        debug!(phone = %phone, body_len = body.len(), "Sending WhatsApp text");

        self.post(&SendMessageRequest {
            messaging_product: "whatsapp",
            recipient_type: Some("individual"),
            to: phone,
            content: MessageContent::Text {
                text: TextContent {
                    preview_url: false,
                    body,
                },
            },
        })
        .await
    }

    /// Send a document by public link or by uploaded media id
    #[instrument(skip(self, caption), fields(to = %to, source = %source))]
    pub async fn send_document(
        &self,
        to: &str,
        source: &DocumentSource,
        caption: &str,
    ) -> Result<SentMessage, WhatsAppError> {
        let phone = validate_recipient(to)?;
        let (link, id) = match source {
            DocumentSource::Link(url) => (Some(url.as_str()), None),
            DocumentSource::Id(media_id) => (None, Some(media_id.as_str())),
        };
        debug!(phone = %phone, "Sending WhatsApp document");

        self.post(&SendMessageRequest {
            messaging_product: "whatsapp",
            recipient_type: None,
            to: phone,
            content: MessageContent::Document {
                document: DocumentContent { link, id, caption },
            },
        })
        .await
    }

    /// Send a pre-approved template message
    #[instrument(skip(self), fields(to = %to))]
    pub async fn send_template(
        &self,
        to: &str,
        name: &str,
        language: &str,
    ) -> Result<SentMessage, WhatsAppError> {
        let phone = validate_recipient(to)?;
        debug!(phone = %phone, template = name, "Sending WhatsApp template");

        self.post(&SendMessageRequest {
            messaging_product: "whatsapp",
            recipient_type: None,
            to: phone,
            content: MessageContent::Template {
                template: TemplateContent {
                    name,
                    language: TemplateLanguage { code: language },
                },
            },
        })
        .await
    }

    async fn post(&self, request: &SendMessageRequest<'_>) -> Result<SentMessage, WhatsAppError> {
        let response = self
            .client
            .post(&self.messages_url)
            .bearer_auth(&self.config.access_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if status.is_success() {
            let parsed: SendMessageResponse = serde_json::from_str(&raw).unwrap_or_default();
            Ok(SentMessage {
                status: status.as_u16(),
                message_id: parsed.messages.into_iter().next().map(|m| m.id),
                raw,
            })
        } else {
            let (code, message) = serde_json::from_str::<ApiErrorResponse>(&raw)
                .map_or_else(|_| (0, raw.clone()), |e| (e.error.code, e.error.message));
            warn!(status = status.as_u16(), code, %message, "WhatsApp API rejected message");
            Err(WhatsAppError::Api {
                status: status.as_u16(),
                code,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> WhatsAppClientConfig {
        WhatsAppClientConfig {
            access_token: "test_token".to_string(),
            phone_number_id: "123456789".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn client_creation_requires_access_token() {
        let config = WhatsAppClientConfig {
            access_token: String::new(),
            phone_number_id: "123".to_string(),
            ..Default::default()
        };

        let result = WhatsAppClient::new(config);
        assert!(matches!(result, Err(WhatsAppError::Configuration(_))));
    }

    #[test]
    fn client_creation_requires_phone_number_id() {
        let config = WhatsAppClientConfig {
            access_token: "token".to_string(),
            phone_number_id: String::new(),
            ..Default::default()
        };

        let result = WhatsAppClient::new(config);
        assert!(matches!(result, Err(WhatsAppError::Configuration(_))));
    }

    #[test]
    fn messages_url_uses_version_and_phone_id() {
        let client = WhatsAppClient::new(test_config()).unwrap();
        assert_eq!(
            client.messages_url(),
            "https://graph.facebook.com/v16.0/123456789/messages"
        );
    }

    #[test]
    fn messages_url_tolerates_trailing_slash() {
        let config = WhatsAppClientConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..test_config()
        };
        let client = WhatsAppClient::new(config).unwrap();
        assert_eq!(
            client.messages_url(),
            "http://localhost:9000/v16.0/123456789/messages"
        );
    }

    #[test]
    fn config_default_values() {
        let config = WhatsAppClientConfig::default();
        assert_eq!(config.api_version, "v16.0");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn config_debug_redacts_token() {
        let debug = format!("{:?}", test_config());
        assert!(!debug.contains("test_token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn recipient_validation() {
        assert_eq!(validate_recipient("+4917635163191").unwrap(), "4917635163191");
        assert_eq!(validate_recipient("994501234567").unwrap(), "994501234567");
        assert!(validate_recipient("+123").is_err());
        assert!(validate_recipient("49176-3516").is_err());
        assert!(validate_recipient("1234567890123456").is_err());
        assert!(validate_recipient("").is_err());
    }

    #[test]
    fn text_request_shape() {
        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            recipient_type: Some("individual"),
            to: "4917635163191",
            content: MessageContent::Text {
                text: TextContent {
                    preview_url: false,
                    body: "hi",
                },
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messaging_product": "whatsapp",
                "recipient_type": "individual",
                "to": "4917635163191",
                "type": "text",
                "text": {"preview_url": false, "body": "hi"}
            })
        );
    }

    #[test]
    fn document_request_omits_empty_caption() {
        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            recipient_type: None,
            to: "4917635163191",
            content: MessageContent::Document {
                document: DocumentContent {
                    link: None,
                    id: Some("media-1"),
                    caption: "",
                },
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "document");
        assert_eq!(json["document"], serde_json::json!({"id": "media-1"}));
        assert!(json.get("recipient_type").is_none());
    }

    #[test]
    fn error_display() {
        let err = WhatsAppError::Configuration("test".to_string());
        assert!(err.to_string().contains("test"));

        let err = WhatsAppError::Api {
            status: 400,
            code: 100,
            message: "Invalid".to_string(),
        };
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("Invalid"));
    }

    #[tokio::test]
    async fn send_text_validates_phone_format() {
        let client = WhatsAppClient::new(test_config()).unwrap();

        let result = client.send_text("+123", "test").await;
        assert!(matches!(result, Err(WhatsAppError::InvalidPhoneNumber(_))));
    }
}
