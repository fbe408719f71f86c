//! WhatsApp Business API configuration.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// WhatsApp integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Meta Graph API access token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Phone number ID from WhatsApp Business
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Verify token for webhook subscription (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub verify_token: Option<SecretString>,

    /// API version (default: v16.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Graph API host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field(
                "access_token",
                &if self.access_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("phone_number_id", &self.phone_number_id)
            .field(
                "verify_token",
                &if self.verify_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_api_version() -> String {
    integration_whatsapp::client::DEFAULT_API_VERSION.to_string()
}

fn default_base_url() -> String {
    integration_whatsapp::client::DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            verify_token: None,
            api_version: default_api_version(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WhatsAppConfig {
    /// Get the access token as a string reference (for API calls)
    #[must_use]
    pub fn access_token_str(&self) -> Option<&str> {
        self.access_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Get the verify token as a string reference (for webhook verification)
    #[must_use]
    pub fn verify_token_str(&self) -> Option<&str> {
        self.verify_token
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|t| !t.is_empty())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether enough is configured to send messages
    #[must_use]
    pub fn can_send(&self) -> bool {
        self.access_token_str().is_some_and(|t| !t.is_empty())
            && self.phone_number_id.as_deref().is_some_and(|p| !p.is_empty())
    }
}
