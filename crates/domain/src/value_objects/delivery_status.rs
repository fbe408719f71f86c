//! Delivery status - Provider-reported state of a previously sent message

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery state reported in `statuses[0].status`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
    Failed,
    Deleted,
    /// Any status not covered above
    Other(String),
}

impl DeliveryStatus {
    /// Provider string for this status
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
            Self::Failed => "failed",
            Self::Deleted => "deleted",
            Self::Other(raw) => raw,
        }
    }

    /// Whether the provider gave up on the message
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl From<&str> for DeliveryStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            "read" => Self::Read,
            "failed" => Self::Failed,
            "deleted" => Self::Deleted,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DeliveryStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
