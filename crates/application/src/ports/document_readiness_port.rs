//! Document readiness port - Is a sender's document available yet

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Result of a readiness check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DocumentReadiness {
    /// The document can be fetched from `link`
    Ready { link: String },
    /// Nothing to send yet
    NotReady,
}

impl DocumentReadiness {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Port for the external readiness precondition
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentReadinessPort: Send + Sync {
    /// Check whether the document for `recipient_id` is ready
    async fn check(&self, recipient_id: &str) -> Result<DocumentReadiness, ApplicationError>;
}
