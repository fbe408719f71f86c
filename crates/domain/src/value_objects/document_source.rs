//! Document source - Where the provider fetches an outbound document from

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Reference to a document the provider should deliver
///
/// The provider either downloads it from a public link or reuses media it
/// already holds under an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DocumentSource {
    /// Publicly reachable URL
    Link(String),
    /// Media id previously uploaded to the provider
    Id(String),
}

impl DocumentSource {
    /// Create a link source, rejecting anything that is not an http(s) URL
    pub fn link(url: impl Into<String>) -> Result<Self, DomainError> {
        let url = url.into();
        if url.starts_with("https://") || url.starts_with("http://") {
            Ok(Self::Link(url))
        } else {
            Err(DomainError::InvalidDocumentSource(url))
        }
    }

    /// Create a media-id source
    pub fn id(media_id: impl Into<String>) -> Result<Self, DomainError> {
        let media_id = media_id.into();
        if media_id.trim().is_empty() {
            return Err(DomainError::InvalidDocumentSource(media_id));
        }
        Ok(Self::Id(media_id))
    }

    /// The link or id itself
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            Self::Link(r) | Self::Id(r) => r,
        }
    }

    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self, Self::Link(_))
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(url) => write!(f, "link:{url}"),
            Self::Id(id) => write!(f, "id:{id}"),
        }
    }
}
