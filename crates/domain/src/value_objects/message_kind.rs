//! Message kind - The `type` of an inbound WhatsApp message

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an inbound message as reported by the provider in `messages[0].type`
///
/// Unknown kinds are kept verbatim in [`MessageKind::Other`], so the raw
/// provider value is always recoverable through [`MessageKind::as_str`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    Text,
    Image,
    Audio,
    Video,
    Document,
    Sticker,
    Location,
    Contacts,
    Button,
    Interactive,
    Reaction,
    /// Any kind not covered above
    Other(String),
}

impl MessageKind {
    /// Provider string for this kind
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
            Self::Sticker => "sticker",
            Self::Location => "location",
            Self::Contacts => "contacts",
            Self::Button => "button",
            Self::Interactive => "interactive",
            Self::Reaction => "reaction",
            Self::Other(raw) => raw,
        }
    }

    /// Whether the message carries media the provider must be asked to download
    #[must_use]
    pub const fn is_media(&self) -> bool {
        matches!(
            self,
            Self::Image | Self::Audio | Self::Video | Self::Document | Self::Sticker
        )
    }
}

impl From<&str> for MessageKind {
    fn from(raw: &str) -> Self {
        match raw {
            "text" => Self::Text,
            "image" => Self::Image,
            "audio" => Self::Audio,
            "video" => Self::Video,
            "document" => Self::Document,
            "sticker" => Self::Sticker,
            "location" => Self::Location,
            "contacts" => Self::Contacts,
            "button" => Self::Button,
            "interactive" => Self::Interactive,
            "reaction" => Self::Reaction,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for MessageKind {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!(MessageKind::from("text"), MessageKind::Text);
        assert_eq!(MessageKind::from("document"), MessageKind::Document);
        assert_eq!(MessageKind::from("interactive"), MessageKind::Interactive);
    }

    #[test]
    fn unknown_kind_is_kept_verbatim() {
        let kind = MessageKind::from("order");
        assert_eq!(kind, MessageKind::Other("order".to_string()));
        assert_eq!(kind.as_str(), "order");
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!(
            MessageKind::from("Text"),
            MessageKind::Other("Text".to_string())
        );
    }

    #[test]
    fn media_kinds() {
        assert!(MessageKind::Image.is_media());
        assert!(MessageKind::Document.is_media());
        assert!(!MessageKind::Text.is_media());
        assert!(!MessageKind::Other("unsupported".to_string()).is_media());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&MessageKind::Text).unwrap();
        assert_eq!(json, "\"text\"");

        let parsed: MessageKind = serde_json::from_str("\"unsupported\"").unwrap();
        assert_eq!(parsed, MessageKind::Other("unsupported".to_string()));
    }

    #[test]
    fn display_matches_provider_string() {
        assert_eq!(MessageKind::Reaction.to_string(), "reaction");
    }
}
