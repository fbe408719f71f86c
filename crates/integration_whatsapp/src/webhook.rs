//! WhatsApp webhook handling
//!
//! Decodes webhook bodies from the WhatsApp Business API and extracts a
//! [`ParsedEvent`] from them.
//!
//! The envelope is decoded leniently: every field is optional and a field
//! holding the wrong JSON type reads as absent. A payload that does not match
//! the expected shape therefore never fails decoding; it fails extraction with
//! [`ExtractionError::MissingField`] naming the path that could not be read.
//! Only the first element of each array is ever consulted, and array elements
//! are decoded one by one so a bad later element never hides the first.

use chrono::{DateTime, Utc};
use domain::{DeliveryStatus, DeliveryUpdate, InboundMessage, MessageKind, ParsedEvent};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, warn};

/// Change field carrying messages and statuses
pub const MESSAGES_FIELD: &str = "messages";

/// Paths reported by [`ExtractionError::MissingField`]
pub mod paths {
    pub const SENDER_ID: &str = "entry[0].changes[0].value.contacts[0].wa_id";
    pub const SENDER_NAME: &str = "entry[0].changes[0].value.contacts[0].profile.name";
    pub const MESSAGE_TYPE: &str = "entry[0].changes[0].value.messages[0].type";
    pub const STATUS: &str = "entry[0].changes[0].value.statuses[0].status";
}

/// The body could not be decoded at all
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Webhook body must be a JSON object")]
    NotAnObject,
}

/// The envelope decoded but did not carry what its category requires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Deserialize into `Some(T)`, or `None` when the value has the wrong shape
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One array element, `None` inside when the element has the wrong shape
#[derive(Debug, Clone)]
pub struct Lenient<T>(pub Option<T>);

impl<T> Lenient<T> {
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self(serde_json::from_value(value).ok()))
    }
}

/// A leniently decoded JSON array
pub type LenientList<T> = Option<Vec<Lenient<T>>>;

/// Top-level webhook body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(default, deserialize_with = "lenient")]
    pub object: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub entry: LenientList<WebhookEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub changes: LenientList<WebhookChange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookChange {
    #[serde(default, deserialize_with = "lenient")]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<WebhookValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookValue {
    #[serde(default, deserialize_with = "lenient")]
    pub messaging_product: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub metadata: Option<WebhookMetadata>,
    #[serde(default, deserialize_with = "lenient")]
    pub contacts: LenientList<WebhookContact>,
    #[serde(default, deserialize_with = "lenient")]
    pub messages: LenientList<WebhookMessage>,
    #[serde(default, deserialize_with = "lenient")]
    pub statuses: LenientList<WebhookStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub display_phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub phone_number_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookContact {
    #[serde(default, deserialize_with = "lenient")]
    pub wa_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub profile: Option<ContactProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactProfile {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub msg_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<TextBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextBody {
    #[serde(default, deserialize_with = "lenient")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookStatus {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub recipient_id: Option<String>,
}

/// The first element slot, present even when the element itself is malformed
fn first_slot<T>(list: Option<&[Lenient<T>]>) -> Option<&Lenient<T>> {
    list.and_then(<[_]>::first)
}

fn first<T>(list: Option<&[Lenient<T>]>) -> Option<&T> {
    first_slot(list).and_then(Lenient::get)
}

impl WebhookEnvelope {
    /// `entry[0].changes[0]`, if present and well formed
    #[must_use]
    pub fn first_change(&self) -> Option<&WebhookChange> {
        first(first(self.entry.as_deref())?.changes.as_deref())
    }

    /// `entry[0].changes[0].field`, if present
    #[must_use]
    pub fn changed_field(&self) -> Option<&str> {
        self.first_change()?.field.as_deref()
    }
}

/// Decode a raw webhook body
///
/// Fails only when the bytes are not JSON or not a JSON object. Anything
/// inside the object is tolerated.
pub fn decode_envelope(body: &[u8]) -> Result<WebhookEnvelope, DecodeError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// Categorize an envelope and read the fields its category needs
///
/// A missing or foreign `entry[0].changes[0].field` is `Unrecognized`, not an
/// error. Inside a `messages` change, a non-empty `messages` list wins over
/// `statuses`; neither present is also `Unrecognized`. A first element of the
/// wrong shape still selects its category and then fails on the field it
/// could not supply.
pub fn extract(envelope: &WebhookEnvelope) -> Result<ParsedEvent, ExtractionError> {
    let Some(change) = envelope.first_change() else {
        debug!("Webhook has no entry[0].changes[0]");
        return Ok(ParsedEvent::Unrecognized);
    };

    if change.field.as_deref() != Some(MESSAGES_FIELD) {
        debug!(field = ?change.field, "Ignoring webhook change field");
        return Ok(ParsedEvent::Unrecognized);
    }

    let Some(value) = change.value.as_ref() else {
        return Ok(ParsedEvent::Unrecognized);
    };

    // A non-empty list decides the category even when its first element is junk
    if let Some(message) = first_slot(value.messages.as_deref()) {
        return extract_new_message(value, message.get()).map(ParsedEvent::NewMessage);
    }

    if let Some(status) = first_slot(value.statuses.as_deref()) {
        return extract_delivery_update(status.get()).map(ParsedEvent::DeliveryUpdate);
    }

    Ok(ParsedEvent::Unrecognized)
}

fn extract_new_message(
    value: &WebhookValue,
    message: Option<&WebhookMessage>,
) -> Result<InboundMessage, ExtractionError> {
    let contact = first(value.contacts.as_deref());

    let sender_id = contact
        .and_then(|c| c.wa_id.clone())
        .ok_or(ExtractionError::MissingField(paths::SENDER_ID))?;

    let sender_name = contact
        .and_then(|c| c.profile.as_ref())
        .and_then(|p| p.name.clone())
        .ok_or(ExtractionError::MissingField(paths::SENDER_NAME))?;

    let message_type = message
        .and_then(|m| m.msg_type.as_deref())
        .map(MessageKind::from)
        .ok_or(ExtractionError::MissingField(paths::MESSAGE_TYPE))?;

    let business_number = value
        .metadata
        .as_ref()
        .and_then(|m| m.display_phone_number.clone())
        .unwrap_or_default();

    Ok(InboundMessage {
        sender_id,
        sender_name,
        message_type,
        business_number,
        message_id: message.and_then(|m| m.id.clone()),
    })
}

fn extract_delivery_update(
    status: Option<&WebhookStatus>,
) -> Result<DeliveryUpdate, ExtractionError> {
    let status = status.ok_or(ExtractionError::MissingField(paths::STATUS))?;
    let delivery_status = status
        .status
        .as_deref()
        .map(DeliveryStatus::from)
        .ok_or(ExtractionError::MissingField(paths::STATUS))?;

    Ok(DeliveryUpdate {
        status: delivery_status,
        message_id: status.id.clone(),
        recipient_id: status.recipient_id.clone(),
        timestamp: status.timestamp.as_deref().and_then(parse_unix_seconds),
    })
}

/// Provider timestamps are Unix seconds sent as strings
fn parse_unix_seconds(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Reasons a subscription verification request is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("Unsupported hub.mode: {0}")]
    InvalidMode(String),

    #[error("Missing hub.verify_token")]
    MissingToken,

    #[error("Verify token mismatch")]
    TokenMismatch,

    #[error("Missing hub.challenge")]
    MissingChallenge,

    #[error("hub.challenge is not an integer: {0}")]
    InvalidChallenge(String),
}

/// Check a subscription verification request and return the challenge to echo
///
/// `hub.mode`, when sent, must be `subscribe`. The token comparison runs in
/// constant time.
pub fn verify_subscription(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&str>,
    expected_token: &str,
) -> Result<i64, VerificationError> {
    if let Some(mode) = mode
        && mode != "subscribe"
    {
        return Err(VerificationError::InvalidMode(mode.to_string()));
    }

    let token = token.ok_or(VerificationError::MissingToken)?;
    if !bool::from(token.as_bytes().ct_eq(expected_token.as_bytes())) {
        warn!("Webhook verification failed: token mismatch");
        return Err(VerificationError::TokenMismatch);
    }

    let challenge = challenge.ok_or(VerificationError::MissingChallenge)?;
    challenge
        .trim()
        .parse::<i64>()
        .map_err(|_| VerificationError::InvalidChallenge(challenge.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ParsedEvent, ExtractionError> {
        let envelope = decode_envelope(json.as_bytes()).unwrap();
        extract(&envelope)
    }

    // Captured from a live delivery
    const TEXT_MESSAGE: &str = r#"{
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "102140959526615",
            "changes": [{
                "value": {
                    "messaging_product": "whatsapp",
                    "metadata": {
                        "display_phone_number": "15550909792",
                        "phone_number_id": "106189092448679"
                    },
                    "contacts": [{"profile": {"name": "T.A"}, "wa_id": "4917635163191"}],
                    "messages": [{
                        "from": "4917635163191",
                        "id": "wamid.HBgNNDkxNzYzNTE2MzE5MRUCABIYFjNFQjA4QTQyQTIxOUZCMDI2QTFDRTYA",
                        "timestamp": "1681899808",
                        "text": {"body": "test"},
                        "type": "text"
                    }]
                },
                "field": "messages"
            }]
        }]
    }"#;

    const DELIVERED_STATUS: &str = r#"{"object":"whatsapp_business_account","entry":[{"id":"102140959526615","changes":[{"value":{"messaging_product":"whatsapp","metadata":{"display_phone_number":"15550909792","phone_number_id":"106189092448679"},"statuses":[{"id":"wamid.HBgNNDkxNzYzNTE2MzE5MRUCABEYEjY3OENERDM4RTY2Mzc3RkE4MgA=","status":"delivered","timestamp":"1681903556","recipient_id":"4917635163191","conversation":{"id":"6f1a08afbb622fbac2235469f724a890","origin":{"type":"user_initiated"}},"pricing":{"billable":true,"pricing_model":"CBP","category":"user_initiated"}}]},"field":"messages"}]}]}"#;

    #[test]
    fn extracts_new_text_message() {
        let ParsedEvent::NewMessage(message) = parse(TEXT_MESSAGE).unwrap() else {
            unreachable!("expected NewMessage");
        };
        assert_eq!(message.sender_id, "4917635163191");
        assert_eq!(message.sender_name, "T.A");
        assert_eq!(message.message_type, MessageKind::Text);
        assert_eq!(message.business_number, "15550909792");
        assert!(message.message_id.unwrap().starts_with("wamid."));
    }

    #[test]
    fn extracts_delivery_status() {
        let ParsedEvent::DeliveryUpdate(update) = parse(DELIVERED_STATUS).unwrap() else {
            unreachable!("expected DeliveryUpdate");
        };
        assert_eq!(update.status, DeliveryStatus::Delivered);
        assert_eq!(update.recipient_id.as_deref(), Some("4917635163191"));
        assert_eq!(update.timestamp.unwrap().timestamp(), 1_681_903_556);
    }

    #[test]
    fn minimal_new_message() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"contacts":[{"wa_id":"X","profile":{"name":"N"}}],"messages":[{"type":"text"}]}}]}]}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ParsedEvent::NewMessage(InboundMessage {
                sender_id: "X".to_string(),
                sender_name: "N".to_string(),
                message_type: MessageKind::Text,
                business_number: String::new(),
                message_id: None,
            })
        );
    }

    #[test]
    fn minimal_delivery_update() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"statuses":[{"status":"delivered"}]}}]}]}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ParsedEvent::DeliveryUpdate(DeliveryUpdate::new(DeliveryStatus::Delivered))
        );
    }

    #[test]
    fn empty_object_is_unrecognized() {
        assert_eq!(parse("{}").unwrap(), ParsedEvent::Unrecognized);
    }

    #[test]
    fn empty_entry_list_is_unrecognized() {
        assert_eq!(parse(r#"{"entry":[]}"#).unwrap(), ParsedEvent::Unrecognized);
        assert_eq!(
            parse(r#"{"entry":[{"changes":[]}]}"#).unwrap(),
            ParsedEvent::Unrecognized
        );
    }

    #[test]
    fn other_change_field_is_unrecognized() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"account_update","value":{"messages":[{"type":"text"}]}}]}]}"#,
        )
        .unwrap();
        assert_eq!(event, ParsedEvent::Unrecognized);
    }

    #[test]
    fn missing_field_is_unrecognized() {
        let event = parse(r#"{"entry":[{"changes":[{"value":{"statuses":[{"status":"read"}]}}]}]}"#)
            .unwrap();
        assert_eq!(event, ParsedEvent::Unrecognized);
    }

    #[test]
    fn messages_change_without_value_is_unrecognized() {
        let event = parse(r#"{"entry":[{"changes":[{"field":"messages"}]}]}"#).unwrap();
        assert_eq!(event, ParsedEvent::Unrecognized);
    }

    #[test]
    fn messages_change_with_empty_lists_is_unrecognized() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"messages":[],"statuses":[]}}]}]}"#,
        )
        .unwrap();
        assert_eq!(event, ParsedEvent::Unrecognized);
    }

    #[test]
    fn messages_win_over_statuses() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{
                "contacts":[{"wa_id":"1","profile":{"name":"A"}}],
                "messages":[{"type":"image"}],
                "statuses":[{"status":"read"}]}}]}]}"#,
        )
        .unwrap();
        assert!(matches!(event, ParsedEvent::NewMessage(m) if m.message_type == MessageKind::Image));
    }

    #[test]
    fn missing_contacts_fails_on_sender_id() {
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"messages":[{"type":"text"}]}}]}]}"#,
        );
        assert_eq!(result, Err(ExtractionError::MissingField(paths::SENDER_ID)));
    }

    #[test]
    fn missing_profile_name_fails() {
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"contacts":[{"wa_id":"1","profile":{}}],"messages":[{"type":"text"}]}}]}]}"#,
        );
        assert_eq!(
            result,
            Err(ExtractionError::MissingField(paths::SENDER_NAME))
        );
    }

    #[test]
    fn missing_message_type_fails() {
        // Shape of a send-message API response posted to the hook by mistake
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"messaging_product":"whatsapp","contacts":[{"input":"4917635163191","wa_id":"4917635163191","profile":{"name":"T.A"}}],"messages":[{"id":"wamid.HBgN"}]}}]}]}"#,
        );
        assert_eq!(
            result,
            Err(ExtractionError::MissingField(paths::MESSAGE_TYPE))
        );
    }

    #[test]
    fn wrong_typed_field_reads_as_missing() {
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"contacts":[{"wa_id":4917635163191,"profile":{"name":"N"}}],"messages":[{"type":"text"}]}}]}]}"#,
        );
        assert_eq!(result, Err(ExtractionError::MissingField(paths::SENDER_ID)));
    }

    #[test]
    fn status_entry_without_status_fails() {
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"statuses":[{"id":"wamid.1"}]}}]}]}"#,
        );
        assert_eq!(result, Err(ExtractionError::MissingField(paths::STATUS)));
    }

    #[test]
    fn business_number_is_best_effort() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"metadata":{"display_phone_number":null},"contacts":[{"wa_id":"1","profile":{"name":"A"}}],"messages":[{"type":"text"}]}}]}]}"#,
        )
        .unwrap();
        let ParsedEvent::NewMessage(message) = event else {
            unreachable!("expected NewMessage");
        };
        assert!(message.business_number.is_empty());
    }

    #[test]
    fn unparseable_timestamp_is_dropped() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"statuses":[{"status":"sent","timestamp":"soon"}]}}]}]}"#,
        )
        .unwrap();
        let ParsedEvent::DeliveryUpdate(update) = event else {
            unreachable!("expected DeliveryUpdate");
        };
        assert!(update.timestamp.is_none());
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(matches!(
            decode_envelope(b"{not json"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn decode_rejects_non_objects() {
        assert!(matches!(decode_envelope(b"[]"), Err(DecodeError::NotAnObject)));
        assert!(matches!(
            decode_envelope(b"\"messages\""),
            Err(DecodeError::NotAnObject)
        ));
    }

    #[test]
    fn decode_tolerates_wrong_typed_entry() {
        let envelope = decode_envelope(br#"{"entry":"nope"}"#).unwrap();
        assert!(envelope.entry.is_none());
        assert_eq!(extract(&envelope).unwrap(), ParsedEvent::Unrecognized);
    }

    #[test]
    fn trailing_junk_message_is_ignored() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"contacts":[{"wa_id":"1","profile":{"name":"A"}}],"messages":[{"type":"text"},null]}}]}]}"#,
        )
        .unwrap();
        assert!(matches!(event, ParsedEvent::NewMessage(m) if m.message_type == MessageKind::Text));
    }

    #[test]
    fn trailing_junk_contact_is_ignored() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"contacts":[{"wa_id":"1","profile":{"name":"A"}},7],"messages":[{"type":"text"}]}}]}]}"#,
        )
        .unwrap();
        assert!(matches!(event, ParsedEvent::NewMessage(m) if m.sender_id == "1" && m.sender_name == "A"));
    }

    #[test]
    fn trailing_junk_status_is_ignored() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"statuses":[{"status":"read"},"x",{"status":5}]}}]}]}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ParsedEvent::DeliveryUpdate(DeliveryUpdate::new(DeliveryStatus::Read))
        );
    }

    #[test]
    fn trailing_junk_entry_and_change_are_ignored() {
        let event = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"statuses":[{"status":"sent"}]}},[1,2]]},"junk"]}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ParsedEvent::DeliveryUpdate(DeliveryUpdate::new(DeliveryStatus::Sent))
        );
    }

    #[test]
    fn malformed_first_entry_or_change_is_unrecognized() {
        assert_eq!(parse(r#"{"entry":[null]}"#).unwrap(), ParsedEvent::Unrecognized);
        assert_eq!(
            parse(r#"{"entry":[{"changes":["messages"]}]}"#).unwrap(),
            ParsedEvent::Unrecognized
        );
    }

    #[test]
    fn null_first_message_fails_on_type() {
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"contacts":[{"wa_id":"1","profile":{"name":"A"}}],"messages":[null]}}]}]}"#,
        );
        assert_eq!(
            result,
            Err(ExtractionError::MissingField(paths::MESSAGE_TYPE))
        );
    }

    #[test]
    fn null_first_message_still_wins_over_statuses() {
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"messages":[null],"statuses":[{"status":"read"}]}}]}]}"#,
        );
        assert_eq!(result, Err(ExtractionError::MissingField(paths::SENDER_ID)));
    }

    #[test]
    fn malformed_first_contact_fails_on_sender_id() {
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"contacts":[7,{"wa_id":"1","profile":{"name":"A"}}],"messages":[{"type":"text"}]}}]}]}"#,
        );
        assert_eq!(result, Err(ExtractionError::MissingField(paths::SENDER_ID)));
    }

    #[test]
    fn null_first_status_fails_on_status() {
        let result = parse(
            r#"{"entry":[{"changes":[{"field":"messages","value":{"statuses":[null,{"status":"read"}]}}]}]}"#,
        );
        assert_eq!(result, Err(ExtractionError::MissingField(paths::STATUS)));
    }

    #[test]
    fn changed_field_reads_first_change() {
        let envelope = decode_envelope(TEXT_MESSAGE.as_bytes()).unwrap();
        assert_eq!(envelope.changed_field(), Some("messages"));
        assert_eq!(envelope.object.as_deref(), Some("whatsapp_business_account"));
    }

    #[test]
    fn verification_echoes_numeric_challenge() {
        let challenge =
            verify_subscription(Some("subscribe"), Some("secret"), Some("1158201444"), "secret");
        assert_eq!(challenge, Ok(1_158_201_444));
    }

    #[test]
    fn verification_without_mode_is_accepted() {
        assert_eq!(
            verify_subscription(None, Some("secret"), Some("42"), "secret"),
            Ok(42)
        );
    }

    #[test]
    fn verification_rejects_wrong_token() {
        assert_eq!(
            verify_subscription(Some("subscribe"), Some("guess"), Some("42"), "secret"),
            Err(VerificationError::TokenMismatch)
        );
        assert_eq!(
            verify_subscription(Some("subscribe"), None, Some("42"), "secret"),
            Err(VerificationError::MissingToken)
        );
    }

    #[test]
    fn verification_rejects_other_modes() {
        assert_eq!(
            verify_subscription(Some("unsubscribe"), Some("secret"), Some("42"), "secret"),
            Err(VerificationError::InvalidMode("unsubscribe".to_string()))
        );
    }

    #[test]
    fn verification_rejects_non_numeric_challenge() {
        assert_eq!(
            verify_subscription(None, Some("secret"), Some("abc"), "secret"),
            Err(VerificationError::InvalidChallenge("abc".to_string()))
        );
        assert_eq!(
            verify_subscription(None, Some("secret"), None, "secret"),
            Err(VerificationError::MissingChallenge)
        );
    }
}
