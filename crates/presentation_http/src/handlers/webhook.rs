//! WhatsApp webhook handlers
//!
//! `GET /api/v1/hook` answers Meta's subscription handshake; `POST` takes
//! the event notifications and hands them to the dispatch service.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use application::Outcome;
use integration_whatsapp::{decode_envelope, extract, verify_subscription};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Query parameters for webhook verification
#[derive(Debug, Default, Deserialize)]
pub struct WebhookVerifyQuery {
    /// Should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub hub_mode: Option<String>,
    /// Token to compare with the configured one
    #[serde(rename = "hub.verify_token")]
    pub hub_verify_token: Option<String>,
    /// Integer to echo back on success
    #[serde(rename = "hub.challenge")]
    pub hub_challenge: Option<String>,
}

/// Webhook verification (GET)
///
/// Echoes `hub.challenge` as plain text when the token matches.
#[instrument(skip(state, query))]
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookVerifyQuery>,
) -> Result<String, ApiError> {
    let Some(expected) = state.verify_token() else {
        warn!("Webhook verification attempted but no verify token is configured");
        return Err(ApiError::ServiceUnavailable(
            "Webhook verification is not configured".to_string(),
        ));
    };

    let challenge = verify_subscription(
        query.hub_mode.as_deref(),
        query.hub_verify_token.as_deref(),
        query.hub_challenge.as_deref(),
        expected,
    )
    .inspect_err(|e| warn!(error = %e, "Webhook verification rejected"))?;

    info!("Webhook subscription verified");
    Ok(challenge.to_string())
}

/// Webhook notification (POST)
///
/// Responds with the dispatch outcome once every send has been attempted.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Outcome>, ApiError> {
    debug!(body = %String::from_utf8_lossy(&body), "Webhook payload received");

    let envelope = decode_envelope(&body)
        .inspect_err(|e| warn!(error = %e, "Rejecting undecodable webhook payload"))?;
    let event = extract(&envelope)
        .inspect_err(|e| warn!(error = %e, "Rejecting incomplete webhook payload"))?;

    let outcome = state.dispatch.handle(&event).await;
    info!(
        event = event.kind(),
        sends = outcome.send_count(),
        "Webhook handled"
    );
    Ok(Json(outcome))
}
