//! Document hosting handlers
//!
//! `POST /api/v1/{number}/document` stores a base64 PDF and
//! `GET /api/v1/{number}/document` serves it back. The readiness check
//! probes the GET route.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Upload request body
#[derive(Debug, Deserialize, Validate)]
pub struct UploadDocumentRequest {
    /// Must match the number in the path when sent
    #[serde(default)]
    pub number: Option<String>,
    /// Base64 encoded PDF
    #[validate(length(min = 1, message = "must not be empty"))]
    pub document: String,
}

/// Upload response body
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadDocumentResponse {
    pub number: String,
    pub bytes: usize,
}

/// Store the document for `number`
#[instrument(skip(state, request), fields(number = %number))]
pub async fn upload_document(
    State(state): State<AppState>,
    Path(number): Path<String>,
    ValidatedJson(request): ValidatedJson<UploadDocumentRequest>,
) -> Result<(StatusCode, Json<UploadDocumentResponse>), ApiError> {
    if let Some(body_number) = request.number.as_deref()
        && body_number != number
    {
        warn!(body_number, "Upload number does not match path");
        return Err(ApiError::BadRequest(format!(
            "number {body_number:?} does not match path number {number:?}"
        )));
    }

    let bytes = state.documents.upload(&number, &request.document).await?;
    info!(bytes, "Document uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadDocumentResponse { number, bytes }),
    ))
}

/// Serve the stored document for `number` as a PDF attachment
#[instrument(skip(state), fields(number = %number))]
pub async fn get_document(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let content = state.documents.fetch(&number).await?;
    let disposition = format!("attachment; filename=\"{number}.pdf\"");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content,
    ))
}
