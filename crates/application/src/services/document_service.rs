//! Document hosting service
//!
//! Stores one base64-uploaded PDF per phone number and serves it back. The
//! stored documents are what the readiness check probes for.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::DocumentStorePort;

/// Longest accepted phone number (E.164 allows 15 digits)
const MAX_NUMBER_LEN: usize = 15;

/// Check that a phone number is usable as a storage key
///
/// Only ASCII digits are accepted, which also keeps keys from escaping the
/// storage directory.
pub fn validate_number(number: &str) -> Result<(), ApplicationError> {
    if number.is_empty()
        || number.len() > MAX_NUMBER_LEN
        || !number.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ApplicationError::InvalidInput(format!(
            "invalid phone number: {number:?}"
        )));
    }
    Ok(())
}

/// Service for uploading and fetching hosted documents
pub struct DocumentService {
    store: Arc<dyn DocumentStorePort>,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService")
            .field("store", &"<DocumentStorePort>")
            .finish()
    }
}

impl DocumentService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    /// Decode and store a base64 document for `number`
    ///
    /// Returns the decoded size in bytes.
    #[instrument(skip(self, document_b64), fields(number = %number))]
    pub async fn upload(&self, number: &str, document_b64: &str) -> Result<usize, ApplicationError> {
        validate_number(number)?;

        let content = STANDARD
            .decode(document_b64.trim())
            .map_err(|e| ApplicationError::InvalidInput(format!("document is not valid base64: {e}")))?;
        if content.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "document must not be empty".to_string(),
            ));
        }

        self.store.save(number, &content).await?;
        info!(bytes = content.len(), "Document stored");
        Ok(content.len())
    }

    /// Fetch the stored document for `number`
    #[instrument(skip(self), fields(number = %number))]
    pub async fn fetch(&self, number: &str) -> Result<Vec<u8>, ApplicationError> {
        validate_number(number)?;

        match self.store.load(number).await? {
            Some(content) => {
                debug!(bytes = content.len(), "Document found");
                Ok(content)
            },
            None => Err(ApplicationError::NotFound(format!(
                "no document for {number}"
            ))),
        }
    }
}
