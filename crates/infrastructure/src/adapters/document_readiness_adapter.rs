//! HTTP document readiness adapter
//!
//! Implements `DocumentReadinessPort` by probing the hosted document URL.
//! A `200 OK` means ready, and that same URL becomes the document link.

use std::time::Duration;

use application::error::ApplicationError;
use application::ports::{DocumentReadiness, DocumentReadinessPort};
use application::validate_number;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

/// Adapter that checks readiness with `GET {base_url}/api/v1/{number}/document`
#[derive(Debug, Clone)]
pub struct HttpDocumentReadinessAdapter {
    client: Client,
    base_url: String,
}

impl HttpDocumentReadinessAdapter {
    /// Create a new adapter probing below `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApplicationError::Configuration(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Public URL of the document for `number`
    #[must_use]
    pub fn document_url(&self, number: &str) -> String {
        format!("{}/api/v1/{number}/document", self.base_url)
    }
}

#[async_trait]
impl DocumentReadinessPort for HttpDocumentReadinessAdapter {
    #[instrument(skip(self), fields(recipient = %recipient_id))]
    async fn check(&self, recipient_id: &str) -> Result<DocumentReadiness, ApplicationError> {
        if validate_number(recipient_id).is_err() {
            debug!("Recipient is not a plain number, no document can exist");
            return Ok(DocumentReadiness::NotReady);
        }

        let url = self.document_url(recipient_id);
        match self.client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                debug!(%url, "Document is ready");
                Ok(DocumentReadiness::Ready { link: url })
            },
            Ok(response) => {
                debug!(%url, status = response.status().as_u16(), "Document not ready");
                Ok(DocumentReadiness::NotReady)
            },
            Err(e) => {
                warn!(%url, error = %e, "Readiness probe failed");
                Ok(DocumentReadiness::NotReady)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn adapter(base_url: &str) -> HttpDocumentReadinessAdapter {
        HttpDocumentReadinessAdapter::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn document_url_strips_trailing_slash() {
        let adapter = adapter("https://docs.example.com/");
        assert_eq!(
            adapter.document_url("4917635163191"),
            "https://docs.example.com/api/v1/4917635163191/document"
        );
    }

    #[tokio::test]
    async fn ok_means_ready_with_probe_url_as_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/4917635163191/document"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let readiness = adapter(&server.uri()).check("4917635163191").await.unwrap();
        assert_eq!(
            readiness,
            DocumentReadiness::Ready {
                link: format!("{}/api/v1/4917635163191/document", server.uri())
            }
        );
    }

    #[tokio::test]
    async fn not_found_means_not_ready() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let readiness = adapter(&server.uri()).check("4917635163191").await.unwrap();
        assert_eq!(readiness, DocumentReadiness::NotReady);
    }

    #[tokio::test]
    async fn other_success_codes_are_not_ready() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let readiness = adapter(&server.uri()).check("4917635163191").await.unwrap();
        assert_eq!(readiness, DocumentReadiness::NotReady);
    }

    #[tokio::test]
    async fn unreachable_host_is_not_ready() {
        let readiness = adapter("http://127.0.0.1:1")
            .check("4917635163191")
            .await
            .unwrap();
        assert_eq!(readiness, DocumentReadiness::NotReady);
    }

    #[tokio::test]
    async fn non_numeric_recipient_is_not_probed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let readiness = adapter(&server.uri()).check("../admin").await.unwrap();
        assert_eq!(readiness, DocumentReadiness::NotReady);
    }
}
