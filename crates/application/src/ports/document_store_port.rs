//! Document store port - Persistence for hosted PDF documents

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Port for storing one PDF document per phone number
///
/// Keys are already validated digit strings when they reach the store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Store (or replace) the document for `number`
    async fn save(&self, number: &str, content: &[u8]) -> Result<(), ApplicationError>;

    /// Load the document for `number`, `None` if there is none
    async fn load(&self, number: &str) -> Result<Option<Vec<u8>>, ApplicationError>;
}
