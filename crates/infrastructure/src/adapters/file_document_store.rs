//! Filesystem document store
//!
//! Implements `DocumentStorePort` with one `{number}.pdf` file per phone
//! number in a single directory.

use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::DocumentStorePort;
use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, instrument};

/// Errors raised by the file store
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document key: {0:?}")]
    InvalidKey(String),
}

impl From<DocumentStoreError> for ApplicationError {
    fn from(e: DocumentStoreError) -> Self {
        match e {
            DocumentStoreError::InvalidKey(_) => Self::InvalidInput(e.to_string()),
            DocumentStoreError::Io { .. } => Self::Internal(e.to_string()),
        }
    }
}

/// Document store writing PDFs below a directory
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    dir: PathBuf,
}

impl FileDocumentStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `number`
    pub fn path_for(&self, number: &str) -> Result<PathBuf, DocumentStoreError> {
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DocumentStoreError::InvalidKey(number.to_string()));
        }
        Ok(self.dir.join(format!("{number}.pdf")))
    }

    async fn write(&self, number: &str, content: &[u8]) -> Result<(), DocumentStoreError> {
        let path = self.path_for(number)?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| DocumentStoreError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).await.map_err(io_err(self.dir.as_path()))?;

        // Readers never see a half-written file
        let tmp = path.with_extension("pdf.tmp");
        fs::write(&tmp, content).await.map_err(io_err(tmp.as_path()))?;
        fs::rename(&tmp, &path).await.map_err(io_err(path.as_path()))?;
        Ok(())
    }

    async fn read(&self, number: &str) -> Result<Option<Vec<u8>>, DocumentStoreError> {
        let path = self.path_for(number)?;
        match fs::read(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(DocumentStoreError::Io { path, source }),
        }
    }
}

#[async_trait]
impl DocumentStorePort for FileDocumentStore {
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    async fn save(&self, number: &str, content: &[u8]) -> Result<(), ApplicationError> {
        self.write(number, content).await?;
        debug!(dir = %self.dir.display(), "Document written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(&self, number: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        Ok(self.read(number).await?)
    }
}
