//! Document hosting and readiness-check configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Document hosting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Directory holding `{number}.pdf` files
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Externally reachable base URL of this service, used both for the
    /// readiness probe and as the document link sent to recipients
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Readiness probe timeout in seconds
    #[serde(default = "default_readiness_timeout_secs")]
    pub readiness_timeout_secs: u64,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("documents")
}

const fn default_readiness_timeout_secs() -> u64 {
    10
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            public_base_url: None,
            readiness_timeout_secs: default_readiness_timeout_secs(),
        }
    }
}

impl DocumentsConfig {
    #[must_use]
    pub const fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout_secs)
    }
}
