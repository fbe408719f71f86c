//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `messenger`: WhatsApp Business API
//! - `documents`: Document hosting and readiness probe
//! - `telemetry`: OpenTelemetry export
//!
//! Reply templates come from [`application::DispatchConfig`].

mod documents;
mod messenger;
mod server;
mod telemetry;

use application::DispatchConfig;
use serde::{Deserialize, Serialize};

pub use documents::DocumentsConfig;
pub use messenger::WhatsAppConfig;
pub use server::ServerConfig;
pub use telemetry::TelemetryAppConfig;

/// Prefix of environment variables, e.g. `DOCBRIDGE_SERVER__PORT`
pub const ENV_PREFIX: &str = "DOCBRIDGE";

/// Separator between nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

pub(crate) const fn default_true() -> bool {
    true
}

/// Unprefixed variables still honoured for existing deployments
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    /// `PORT`
    pub port: Option<String>,
    /// `WHATSAPP_ACCESS_TOKEN`
    pub access_token: Option<String>,
    /// `VERIFY_TOKEN`
    pub verify_token: Option<String>,
}

impl LegacyEnv {
    /// Read the legacy variables from the process environment
    #[must_use]
    pub fn from_process() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            port: read("PORT"),
            access_token: read("WHATSAPP_ACCESS_TOKEN"),
            verify_token: read("VERIFY_TOKEN"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// WhatsApp configuration
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Document hosting configuration
    #[serde(default)]
    pub documents: DocumentsConfig,

    /// Reply templates
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from defaults, `config.toml`, and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Self::environment(), &LegacyEnv::from_process())
    }

    /// Environment source with the standard prefix and separators
    #[must_use]
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
    }

    /// Load using an explicit environment source and legacy variables
    pub fn load_from(
        environment: config::Environment,
        legacy: &LegacyEnv,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., DOCBRIDGE_SERVER__PORT)
            .add_source(environment)
            // Plain variables win over everything
            .set_override_option("server.port", legacy.port.clone())?
            .set_override_option("whatsapp.access_token", legacy.access_token.clone())?
            .set_override_option("whatsapp.verify_token", legacy.verify_token.clone())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Base URL this service is reachable at
    ///
    /// Falls back to the bind address, with a wildcard host replaced by
    /// loopback.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        if let Some(url) = self
            .documents
            .public_base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
        {
            return url.trim_end_matches('/').to_string();
        }
        let host = match self.server.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
            other => other,
        };
        format!("http://{host}:{}", self.server.port)
    }

    /// Collect configuration problems that do not prevent startup
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.whatsapp.access_token_str().is_none_or(str::is_empty) {
            warnings.push(
                "whatsapp.access_token is not set; replies will not be sent".to_string(),
            );
        }
        if self
            .whatsapp
            .phone_number_id
            .as_deref()
            .is_none_or(str::is_empty)
        {
            warnings.push(
                "whatsapp.phone_number_id is not set; replies will not be sent".to_string(),
            );
        }
        if self.whatsapp.verify_token_str().is_none() {
            warnings.push(
                "whatsapp.verify_token is not set; webhook verification will be refused"
                    .to_string(),
            );
        }
        if self.documents.public_base_url.is_none() {
            warnings.push(format!(
                "documents.public_base_url is not set; using {}",
                self.public_base_url()
            ));
        }
        if let Some(ratio) = self.telemetry.sample_ratio
            && !(0.0..=1.0).contains(&ratio)
        {
            warnings.push(format!(
                "telemetry.sample_ratio {ratio} is outside 0.0..=1.0 and will be clamped"
            ));
        }

        warnings
    }
}
