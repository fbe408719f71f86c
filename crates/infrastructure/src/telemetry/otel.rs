//! OpenTelemetry initialization and configuration
//!
//! Sets up the tracing subscriber (env filter, text or JSON console output)
//! and, when enabled, an OTLP span exporter. Degrades to console-only
//! logging when the exporter cannot be built.

use std::time::Duration;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{Sampler, SdkTracerProvider},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, TelemetryAppConfig};

/// Configuration for telemetry/tracing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether OpenTelemetry export is enabled
    #[serde(default)]
    pub enabled: bool,

    /// OTLP endpoint URL (e.g., "http://localhost:4317" for gRPC)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Service name for traces
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Sampling ratio (0.0 - 1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    /// Export timeout in seconds
    #[serde(default = "default_export_timeout")]
    pub export_timeout_secs: u64,

    /// Log level filter, used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON log lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,

    /// Whether to fall back to console-only logging if OTLP export fails
    #[serde(default = "default_graceful_fallback")]
    pub graceful_fallback: bool,
}

const fn default_sampling_ratio() -> f64 {
    1.0
}

const fn default_export_timeout() -> u64 {
    30
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "docbridge".to_string()
}

fn default_log_filter() -> String {
    "info,tower_http=info".to_string()
}

const fn default_graceful_fallback() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
            export_timeout_secs: default_export_timeout(),
            log_filter: default_log_filter(),
            json_logs: false,
            graceful_fallback: default_graceful_fallback(),
        }
    }
}

impl TelemetryConfig {
    /// Derive the telemetry setup from the application configuration
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        let TelemetryAppConfig {
            enabled,
            otlp_endpoint,
            sample_ratio,
            graceful_fallback,
        } = &config.telemetry;

        Self {
            enabled: *enabled,
            endpoint: otlp_endpoint.clone(),
            sampling_ratio: sample_ratio.unwrap_or_else(default_sampling_ratio),
            json_logs: config.server.json_logs(),
            graceful_fallback: *graceful_fallback,
            ..Self::default()
        }
    }

    fn sampler(&self) -> Sampler {
        let ratio = self.sampling_ratio.clamp(0.0, 1.0);
        if (ratio - 1.0).abs() < f64::EPSILON {
            Sampler::AlwaysOn
        } else if ratio <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::TraceIdRatioBased(ratio)
        }
    }
}

/// Guard that shuts down the tracer provider when dropped
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("active", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            tracing::error!("Failed to shutdown tracer provider: {:?}", e);
        }
    }
}

fn build_provider(config: &TelemetryConfig) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.endpoint)
        .with_timeout(Duration::from_secs(config.export_timeout_secs))
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_sampler(config.sampler())
        .with_resource(resource)
        .build())
}

/// Initialize telemetry with the given configuration
///
/// Returns a guard that must be kept alive for the duration of the application.
/// When the guard is dropped, the tracer provider is shut down and pending
/// traces are flushed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .boxed()
    };

    let mut fallback_reason = None;
    let provider = if config.enabled {
        match build_provider(config) {
            Ok(provider) => Some(provider),
            Err(e) if config.graceful_fallback => {
                fallback_reason = Some(e);
                None
            },
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let otel_layer = provider
        .as_ref()
        .map(|p| OpenTelemetryLayer::new(p.tracer(config.service_name.clone())));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    match (&provider, fallback_reason) {
        (Some(_), _) => info!(
            endpoint = %config.endpoint,
            service = %config.service_name,
            sampling = %config.sampling_ratio,
            "Telemetry initialized with OTLP export"
        ),
        (None, Some(e)) => warn!(
            endpoint = %config.endpoint,
            error = %e,
            "OTLP collector unavailable, falling back to console-only logging"
        ),
        (None, None) => info!("Telemetry initialized (OTLP disabled, console only)"),
    }

    Ok(TelemetryGuard { provider })
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Failed to create OTLP exporter
    #[error("Failed to create OTLP exporter: {0}")]
    Exporter(String),
}
