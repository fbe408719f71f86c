//! Docbridge HTTP server
//!
//! Main entry point for the webhook and document hosting API.

use std::{sync::Arc, time::Duration};

use application::{
    DispatchService, DocumentService,
    ports::{DocumentReadinessPort, DocumentStorePort, OutboundMessengerPort},
};
use infrastructure::{
    AppConfig, FileDocumentStore, HttpDocumentReadinessAdapter, TelemetryConfig,
    UnconfiguredMessengerAdapter, WhatsAppMessengerAdapter, init_telemetry,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

fn build_messenger(config: &AppConfig) -> Arc<dyn OutboundMessengerPort> {
    if !config.whatsapp.can_send() {
        return Arc::new(UnconfiguredMessengerAdapter);
    }
    match WhatsAppMessengerAdapter::from_config(&config.whatsapp) {
        Ok(adapter) => Arc::new(adapter),
        Err(e) => {
            warn!(error = %e, "WhatsApp client unavailable, replies will fail");
            Arc::new(UnconfiguredMessengerAdapter)
        },
    }
}

fn build_cors(config: &AppConfig) -> CorsLayer {
    if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_result = AppConfig::load();
    let config = config_result.as_ref().cloned().unwrap_or_default();

    let _telemetry = init_telemetry(&TelemetryConfig::from_app_config(&config))?;

    info!("Docbridge v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Err(e) = &config_result {
        warn!("Failed to load config, using defaults: {}", e);
    }
    for warning in config.validate() {
        warn!("{warning}");
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        storage_dir = %config.documents.storage_dir.display(),
        public_base_url = %config.public_base_url(),
        "Configuration loaded"
    );

    let messenger = build_messenger(&config);
    let readiness: Arc<dyn DocumentReadinessPort> = Arc::new(HttpDocumentReadinessAdapter::new(
        config.public_base_url(),
        config.documents.readiness_timeout(),
    )?);
    let store: Arc<dyn DocumentStorePort> =
        Arc::new(FileDocumentStore::new(config.documents.storage_dir.clone()));

    let state = AppState {
        dispatch: Arc::new(DispatchService::new(
            messenger,
            readiness,
            config.dispatch.clone(),
        )),
        documents: Arc::new(DocumentService::new(store)),
        config: Arc::new(config.clone()),
    };

    let mut app = routes::create_router(state).layer(TraceLayer::new_for_http());
    if config.server.cors_enabled {
        app = app.layer(build_cors(&config));
    }

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
