mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use repository::NoteStore;
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notepad_server=info,tower_http=info".into()),
        )
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!("Successfully loaded notepad config: {:?}", cfg);

    // Store and service creation
    let store = Arc::new(tokio::sync::Mutex::new(NoteStore::new()));
    let service = Arc::new(NoteService::new(store));

    let router = handlers::router(service);

    let listener = tokio::net::TcpListener::bind(cfg.socket_addr())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {e}", cfg.socket_addr());
            panic!("failed to bind {}: {e}", cfg.socket_addr());
        });

    tracing::info!("Server running on http://{}", cfg.socket_addr());
    tracing::info!(
        "API documentation available at http://{}/documentation",
        cfg.socket_addr()
    );

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
        panic!("HTTP server error: {e}");
    }

    tracing::info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
