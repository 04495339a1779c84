//! wishlist-service server entry point.
//!
//! Wires the repository and event publisher selected by configuration,
//! connects the publisher, and serves the HTTP API until shutdown.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use wishlist_service::api;
use wishlist_service::app_state::AppState;
use wishlist_service::config::{LogFormat, ServiceConfig};
use wishlist_service::domain::EventBus;
use wishlist_service::events::{AmqpPublisher, EventPublisher};
use wishlist_service::persistence::{
    InMemoryWishlistRepository, PostgresWishlistRepository, WishlistRepository,
};
use wishlist_service::service::WishlistService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting wishlist-service");

    // Build persistence layer
    let postgres = if config.persistence_enabled {
        let repo = PostgresWishlistRepository::connect(&config)
            .await
            .context("failed to connect to postgres")?;
        if config.run_migrations {
            repo.migrate().await.context("failed to run migrations")?;
        }
        Some(repo)
    } else {
        tracing::warn!("persistence disabled; wishlist items are kept in memory");
        None
    };
    let repository: Arc<dyn WishlistRepository> = match &postgres {
        Some(repo) => Arc::new(repo.clone()),
        None => Arc::new(InMemoryWishlistRepository::new()),
    };

    // Build event publisher
    let publisher: Arc<dyn EventPublisher> = if config.broker_enabled {
        Arc::new(AmqpPublisher::new(
            config.rabbitmq_url.clone(),
            config.events_exchange.clone(),
        ))
    } else {
        tracing::warn!("broker disabled; wishlist events stay in process");
        Arc::new(EventBus::new(config.event_bus_capacity))
    };
    publisher
        .connect()
        .await
        .context("failed to connect to message broker")?;

    // Build application state and router
    let service = WishlistService::new(repository, Arc::clone(&publisher));
    let app = api::build_app(AppState::new(service));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Teardown
    if let Err(e) = publisher.close().await {
        tracing::warn!(error = %e, "broker connection did not close cleanly");
    }
    if let Some(repo) = postgres {
        repo.close().await;
    }
    tracing::info!("wishlist-service stopped");

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
