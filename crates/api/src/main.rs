use anyhow::{Context, Result};
use persistence::repositories::FeatureRequestRepository;
use tokio::signal;
use tracing::info;

use feature_intake_api::{app, config, middleware, services::HttpIssueRelay};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging)?;
    middleware::init_metrics()?;

    info!("Starting Feature Intake v{}", env!("CARGO_PKG_VERSION"));

    let relay = HttpIssueRelay::from_config(&config.relay).context("building relay client")?;
    if relay.is_some() {
        info!(url = %config.relay.url, "Issue relay enabled");
    } else {
        info!("Issue relay disabled");
    }

    let addr = config.socket_addr()?;
    let app = app::create_app(config, FeatureRequestRepository::new(), relay);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
