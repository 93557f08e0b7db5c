mod config;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use clap::Parser;
use config::{Cli, GatewayConfig};
use router::create_router;
use state::AppState;
use tokio::net::TcpListener;
use tokio::signal;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
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
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing (honours RUST_LOG)
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = GatewayConfig::from_cli(&cli)?;

    tracing::info!(
        instrument = %config.instrument,
        cash = %config.cash,
        accounts = config.accounts.len(),
        "Starting Gateway API service"
    );

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
