//! Countdown Worker - A background countdown timer decoupled from its host
//! 
//! This is the main entry point for the countdown-worker application.

use std::sync::Arc;
use tokio::{
    io::{stdin, stdout, BufReader},
    net::TcpListener,
};
use tracing::info;

use countdown_worker::{
    config::Config,
    state::AppState,
    api::create_router,
    host::run_stdio_host,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout carries notifications in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_worker={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-worker v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: tick={}ms, restart_policy={:?}",
          config.tick_ms, config.restart_policy);

    if config.serve {
        serve(&config).await
    } else {
        tokio::select! {
            result = run_stdio_host(config.worker_config(), BufReader::new(stdin()), stdout()) => {
                result?;
                info!("Worker finished");
                Ok(())
            }
            result = shutdown_signal() => {
                result?;
                info!("Shutdown signal received");
                // A pending stdin read would keep the runtime alive
                std::process::exit(0);
            }
        }
    }
}

/// Serve one worker per WebSocket connection until a shutdown signal arrives
async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.worker_config()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET /worker - WebSocket, one countdown worker per connection");
    info!("  GET /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
