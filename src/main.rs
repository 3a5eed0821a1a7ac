use std::net::SocketAddr;
use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use product_catalog::config::LogFormat;
use product_catalog::{AppState, Config, build_router, metrics, utils};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exitcode::OK as u8),
        Err(exit_code) => ExitCode::from(exit_code as u8),
    }
}

/// Run the application, returning an exit code on error.
async fn run() -> Result<(), exitcode::ExitCode> {
    // Logging depends on config, so a config error is reported with defaults
    let config = Config::from_env().map_err(|e| {
        utils::init_tracing("info", LogFormat::Pretty);
        error!("Configuration error: {e}");
        exitcode::CONFIG
    })?;
    utils::init_tracing(&config.log_level, config.log_format);

    info!(
        "Starting Product Catalog v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(
        host = %config.host,
        port = %config.port,
        max_body_bytes = config.max_request_body_size,
        "Configuration loaded"
    );

    if let Some(metrics_addr) = config.metrics_addr() {
        // Metrics are optional; keep serving the API without them
        if let Err(e) = metrics::init_metrics(metrics_addr) {
            warn!("{e}");
        }
    }

    let addr: SocketAddr = config.server_addr().parse().map_err(|e| {
        error!("Invalid server address: {e}");
        exitcode::CONFIG
    })?;

    let state = AppState::seeded(config);
    info!(products = state.store.len().await, "Product store seeded");
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind to {addr}: {e}");
        exitcode::UNAVAILABLE
    })?;

    info!("Server listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET    /                   - Welcome banner");
    info!("  GET    /api/products       - List products");
    info!("  GET    /api/products/{{id}}  - Get product");
    info!("  POST   /api/products       - Create product (auth)");
    info!("  PUT    /api/products/{{id}}  - Update product (auth)");
    info!("  DELETE /api/products/{{id}}  - Delete product (auth)");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {e}");
            exitcode::SOFTWARE
        })?;

    info!("Server shutdown complete");
    Ok(())
}
