#![recursion_limit = "256"]

mod config;
mod routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
        .init();

    let cfg = match config::ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(project = %cfg.backend.project_id, region = %cfg.backend.functions_region, "backend configured");

    let app = match routes::app(cfg.backend) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "router setup failed");
            std::process::exit(1);
        }
    };
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, port = cfg.port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(port = cfg.port, "propdesk listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
    }
}
