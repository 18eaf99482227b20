//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host owns no business data. It publishes the backend config the
//! browser needs to reach the remote services, renders the Leptos app with
//! SSR, and serves the compiled WASM bundle from `/pkg`.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use client::config::BackendConfig;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Config and health endpoints.
pub fn api_routes(backend: BackendConfig) -> Router {
    Router::new()
        .route(client::util::remote::CONFIG_PATH, get(backend_config))
        .route("/healthz", get(healthz))
        .with_state(Arc::new(backend))
}

/// API routes + Leptos SSR + static bundle.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn app(backend: BackendConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(backend)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn backend_config(State(backend): State<Arc<BackendConfig>>) -> Json<BackendConfig> {
    Json(backend.as_ref().clone())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
