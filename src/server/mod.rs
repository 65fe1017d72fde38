pub mod handlers;
mod types;

pub use types::*;

use crate::{
    Result,
    config::Config,
    dashscope::DashScopeClient,
    editor::ImageEditor,
    style::{DEFAULT_MODEL, StyleCatalog},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

/// Uploaded images arrive base64-encoded inside the JSON body.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Landing page served at `/`.
pub const INDEX_FILE: &str = "index.html";
/// Subdirectory of the static dir exposed under `/assets`.
pub const ASSETS_DIR: &str = "assets";

/// Only the landing page and the assets directory are served from
/// `static_dir`; any other file in it stays private.
pub fn router(state: AppState, static_dir: &str) -> Router {
    let static_dir = Path::new(static_dir);
    let index = ServeFile::new(static_dir.join(INDEX_FILE));

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/image-edit", post(handlers::image_edit))
        .route("/api/debug-response", post(handlers::debug_response))
        .route_service("/", index.clone())
        .route_service("/index.html", index)
        .nest_service("/assets", ServeDir::new(static_dir.join(ASSETS_DIR)))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn app_state(config: &Config) -> AppState {
    let catalog = Arc::new(StyleCatalog::builtin());
    let client = Arc::new(DashScopeClient::new(
        &config.dashscope.base_url,
        config.api_key(),
    ));

    let editor = ImageEditor::new(
        catalog,
        client,
        Duration::from_secs(config.dashscope.edit_timeout_secs),
        Duration::from_secs(config.dashscope.debug_timeout_secs),
    );

    AppState {
        editor: Arc::new(editor),
        model: DEFAULT_MODEL.to_string(),
    }
}

pub async fn run(config: Config) -> Result<()> {
    let app = router(app_state(&config), &config.server.static_dir);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);
    info!("Upstream endpoint base: {}", config.dashscope.base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
