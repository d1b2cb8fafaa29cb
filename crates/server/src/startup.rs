use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::directory::DirectoryStore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the directory store and assemble the router.
///
/// The store creates the data file and its directory when missing. Fails
/// when the file exists but is not a JSON array of objects.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let store = DirectoryStore::new(&cfg.storage.data_file).await?;
    info!(path = %store.file_path().display(), "directory store ready");
    Ok(routes::build_router(ServerState::new(store), build_cors()))
}

/// Public entry: build the app and run the HTTP server on the configured address
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "directory server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
