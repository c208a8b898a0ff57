use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageConfig};
use service::{
    file::{FileCartStore, FileProductStore},
    runtime,
    stores::ProductCatalog,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open both file stores under the configured data directory.
pub async fn build_state(storage: &StorageConfig) -> anyhow::Result<AppState> {
    runtime::ensure_env(&storage.data_dir).await?;

    let products = FileProductStore::new(storage.products_path()).await?;
    let catalog: Arc<dyn ProductCatalog> = products;
    let carts = FileCartStore::new(&storage.data_dir, storage.cart_prefix.clone(), Arc::clone(&catalog)).await?;

    Ok(AppState { products: catalog, carts })
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.storage).await?;
    let app: Router = routes::build_router(state, build_cors(), cfg.server.max_in_flight);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, max_in_flight = cfg.server.max_in_flight, data_dir = %cfg.storage.data_dir.display(), "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
