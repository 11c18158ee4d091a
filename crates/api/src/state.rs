use std::sync::Arc;

use catalog_core::assets::AssetStore;
use catalog_core::ingest::IngestionCoordinator;
use catalog_core::query::CatalogQuery;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly only by the health check.
    pub pool: catalog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Content-addressed image directory.
    pub assets: AssetStore,
    /// Write pipeline for items and users.
    pub ingest: IngestionCoordinator,
    /// Read paths over the catalog.
    pub query: CatalogQuery,
}

impl AppState {
    /// Wire the catalog services around one repository handle.
    pub fn new(pool: catalog_db::DbPool, config: ServerConfig, assets: AssetStore) -> Self {
        let repo = Arc::new(catalog_db::PgCatalog::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            ingest: IngestionCoordinator::new(repo.clone(), assets.clone()),
            query: CatalogQuery::new(repo),
            assets,
        }
    }
}
