//! [`CatalogRepository`] backed by PostgreSQL.

use async_trait::async_trait;
use catalog_core::catalog::{CatalogRepository, Item, NewItem, NewUser, UserProfile};
use catalog_core::error::CoreError;
use catalog_core::types::DbId;

use crate::repositories::{ItemRepo, UserRepo};
use crate::DbPool;

/// The catalog repository used by the running service.
///
/// Constructed once at startup around the shared pool; cloning is cheap.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: DbPool,
}

impl PgCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn driver_error(op: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(op, error = %err, "Catalog query failed");
        CoreError::persistence(err)
    }
}

#[async_trait]
impl CatalogRepository for PgCatalog {
    async fn insert_item(&self, item: &NewItem) -> Result<Item, CoreError> {
        ItemRepo::create(&self.pool, item)
            .await
            .map(Item::from)
            .map_err(driver_error("insert_item"))
    }

    async fn insert_user(&self, user: &NewUser) -> Result<UserProfile, CoreError> {
        UserRepo::create(&self.pool, user)
            .await
            .map(UserProfile::from)
            .map_err(driver_error("insert_user"))
    }

    async fn list_items(&self) -> Result<Vec<Item>, CoreError> {
        let rows = ItemRepo::list(&self.pool)
            .await
            .map_err(driver_error("list_items"))?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_item(&self, id: DbId) -> Result<Option<Item>, CoreError> {
        ItemRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(Item::from))
            .map_err(driver_error("find_item"))
    }

    async fn find_user(&self, id: DbId) -> Result<Option<UserProfile>, CoreError> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(UserProfile::from))
            .map_err(driver_error("find_user"))
    }

    async fn search_items(&self, keyword: &str) -> Result<Vec<Item>, CoreError> {
        let rows = ItemRepo::search_by_name_prefix(&self.pool, keyword)
            .await
            .map_err(driver_error("search_items"))?;
        Ok(rows.into_iter().map(Item::from).collect())
    }
}
