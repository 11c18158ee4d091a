//! Read paths over the catalog.

use std::sync::Arc;

use crate::catalog::{CatalogRepository, Item, UserProfile};
use crate::error::CoreError;
use crate::types::DbId;

/// Pass-through reads; a by-id miss becomes [`CoreError::NotFound`].
#[derive(Clone)]
pub struct CatalogQuery {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogQuery {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, CoreError> {
        self.repo.list_items().await
    }

    pub async fn get_item(&self, id: DbId) -> Result<Item, CoreError> {
        self.repo
            .find_item(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Item", id))
    }

    pub async fn find_user(&self, id: DbId) -> Result<UserProfile, CoreError> {
        self.repo
            .find_user(id)
            .await?
            .ok_or_else(|| CoreError::not_found("User", id))
    }

    pub async fn search_items(&self, keyword: &str) -> Result<Vec<Item>, CoreError> {
        tracing::debug!(keyword, "Searching items by name prefix");
        self.repo.search_items(keyword).await
    }
}
