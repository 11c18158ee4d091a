//! Handlers for the `/items` resource.

use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::Json;
use catalog_core::catalog::Item;
use catalog_core::ingest::ItemSubmission;
use catalog_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query};
use crate::response::{ItemsResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for `GET /items/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
}

/// GET /items
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ItemsResponse<Item>>> {
    let items = state.query.list_items().await?;
    Ok(Json(ItemsResponse { items }))
}

/// GET /items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Item>> {
    let item = state.query.get_item(id).await?;
    Ok(Json(item))
}

/// GET /items/search?keyword=...
///
/// Items whose name starts with `keyword`; a missing keyword matches all.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<ItemsResponse<Item>>> {
    let items = state.query.search_items(&params.keyword).await?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /items
///
/// Accepts a multipart form with `name`, `category`, `price`,
/// `price_lower_limit`, `user_id` and a file field `image`. Absent prices
/// default to 0 and an absent `user_id` leaves the item without an owner.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<MessageResponse>> {
    let mut multipart = multipart?;
    let mut submission = ItemSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                // Browsers send an empty, unnamed part when no file was chosen.
                let unnamed = field.file_name().map_or(true, str::is_empty);
                let data = field.bytes().await?;
                if !(unnamed && data.is_empty()) {
                    submission.image = Some(data.to_vec());
                }
            }
            "name" => submission.name = field_text(field).await?,
            "category" => submission.category = field_text(field).await?,
            "price" => {
                submission.price = parse_int(&name, &field_text(field).await?)?.unwrap_or(0);
            }
            "price_lower_limit" => {
                submission.price_lower_limit =
                    parse_int(&name, &field_text(field).await?)?.unwrap_or(0);
            }
            "user_id" => submission.owner_id = parse_int(&name, &field_text(field).await?)?,
            _ => {} // ignore unknown fields
        }
    }

    let receipt = state.ingest.submit_item(submission).await?;
    Ok(Json(MessageResponse::new(receipt.message)))
}

async fn field_text(field: Field<'_>) -> AppResult<String> {
    Ok(field.text().await?)
}

/// Parse an optional integer form field. Blank means absent.
fn parse_int(field: &str, text: &str) -> AppResult<Option<i64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Field '{field}' must be an integer")))
}
