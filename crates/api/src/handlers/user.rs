//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use catalog_core::catalog::{NewUser, UserProfile};
use catalog_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{Form, Path};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /users
///
/// URL-encoded form with `name` and `password`. Missing fields are treated
/// as empty and rejected by validation.
pub async fn create(
    State(state): State<AppState>,
    Form(input): Form<NewUser>,
) -> AppResult<Json<MessageResponse>> {
    let receipt = state.ingest.register_user(input).await?;
    Ok(Json(MessageResponse::new(receipt.message)))
}

/// GET /users/{id}
///
/// Returns only `id` and `name`.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserProfile>> {
    let user = state.query.find_user(id).await?;
    Ok(Json(user))
}
