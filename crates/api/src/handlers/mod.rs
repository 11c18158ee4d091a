pub mod image;
pub mod item;
pub mod user;

use axum::Json;

use crate::response::MessageResponse;

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello, world!"))
}
