//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::item;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create (multipart)
/// GET    /search           -> search (?keyword=)
/// GET    /{id}             -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(item::list).post(item::create))
        .route("/search", get(item::search))
        .route("/{id}", get(item::get_by_id))
}
