//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                 -> create (form)
/// GET    /{id}             -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create))
        .route("/{id}", get(user::get_by_id))
}
