pub mod health;
pub mod items;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the catalog route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                        greeting
/// /health                  database and image directory readiness
///
/// /items                   list, create (multipart)
/// /items/search            prefix search by name
/// /items/{id}              get
///
/// /image/{item_img}        serve stored image (falls back to default.jpg)
///
/// /users                   register (form)
/// /users/{id}              get public profile
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .merge(health::router())
        .nest("/items", items::router())
        .route("/image/{item_img}", get(handlers::image::get))
        .nest("/users", users::router())
}
