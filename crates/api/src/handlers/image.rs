//! Handler for serving stored item images.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

use crate::error::{AppError, AppResult};
use crate::extract::Path;
use crate::state::AppState;

/// GET /image/{item_img}
///
/// Serves `<digest>.jpg` from the asset store. A name without the `.jpg`
/// suffix is rejected with 400; an unknown name is answered with the
/// default image.
pub async fn get(
    State(state): State<AppState>,
    Path(item_img): Path<String>,
) -> AppResult<Response> {
    let asset = state.assets.get(&item_img).await?;

    // Fallback responses must not be cached under the requested name.
    let cache_control = if asset.is_fallback {
        HeaderValue::from_static("no-cache")
    } else {
        HeaderValue::from_static("public, max-age=31536000, immutable")
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CONTENT_LENGTH, asset.bytes.len().to_string())
        .header(header::CACHE_CONTROL, cache_control)
        .body(Body::from(asset.bytes))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
