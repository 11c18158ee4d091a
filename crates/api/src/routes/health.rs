//! `GET /health`: can this instance accept and serve uploads right now?
//!
//! An upload needs the database for the row and a writable image
//! directory for the file; image reads need `default.jpg` for fallbacks.
//! Any failed check reports `degraded` with 503 so a load balancer can
//! take the instance out of rotation.

use std::fmt::Display;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use catalog_core::assets::DEFAULT_ASSET;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    pub assets_writable: bool,
    pub default_image: bool,
}

impl HealthReport {
    fn is_healthy(&self) -> bool {
        self.database && self.assets_writable && self.default_image
    }
}

/// Log a failed check and collapse it to `None`.
fn passed<T, E: Display>(check: &'static str, outcome: Result<T, E>) -> Option<T> {
    outcome
        .map_err(|e| tracing::warn!(check, error = %e, "Health check failed"))
        .ok()
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (database, writable, default_image) = tokio::join!(
        catalog_db::health_check(&state.pool),
        state.assets.check_writable(),
        state.assets.exists(DEFAULT_ASSET),
    );

    let mut report = HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: passed("database", database).is_some(),
        assets_writable: passed("assets_writable", writable).is_some(),
        default_image: passed("default_image", default_image).unwrap_or(false),
    };

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        report.status = "degraded";
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
