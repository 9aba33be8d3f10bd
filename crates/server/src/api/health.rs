use axum::Json;
use axum::http::header;
use axum::response::IntoResponse;
use serde_json::{Value, json};

use super::response::ok;

/// Liveness probe. Never cached, never authenticated.
pub async fn health() -> impl IntoResponse {
    let body: Json<Value> = ok(json!({ "version": env!("CARGO_PKG_VERSION") }));
    ([(header::CACHE_CONTROL, "no-cache")], body)
}
