use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{Map, Value};

use crate::error::error_body;

/// Wrap `data` in a success envelope: `{"status":"ok", ...data}`.
///
/// Non-object payloads are ignored.
pub fn ok(data: Value) -> Json<Value> {
    let mut body = Map::new();
    body.insert("status".to_owned(), Value::from("ok"));
    if let Value::Object(fields) = data {
        body.extend(fields);
    }
    Json(Value::Object(body))
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(error_body(StatusCode::NOT_FOUND, "not found")),
    )
}
