use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use fragments_model::FragmentList;

use super::AppState;
use super::response::ok;
use crate::auth::Owner;
use crate::error::ServerError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    expand: Option<String>,
}

impl ListParams {
    fn expand(&self) -> bool {
        matches!(self.expand.as_deref(), Some("1" | "true"))
    }
}

fn content_type(headers: &HeaderMap) -> Result<String, ServerError> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ServerError::BadRequest("Content-Type header is required".to_owned()))
}

fn body_error(rejection: &BytesRejection) -> ServerError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge(rejection.body_text())
    } else {
        ServerError::BadRequest(rejection.body_text())
    }
}

/// Split `{id}.{ext}` into the id and the requested extension.
///
/// Only a non-empty alphanumeric suffix after the last `.` counts as an
/// extension; anything else is treated as part of the id.
pub fn split_extension(raw: &str) -> (&str, Option<&str>) {
    match raw.rsplit_once('.') {
        Some((id, ext))
            if !id.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            (id, Some(ext))
        }
        _ => (raw, None),
    }
}

/// `GET /v1/fragments` lists the caller's fragment ids, or full records with
/// `?expand=1`.
pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ServerError> {
    let fragments = match state.fragments.by_user(&owner.id, params.expand()).await? {
        FragmentList::Ids(ids) => json!(ids),
        FragmentList::Expanded(records) => json!(records),
    };
    Ok(ok(json!({ "fragments": fragments })))
}

/// `POST /v1/fragments` stores the raw body as a new fragment.
pub async fn create(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ServerError> {
    let content_type = content_type(&headers)?;
    let body = body.map_err(|e| body_error(&e))?;

    let fragment = state
        .fragments
        .create(owner.id.clone(), content_type, body)
        .await
        .inspect_err(|e| warn!(owner = %owner.id, error = %e, "fragment not created"))?;

    info!(
        owner = %owner.id,
        id = %fragment.id(),
        content_type = %fragment.content_type(),
        size = fragment.size(),
        "fragment created"
    );

    let location = format!("{}/v1/fragments/{}", state.external_url, fragment.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        ok(json!({ "fragment": fragment.record() })),
    )
        .into_response())
}

/// `GET /v1/fragments/{id}[.ext]` returns the data, converted when an
/// extension is given.
pub async fn fetch(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(raw): Path<String>,
) -> Result<Response, ServerError> {
    let (id, extension) = split_extension(&raw);
    let fragment = state.fragments.by_id(&owner.id, id).await?;
    let data = fragment.get_data(&state.fragments).await?;

    let converted = fragments_convert::convert(fragment.content_type(), data, extension)
        .inspect_err(|e| warn!(id = %id, extension = ?extension, error = %e, "conversion refused"))?;

    Ok(([(header::CONTENT_TYPE, converted.content_type)], converted.data).into_response())
}

/// `GET /v1/fragments/{id}/info` returns the metadata record.
pub async fn info(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let fragment = state.fragments.by_id(&owner.id, &id).await?;
    Ok(ok(json!({
        "fragment": fragment.record(),
        "formats": fragment.formats(),
    })))
}

/// `PUT /v1/fragments/{id}` replaces the data. The declared type is fixed at
/// creation, so the request's `Content-Type` must match it exactly.
pub async fn update(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, ServerError> {
    let mut fragment = state.fragments.by_id(&owner.id, &id).await?;
    let content_type = content_type(&headers)?;
    if content_type != fragment.content_type() {
        warn!(
            owner = %owner.id,
            id = %id,
            expected = %fragment.content_type(),
            actual = %content_type,
            "Content-Type mismatch on update"
        );
        return Err(ServerError::BadRequest(
            "Content-Type does not match the fragment type".to_owned(),
        ));
    }
    let body = body.map_err(|e| body_error(&e))?;

    fragment.set_data(&state.fragments, body).await?;
    info!(owner = %owner.id, id = %id, size = fragment.size(), "fragment updated");

    Ok(ok(json!({
        "fragment": fragment.record(),
        "formats": fragment.formats(),
    })))
}

/// `DELETE /v1/fragments/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    state.fragments.delete(&owner.id, &id).await?;
    Ok(ok(Value::Null))
}
