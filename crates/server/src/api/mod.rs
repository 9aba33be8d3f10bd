pub mod fragments;
pub mod health;
pub mod response;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use fragments_model::Fragments;

use crate::auth::AuthProvider;
use crate::auth::middleware::AuthLayer;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Metadata and data stores.
    pub fragments: Fragments,
    /// Optional auth provider (None when auth is disabled).
    pub auth: Option<Arc<AuthProvider>>,
    /// Base URL for `Location` headers, without a trailing slash.
    pub external_url: String,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

/// Build the Axum router with all API routes and middleware.
pub fn router(state: AppState) -> Router {
    let public = Router::new().route("/health", get(health::health));

    let protected = Router::new()
        .route(
            "/v1/fragments",
            get(fragments::list).post(fragments::create),
        )
        .route(
            "/v1/fragments/{id}",
            get(fragments::fetch)
                .put(fragments::update)
                .delete(fragments::remove),
        )
        .route("/v1/fragments/{id}/info", get(fragments::info))
        .layer(AuthLayer::new(state.auth.clone()));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(response::not_found)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
