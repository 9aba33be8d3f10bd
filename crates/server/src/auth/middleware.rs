use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, header};
use axum::response::{IntoResponse, Response};
use tower::{Layer, Service};
use tracing::warn;

use super::identity::Owner;
use super::{AuthProvider, parse_basic};
use crate::error::ServerError;

/// Tower layer that resolves the caller from HTTP Basic credentials.
///
/// With no provider (auth disabled) the Basic username is trusted as-is and
/// the password is ignored.
#[derive(Clone)]
pub struct AuthLayer {
    provider: Option<Arc<AuthProvider>>,
}

impl AuthLayer {
    pub fn new(provider: Option<Arc<AuthProvider>>) -> Self {
        Self { provider }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            provider: self.provider.clone(),
        }
    }
}

/// Tower service that authenticates requests and injects [`Owner`].
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    provider: Option<Arc<AuthProvider>>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let provider = self.provider.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some((email, password)) = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_basic)
            else {
                return Ok(unauthorized("missing authentication credentials"));
            };

            let owner = match provider {
                None => Owner::from_email(&email),
                Some(provider) => match provider.authenticate(&email, &password) {
                    Some(owner) => owner,
                    None => {
                        warn!(email = %email, "rejected credentials");
                        return Ok(unauthorized("invalid credentials"));
                    }
                },
            };

            req.extensions_mut().insert(owner);
            inner.call(req).await
        })
    }
}

fn unauthorized(message: &str) -> Response {
    ServerError::Unauthorized(message.to_owned()).into_response()
}
