//! Method-based access control middleware.
//!
//! Rejects every request using a denied HTTP method before it reaches the
//! router. With the default wiring that method is `DELETE`, so every delete
//! attempt receives:
//!
//! ```text
//! HTTP/1.1 403 Forbidden
//! Content-Type: text/plain; charset=utf-8
//!
//! No tienes permiso para borrar.
//! ```
//!
//! # Configuration
//!
//! Set `DENY_DELETE=false` to leave the layer out of the stack and make the
//! `DELETE /todos/{id}` route reachable.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::response::IntoResponse;
use tower::{Layer, Service};
use tracing::warn;

use crate::error::AppError;
use crate::metrics;

/// Plain-text body returned for denied deletes.
pub const DELETE_FORBIDDEN_MESSAGE: &str = "No tienes permiso para borrar.";

/// Access control layer rejecting a single HTTP method.
#[derive(Clone)]
pub struct DenyMethodLayer {
    method: Method,
    message: Arc<str>,
}

impl DenyMethodLayer {
    /// Deny `method` with a 403 carrying `message`.
    pub fn new(method: Method, message: impl Into<Arc<str>>) -> Self {
        Self {
            method,
            message: message.into(),
        }
    }

    /// Deny every `DELETE` request.
    pub fn deny_delete() -> Self {
        Self::new(Method::DELETE, DELETE_FORBIDDEN_MESSAGE)
    }

    /// Whether `method` is rejected by this layer.
    pub fn denies(&self, method: &Method) -> bool {
        *method == self.method
    }
}

impl<S> Layer<S> for DenyMethodLayer {
    type Service = DenyMethodService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DenyMethodService {
            inner,
            layer: self.clone(),
        }
    }
}

/// Access control service wrapper.
#[derive(Clone)]
pub struct DenyMethodService<S> {
    inner: S,
    layer: DenyMethodLayer,
}

impl<S> Service<Request<Body>> for DenyMethodService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        if self.layer.denies(req.method()) {
            warn!(
                method = %req.method(),
                path = %req.uri().path(),
                "Request method denied"
            );
            metrics::record_access_denied(req.method().as_str());
            let response = AppError::Forbidden(self.layer.message.to_string()).into_response();
            return Box::pin(async move { Ok(response) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}
