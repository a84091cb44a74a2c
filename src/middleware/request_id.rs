//! Request ID middleware.
//!
//! Every request gets an `X-Request-Id`: the client's own value when one is
//! supplied, otherwise a fresh UUIDv4. The id is visible to inner layers
//! (the logging middleware prints it) and echoed on the response.
//!
//! ```bash
//! curl -i -H "X-Request-Id: my-correlation-id" http://localhost:3000/todos
//! ```

use axum::extract::Request;
use axum::http::header::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware attaching a request id to the request and its response.
pub async fn assign_request_id(mut request: Request, next: Next) -> Response {
    let header = match existing_request_id(&request) {
        Some(value) => value,
        None => HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
    };

    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, header.clone());

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, header);
    response
}

fn existing_request_id<B>(req: &axum::http::Request<B>) -> Option<HeaderValue> {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty() && v.to_str().is_ok())
        .cloned()
}

/// Extension trait to read the request id assigned by [`assign_request_id`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<String>;
}

impl<B> RequestIdExt for axum::http::Request<B> {
    fn request_id(&self) -> Option<String> {
        self.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::routing::get;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/echo",
                get(|req: Request| async move { req.request_id().unwrap_or_default() }),
            )
            .layer(axum::middleware::from_fn(assign_request_id))
    }

    #[tokio::test]
    async fn test_existing_request_id_is_kept() {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/echo")
                    .header(REQUEST_ID_HEADER, "existing-id-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "existing-id-123"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"existing-id-123");
    }

    #[tokio::test]
    async fn test_missing_request_id_is_generated() {
        let response = app()
            .oneshot(axum::http::Request::builder().uri("/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_request_id_ext_none() {
        let req = axum::http::Request::builder().body(()).unwrap();
        assert_eq!(req.request_id(), None);
    }
}
