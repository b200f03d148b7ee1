//! Handler trait for request processing.
//!
//! A [`Handler`] turns a request into a response. Handlers are type-erased
//! so the router can hold a heterogeneous table of them; any
//! `async fn(HttpRequest) -> HttpResponse` (or closure of that shape)
//! implements the trait through the blanket impl.

use std::future::Future;
use std::pin::Pin;

use crate::response::HttpResponse;

/// An incoming HTTP request, reduced to its head.
///
/// None of the handlers in this workspace read request bodies; the server
/// discards the body before dispatch.
pub type HttpRequest = http::Request<()>;

/// Boxed future returned by type-erased handlers.
pub type BoxedHandlerFuture = Pin<Box<dyn Future<Output = HttpResponse> + Send + 'static>>;

/// A request handler.
///
/// Handlers must not block: a streaming handler registers its timer against
/// the response body and returns immediately, with further writes happening
/// asynchronously.
///
/// # Example
///
/// ```rust
/// use rivulet_core::{Handler, HttpRequest, HttpResponse, TextResponse};
///
/// async fn hello(_request: HttpRequest) -> HttpResponse {
///     TextResponse::new("Hello World\n").into_response()
/// }
///
/// let handler: std::sync::Arc<dyn Handler> = std::sync::Arc::new(hello);
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles a request and returns the response future.
    fn call(&self, request: HttpRequest) -> BoxedHandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HttpResponse> + Send + 'static,
{
    fn call(&self, request: HttpRequest) -> BoxedHandlerFuture {
        Box::pin(self(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::TextResponse;
    use http::StatusCode;
    use std::sync::Arc;

    async fn greeting(_request: HttpRequest) -> HttpResponse {
        TextResponse::new("hi\n").into_response()
    }

    fn request(path: &str) -> HttpRequest {
        http::Request::builder().uri(path).body(()).unwrap()
    }

    #[tokio::test]
    async fn test_fn_handler() {
        let handler: Arc<dyn Handler> = Arc::new(greeting);
        let response = handler.call(request("/hi")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_closure_handler() {
        let handler: Arc<dyn Handler> = Arc::new(|req: HttpRequest| async move {
            TextResponse::new(format!("path: {}\n", req.uri().path())).into_response()
        });

        let response = handler.call(request("/echo")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_handler_can_inspect_request() {
        let handler: Arc<dyn Handler> = Arc::new(|req: HttpRequest| async move {
            if req.uri().path() == "/known" {
                TextResponse::new("ok\n").into_response()
            } else {
                TextResponse::new("Not found\n")
                    .with_status(StatusCode::NOT_FOUND)
                    .into_response()
            }
        });

        assert_eq!(
            handler.call(request("/known")).await.status(),
            StatusCode::OK
        );
        assert_eq!(
            handler.call(request("/other")).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
