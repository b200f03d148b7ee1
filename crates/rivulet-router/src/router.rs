//! The exact-path router.

use std::collections::HashMap;
use std::sync::Arc;

use rivulet_core::{Handler, HttpRequest, HttpResponse, TextResponse};

/// Routes requests to handlers by exact path string.
///
/// Matching rules:
///
/// - the request's `uri.path()` must equal a registered path exactly;
/// - the HTTP method is not consulted;
/// - the query string is not part of the match;
/// - anything unmatched goes to the not-found handler.
///
/// # Example
///
/// ```rust
/// use rivulet_core::{HttpRequest, HttpResponse, TextResponse};
/// use rivulet_router::Router;
///
/// async fn hello(_request: HttpRequest) -> HttpResponse {
///     TextResponse::new("Hello World\n").into_response()
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let router = Router::new().route("/hello", hello);
///
/// let request = http::Request::builder().uri("/hello").body(()).unwrap();
/// let response = router.dispatch(request).await;
/// assert_eq!(response.status(), http::StatusCode::OK);
/// # }
/// ```
pub struct Router {
    routes: HashMap<String, Arc<dyn Handler>>,
    not_found: Arc<dyn Handler>,
}

impl Router {
    /// Creates an empty router with the default not-found handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            not_found: Arc::new(default_not_found),
        }
    }

    /// Registers a handler for an exact path.
    ///
    /// Registering the same path twice replaces the earlier handler.
    #[must_use]
    pub fn route(mut self, path: impl Into<String>, handler: impl Handler) -> Self {
        self.routes.insert(path.into(), Arc::new(handler));
        self
    }

    /// Replaces the not-found fallback handler.
    #[must_use]
    pub fn not_found(mut self, handler: impl Handler) -> Self {
        self.not_found = Arc::new(handler);
        self
    }

    /// Whether a handler is registered for this exact path.
    #[must_use]
    pub fn has_route(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Number of registered routes, not counting the fallback.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Selects the handler for a path.
    #[must_use]
    pub fn lookup(&self, path: &str) -> &Arc<dyn Handler> {
        self.routes.get(path).unwrap_or(&self.not_found)
    }

    /// Dispatches a request to its handler and awaits the response.
    ///
    /// Dispatch itself cannot fail: unknown paths produce the not-found
    /// response.
    pub async fn dispatch(&self, request: HttpRequest) -> HttpResponse {
        let handler = self.lookup(request.uri().path());
        handler.call(request).await
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        f.debug_struct("Router").field("routes", &paths).finish()
    }
}

async fn default_not_found(_request: HttpRequest) -> HttpResponse {
    TextResponse::new("Not found\n")
        .with_status(http::StatusCode::NOT_FOUND)
        .into_response()
}
