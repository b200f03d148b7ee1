//! Exact-path request dispatch.
//!
//! The [`Router`] maps an incoming request's path to exactly one handler by
//! exact string equality: no wildcard or prefix matching, no method
//! distinction, query strings ignored. Every path maps to a handler: paths
//! outside the table go to the not-found fallback, so dispatch never fails.
//!
//! # Example
//!
//! ```rust
//! use rivulet_core::{HttpRequest, HttpResponse, TextResponse};
//! use rivulet_router::Router;
//!
//! async fn hello(_request: HttpRequest) -> HttpResponse {
//!     TextResponse::new("Hello World\n").into_response()
//! }
//!
//! let router = Router::new().route("/hello", hello);
//! assert!(router.has_route("/hello"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod router;

pub use router::Router;
