//! HTTP/1.1 server for Rivulet.
//!
//! Built on Hyper and Tokio. The server owns the accept loop and graceful
//! shutdown; routing and handlers come from
//! [`rivulet-router`](rivulet_router) and response bodies (fixed or
//! streamed) from [`rivulet-core`](rivulet_core).
//!
//! # Example
//!
//! ```rust,no_run
//! use rivulet_core::{HttpRequest, HttpResponse, TextResponse};
//! use rivulet_server::Server;
//!
//! async fn hello(_request: HttpRequest) -> HttpResponse {
//!     TextResponse::new("Hello World\n").into_response()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rivulet_server::ServerError> {
//!     Server::builder()
//!         .http_addr("0.0.0.0:8080")
//!         .route("/hello", hello)
//!         .build()
//!         .run()
//!         .await
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
mod server;
pub mod shutdown;

pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_HTTP_ADDR};
pub use server::{Server, ServerBuilder, ServerError};
pub use shutdown::{ConnectionTracker, ConnectionToken, ShutdownSignal};
