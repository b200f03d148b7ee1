//! # Rivulet
//!
//! **Streaming HTTP response toolkit for Tokio**
//!
//! Rivulet is a small server toolkit built around the lifecycle of a
//! long-lived HTTP response:
//!
//! - **Fixed responses** – buffered bodies with declared length
//! - **Chunked streams** – incremental bodies written on a timer until a
//!   terminal count is reached
//! - **Server-Sent Events** – unbounded event streams that stop on client
//!   disconnect
//! - **Explicit framing** – fixed-length vs. incremental delivery is a
//!   parameter, never an accident of a missing header
//! - **At-most-once cancellation** – the completion path and the disconnect
//!   path can race to stop a stream; exactly one wins
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rivulet::prelude::*;
//!
//! async fn hello(_request: HttpRequest) -> HttpResponse {
//!     TextResponse::new("Hello World\n").into_response()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rivulet::server::ServerError> {
//!     Server::builder()
//!         .http_addr("0.0.0.0:8080")
//!         .route("/hello", hello)
//!         .build()
//!         .run()
//!         .await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request → Router (exact path) → Handler
//!                                    ↓ fixed:    TextResponse
//!                                    ↓ streamed: StreamSession ── PeriodicEmitter
//!                                                    │                  │ tick
//!                                                    └── BodySender ←───┘
//!                                                            │
//! Response body frames ←─────────────────────────────────────┘
//! ```

#![doc(html_root_url = "https://docs.rs/rivulet/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use rivulet_core as core;

// Re-export emitter types
pub use rivulet_emitter as emitter;

// Re-export SSE types
pub use rivulet_sse as sse;

// Re-export router types
pub use rivulet_router as router;

// Re-export server types
pub use rivulet_server as server;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use rivulet::prelude::*;
/// ```
pub mod prelude {
    pub use rivulet_core::{
        BodySender, DisconnectWatch, Framing, Handler, HttpRequest, HttpResponse, ResponseBody,
        ResponseBuilder, SendError, TextResponse,
    };

    // Re-export emitter types
    pub use rivulet_emitter::{Emit, EmitterHandle, PeriodicEmitter, StreamSession, Tick};

    // Re-export SSE types
    pub use rivulet_sse::{
        sse_headers, sse_response, SseComment, SseError, SseEvent, SseItem, STREAM_PREAMBLE,
    };

    // Re-export router types
    pub use rivulet_router::Router;

    // Re-export server types
    pub use rivulet_server::{Server, ServerBuilder, ServerConfig, ServerError, ShutdownSignal};
}
