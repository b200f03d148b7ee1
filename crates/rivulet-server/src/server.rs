//! HTTP server implementation.
//!
//! A thin accept loop over Hyper's HTTP/1.1 connection handling:
//!
//! - TCP listener bound to the configured address
//! - one task per connection
//! - requests dispatched through the [`Router`]
//! - graceful shutdown draining in-flight connections
//!
//! Responses stream: a handler may return a body that is still being
//! written, and the connection task keeps delivering frames until the body
//! ends or the peer goes away.
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
//!     let server = Server::builder()
//!         .http_addr("0.0.0.0:8080")
//!         .route("/hello", hello)
//!         .build();
//!
//!     server.run().await
//! }
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};

use rivulet_core::{Handler, HttpResponse};
use rivulet_router::Router;

use crate::config::{ServerConfig, ServerConfigBuilder};
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// The Rivulet HTTP server.
pub struct Server {
    config: ServerConfig,
    router: Router,
}

impl Server {
    /// Creates a server from a configuration and a router.
    #[must_use]
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self { config, router }
    }

    /// Creates a server builder.
    #[must_use]
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the router.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Runs the server until SIGTERM or SIGINT.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address is invalid or cannot be
    /// bound.
    pub async fn run(self) -> Result<(), ServerError> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Runs the server with a caller-controlled shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address is invalid or cannot be
    /// bound.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddr {
                addr: self.config.http_addr().to_string(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        self.serve(listener, shutdown).await
    }

    /// Serves connections from an already-bound listener.
    ///
    /// Useful for tests and embedders that bind to an ephemeral port and
    /// need to know the address before the accept loop starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener's local address cannot be read.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr().map_err(ServerError::Listener)?;
        tracing::info!("server listening on http://{addr}");

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let server = Arc::clone(&server);
                            let token = tracker.acquire();
                            let shutdown = shutdown.clone();

                            tokio::spawn(async move {
                                if let Err(e) =
                                    server.handle_connection(stream, remote_addr, shutdown).await
                                {
                                    tracing::debug!(%remote_addr, error = %e, "connection ended with error");
                                }
                                drop(token);
                            });
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to accept connection");
                        }
                    }
                }

                _ = shutdown.recv() => {
                    tracing::info!("shutdown signal received, stopping accept loop");
                    break;
                }
            }
        }

        let shutdown_timeout = server.config.shutdown_timeout();
        tracing::info!(
            active = tracker.active_connections(),
            "waiting up to {shutdown_timeout:?} for connections to close"
        );

        tokio::select! {
            _ = tracker.wait_for_idle() => {
                tracing::info!("all connections closed");
            }
            _ = tokio::time::sleep(shutdown_timeout) => {
                tracing::warn!(
                    active = tracker.active_connections(),
                    "shutdown timeout reached with connections still active"
                );
            }
        }

        tracing::info!("server stopped");
        Ok(())
    }

    /// Handles one connection until it completes or shutdown fires.
    async fn handle_connection(
        self: Arc<Self>,
        stream: TcpStream,
        remote_addr: SocketAddr,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let server = Arc::clone(&self);

        let service = service_fn(move |request: http::Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { Ok::<_, Infallible>(server.handle_request(request).await) }
        });

        let conn = http1::Builder::new().serve_connection(io, service);

        tokio::select! {
            result = conn => result,
            _ = shutdown.recv() => {
                tracing::debug!(%remote_addr, "connection dropped due to shutdown");
                Ok(())
            }
        }
    }

    /// Dispatches one request through the router.
    ///
    /// None of the handlers read request bodies, so the body is discarded
    /// before dispatch.
    async fn handle_request(&self, request: http::Request<Incoming>) -> HttpResponse {
        let (parts, _body) = request.into_parts();
        let request = http::Request::from_parts(parts, ());

        tracing::debug!(
            method = %request.method(),
            path = request.uri().path(),
            "dispatching request"
        );

        self.router.dispatch(request).await
    }
}

/// Builder for [`Server`].
///
/// # Example
///
/// ```rust
/// use rivulet_server::Server;
/// use std::time::Duration;
///
/// let server = Server::builder()
///     .http_addr("127.0.0.1:9090")
///     .shutdown_timeout(Duration::from_secs(5))
///     .build();
///
/// assert_eq!(server.config().http_addr(), "127.0.0.1:9090");
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    config: ServerConfigBuilder,
    router: Router,
}

impl ServerBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP bind address.
    #[must_use]
    pub fn http_addr(mut self, addr: impl Into<String>) -> Self {
        self.config = self.config.http_addr(addr);
        self
    }

    /// Sets the graceful-shutdown timeout.
    #[must_use]
    pub fn shutdown_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.shutdown_timeout(timeout);
        self
    }

    /// Replaces the router wholesale.
    #[must_use]
    pub fn router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    /// Registers a handler for an exact path.
    #[must_use]
    pub fn route(mut self, path: impl Into<String>, handler: impl Handler) -> Self {
        self.router = self.router.route(path, handler);
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        Server {
            config: self.config.build(),
            router: self.router,
        }
    }
}

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured bind address could not be parsed.
    #[error("invalid bind address '{addr}': {source}")]
    InvalidAddr {
        /// The offending address string.
        addr: String,
        /// The parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Binding the listener failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The listener's local address could not be read.
    #[error("failed to read listener address: {0}")]
    Listener(#[source] std::io::Error),
}
