//! Demo server: three response delivery modes on port 8080.
//!
//! - `GET /hello` – fixed body
//! - `GET /chunk` – chunked stream, five timed writes then `end`
//! - `GET /sse`   – server-sent events until disconnect

use rivulet::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use rivulet_demo::handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    tracing::info!("endpoint: /hello  (fixed response)");
    tracing::info!("endpoint: /chunk  (chunked stream, 5 writes at 1s intervals)");
    tracing::info!("endpoint: /sse    (server-sent events until disconnect)");

    let server = Server::builder()
        .http_addr("0.0.0.0:8080")
        .router(handlers::router())
        .build();

    server.run().await?;
    Ok(())
}

/// Initializes the tracing subscriber from `RUST_LOG`, defaulting to `info`.
fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
