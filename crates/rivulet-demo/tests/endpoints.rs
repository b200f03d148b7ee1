//! Over-the-wire checks for the demo endpoints.
//!
//! These run the real server on an ephemeral port. The streaming endpoints
//! tick at one-second intervals, so only the cheap exchanges and the first
//! SSE record are exercised here; the full stream sequences are covered by
//! the handler tests with a paused clock.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use rivulet::prelude::*;
use rivulet_demo::handlers;

async fn start_server() -> (SocketAddr, ShutdownSignal) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = Server::builder()
        .shutdown_timeout(Duration::from_millis(200))
        .router(handlers::router())
        .build();

    let shutdown = ShutdownSignal::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        server.serve(listener, signal).await.unwrap();
    });

    (addr, shutdown)
}

async fn send_request(addr: SocketAddr, target: &str) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request =
        format!("GET {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();
    stream
}

async fn read_all(mut stream: TcpStream) -> String {
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test]
async fn test_hello() {
    let (addr, shutdown) = start_server().await;

    let response = read_all(send_request(addr, "/hello").await).await;
    let lowered = response.to_lowercase();

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
    assert!(lowered.contains("content-type: text/plain"));
    assert!(response.ends_with("Hello World\n"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_not_found() {
    let (addr, shutdown) = start_server().await;

    for target in ["/", "/nope", "/hello/extra", "/sse2"] {
        let response = read_all(send_request(addr, target).await).await;
        assert!(
            response.starts_with("HTTP/1.1 404 Not Found\r\n"),
            "target {target}: {response}"
        );
        assert!(response.ends_with("Not found\n"));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_sse_opens_with_preamble_and_first_record() {
    let (addr, shutdown) = start_server().await;

    let mut stream = send_request(addr, "/sse").await;

    // Read until the first full SSE record has arrived (~1s in).
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    let mut collected = Vec::new();
    let mut buf = [0u8; 1024];
    while !String::from_utf8_lossy(&collected).contains("data: message 1\n\n") {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for first SSE record: {}",
            String::from_utf8_lossy(&collected)
        );
        let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert!(n > 0, "connection closed before first record");
        collected.extend_from_slice(&buf[..n]);
    }

    let response = String::from_utf8_lossy(&collected).into_owned();
    let lowered = response.to_lowercase();

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "{response}");
    assert!(lowered.contains("content-type: text/event-stream"));
    assert!(lowered.contains("cache-control: no-cache"));
    assert!(response.contains("event: message\nid: 1\ndata: message 1\n\n"));

    // Hang up mid-stream; the server side stops its emitter on its own.
    drop(stream);
    shutdown.trigger();
}
