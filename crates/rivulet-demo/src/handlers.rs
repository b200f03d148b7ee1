//! The demo endpoints.
//!
//! Three delivery modes behind exact paths:
//!
//! - `/hello`: fixed body, declared length
//! - `/chunk`: five timed chunks, a final `end`, then close
//! - `/sse`: event records every second until the client disconnects
//!
//! Anything else falls through to the router's 404.

use std::time::Duration;

use rivulet::prelude::*;

/// Tick period shared by both streaming endpoints.
pub const EMIT_PERIOD: Duration = Duration::from_millis(1000);

/// Number of chunks `/chunk` delivers before the final `end`.
pub const CHUNK_COUNT: u64 = 5;

/// Body channel capacity for the streaming endpoints.
const CHANNEL_CAPACITY: usize = 8;

/// Builds the demo routing table.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/hello", hello)
        .route("/chunk", chunk)
        .route("/sse", sse)
}

/// `/hello`: status 200, `Content-Type: text/plain`, body `Hello World\n`.
///
/// Synchronous and deterministic; no timers involved.
pub async fn hello(_request: HttpRequest) -> HttpResponse {
    TextResponse::new("Hello World\n").into_response()
}

/// `/chunk`: incremental text response driven by a periodic emitter.
///
/// Writes `chunk #N\n` for N = 1..=5 at one-second intervals, then `end\n`,
/// then closes. The session's disconnect observer stops the emitter if the
/// client hangs up mid-stream.
pub async fn chunk(_request: HttpRequest) -> HttpResponse {
    let (_session, body) =
        StreamSession::open(CHANNEL_CAPACITY, EMIT_PERIOD, |sink| ChunkTicker { sink });

    ResponseBuilder::new(Framing::Incremental)
        .content_type("text/plain")
        .body(body)
}

/// `/sse`: unbounded event stream until the client disconnects.
///
/// Emits one `message` record per second with a monotonically increasing id,
/// starting at 1.
pub async fn sse(_request: HttpRequest) -> HttpResponse {
    let (_session, body) = StreamSession::open(CHANNEL_CAPACITY, EMIT_PERIOD, |sink| {
        // Open the stream for clients that wait for a leading blank line.
        let _ = sink.try_send(STREAM_PREAMBLE);
        SseTicker { sink }
    });

    sse_response(body)
}

struct ChunkTicker {
    sink: BodySender,
}

impl Emit for ChunkTicker {
    async fn emit(&mut self, count: u64) -> Tick {
        if self.sink.send(format!("chunk #{count}\n")).await.is_err() {
            return Tick::Stop;
        }

        if count == CHUNK_COUNT {
            let _ = self.sink.send("end\n").await;
            self.sink.close();
            return Tick::Stop;
        }
        Tick::Continue
    }
}

struct SseTicker {
    sink: BodySender,
}

impl Emit for SseTicker {
    async fn emit(&mut self, id: u64) -> Tick {
        let record = SseEvent::new(format!("message {id}"))
            .event("message")
            .id(id.to_string());

        if self.sink.send(record.to_bytes()).await.is_err() {
            return Tick::Stop;
        }
        Tick::Continue
    }
}
