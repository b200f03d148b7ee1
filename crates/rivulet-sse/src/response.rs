//! SSE response construction.

use http::header::{HeaderValue, CACHE_CONTROL, CONNECTION, CONTENT_TYPE};

use rivulet_core::{Framing, HttpResponse, ResponseBody, ResponseBuilder};

/// Returns the canonical SSE response headers.
///
/// `Content-Type: text/event-stream`, `Cache-Control: no-cache`, and
/// `Connection: keep-alive`.
#[must_use]
pub fn sse_headers() -> http::HeaderMap {
    let mut headers = http::HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/event-stream"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Builds a 200 SSE response around the given body.
///
/// The body streams with incremental framing; event records are written to
/// it as they are produced.
///
/// # Example
///
/// ```rust
/// use rivulet_core::ResponseBody;
///
/// let (_sender, body) = ResponseBody::channel(8);
/// let response = rivulet_sse::sse_response(body);
///
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.headers()["content-type"], "text/event-stream");
/// ```
#[must_use]
pub fn sse_response(body: ResponseBody) -> HttpResponse {
    let mut builder = ResponseBuilder::new(Framing::Incremental);
    for (name, value) in &sse_headers() {
        builder = builder.header(name.clone(), value.clone());
    }
    builder.body(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_headers() {
        let headers = sse_headers();
        assert_eq!(headers[CONTENT_TYPE], "text/event-stream");
        assert_eq!(headers[CACHE_CONTROL], "no-cache");
        assert_eq!(headers[CONNECTION], "keep-alive");
    }

    #[test]
    fn test_sse_response_streams_without_declared_length() {
        let (_sender, body) = ResponseBody::channel(4);
        let response = sse_response(body);

        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/event-stream");
        assert!(response.headers().get(http::header::CONTENT_LENGTH).is_none());
    }
}
