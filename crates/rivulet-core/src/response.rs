//! Response construction.
//!
//! The [`ResponseBuilder`] makes the framing decision explicit: callers
//! state whether the body length is declared up front ([`Framing::Fixed`])
//! or the body streams without a declared length
//! ([`Framing::Incremental`]). Nothing here relies on "leaving a header
//! unset" as the mechanism for selecting chunked transfer.

use http::header::{HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use http::StatusCode;

use crate::body::ResponseBody;

/// An HTTP response carrying a [`ResponseBody`].
pub type HttpResponse = http::Response<ResponseBody>;

/// How the response body is framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// The total body length is declared up front via `Content-Length`.
    ///
    /// Requires a body with a known exact size; bodies created with
    /// [`ResponseBody::fixed`] always qualify.
    Fixed,

    /// No length is declared; the transport frames the body incrementally
    /// (chunked transfer encoding on HTTP/1.1).
    Incremental,
}

/// Builder for HTTP responses with an explicit framing choice.
///
/// # Example
///
/// ```rust
/// use http::StatusCode;
/// use rivulet_core::{Framing, ResponseBody, ResponseBuilder};
///
/// let response = ResponseBuilder::new(Framing::Fixed)
///     .status(StatusCode::OK)
///     .content_type("text/plain")
///     .body(ResponseBody::fixed("Hello World\n"));
///
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.headers()["content-length"], "12");
/// ```
#[derive(Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    framing: Framing,
    headers: http::HeaderMap,
}

impl ResponseBuilder {
    /// Creates a builder with status 200 and the given framing.
    #[must_use]
    pub fn new(framing: Framing) -> Self {
        Self {
            status: StatusCode::OK,
            framing,
            headers: http::HeaderMap::new(),
        }
    }

    /// Sets the response status.
    #[must_use]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Sets the `Content-Type` header.
    #[must_use]
    pub fn content_type(mut self, value: &'static str) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(value));
        self
    }

    /// Sets an arbitrary header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Finishes the response.
    ///
    /// With [`Framing::Fixed`] the body's exact size is declared as
    /// `Content-Length`. With [`Framing::Incremental`] no length is declared
    /// and the transport streams the frames as they arrive.
    #[must_use]
    pub fn body(self, body: ResponseBody) -> HttpResponse {
        let content_length = match self.framing {
            Framing::Fixed => body.content_length(),
            Framing::Incremental => None,
        };

        let mut response = http::Response::new(body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;

        if let Some(len) = content_length {
            response
                .headers_mut()
                .insert(CONTENT_LENGTH, HeaderValue::from(len));
        }

        response
    }
}

/// Plain-text response builder.
///
/// Produces a fixed-framing response with `Content-Type: text/plain`.
///
/// # Example
///
/// ```rust
/// use http::StatusCode;
/// use rivulet_core::TextResponse;
///
/// let response = TextResponse::new("Not found\n")
///     .with_status(StatusCode::NOT_FOUND)
///     .into_response();
///
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone)]
pub struct TextResponse {
    body: String,
    status: StatusCode,
}

impl TextResponse {
    /// Creates a new text response with status 200 OK.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status: StatusCode::OK,
        }
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Converts into an HTTP response.
    #[must_use]
    pub fn into_response(self) -> HttpResponse {
        ResponseBuilder::new(Framing::Fixed)
            .status(self.status)
            .content_type("text/plain")
            .body(ResponseBody::fixed(self.body))
    }
}

impl From<TextResponse> for HttpResponse {
    fn from(text: TextResponse) -> Self {
        text.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_text_response() {
        let response = TextResponse::new("Hello World\n").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(response.headers()[CONTENT_LENGTH], "12");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "Hello World\n");
    }

    #[test]
    fn test_text_response_custom_status() {
        let response = TextResponse::new("Not found\n")
            .with_status(StatusCode::NOT_FOUND)
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn test_incremental_framing_declares_no_length() {
        let (_sender, body) = ResponseBody::channel(4);
        let response = ResponseBuilder::new(Framing::Incremental)
            .content_type("text/plain")
            .body(body);

        assert!(response.headers().get(CONTENT_LENGTH).is_none());
    }

    #[test]
    fn test_fixed_framing_declares_length() {
        let response = ResponseBuilder::new(Framing::Fixed)
            .content_type("text/plain")
            .body(ResponseBody::fixed("abc"));

        assert_eq!(response.headers()[CONTENT_LENGTH], "3");
    }

    #[test]
    fn test_builder_custom_header() {
        let response = ResponseBuilder::new(Framing::Incremental)
            .header(
                http::header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache"),
            )
            .body(ResponseBody::empty());

        assert_eq!(response.headers()[http::header::CACHE_CONTROL], "no-cache");
    }
}
