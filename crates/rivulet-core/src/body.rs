//! Response body types.
//!
//! A [`ResponseBody`] is either a fixed buffer (the whole body is known up
//! front) or an incremental stream of frames produced while the response is
//! in flight. Streamed bodies are backed by a bounded channel: the handler
//! keeps the [`BodySender`] and writes to it asynchronously while the
//! transport drains the receiving side.
//!
//! The sender side doubles as the disconnect signal. When the peer goes away
//! the transport drops the body, which closes the channel: in-flight `send`
//! calls fail with [`SendError::Disconnected`] and any
//! [`DisconnectWatch`] obtained from the sender resolves.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::Stream;
use http_body::{Body, Frame, SizeHint};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use tokio::sync::{mpsc, watch};

use crate::error::SendError;

/// An HTTP response body.
///
/// Construct one with [`ResponseBody::fixed`] for buffered responses,
/// [`ResponseBody::from_stream`] for an existing byte stream, or
/// [`ResponseBody::channel`] for incremental writes from a handler.
///
/// # Example
///
/// ```rust
/// use rivulet_core::ResponseBody;
///
/// let body = ResponseBody::fixed("Hello World\n");
/// assert_eq!(body.content_length(), Some(12));
/// ```
pub struct ResponseBody {
    inner: BoxBody<Bytes, Infallible>,
}

impl ResponseBody {
    /// Creates an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::fixed(Bytes::new())
    }

    /// Creates a fixed body from a complete buffer.
    ///
    /// Fixed bodies report an exact size, so responses built from them can
    /// declare a `Content-Length`.
    #[must_use]
    pub fn fixed(data: impl Into<Bytes>) -> Self {
        Self {
            inner: Full::new(data.into()).boxed(),
        }
    }

    /// Creates an incremental body from a stream of byte buffers.
    ///
    /// The body ends when the stream ends. The size is unknown up front, so
    /// the transport frames the body chunked.
    #[must_use]
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Bytes> + Send + Sync + 'static,
    {
        let frames = futures_util::StreamExt::map(stream, |data| {
            Ok::<_, Infallible>(Frame::data(data))
        });
        Self {
            inner: StreamBody::new(frames).boxed(),
        }
    }

    /// Creates an incremental body fed through a bounded channel.
    ///
    /// Returns the write side and the body. The body ends once the sender is
    /// dropped and the buffered frames have drained.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rivulet_core::ResponseBody;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let (sender, _body) = ResponseBody::channel(8);
    /// sender.send("first frame\n").await.unwrap();
    /// # }
    /// ```
    #[must_use]
    pub fn channel(capacity: usize) -> (BodySender, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        let (alive_tx, alive_rx) = watch::channel(());

        let sender = BodySender {
            tx,
            closed: AtomicBool::new(false),
            frames_sent: AtomicU64::new(0),
            alive: alive_rx,
        };

        let body = Self {
            inner: ChannelBody {
                rx,
                _alive: alive_tx,
            }
            .boxed(),
        };

        (sender, body)
    }

    /// Returns the exact body size in bytes, if known.
    ///
    /// Fixed bodies always know their size; streamed bodies never do.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.inner.size_hint().exact()
    }
}

impl Body for ResponseBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.get_mut().inner).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Default for ResponseBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&'static str> for ResponseBody {
    fn from(data: &'static str) -> Self {
        Self::fixed(data)
    }
}

impl From<String> for ResponseBody {
    fn from(data: String) -> Self {
        Self::fixed(data)
    }
}

impl From<Bytes> for ResponseBody {
    fn from(data: Bytes) -> Self {
        Self::fixed(data)
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseBody")
            .field("content_length", &self.content_length())
            .finish_non_exhaustive()
    }
}

/// Channel-backed body. Holds a watch sender whose closure signals
/// disconnect to the write side.
struct ChannelBody {
    rx: mpsc::Receiver<Bytes>,
    _alive: watch::Sender<()>,
}

impl Body for ChannelBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.get_mut().rx.poll_recv(cx) {
            Poll::Ready(Some(data)) => Poll::Ready(Some(Ok(Frame::data(data)))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// The write side of a streamed response body.
///
/// A `BodySender` is exclusively owned by the streaming session writing to
/// it; it is deliberately not cloneable. Writes after [`close`](Self::close)
/// fail with [`SendError::Closed`]; writes after the peer dropped the body
/// fail with [`SendError::Disconnected`].
///
/// The body stream terminates once the sender is dropped and all buffered
/// frames have been delivered.
#[derive(Debug)]
pub struct BodySender {
    tx: mpsc::Sender<Bytes>,
    closed: AtomicBool,
    frames_sent: AtomicU64,
    alive: watch::Receiver<()>,
}

impl BodySender {
    /// Writes one frame to the body.
    pub async fn send(&self, data: impl Into<Bytes>) -> Result<(), SendError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(SendError::Closed);
        }

        self.tx
            .send(data.into())
            .await
            .map_err(|_| SendError::Disconnected)?;

        self.frames_sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Writes one frame without waiting for buffer space.
    pub fn try_send(&self, data: impl Into<Bytes>) -> Result<(), SendError> {
        use tokio::sync::mpsc::error::TrySendError;

        if self.closed.load(Ordering::Acquire) {
            return Err(SendError::Closed);
        }

        match self.tx.try_send(data.into()) {
            Ok(()) => {
                self.frames_sent.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(SendError::Full),
            Err(TrySendError::Closed(_)) => Err(SendError::Disconnected),
        }
    }

    /// Closes the sink: no further writes are accepted.
    ///
    /// Frames already buffered still drain to the peer; the body stream
    /// itself ends when the sender is dropped.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Whether the sink no longer accepts writes, either because it was
    /// closed or because the peer dropped the body.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire) || self.tx.is_closed()
    }

    /// Number of frames successfully handed to the channel.
    #[must_use]
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent.load(Ordering::Relaxed)
    }

    /// Returns a watch that resolves when the transport drops the body.
    #[must_use]
    pub fn disconnect_watch(&self) -> DisconnectWatch {
        DisconnectWatch {
            alive: self.alive.clone(),
        }
    }
}

/// A handle that resolves once the peer has dropped the response body.
///
/// Obtained from [`BodySender::disconnect_watch`]. The watch fires for any
/// body teardown, including normal completion, so observers must pair it
/// with an at-most-once cancellation to distinguish the two.
#[derive(Debug, Clone)]
pub struct DisconnectWatch {
    alive: watch::Receiver<()>,
}

impl DisconnectWatch {
    /// Waits until the body has been dropped.
    pub async fn disconnected(mut self) {
        // The watch carries no values; `changed` only returns once the
        // sender inside the body is gone.
        while self.alive.changed().await.is_ok() {}
    }

    /// Whether the body has already been dropped.
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        self.alive.has_changed().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn collect(body: ResponseBody) -> Bytes {
        body.collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_fixed_body() {
        let body = ResponseBody::fixed("Hello World\n");
        assert_eq!(body.content_length(), Some(12));
        assert_eq!(collect(body).await, Bytes::from("Hello World\n"));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let body = ResponseBody::empty();
        assert_eq!(body.content_length(), Some(0));
        assert!(collect(body).await.is_empty());
    }

    #[tokio::test]
    async fn test_channel_body_delivers_frames_in_order() {
        let (sender, body) = ResponseBody::channel(8);

        sender.send("one\n").await.unwrap();
        sender.send("two\n").await.unwrap();
        drop(sender);

        assert_eq!(collect(body).await, Bytes::from("one\ntwo\n"));
    }

    #[tokio::test]
    async fn test_channel_body_has_no_known_length() {
        let (_sender, body) = ResponseBody::channel(8);
        assert_eq!(body.content_length(), None);
    }

    #[tokio::test]
    async fn test_send_after_close_is_rejected() {
        let (sender, _body) = ResponseBody::channel(8);

        sender.send("ok\n").await.unwrap();
        sender.close();

        assert_eq!(sender.send("late\n").await, Err(SendError::Closed));
        assert!(sender.is_closed());
    }

    #[tokio::test]
    async fn test_buffered_frames_drain_after_close() {
        let (sender, body) = ResponseBody::channel(8);

        sender.send("kept\n").await.unwrap();
        sender.close();
        drop(sender);

        assert_eq!(collect(body).await, Bytes::from("kept\n"));
    }

    #[tokio::test]
    async fn test_send_after_body_dropped_is_disconnected() {
        let (sender, body) = ResponseBody::channel(8);
        drop(body);

        assert_eq!(sender.send("gone\n").await, Err(SendError::Disconnected));
        assert!(sender.is_closed());
    }

    #[tokio::test]
    async fn test_try_send_full() {
        let (sender, _body) = ResponseBody::channel(1);

        sender.try_send("fits\n").unwrap();
        assert_eq!(sender.try_send("overflow\n"), Err(SendError::Full));
    }

    #[tokio::test]
    async fn test_frames_sent_counter() {
        let (sender, _body) = ResponseBody::channel(8);

        assert_eq!(sender.frames_sent(), 0);
        sender.send("a").await.unwrap();
        sender.send("b").await.unwrap();
        assert_eq!(sender.frames_sent(), 2);
    }

    #[tokio::test]
    async fn test_disconnect_watch_fires_on_body_drop() {
        let (sender, body) = ResponseBody::channel(8);
        let watch = sender.disconnect_watch();
        assert!(!watch.is_disconnected());

        drop(body);

        tokio::time::timeout(Duration::from_secs(1), watch.disconnected())
            .await
            .expect("watch should resolve after the body is dropped");
        assert!(sender.disconnect_watch().is_disconnected());
    }

    #[tokio::test]
    async fn test_disconnect_watch_pends_while_body_alive() {
        let (sender, _body) = ResponseBody::channel(8);
        let watch = sender.disconnect_watch();

        let result =
            tokio::time::timeout(Duration::from_millis(50), watch.disconnected()).await;
        assert!(result.is_err(), "watch must not fire while the body lives");
    }

    #[tokio::test]
    async fn test_from_stream() {
        let stream = futures_util::stream::iter(vec![
            Bytes::from("alpha "),
            Bytes::from("beta"),
        ]);
        let body = ResponseBody::from_stream(stream);

        assert_eq!(body.content_length(), None);
        assert_eq!(collect(body).await, Bytes::from("alpha beta"));
    }
}
