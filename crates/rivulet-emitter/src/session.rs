//! Stream session lifecycle.

use std::time::Duration;

use rivulet_core::{BodySender, ResponseBody};

use crate::emitter::{Emit, EmitterHandle, PeriodicEmitter};

/// The runtime state of one streaming HTTP response.
///
/// A session ties together the response sink, the periodic emitter driving
/// writes to it, and the disconnect observer that stops emission when the
/// peer goes away. Exactly one session exists per streaming connection;
/// nothing is shared across sessions.
///
/// The session is self-terminating: dropping the handle does not stop the
/// stream, which runs until its tick work returns [`Tick::Stop`](crate::Tick)
/// or the peer disconnects. The handle exists for explicit cancellation and
/// for inspecting the lifecycle in tests.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use rivulet_core::BodySender;
/// use rivulet_emitter::{Emit, StreamSession, Tick};
///
/// struct CountTicker {
///     sink: BodySender,
/// }
///
/// impl Emit for CountTicker {
///     async fn emit(&mut self, count: u64) -> Tick {
///         if self.sink.send(format!("{count}\n")).await.is_err() {
///             return Tick::Stop;
///         }
///         Tick::Continue
///     }
/// }
///
/// let (session, body) = StreamSession::open(
///     8,
///     Duration::from_secs(1),
///     |sink| CountTicker { sink },
/// );
/// // `body` goes into the HTTP response; the ticks happen in the background.
/// # let _ = (session, body);
/// ```
#[derive(Debug)]
pub struct StreamSession {
    emitter: EmitterHandle,
}

impl StreamSession {
    /// Opens a streaming session over a fresh body channel.
    ///
    /// `make` receives the write side of the channel and returns the tick
    /// work, which owns the sink for the life of the stream. The emitter is
    /// started with the disconnect observer attached, so a peer disconnect
    /// cancels it without any action from the caller.
    #[must_use]
    pub fn open<E, M>(capacity: usize, period: Duration, make: M) -> (Self, ResponseBody)
    where
        E: Emit,
        M: FnOnce(BodySender) -> E,
    {
        let (sender, body) = ResponseBody::channel(capacity);
        let watch = sender.disconnect_watch();
        let work = make(sender);

        let emitter = PeriodicEmitter::new(period).spawn_watching(watch, work);

        (Self { emitter }, body)
    }

    /// Cancels the session's emitter.
    ///
    /// Returns `true` if this call performed the cancellation. Racing this
    /// against the completion path or the disconnect path is safe: the stop
    /// flag has exactly one winner.
    pub fn cancel(&self) -> bool {
        self.emitter.cancel()
    }

    /// Whether the session has stopped emitting, for any reason.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.emitter.is_stopped()
    }

    /// Whether the session's emitter task has fully exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.emitter.is_finished()
    }

    /// Waits for the emitter task to exit.
    pub async fn join(self) {
        self.emitter.join().await;
    }
}
