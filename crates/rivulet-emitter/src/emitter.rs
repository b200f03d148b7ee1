//! The periodic emitter and its cancellation handle.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use rivulet_core::DisconnectWatch;

/// Outcome of one tick callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Keep ticking.
    Continue,
    /// Stop the emitter; no further ticks fire.
    Stop,
}

/// Work driven by a [`PeriodicEmitter`].
///
/// Implement this on a struct when the tick needs to borrow owned state
/// (typically the response sink). Closures of shape
/// `FnMut(u64) -> impl Future<Output = Tick>` implement it through the
/// blanket impl, for ticks that own everything they touch.
///
/// `count` starts at 1 on the first tick and increments by one per tick.
pub trait Emit: Send + 'static {
    /// Runs one tick.
    fn emit(&mut self, count: u64) -> impl Future<Output = Tick> + Send;
}

impl<F, Fut> Emit for F
where
    F: FnMut(u64) -> Fut + Send + 'static,
    Fut: Future<Output = Tick> + Send,
{
    fn emit(&mut self, count: u64) -> impl Future<Output = Tick> + Send {
        self(count)
    }
}

/// Schedules a repeating action at a fixed interval.
///
/// The first tick fires one full period after [`spawn`](Self::spawn); ticks
/// missed because a callback overran are skipped, never run back to back.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicEmitter {
    period: Duration,
}

impl PeriodicEmitter {
    /// Creates an emitter with the given tick period.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Returns the tick period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts ticking on a background task.
    ///
    /// The emitter runs until the callback returns [`Tick::Stop`] or the
    /// returned handle is cancelled.
    #[must_use]
    pub fn spawn<E: Emit>(self, work: E) -> EmitterHandle {
        self.spawn_inner(None, work)
    }

    /// Starts ticking with a disconnect observer attached.
    ///
    /// When `watch` resolves (the peer dropped the response body) the
    /// emitter cancels itself and logs one diagnostic line. The observer
    /// competes with every other stop path through the same at-most-once
    /// flag, so a stream that already completed stops silently.
    #[must_use]
    pub fn spawn_watching<E: Emit>(self, watch: DisconnectWatch, work: E) -> EmitterHandle {
        self.spawn_inner(Some(watch), work)
    }

    fn spawn_inner<E: Emit>(self, watch: Option<DisconnectWatch>, mut work: E) -> EmitterHandle {
        let stopped = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());

        let flag = Arc::clone(&stopped);
        let notify = Arc::clone(&wake);
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let disconnected = async move {
                match watch {
                    Some(watch) => watch.disconnected().await,
                    // No observer registered: this branch never resolves.
                    None => std::future::pending().await,
                }
            };
            tokio::pin!(disconnected);

            let mut count: u64 = 0;

            loop {
                tokio::select! {
                    _ = notify.notified() => break,
                    _ = &mut disconnected => {
                        if flag
                            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                            .is_ok()
                        {
                            tracing::info!("client disconnected, stopping periodic emitter");
                        }
                        break;
                    }
                    _ = interval.tick() => {
                        // Cancellation may have landed between the tick
                        // firing and this point; suppress the callback.
                        if flag.load(Ordering::Acquire) {
                            break;
                        }

                        count += 1;
                        if work.emit(count).await == Tick::Stop {
                            // Claim the stop flag so a late disconnect or
                            // cancel is a silent no-op.
                            let _ = flag.compare_exchange(
                                false,
                                true,
                                Ordering::AcqRel,
                                Ordering::Acquire,
                            );
                            break;
                        }
                    }
                }
            }
        });

        EmitterHandle {
            stopped,
            wake,
            task,
        }
    }
}

/// Handle to a running [`PeriodicEmitter`].
///
/// Owned exclusively by the streaming session it belongs to. Two events may
/// race to stop the emitter (terminal count reached vs. peer disconnect);
/// the stop flag is claimed with a compare-and-swap so exactly one of them
/// performs the shutdown and the other is a no-op.
#[derive(Debug)]
pub struct EmitterHandle {
    stopped: Arc<AtomicBool>,
    wake: Arc<Notify>,
    task: JoinHandle<()>,
}

impl EmitterHandle {
    /// Cancels the emitter.
    ///
    /// Returns `true` if this call performed the cancellation, `false` if
    /// the emitter had already stopped. Safe to call any number of times.
    /// An in-flight tick completes; no tick starts after cancellation.
    pub fn cancel(&self) -> bool {
        if self
            .stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.wake.notify_one();
            true
        } else {
            false
        }
    }

    /// Whether the stop flag has been claimed by any path.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Whether the emitter task has fully exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the emitter task to exit.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}
