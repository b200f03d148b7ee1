//! Cancellable periodic emission for streaming responses.
//!
//! This crate provides the timer half of a streaming response:
//!
//! - [`PeriodicEmitter`] schedules a repeating action at a fixed interval
//! - [`EmitterHandle`] cancels it with at-most-once semantics, safe under a
//!   race between the completion path and the disconnect path
//! - [`StreamSession`] ties an emitter to a response body channel and its
//!   disconnect signal, covering the whole lifecycle of one streaming
//!   response
//!
//! Ticks for one emitter run on a single task, so at most one tick callback
//! is active at a time; a tick that overruns its interval delays the next
//! tick rather than overlapping it.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use rivulet_emitter::{PeriodicEmitter, Tick};
//!
//! # async fn demo() {
//! let handle = PeriodicEmitter::new(Duration::from_secs(1)).spawn(|count| async move {
//!     println!("tick {count}");
//!     if count < 5 { Tick::Continue } else { Tick::Stop }
//! });
//!
//! // Cancellation is idempotent: exactly one caller wins.
//! assert!(handle.cancel());
//! assert!(!handle.cancel());
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod emitter;
mod session;

pub use emitter::{Emit, EmitterHandle, PeriodicEmitter, Tick};
pub use session::StreamSession;
