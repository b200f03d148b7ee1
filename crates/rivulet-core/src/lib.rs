//! Core types for the Rivulet streaming HTTP toolkit.
//!
//! This crate provides the building blocks shared by the rest of the
//! workspace:
//!
//! - [`ResponseBody`]: an HTTP response body that is either a fixed buffer
//!   or an incremental stream of frames
//! - [`BodySender`]: the write side of a streamed body: incremental writes,
//!   an explicit terminal close, and a disconnect notification
//! - [`Framing`]: the explicit choice between fixed-length and incremental
//!   response framing
//! - [`Handler`]: the type-erased async request handler invoked by the
//!   router
//! - [`TextResponse`]: builder for plain-text responses
//!
//! Streaming crates build on the body channel: a handler creates the channel,
//! hands the [`ResponseBody`] to the transport, and keeps the [`BodySender`]
//! for asynchronous writes driven by a timer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod body;
pub mod error;
pub mod handler;
pub mod response;

pub use body::{BodySender, DisconnectWatch, ResponseBody};
pub use error::SendError;
pub use handler::{BoxedHandlerFuture, Handler, HttpRequest};
pub use response::{Framing, HttpResponse, ResponseBuilder, TextResponse};
