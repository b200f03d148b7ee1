//! Demo server library: the three endpoints and their routing table.
//!
//! The binary in `main.rs` wires this up on port 8080; tests exercise the
//! handlers directly and over the wire.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod handlers;
