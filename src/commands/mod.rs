//! # Commands Module
//!
//! This module contains the two command handlers for spate:
//!
//! ## `send`
//! Streams authenticated blocks to a receiver:
//! - Validates the session configuration
//! - Connects to the receiver over TCP
//! - Writes N fixed-size blocks, each followed by its HMAC-SHA256 tag
//! - Half-closes the stream and waits briefly for the receiver's ACK
//! - Reports payload bytes, streaming time, and throughput
//!
//! ## `receive`
//! Accepts one transfer session:
//! - Validates the session configuration
//! - Binds its port with address reuse and accepts a single connection
//! - Reads N (block, tag) pairs, verifying each tag as it arrives
//! - Keeps receiving after a failed verification, counting failures
//! - Acknowledges with a literal `ACK` and reports totals

pub mod send;
pub mod receive;
