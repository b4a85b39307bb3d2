pub mod commands;
pub mod config;
pub mod cryptography;
pub mod networking;
pub mod report;

pub const DEFAULT_KEY: &str = "secret_key";
pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024;
pub const DEFAULT_MESSAGE_COUNT: u32 = 100;
pub const DEFAULT_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;

/// Filler byte for the benchmark's synthetic payload blocks.
pub const FILL_BYTE: u8 = b'a';

/// Fixed acknowledgment the receiver returns once its loop ends.
pub const ACK: &[u8] = b"ACK";
