use thiserror::Error;

use crate::{DEFAULT_BLOCK_SIZE, DEFAULT_KEY, DEFAULT_MESSAGE_COUNT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("shared key must not be empty")]
    EmptyKey,
    #[error("block size must be at least 1 byte")]
    ZeroBlockSize,
    #[error("message count must be at least 1")]
    ZeroMessageCount,
}

/// Session parameters shared by both peers.
///
/// Every field must be identical on both sides: there is no negotiation on
/// the wire, and a block size disagreement desynchronizes framing
/// irrecoverably.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Shared secret keying the per-block authentication tags.
    pub key: Vec<u8>,
    /// Size of every payload block in bytes.
    pub block_size: usize,
    /// Number of (block, tag) pairs in a session.
    pub message_count: u32,
}

impl TransferConfig {
    pub fn new(key: impl Into<Vec<u8>>, block_size: usize, message_count: u32) -> Self {
        Self {
            key: key.into(),
            block_size,
            message_count,
        }
    }

    /// Reject degenerate parameters before any socket is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.message_count == 0 {
            return Err(ConfigError::ZeroMessageCount);
        }
        Ok(())
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self::new(DEFAULT_KEY, DEFAULT_BLOCK_SIZE, DEFAULT_MESSAGE_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TransferConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.key, b"secret_key".to_vec());
        assert_eq!(config.block_size, 1024 * 1024);
        assert_eq!(config.message_count, 100);
    }

    #[test]
    fn test_empty_key_rejected() {
        let config = TransferConfig::new("", 1024, 10);
        assert_eq!(config.validate(), Err(ConfigError::EmptyKey));
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let config = TransferConfig::new("secret_key", 0, 10);
        assert_eq!(config.validate(), Err(ConfigError::ZeroBlockSize));
    }

    #[test]
    fn test_zero_message_count_rejected() {
        let config = TransferConfig::new("secret_key", 1024, 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMessageCount));
    }
}
