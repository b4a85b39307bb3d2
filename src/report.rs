use std::time::Duration;

/// What the sender accomplished: payload bytes written, messages completed,
/// streaming-phase wall time, and any acknowledgment payload read back.
#[derive(Debug, Clone)]
pub struct SendReport {
    pub bytes_sent: u64,
    pub messages_sent: u32,
    pub elapsed: Duration,
    pub ack: Option<Vec<u8>>,
}

impl SendReport {
    pub fn throughput_kb_per_sec(&self) -> f64 {
        throughput_bytes_per_sec(self.bytes_sent, self.elapsed) / 1024.0
    }
}

/// What the receiver observed: payload bytes read, per-message verification
/// verdicts in arrival order, receive-phase wall time, and whether the
/// acknowledgment went out.
#[derive(Debug, Clone)]
pub struct ReceiveReport {
    pub bytes_received: u64,
    pub verdicts: Vec<bool>,
    pub elapsed: Duration,
    pub ack_sent: bool,
}

impl ReceiveReport {
    /// Messages whose block and tag both arrived in full.
    pub fn messages_received(&self) -> usize {
        self.verdicts.len()
    }

    pub fn verified(&self) -> usize {
        self.verdicts.iter().filter(|&&ok| ok).count()
    }

    pub fn failed(&self) -> usize {
        self.verdicts.len() - self.verified()
    }

    pub fn throughput_kb_per_sec(&self) -> f64 {
        throughput_bytes_per_sec(self.bytes_received, self.elapsed) / 1024.0
    }
}

/// Payload bytes over elapsed wall time. Zero elapsed reports zero rather
/// than infinity.
pub fn throughput_bytes_per_sec(bytes: u64, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }
    bytes as f64 / elapsed.as_secs_f64()
}
