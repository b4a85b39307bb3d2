use std::error::Error;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration, Instant};

use crate::config::TransferConfig;
use crate::cryptography::Authenticator;
use crate::networking;
use crate::report::SendReport;
use crate::FILL_BYTE;

/// How long to wait for the receiver's acknowledgment after the outbound
/// direction is closed.
const ACK_WAIT: Duration = Duration::from_secs(5);

/// Function handler to kickoff sender logic:
///     - Validate the session configuration
///     - Connect to the receiver
///     - Stream N authenticated blocks, half-close, await the ACK
///     - Print totals and throughput for the streaming phase
pub async fn run(addr: &str, config: TransferConfig) -> Result<SendReport, Box<dyn Error>> {
    config.validate()?;

    debug!("Connecting to receiver at {}", addr);
    let mut stream = TcpStream::connect(addr).await?;
    debug!("Connected to {}", addr);

    let report = session(&mut stream, &config).await;

    println!(
        "Sent {} bytes in {:.2} seconds",
        report.bytes_sent,
        report.elapsed.as_secs_f64()
    );
    println!("Throughput: {:.2} KB/s", report.throughput_kb_per_sec());

    Ok(report)
}

/// Drive the post-connect sender states: stream every block with its tag,
/// half-close the outbound direction, then wait briefly for the
/// acknowledgment. Transport failures end the streaming loop early and are
/// reflected in the report, never raised.
pub async fn session<S>(stream: &mut S, config: &TransferConfig) -> SendReport
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let auth = Authenticator::new(&config.key);
    // One pre-sized buffer for the whole session; content is constant filler
    // but the tag is still computed per block.
    let block = vec![FILL_BYTE; config.block_size];

    let bar = ProgressBar::new(config.message_count as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.black}] {pos}/{len} messages ({eta}) {msg}")
            .unwrap(),
    );

    let mut bytes_sent: u64 = 0;
    let mut messages_sent: u32 = 0;

    let start = Instant::now();
    for index in 0..config.message_count {
        let tag = auth.tag(&block);

        if let Err(e) = networking::write_exact(stream, &block, None).await {
            warn!("Write failed on block {}: {}", index, e);
            break;
        }
        bytes_sent += block.len() as u64;

        if let Err(e) = networking::write_exact(stream, &tag, None).await {
            warn!("Write failed on tag {}: {}", index, e);
            break;
        }

        messages_sent += 1;
        debug!("Sent message {}: {} payload bytes", index, block.len());
        bar.inc(1);
    }
    let elapsed = start.elapsed();
    bar.finish_with_message("Streaming complete");

    // No more data follows; the inbound direction stays open for the ACK.
    if let Err(e) = stream.shutdown().await {
        warn!("Half-close failed: {}", e);
    }

    let ack = await_ack(stream).await;

    SendReport {
        bytes_sent,
        messages_sent,
        elapsed,
        ack,
    }
}

/// One bounded read for the acknowledgment. Absence is tolerated: the
/// throughput numbers are already computed from what was actually written.
async fn await_ack<S>(stream: &mut S) -> Option<Vec<u8>>
where
    S: AsyncRead + Unpin,
{
    let mut buf = [0u8; 64];
    match timeout(ACK_WAIT, stream.read(&mut buf)).await {
        Ok(Ok(0)) => {
            warn!("Peer closed without acknowledgment");
            None
        }
        Ok(Ok(n)) => {
            debug!(
                "Received acknowledgment: {:?}",
                String::from_utf8_lossy(&buf[..n])
            );
            Some(buf[..n].to_vec())
        }
        Ok(Err(e)) => {
            warn!("Acknowledgment read failed: {}", e);
            None
        }
        Err(_) => {
            warn!("No acknowledgment within {:?}", ACK_WAIT);
            None
        }
    }
}
