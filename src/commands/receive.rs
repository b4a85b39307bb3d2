use std::error::Error;
use std::io;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::time::Instant;

use crate::config::TransferConfig;
use crate::cryptography::{Authenticator, TAG_SIZE};
use crate::networking;
use crate::report::ReceiveReport;
use crate::ACK;

/// Function handler to kickoff receiver logic:
///     - Validate the session configuration
///     - Bind the port on all interfaces with address reuse
///     - Accept one connection and run the receive loop
///     - Print totals, verification counts, and throughput
pub async fn run(port: u16, config: TransferConfig) -> Result<ReceiveReport, Box<dyn Error>> {
    config.validate()?;

    let listener = networking::listen_reusable(port)?;
    info!("Listening on port {}", port);

    let report = serve(listener, &config).await?;

    println!(
        "Received {} bytes in {:.2} seconds",
        report.bytes_received,
        report.elapsed.as_secs_f64()
    );
    println!("Throughput: {:.2} KB/s", report.throughput_kb_per_sec());
    println!(
        "Verified {} of {} messages ({} failed)",
        report.verified(),
        report.messages_received(),
        report.failed()
    );

    Ok(report)
}

/// Accept exactly one connection and run the receive session over it. The
/// listener is dropped as soon as the connection is accepted.
pub async fn serve(listener: TcpListener, config: &TransferConfig) -> io::Result<ReceiveReport> {
    let (mut stream, peer) = listener.accept().await?;
    drop(listener);
    info!("Accepted connection from {}", peer);

    Ok(session(&mut stream, config).await)
}

/// Drive the post-accept receiver states: read (block, tag) pairs into the
/// reused buffer, verify each tag, then acknowledge. A short or failed read
/// ends the loop early; a failed verification does not.
pub async fn session<S>(stream: &mut S, config: &TransferConfig) -> ReceiveReport
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let auth = Authenticator::new(&config.key);
    // Pre-sized buffers reused for every message.
    let mut block = vec![0u8; config.block_size];
    let mut tag = [0u8; TAG_SIZE];

    let bar = ProgressBar::new(config.message_count as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.black}] {pos}/{len} messages ({eta}) {msg}")
            .unwrap(),
    );

    let mut bytes_received: u64 = 0;
    let mut verdicts = Vec::with_capacity(config.message_count as usize);

    let start = Instant::now();
    for index in 0..config.message_count {
        if let Err(e) = networking::read_exact(stream, &mut block, None).await {
            if e.is_clean_eof() {
                debug!("Stream ended after {} messages", index);
            } else {
                warn!("Block {} cut short: {}", index, e);
            }
            break;
        }
        bytes_received += block.len() as u64;

        // An incomplete tag cannot be judged; stop without verifying it.
        if let Err(e) = networking::read_exact(stream, &mut tag, None).await {
            warn!("Tag {} cut short: {}", index, e);
            break;
        }

        let ok = auth.verify(&block, &tag);
        if ok {
            debug!("Message {} verified successfully", index);
        } else {
            warn!("Message {} verification failed", index);
        }
        verdicts.push(ok);
        bar.inc(1);
    }
    let elapsed = start.elapsed();
    bar.finish_with_message("Receive complete");

    let ack_sent = match networking::write_exact(stream, ACK, None).await {
        Ok(()) => {
            debug!("Acknowledgment sent");
            true
        }
        Err(e) => {
            warn!("Could not send acknowledgment: {}", e);
            false
        }
    };

    ReceiveReport {
        bytes_received,
        verdicts,
        elapsed,
        ack_sent,
    }
}
