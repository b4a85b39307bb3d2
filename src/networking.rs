use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket};
use tokio::time::{timeout_at, Instant};

/// Failure modes of the exact-length stream helpers.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The stream ended before the requested length was collected.
    #[error("stream closed after {got} of {expected} bytes")]
    ShortRead { expected: usize, got: usize },
    /// The stream stopped accepting bytes before the full payload went out.
    #[error("stream stopped accepting after {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl FrameError {
    /// True when the peer closed cleanly before this frame started.
    pub fn is_clean_eof(&self) -> bool {
        matches!(self, FrameError::ShortRead { got: 0, .. })
    }
}

/// Read exactly `buf.len()` bytes into `buf`, accumulating across as many
/// partial reads as the stream requires.
///
/// Never returns success with a partial buffer: end-of-stream mid-frame is a
/// `ShortRead` carrying how much was collected. The optional deadline bounds
/// the whole operation; `None` waits indefinitely.
pub async fn read_exact<R>(
    stream: &mut R,
    buf: &mut [u8],
    deadline: Option<Duration>,
) -> Result<(), FrameError>
where
    R: AsyncRead + Unpin,
{
    let expires = deadline.map(|limit| Instant::now() + limit);
    let mut filled = 0;

    while filled < buf.len() {
        let read = stream.read(&mut buf[filled..]);
        let n = match expires {
            Some(at) => timeout_at(at, read)
                .await
                .map_err(|_| FrameError::DeadlineExceeded)??,
            None => read.await?,
        };
        if n == 0 {
            return Err(FrameError::ShortRead {
                expected: buf.len(),
                got: filled,
            });
        }
        filled += n;
    }

    Ok(())
}

/// Write all of `buf`, advancing across as many partial writes as the stream
/// requires. A stream that stops accepting bytes mid-frame is a `ShortWrite`.
pub async fn write_exact<W>(
    stream: &mut W,
    buf: &[u8],
    deadline: Option<Duration>,
) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
{
    let expires = deadline.map(|limit| Instant::now() + limit);
    let mut written = 0;

    while written < buf.len() {
        let write = stream.write(&buf[written..]);
        let n = match expires {
            Some(at) => timeout_at(at, write)
                .await
                .map_err(|_| FrameError::DeadlineExceeded)??,
            None => write.await?,
        };
        if n == 0 {
            return Err(FrameError::ShortWrite {
                expected: buf.len(),
                written,
            });
        }
        written += n;
    }

    Ok(())
}

/// Open a listening socket on all interfaces with address reuse enabled.
/// Backlog of one: the receiver serves a single connection per run.
pub fn listen_reusable(port: u16) -> io::Result<TcpListener> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let socket = TcpSocket::new_v4()?;
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(1)
}
