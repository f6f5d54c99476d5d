//! Length-prefixed frame I/O.
//!
//! Wire layout of a frame:
//!
//! ```text
//! ┌───────────────┬──────────────────┐
//! │ Length        │ Payload          │
//! │ 4 bytes       │ `length` bytes   │
//! │ uint32 LE     │                  │
//! └───────────────┴──────────────────┘
//! ```
//!
//! The length counts payload bytes only. String payloads are raw UTF-8
//! bytes with no terminator (ASCII in practice); blob payloads are opaque.
//!
//! A short read is terminal: there is no partial-frame buffering across
//! calls, and a stream that ends mid-frame yields
//! [`ClientError::TruncatedStream`].

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{ClientError, Result};

/// Size of the frame length prefix.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default maximum accepted payload size (256 MiB).
///
/// A cooperative peer never approaches this; the guard exists so that a
/// desynchronized stream (payload bytes misread as a length prefix) fails
/// with a protocol error instead of an enormous allocation.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 256 * 1024 * 1024;

/// Control tokens exchanged as ordinary string frames.
pub mod tokens {
    /// Acknowledgement of a received frame.
    pub const ACK: &[u8] = b"ACK";
    /// End of a list, or command success in a result frame.
    pub const FIN: &[u8] = b"FIN";
    /// Command: re-run the simulation with replacements.
    pub const RUN: &[u8] = b"RUN";
    /// Command: read output columns from a result table.
    pub const READ: &[u8] = b"READ";
}

/// Send one frame: length prefix, then payload.
pub async fn send_frame<S>(stream: &mut S, payload: &[u8]) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    let len = payload.len() as u32;
    stream.write_all(&len.to_le_bytes()).await?;
    stream.write_all(payload).await?;
    stream.flush().await?;
    tracing::trace!(len = payload.len(), "sent frame");
    Ok(())
}

/// Send a string as a frame (raw bytes, no terminator).
pub async fn send_string<S>(stream: &mut S, s: &str) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    send_frame(stream, s.as_bytes()).await
}

/// Receive one frame, enforcing the default maximum payload size.
///
/// # Errors
///
/// - [`ClientError::TruncatedStream`] if the peer closes mid-prefix or
///   mid-payload.
/// - [`ClientError::FrameTooLarge`] if the declared length exceeds the
///   maximum.
pub async fn recv_frame<S>(stream: &mut S) -> Result<Bytes>
where
    S: AsyncRead + Unpin,
{
    recv_frame_limited(stream, DEFAULT_MAX_FRAME_SIZE).await
}

/// Receive one frame with an explicit maximum payload size.
pub async fn recv_frame_limited<S>(stream: &mut S, max_size: usize) -> Result<Bytes>
where
    S: AsyncRead + Unpin,
{
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    read_exact_or_truncated(stream, &mut prefix, LENGTH_PREFIX_SIZE).await?;
    let len = u32::from_le_bytes(prefix) as usize;

    if len > max_size {
        return Err(ClientError::FrameTooLarge {
            length: len,
            max: max_size,
        });
    }

    let mut payload = vec![0u8; len];
    read_exact_or_truncated(stream, &mut payload, len).await?;
    tracing::trace!(len, "received frame");
    Ok(Bytes::from(payload))
}

/// Receive one frame and interpret its payload as a string.
///
/// Payloads are ASCII control tokens or server messages in practice;
/// anything non-UTF-8 is replaced lossily rather than rejected.
pub async fn recv_string<S>(stream: &mut S) -> Result<String>
where
    S: AsyncRead + Unpin,
{
    let payload = recv_frame(stream).await?;
    Ok(String::from_utf8_lossy(&payload).into_owned())
}

/// Fill `buf` completely, mapping an early EOF to `TruncatedStream`.
async fn read_exact_or_truncated<S>(stream: &mut S, buf: &mut [u8], expected: usize) -> Result<()>
where
    S: AsyncRead + Unpin,
{
    stream.read_exact(buf).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ClientError::TruncatedStream { expected }
        } else {
            ClientError::Io(e)
        }
    })?;
    Ok(())
}
