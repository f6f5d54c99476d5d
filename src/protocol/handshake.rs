//! The ACK handshake primitive.
//!
//! Every step of a command sequence is "send one frame, then read and
//! validate an ACK frame". There is no retry: a mismatched ACK means the
//! two sides have lost protocol lockstep, and the connection must be
//! considered unusable by the caller.

use tokio::io::{AsyncRead, AsyncWrite};

use super::framing::{recv_string, send_frame, tokens};
use crate::error::{ClientError, Result};

/// Send one frame and consume the peer's ACK frame.
///
/// # Errors
///
/// Returns [`ClientError::UnexpectedResponse`] if the reply payload is not
/// exactly `"ACK"`. No further frames are sent or read after a mismatch.
pub async fn send_and_expect_ack<S>(stream: &mut S, payload: &[u8]) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    send_frame(stream, payload).await?;
    expect_ack(stream).await
}

/// Read one frame and require its payload to be `"ACK"`.
pub async fn expect_ack<S>(stream: &mut S) -> Result<()>
where
    S: AsyncRead + Unpin,
{
    let reply = recv_string(stream).await?;
    if reply.as_bytes() != tokens::ACK {
        tracing::warn!(actual = %reply, "handshake received non-ACK reply");
        return Err(ClientError::UnexpectedResponse {
            expected: "ACK".to_string(),
            actual: reply,
        });
    }
    Ok(())
}

/// Send a bare `"ACK"` frame without awaiting a reply.
///
/// Used on the read side of the output protocol, where the client
/// acknowledges each received blob.
pub async fn send_ack<S>(stream: &mut S) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    send_frame(stream, tokens::ACK).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::framing::{recv_frame, send_frame};

    #[tokio::test]
    async fn test_ack_handshake_succeeds() {
        let (mut client, mut peer) = tokio::io::duplex(64);

        let peer_task = tokio::spawn(async move {
            let frame = recv_frame(&mut peer).await.unwrap();
            assert_eq!(&frame[..], b"RUN");
            send_frame(&mut peer, b"ACK").await.unwrap();
        });

        send_and_expect_ack(&mut client, b"RUN").await.unwrap();
        peer_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_ack_reply_is_error() {
        let (mut client, mut peer) = tokio::io::duplex(64);

        let peer_task = tokio::spawn(async move {
            let _ = recv_frame(&mut peer).await.unwrap();
            send_frame(&mut peer, b"NAK").await.unwrap();
        });

        let err = send_and_expect_ack(&mut client, b"RUN").await.unwrap_err();
        match err {
            ClientError::UnexpectedResponse { expected, actual } => {
                assert_eq!(expected, "ACK");
                assert_eq!(actual, "NAK");
            }
            other => panic!("expected UnexpectedResponse, got {other:?}"),
        }
        peer_task.await.unwrap();
    }

    #[tokio::test]
    async fn test_peer_close_is_truncated_stream() {
        let (mut client, peer) = tokio::io::duplex(64);
        drop(peer);

        let err = send_and_expect_ack(&mut client, b"RUN").await.unwrap_err();
        // The write may also fail first depending on buffering; both map to
        // a poisoning error.
        assert!(err.poisons_connection());
    }

    #[tokio::test]
    async fn test_send_ack_frames_token() {
        let (mut client, mut peer) = tokio::io::duplex(64);
        send_ack(&mut client).await.unwrap();
        let frame = recv_frame(&mut peer).await.unwrap();
        assert_eq!(&frame[..], b"ACK");
    }
}
