//! Error types for simwire-client.

use thiserror::Error;

/// Main error type for all client operations.
///
/// Only [`ClientError::ServerRejected`] is a recoverable, application-level
/// failure; every other variant means the connection is no longer in a known
/// protocol state and must not be reused.
#[derive(Debug, Error)]
pub enum ClientError {
    /// I/O error on the underlying socket/pipe.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scalar decoder received the wrong number of bytes.
    ///
    /// This indicates a framing bug, not a runtime condition.
    #[error("length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// An array decoder received a byte count that is not a multiple of the
    /// element size.
    #[error("alignment error: {length} bytes is not a whole number of 8-byte elements")]
    AlignmentError { length: usize },

    /// The peer closed the stream before a full frame arrived.
    #[error("truncated stream: peer closed before {expected} expected bytes arrived")]
    TruncatedStream { expected: usize },

    /// An ACK handshake received a non-ACK payload (protocol desync).
    #[error("unexpected response: expected {expected:?}, got {actual:?}")]
    UnexpectedResponse { expected: String, actual: String },

    /// The server reported a command-level failure in its result frame.
    ///
    /// This is an expected failure mode (invalid path, simulation error) and
    /// is surfaced as data; the connection remains usable.
    #[error("server rejected command: {0}")]
    ServerRejected(String),

    /// A declared frame length exceeded the configured maximum.
    #[error("frame of {length} bytes exceeds maximum {max}")]
    FrameTooLarge { length: usize, max: usize },

    /// A parameter type tag outside the known tag space.
    #[error("unknown parameter type tag: {0}")]
    UnknownTag(i32),

    /// A configured read timeout expired while waiting for the peer.
    #[error("timed out waiting for peer")]
    ReadTimeout,

    /// A command was attempted on a connection already failed by a previous
    /// protocol error.
    #[error("connection is unusable after a previous protocol error")]
    ConnectionUnusable,
}

impl ClientError {
    /// Whether this error leaves the connection in an unknown protocol state.
    ///
    /// [`ClientError::ServerRejected`] is the only failure a caller may
    /// recover from on the same connection.
    pub fn poisons_connection(&self) -> bool {
        !matches!(self, ClientError::ServerRejected(_))
    }
}

/// Result type alias using ClientError.
pub type Result<T> = std::result::Result<T, ClientError>;
