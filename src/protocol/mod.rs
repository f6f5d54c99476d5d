//! Protocol module - length-prefixed framing and the ACK handshake.
//!
//! Every message on the wire is a frame: a 4-byte little-endian payload
//! length followed by the payload bytes. Strings, raw blobs and scalar
//! encodings all ride this framing. The handshake primitive ("send one
//! frame, expect an ACK frame back") is the unit every command sequence in
//! [`crate::client`] is composed from.

mod framing;
mod handshake;

pub use framing::{
    recv_frame, recv_frame_limited, recv_string, send_frame, send_string, tokens,
    DEFAULT_MAX_FRAME_SIZE, LENGTH_PREFIX_SIZE,
};
pub use handshake::{expect_ack, send_ack, send_and_expect_ack};
