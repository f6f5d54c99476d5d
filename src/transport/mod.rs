//! Transport module - connection bootstrap.
//!
//! Produces the connected duplex byte stream the protocol core runs over:
//! - a local pipe (Unix Domain Socket on Unix, Named Pipe on Windows)
//!   addressed by a bare server name
//! - a TCP connection to an address/port
//!
//! The protocol core only requires `AsyncRead + AsyncWrite + Unpin`; this
//! module is a thin collaborator, not part of the state machine.

mod pipe;

pub use pipe::{connect_pipe, pipe_path, PipeStream};

use tokio::net::{TcpStream, ToSocketAddrs};

use crate::error::Result;

/// Connect to a server listening on a TCP address.
pub async fn connect_tcp(addr: impl ToSocketAddrs) -> Result<TcpStream> {
    let stream = TcpStream::connect(addr).await?;
    stream.set_nodelay(true)?;
    Ok(stream)
}
