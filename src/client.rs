//! Command orchestrator.
//!
//! [`Client`] owns the connection and drives the two lockstep command
//! sequences the server understands:
//!
//! - `run`: send `"RUN"`, stream each replacement (path, type tag, value -
//!   every frame ACK-gated), terminate with `"FIN"`, then await the result
//!   frame while the server executes the simulation.
//! - `read_output`: send `"READ"`, the table name and each column name
//!   (ACK-gated), terminate with `"FIN"`, await the result frame, then
//!   acknowledge and consume one blob frame per requested column.
//!
//! The protocol is strictly half-duplex stop-and-wait: a single outstanding
//! command, enforced here by `&mut self`. Any failure other than a server
//! rejection leaves the connection in an unknown protocol state; the client
//! records that and refuses further commands (see [`Client::is_usable`]).
//!
//! # Example
//!
//! ```ignore
//! use simwire_client::{Client, Replacement};
//!
//! let mut client = Client::connect_pipe("apsimserver").await?;
//! client.run(&[Replacement::float64("[Wheat].SowingDate", 152.0)]).await?;
//! let outputs = client.read_output("Report", &["Yield", "Biomass"]).await?;
//! let yields = outputs[0].as_f64_array()?;
//! ```

use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::codec::encode_int32;
use crate::error::{ClientError, Result};
use crate::model::{Output, Replacement};
use crate::protocol::{expect_ack, recv_string, send_ack, send_frame, tokens};
use crate::transport::{self, PipeStream};

/// A connected protocol client.
///
/// Generic over any duplex byte stream; use [`Client::connect_pipe`] or
/// [`Client::connect_tcp`] for the standard transports, or [`Client::new`]
/// to wrap an already-connected stream (e.g. a mock peer in tests).
pub struct Client<S> {
    stream: S,
    read_timeout: Option<Duration>,
    usable: bool,
}

impl Client<PipeStream> {
    /// Connect to a local server by pipe name.
    pub async fn connect_pipe(name: &str) -> Result<Self> {
        Ok(Self::new(transport::connect_pipe(name).await?))
    }
}

impl Client<TcpStream> {
    /// Connect to a remote server over TCP.
    pub async fn connect_tcp(addr: impl ToSocketAddrs) -> Result<Self> {
        Ok(Self::new(transport::connect_tcp(addr).await?))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Wrap an already-connected duplex stream.
    ///
    /// No read timeout is set by default: a hung peer blocks the client
    /// indefinitely, matching the protocol's original behavior. Production
    /// callers should set one with [`Client::set_read_timeout`].
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            read_timeout: None,
            usable: true,
        }
    }

    /// Set a timeout applied to every frame read.
    ///
    /// This is a deliberate extension over the wire protocol, which has no
    /// notion of time; expiry yields [`ClientError::ReadTimeout`] and marks
    /// the connection unusable, since the peer may still send the stale
    /// reply later.
    pub fn set_read_timeout(&mut self, timeout: Option<Duration>) {
        self.read_timeout = timeout;
    }

    /// The configured read timeout, if any.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }

    /// Whether the connection is still in a known protocol state.
    ///
    /// `false` after any error other than [`ClientError::ServerRejected`];
    /// a fresh connection must be established for further commands.
    pub fn is_usable(&self) -> bool {
        self.usable
    }

    /// Re-run the simulation with the given parameter replacements.
    ///
    /// Replacements are transmitted strictly sequentially in caller order,
    /// each as three ACK-gated frames (path, type tag, value bytes). An
    /// empty slice is legal and still performs the full
    /// `RUN` -> `FIN` -> result exchange.
    ///
    /// # Errors
    ///
    /// [`ClientError::ServerRejected`] carries the server's failure message
    /// and leaves the connection usable; any other error poisons it.
    pub async fn run(&mut self, replacements: &[Replacement]) -> Result<()> {
        self.check_usable()?;
        let res = self.run_inner(replacements).await;
        self.record(res)
    }

    async fn run_inner(&mut self, replacements: &[Replacement]) -> Result<()> {
        tracing::debug!(count = replacements.len(), "starting RUN command");
        self.handshake(tokens::RUN).await?;

        for replacement in replacements {
            tracing::trace!(path = replacement.path(), "sending replacement");
            self.handshake(replacement.path().as_bytes()).await?;
            self.handshake(&encode_int32(replacement.value().kind().tag()))
                .await?;
            self.handshake(&replacement.value().encode()).await?;
        }

        self.handshake(tokens::FIN).await?;

        // The server runs the simulation between the FIN ACK and the result
        // frame; "request received" and "request executed" are distinct
        // protocol points.
        let result = self.recv_result().await?;
        if result.as_bytes() != tokens::FIN {
            tracing::debug!(message = %result, "RUN rejected by server");
            return Err(ClientError::ServerRejected(result));
        }
        tracing::debug!("RUN completed");
        Ok(())
    }

    /// Read output columns from a named result table.
    ///
    /// Returns one [`Output`] per entry of `params`, in request order. An
    /// empty `params` is legal and yields zero outputs after the full
    /// command exchange.
    ///
    /// # Errors
    ///
    /// As for [`Client::run`].
    pub async fn read_output<T: AsRef<str>>(
        &mut self,
        table: &str,
        params: &[T],
    ) -> Result<Vec<Output>> {
        self.check_usable()?;
        let res = self.read_output_inner(table, params).await;
        self.record(res)
    }

    async fn read_output_inner<T: AsRef<str>>(
        &mut self,
        table: &str,
        params: &[T],
    ) -> Result<Vec<Output>> {
        tracing::debug!(table, count = params.len(), "starting READ command");
        self.handshake(tokens::READ).await?;
        self.handshake(table.as_bytes()).await?;

        for param in params {
            self.handshake(param.as_ref().as_bytes()).await?;
        }

        // Unlike RUN, the FIN closing the parameter list is not ACK'd; the
        // next frame on the wire is already the result frame. This
        // asymmetry is part of the wire contract.
        send_frame(&mut self.stream, tokens::FIN).await?;

        let result = self.recv_result().await?;
        if result.as_bytes() != tokens::FIN {
            tracing::debug!(message = %result, "READ rejected by server");
            return Err(ClientError::ServerRejected(result));
        }

        // Signal readiness to receive the result blobs.
        send_ack(&mut self.stream).await?;

        let mut outputs = Vec::with_capacity(params.len());
        for param in params {
            let blob = self.recv_blob().await?;
            tracing::trace!(param = param.as_ref(), len = blob.len(), "received output");
            outputs.push(Output::new(blob));
            send_ack(&mut self.stream).await?;
        }
        tracing::debug!("READ completed");
        Ok(outputs)
    }

    /// Gracefully close the connection.
    pub async fn shutdown(mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }

    /// Consume the client, returning the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// One protocol step: send a frame, consume the peer's ACK.
    async fn handshake(&mut self, payload: &[u8]) -> Result<()> {
        send_frame(&mut self.stream, payload).await?;
        match self.read_timeout {
            None => expect_ack(&mut self.stream).await,
            Some(limit) => tokio::time::timeout(limit, expect_ack(&mut self.stream))
                .await
                .map_err(|_| ClientError::ReadTimeout)?,
        }
    }

    /// Read a terminal result frame as a string (no ACK is sent for it).
    async fn recv_result(&mut self) -> Result<String> {
        match self.read_timeout {
            None => recv_string(&mut self.stream).await,
            Some(limit) => tokio::time::timeout(limit, recv_string(&mut self.stream))
                .await
                .map_err(|_| ClientError::ReadTimeout)?,
        }
    }

    /// Read one opaque blob frame.
    async fn recv_blob(&mut self) -> Result<Bytes> {
        match self.read_timeout {
            None => crate::protocol::recv_frame(&mut self.stream).await,
            Some(limit) => {
                tokio::time::timeout(limit, crate::protocol::recv_frame(&mut self.stream))
                    .await
                    .map_err(|_| ClientError::ReadTimeout)?
            }
        }
    }

    fn check_usable(&self) -> Result<()> {
        if self.usable {
            Ok(())
        } else {
            Err(ClientError::ConnectionUnusable)
        }
    }

    fn record<T>(&mut self, res: Result<T>) -> Result<T> {
        if let Err(err) = &res {
            if err.poisons_connection() {
                tracing::warn!(%err, "connection poisoned by protocol error");
                self.usable = false;
            }
        }
        res
    }
}

impl<S> std::fmt::Debug for Client<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("read_timeout", &self.read_timeout)
            .field("usable", &self.usable)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_client_defaults() {
        let (stream, _peer) = tokio::io::duplex(64);
        let client = Client::new(stream);
        assert!(client.is_usable());
        assert_eq!(client.read_timeout(), None);
    }

    #[tokio::test]
    async fn test_set_read_timeout() {
        let (stream, _peer) = tokio::io::duplex(64);
        let mut client = Client::new(stream);
        client.set_read_timeout(Some(Duration::from_secs(5)));
        assert_eq!(client.read_timeout(), Some(Duration::from_secs(5)));
        client.set_read_timeout(None);
        assert_eq!(client.read_timeout(), None);
    }

    #[tokio::test]
    async fn test_into_inner_returns_stream() {
        let (stream, _peer) = tokio::io::duplex(64);
        let client = Client::new(stream);
        let _stream = client.into_inner();
    }
}
