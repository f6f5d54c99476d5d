//! Platform-specific pipe/socket client.
//!
//! - Unix: Unix Domain Socket at `/tmp/CoreFxPipe_{name}` (the prefix the
//!   server's host runtime uses for its named pipes on Unix)
//! - Windows: Named Pipe at `\\.\pipe\{name}`

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;

/// Resolve a bare server name to the platform pipe path.
///
/// # Example
///
/// ```
/// use simwire_client::transport::pipe_path;
///
/// let path = pipe_path("testserver");
/// #[cfg(unix)]
/// assert_eq!(path, "/tmp/CoreFxPipe_testserver");
/// ```
pub fn pipe_path(name: &str) -> String {
    #[cfg(unix)]
    {
        format!("/tmp/CoreFxPipe_{}", name)
    }

    #[cfg(windows)]
    {
        format!(r"\\.\pipe\{}", name)
    }
}

// ============================================================================
// Unix Implementation
// ============================================================================

#[cfg(unix)]
mod unix_impl {
    use super::*;
    use tokio::net::UnixStream;

    /// Connected local pipe stream.
    pub struct PipeStream {
        stream: UnixStream,
    }

    impl PipeStream {
        /// Connect to the server's socket at the resolved pipe path.
        pub async fn connect(name: &str) -> Result<Self> {
            let path = pipe_path(name);
            tracing::debug!(%path, "connecting to local server");
            let stream = UnixStream::connect(&path).await?;
            Ok(Self { stream })
        }

        /// Get a reference to the underlying stream.
        pub fn inner(&self) -> &UnixStream {
            &self.stream
        }
    }

    impl AsyncRead for PipeStream {
        fn poll_read(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
            buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::pin::Pin::new(&mut self.stream).poll_read(cx, buf)
        }
    }

    impl AsyncWrite for PipeStream {
        fn poll_write(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
            buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::pin::Pin::new(&mut self.stream).poll_write(cx, buf)
        }

        fn poll_flush(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::pin::Pin::new(&mut self.stream).poll_flush(cx)
        }

        fn poll_shutdown(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::pin::Pin::new(&mut self.stream).poll_shutdown(cx)
        }
    }
}

// ============================================================================
// Windows Implementation
// ============================================================================

#[cfg(windows)]
mod windows_impl {
    use super::*;
    use tokio::net::windows::named_pipe::{ClientOptions, NamedPipeClient};

    /// Connected local pipe stream.
    pub struct PipeStream {
        pipe: NamedPipeClient,
    }

    impl PipeStream {
        /// Connect to the server's named pipe at the resolved pipe path.
        pub async fn connect(name: &str) -> Result<Self> {
            let path = pipe_path(name);
            tracing::debug!(%path, "connecting to local server");
            let pipe = ClientOptions::new().open(&path)?;
            Ok(Self { pipe })
        }

        /// Get a reference to the underlying pipe.
        pub fn inner(&self) -> &NamedPipeClient {
            &self.pipe
        }
    }

    impl AsyncRead for PipeStream {
        fn poll_read(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
            buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::pin::Pin::new(&mut self.pipe).poll_read(cx, buf)
        }
    }

    impl AsyncWrite for PipeStream {
        fn poll_write(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
            buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::pin::Pin::new(&mut self.pipe).poll_write(cx, buf)
        }

        fn poll_flush(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::pin::Pin::new(&mut self.pipe).poll_flush(cx)
        }

        fn poll_shutdown(
            mut self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::pin::Pin::new(&mut self.pipe).poll_shutdown(cx)
        }
    }
}

#[cfg(unix)]
pub use unix_impl::PipeStream;

#[cfg(windows)]
pub use windows_impl::PipeStream;

/// Connect to a local server by name.
pub async fn connect_pipe(name: &str) -> Result<PipeStream> {
    PipeStream::connect(name).await
}
