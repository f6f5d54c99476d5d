//! # simwire-client
//!
//! Client for driving a remote simulation server over a byte stream:
//! re-run a simulation with parameter overrides ("replacements") and
//! retrieve named result tables afterward.
//!
//! ## Architecture
//!
//! - **Codec**: fixed-width little-endian scalar encodings (int32, float64,
//!   packed float64 arrays)
//! - **Protocol**: 4-byte length-prefixed framing and the ACK handshake
//!   every command step is built from
//! - **Client**: the `RUN` / `READ` command orchestrator
//! - **Transport**: connection bootstrap over a local pipe or TCP
//!
//! The protocol is half-duplex stop-and-wait with a single outstanding
//! command; a `Client` must be owned by one in-flight command at a time,
//! which the API enforces through `&mut self`.
//!
//! ## Example
//!
//! ```ignore
//! use simwire_client::{Client, Replacement};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::connect_pipe("apsimserver").await?;
//!
//!     client
//!         .run(&[Replacement::float64("[Wheat].SowingDensity", 150.0)])
//!         .await?;
//!
//!     let outputs = client.read_output("Report", &["Yield"]).await?;
//!     println!("yield: {:?}", outputs[0].as_f64_array()?);
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod model;
pub mod protocol;
pub mod transport;

mod client;

pub use client::Client;
pub use error::{ClientError, Result};
pub use model::{Output, ParameterKind, ParameterValue, Replacement};
