//! Codec module - scalar encoding/decoding for frame payloads.
//!
//! Every typed value on the wire is a fixed-width little-endian encoding:
//!
//! - `i32` - 4 bytes, two's complement
//! - `f64` - 8 bytes, IEEE-754 binary64
//! - `[f64]` - concatenated 8-byte encodings, no element-count prefix
//!   (the count is derived from the frame length at decode time)
//!
//! Encodings are canonical little-endian regardless of host byte order;
//! this module is the only place host endianness is consulted.
//!
//! # Example
//!
//! ```
//! use simwire_client::codec;
//!
//! let bytes = codec::encode_int32(1);
//! assert_eq!(bytes, [0x01, 0x00, 0x00, 0x00]);
//! assert_eq!(codec::decode_int32(&bytes).unwrap(), 1);
//! ```

mod scalar;

pub use scalar::{
    decode_float64, decode_float64_array, decode_int32, encode_float64, encode_float64_array,
    encode_int32, FLOAT64_SIZE, INT32_SIZE,
};
