//! Fixed-width little-endian scalar codecs.
//!
//! Decoders are strict about input length: a wrong byte count means the
//! framing layer handed over a malformed payload, which is a protocol bug
//! rather than a runtime condition, but it is still reported as a typed
//! error instead of a panic.

use crate::error::{ClientError, Result};

/// Encoded size of an `i32` value.
pub const INT32_SIZE: usize = 4;

/// Encoded size of an `f64` value.
pub const FLOAT64_SIZE: usize = 8;

/// Encode an `i32` as 4 little-endian bytes.
#[inline]
pub fn encode_int32(value: i32) -> [u8; INT32_SIZE] {
    value.to_le_bytes()
}

/// Decode an `i32` from exactly 4 little-endian bytes.
///
/// # Errors
///
/// Returns [`ClientError::LengthMismatch`] if `bytes` is not exactly 4 bytes.
pub fn decode_int32(bytes: &[u8]) -> Result<i32> {
    let arr: [u8; INT32_SIZE] = bytes
        .try_into()
        .map_err(|_| ClientError::LengthMismatch {
            expected: INT32_SIZE,
            actual: bytes.len(),
        })?;
    Ok(i32::from_le_bytes(arr))
}

/// Encode an `f64` as 8 little-endian bytes (IEEE-754 binary64).
#[inline]
pub fn encode_float64(value: f64) -> [u8; FLOAT64_SIZE] {
    value.to_le_bytes()
}

/// Decode an `f64` from exactly 8 little-endian bytes.
///
/// # Errors
///
/// Returns [`ClientError::LengthMismatch`] if `bytes` is not exactly 8 bytes.
pub fn decode_float64(bytes: &[u8]) -> Result<f64> {
    let arr: [u8; FLOAT64_SIZE] = bytes
        .try_into()
        .map_err(|_| ClientError::LengthMismatch {
            expected: FLOAT64_SIZE,
            actual: bytes.len(),
        })?;
    Ok(f64::from_le_bytes(arr))
}

/// Encode a slice of `f64` values as concatenated 8-byte encodings.
///
/// No element count is embedded; the receiver derives it from the frame
/// length.
pub fn encode_float64_array(values: &[f64]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(values.len() * FLOAT64_SIZE);
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf
}

/// Decode a packed array of `f64` values.
///
/// Accepts any non-negative multiple of 8 bytes; a zero-length input yields
/// an empty array (indistinguishable from an absent one on this wire).
///
/// # Errors
///
/// Returns [`ClientError::AlignmentError`] if the length is not a multiple
/// of 8.
pub fn decode_float64_array(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.len() % FLOAT64_SIZE != 0 {
        return Err(ClientError::AlignmentError {
            length: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(FLOAT64_SIZE)
        .map(|chunk| {
            // chunks_exact guarantees 8-byte chunks
            let mut arr = [0u8; FLOAT64_SIZE];
            arr.copy_from_slice(chunk);
            f64::from_le_bytes(arr)
        })
        .collect())
}
