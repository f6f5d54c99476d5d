//! Data model - parameter values, replacements and outputs.
//!
//! [`ParameterKind`] reserves the full tag space the server understands,
//! even though this client only ever produces three of the ten kinds.
//! Keeping the closed enum means future values round-trip without an
//! encoding scheme change.
//!
//! # Example
//!
//! ```
//! use simwire_client::{ParameterKind, Replacement};
//!
//! let change = Replacement::float64("[Wheat].Phenology.Phase", 12.5);
//! assert_eq!(change.value().kind(), ParameterKind::Float64);
//! assert_eq!(change.value().encode().len(), 8);
//! ```

use bytes::Bytes;

use crate::codec;
use crate::error::{ClientError, Result};

/// Wire-level parameter type tags.
///
/// The tag is transmitted as an int32 frame ahead of every replacement
/// value. Only `Int32`, `Float64` and `Float64Array` are ever produced by
/// this client; the remaining tags are reserved so the tag space matches
/// the server's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// 32-bit signed integer (tag 0).
    Int32,
    /// IEEE-754 binary64 (tag 1).
    Float64,
    /// Boolean (tag 2, reserved).
    Bool,
    /// Date (tag 3, reserved).
    Date,
    /// String (tag 4, reserved).
    String,
    /// Array of int32 (tag 5, reserved).
    Int32Array,
    /// Array of float64 (tag 6).
    Float64Array,
    /// Array of bool (tag 7, reserved).
    BoolArray,
    /// Array of date (tag 8, reserved).
    DateArray,
    /// Array of string (tag 9, reserved).
    StringArray,
}

impl ParameterKind {
    /// The integer tag sent on the wire.
    pub fn tag(self) -> i32 {
        match self {
            ParameterKind::Int32 => 0,
            ParameterKind::Float64 => 1,
            ParameterKind::Bool => 2,
            ParameterKind::Date => 3,
            ParameterKind::String => 4,
            ParameterKind::Int32Array => 5,
            ParameterKind::Float64Array => 6,
            ParameterKind::BoolArray => 7,
            ParameterKind::DateArray => 8,
            ParameterKind::StringArray => 9,
        }
    }

    /// Resolve a wire tag back to a kind.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownTag`] for tags outside 0..=9.
    pub fn from_tag(tag: i32) -> Result<Self> {
        Ok(match tag {
            0 => ParameterKind::Int32,
            1 => ParameterKind::Float64,
            2 => ParameterKind::Bool,
            3 => ParameterKind::Date,
            4 => ParameterKind::String,
            5 => ParameterKind::Int32Array,
            6 => ParameterKind::Float64Array,
            7 => ParameterKind::BoolArray,
            8 => ParameterKind::DateArray,
            9 => ParameterKind::StringArray,
            other => return Err(ClientError::UnknownTag(other)),
        })
    }
}

/// A typed parameter value, restricted to the kinds this client transmits.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit float.
    Float64(f64),
    /// Packed array of 64-bit floats, no element-count prefix on the wire.
    Float64Array(Vec<f64>),
}

impl ParameterValue {
    /// The wire tag kind of this value.
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Int32(_) => ParameterKind::Int32,
            ParameterValue::Float64(_) => ParameterKind::Float64,
            ParameterValue::Float64Array(_) => ParameterKind::Float64Array,
        }
    }

    /// Encode the value into its canonical little-endian byte form.
    pub fn encode(&self) -> Bytes {
        match self {
            ParameterValue::Int32(v) => Bytes::copy_from_slice(&codec::encode_int32(*v)),
            ParameterValue::Float64(v) => Bytes::copy_from_slice(&codec::encode_float64(*v)),
            ParameterValue::Float64Array(values) => {
                Bytes::from(codec::encode_float64_array(values))
            }
        }
    }

    /// Encoded length in bytes: 4, 8, or 8×n.
    pub fn byte_len(&self) -> usize {
        match self {
            ParameterValue::Int32(_) => codec::INT32_SIZE,
            ParameterValue::Float64(_) => codec::FLOAT64_SIZE,
            ParameterValue::Float64Array(values) => values.len() * codec::FLOAT64_SIZE,
        }
    }
}

/// A parameter override to apply before re-running the simulation.
///
/// `path` is a dotted/bracketed address into the server's simulation object
/// tree; it is opaque to the client and not validated. A replacement is
/// immutable after construction and only read during transmission, never
/// retained by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    path: String,
    value: ParameterValue,
}

impl Replacement {
    /// Create a replacement with an arbitrary constructible value.
    pub fn new(path: impl Into<String>, value: ParameterValue) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }

    /// Create an int32 replacement.
    pub fn int32(path: impl Into<String>, value: i32) -> Self {
        Self::new(path, ParameterValue::Int32(value))
    }

    /// Create a float64 replacement.
    pub fn float64(path: impl Into<String>, value: f64) -> Self {
        Self::new(path, ParameterValue::Float64(value))
    }

    /// Create a float64-array replacement.
    pub fn float64_array(path: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(path, ParameterValue::Float64Array(values))
    }

    /// The parameter path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The value to substitute.
    pub fn value(&self) -> &ParameterValue {
        &self.value
    }
}

/// One untyped result payload for a requested table column.
///
/// The client does not know the server's type for an output; interpretation
/// is a contract between the byte length and the caller. In practice
/// outputs are packed float64 arrays, which [`Output::as_f64_array`]
/// reinterprets.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    bytes: Bytes,
}

impl Output {
    /// Wrap raw result bytes.
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// The raw payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reinterpret the payload as a packed little-endian float64 array.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AlignmentError`] if the length is not a
    /// multiple of 8.
    pub fn as_f64_array(&self) -> Result<Vec<f64>> {
        codec::decode_float64_array(&self.bytes)
    }
}
