//! Decoded ABI values.
//!
//! Event parameters are exposed as a closed union over the ABI primitive
//! categories, so a consumer expecting an address gets `None` from
//! [`DecodedValue::as_address`] instead of a failed runtime cast.

use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded event parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DecodedValue {
    /// `uint8` .. `uint256`
    Uint(U256),
    /// `int8` .. `int256`
    Int(I256),
    Bool(bool),
    Address(Address),
    /// `bytes`, `bytes1` .. `bytes32`, and the keccak hash stored in place of
    /// an indexed reference-type parameter.
    Bytes(Vec<u8>),
    Str(String),
    /// Fixed or dynamic array.
    Array(Vec<DecodedValue>),
    Tuple(Vec<DecodedValue>),
}

impl DecodedValue {
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            DecodedValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            DecodedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            DecodedValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DecodedValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Elements of an array or tuple.
    pub fn as_array(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::Array(v) | DecodedValue::Tuple(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// ABI category name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedValue::Uint(_) => "uint",
            DecodedValue::Int(_) => "int",
            DecodedValue::Bool(_) => "bool",
            DecodedValue::Address(_) => "address",
            DecodedValue::Bytes(_) => "bytes",
            DecodedValue::Str(_) => "string",
            DecodedValue::Array(_) => "array",
            DecodedValue::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Uint(v) => write!(f, "{v}"),
            DecodedValue::Int(v) => write!(f, "{v}"),
            DecodedValue::Bool(v) => write!(f, "{v}"),
            DecodedValue::Address(a) => write!(f, "{a}"),
            DecodedValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            DecodedValue::Str(s) => write!(f, "{s}"),
            DecodedValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            DecodedValue::Tuple(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}
