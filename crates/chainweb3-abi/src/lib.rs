//! # chainweb3-abi
//!
//! EVM event-log decoding against a contract ABI.
//!
//! ## Implementation notes
//! - Uses `alloy-json-abi` to read the ABI and `alloy-dyn-abi` to decode
//! - `topics[0]` → event selector (keccak256 of the canonical signature)
//! - `topics[1..]` → indexed parameters (each 32 bytes, ABI-encoded)
//! - `data` → non-indexed parameters (ABI-encoded sequence)
//! - A log that matches no event, or matches a selector but not its layout,
//!   decodes to `None` rather than an error

pub mod decoder;
pub mod normalizer;

pub use decoder::{AbiLogDecoder, DecodedLog, LogDecoder};
