//! Converts alloy `DynSolValue` → ChainWeb3 `DecodedValue`.

use alloy_dyn_abi::DynSolValue;
use chainweb3_core::DecodedValue;

/// Convert a decoded `DynSolValue` into a `DecodedValue`.
pub fn normalize(val: DynSolValue) -> DecodedValue {
    match val {
        DynSolValue::Bool(b) => DecodedValue::Bool(b),
        DynSolValue::Int(i, _bits) => DecodedValue::Int(i),
        DynSolValue::Uint(u, _bits) => DecodedValue::Uint(u),

        // stored left-aligned in a 32-byte word
        DynSolValue::FixedBytes(word, size) => DecodedValue::Bytes(word[..size].to_vec()),

        DynSolValue::Bytes(b) => DecodedValue::Bytes(b),
        DynSolValue::String(s) => DecodedValue::Str(s),
        DynSolValue::Address(a) => DecodedValue::Address(a),

        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
            DecodedValue::Array(vals.into_iter().map(normalize).collect())
        }

        DynSolValue::Tuple(fields) => {
            DecodedValue::Tuple(fields.into_iter().map(normalize).collect())
        }

        // address + selector, kept as raw bytes
        DynSolValue::Function(f) => DecodedValue::Bytes(f.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, B256, I256, U256};

    #[test]
    fn normalize_uint256() {
        let v = normalize(DynSolValue::Uint(U256::from(42u64), 256));
        assert_eq!(v, DecodedValue::Uint(U256::from(42u64)));
    }

    #[test]
    fn normalize_negative_int() {
        let v = normalize(DynSolValue::Int(I256::MINUS_ONE, 24));
        assert_eq!(v.as_int(), Some(I256::MINUS_ONE));
    }

    #[test]
    fn fixed_bytes_are_truncated_to_size() {
        let v = normalize(DynSolValue::FixedBytes(B256::repeat_byte(0xaa), 4));
        assert_eq!(v.as_bytes(), Some(&[0xaa, 0xaa, 0xaa, 0xaa][..]));
    }

    #[test]
    fn normalize_nested() {
        let a = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
        let v = normalize(DynSolValue::Tuple(vec![
            DynSolValue::Address(a),
            DynSolValue::Array(vec![DynSolValue::String("x".into())]),
        ]));
        let parts = v.as_array().unwrap();
        assert_eq!(parts[0].as_address(), Some(a));
        assert_eq!(parts[1].as_array().unwrap()[0].as_str(), Some("x"));
    }
}
