//! Hex codec for ASCII-safe file storage.
//!
//! Key files are written as hex text lines so they survive any transport
//! that mangles binary data. Encoding is lowercase, two digits per byte.

use crate::error::{KeyRingError, Result};

/// Encode bytes as a lowercase hex string.
///
/// # Example
///
/// ```
/// use keyring::codec::hex::hex_encode;
///
/// assert_eq!(hex_encode(b"key"), "6b6579");
/// assert_eq!(hex_encode(b""), "");
/// ```
pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string back into bytes.
///
/// Accepts both uppercase and lowercase digits. Fails with
/// [`KeyRingError::MalformedEncoding`] if the input has odd length or
/// contains a non-hex character.
///
/// # Example
///
/// ```
/// use keyring::codec::hex::hex_decode;
///
/// assert_eq!(hex_decode("6b6579").unwrap(), b"key");
/// assert!(hex_decode("6b657").is_err());
/// assert!(hex_decode("6b65zz").is_err());
/// ```
pub fn hex_decode(input: &str) -> Result<Vec<u8>> {
    hex::decode(input).map_err(|e| KeyRingError::MalformedEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cases: &[&[u8]] = &[b"", b"\x00", b"\x00\xff", b"key", &[0u8; 64]];
        for bytes in cases {
            let encoded = hex_encode(bytes);
            assert_eq!(encoded.len(), bytes.len() * 2);
            assert_eq!(hex_decode(&encoded).unwrap(), *bytes);
        }
    }

    #[test]
    fn test_empty_string_encodes_empty() {
        assert_eq!(hex_encode(b""), "");
        assert_eq!(hex_decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_encode_is_lowercase() {
        assert_eq!(hex_encode(&[0xab, 0xcd, 0xef]), "abcdef");
    }

    #[test]
    fn test_decode_accepts_uppercase() {
        assert_eq!(hex_decode("ABCDEF").unwrap(), vec![0xab, 0xcd, 0xef]);
    }

    #[test]
    fn test_odd_length_fails() {
        let result = hex_decode("abc");
        assert!(matches!(result, Err(KeyRingError::MalformedEncoding(_))));
    }

    #[test]
    fn test_non_hex_character_fails() {
        let result = hex_decode("gg");
        assert!(matches!(result, Err(KeyRingError::MalformedEncoding(_))));
    }
}
