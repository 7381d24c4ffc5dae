//! Error types for the keyring library.
//!
//! This module defines all error types used throughout the library.
//! All errors implement `std::error::Error` and are designed to provide
//! clear, actionable error messages.

use thiserror::Error;

/// The main error type for keyring operations.
///
/// This enum covers all possible errors that can occur during key pair
/// construction, container encoding/decoding, encrypted storage and key
/// generation.
#[derive(Error, Debug)]
pub enum KeyRingError {
    /// Input is not a valid hex string
    #[error("Malformed hex encoding: {0}")]
    MalformedEncoding(String),

    /// Curve name is not in the registry
    #[error("Unknown curve: {0}")]
    UnknownCurve(String),

    /// Curve identifier byte is not in the registry
    #[error("Unknown curve identifier: 0x{0:02x}")]
    UnknownCurveId(u8),

    /// A required key pair field is absent
    #[error("Missing parameter: {0}")]
    MissingField(String),

    /// A field outside the key type's schema was supplied
    #[error("Unexpected parameter: {0}")]
    UnexpectedField(String),

    /// Key type name or container tag byte is not one of the five supported
    #[error("Unknown key type: {0}")]
    UnknownKeyType(String),

    /// Container magic or structure is invalid
    #[error("Invalid key container: {0}")]
    InvalidContainer(String),

    /// Container ended before the declared field data
    #[error("Truncated key container: {0}")]
    TruncatedInput(String),

    /// A field value does not fit the 2-byte length prefix
    #[error("Field too large for container: {0}")]
    OversizedField(String),

    /// Requested AES key size is not 128, 192 or 256 bits
    #[error("AES key size must be either 128, 192 or 256 bits, got {0}")]
    UnsupportedKeySize(u32),

    /// Requested modulus size is outside the accepted range
    #[error("Invalid key size: {0}")]
    InvalidKeySize(String),

    /// Curve is in the registry but has no key generation backend
    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// Key generation failed
    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    /// Symmetric cipher initialization or operation failed
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// An argument given at the call boundary is invalid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation requiring a resident key pair found none
    #[error("No key has been loaded in the keyring. Either load a key on instantiation or by calling the load() method")]
    NoKeyLoaded,

    /// The given key file does not exist
    #[error("The given file doesn't exist: {0}")]
    FileNotFound(String),

    /// Storage I/O error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for keyring operations.
pub type Result<T> = std::result::Result<T, KeyRingError>;
