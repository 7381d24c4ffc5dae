//! Key container codecs.
//!
//! This module provides the two reversible transforms behind key file
//! persistence:
//!
//! - Hex encoding for ASCII-safe storage of binary data
//! - The binary key container format (magic prefix, type tag, length-prefixed
//!   fields)
//!
//! # Example
//!
//! ```
//! use keyring::codec::container::{decode, encode};
//! use keyring::codec::hex::{hex_decode, hex_encode};
//! use keyring::keypair::KeyPairRecord;
//!
//! # fn example() -> keyring::error::Result<()> {
//! let record = KeyPairRecord::Rsa {
//!     modulus: vec![0x00, 0xab],
//!     public_exponent: vec![0x01, 0x00, 0x01],
//!     private_exponent: vec![0x12, 0x34],
//! };
//!
//! // The plain at-rest form is one hex line of the binary container.
//! let line = hex_encode(&encode(&record)?);
//! let restored = decode(&hex_decode(&line)?)?;
//! assert_eq!(restored, record);
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod hex;
