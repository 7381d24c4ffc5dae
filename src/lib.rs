//! Keyring: asymmetric key pair storage with passphrase protection.
//!
//! This library manages asymmetric key pairs (RSA, DSA, ECDSA, ECIES, ECDH)
//! for an embedding application. It enables users to:
//!
//! - Generate key material over the supported algorithms and curves
//! - Hold one key pair in memory behind an owning key ring
//! - Persist key pairs to disk in a compact binary container, optionally
//!   encrypted under a user passphrase
//! - Restore key pairs from disk and project their public parameters
//!
//! # Architecture
//!
//! The codecs and the encrypted store are stateless transforms composed by
//! the key ring owner. All operations return `Result` types with
//! comprehensive error handling - no `unwrap()` or panic.
//!
//! # Example
//!
//! ```rust,no_run
//! use keyring::keypair::generate::KeyGenRequest;
//! use keyring::storage::encrypted::StoreConfig;
//! use keyring::storage::keyring::KeyRing;
//!
//! fn example() -> keyring::error::Result<()> {
//!     let mut ring = KeyRing::new();
//!     ring.create_key_pair(&KeyGenRequest::Ecdsa {
//!         curve_name: "secp256r1".to_string(),
//!     })?;
//!     ring.save("id.key", Some("passphrase"), &StoreConfig::default())?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod curves;
pub mod error;
pub mod keypair;
pub mod storage;

// Re-export commonly used types
pub use error::{KeyRingError, Result};
pub use keypair::{KeyPairRecord, KeyType, PublicKeyInfo};
pub use storage::encrypted::StoreConfig;
pub use storage::keyring::KeyRing;
