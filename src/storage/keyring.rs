//! The key ring: a single resident key pair with file persistence.
//!
//! A `KeyRing` owns at most one [`KeyPairRecord`] at a time. Creating or
//! loading a key pair replaces the resident record wholesale; there is no
//! in-place mutation. Saving writes the binary container to disk as hex
//! text, either plain (one line) or sealed under a passphrase (three lines).

use crate::codec::container::{decode, encode};
use crate::codec::hex::{hex_decode, hex_encode};
use crate::error::{KeyRingError, Result};
use crate::keypair::generate::{generate_key_pair, KeyGenRequest};
use crate::keypair::{KeyPairRecord, PublicKeyInfo};
use crate::storage::encrypted::{open, seal, StoreConfig};
use std::fs;
use std::path::Path;

/// An owner for one asymmetric key pair.
#[derive(Debug, Clone, Default)]
pub struct KeyRing {
    key_pair: Option<KeyPairRecord>,
}

/// Treat an empty passphrase the same as no passphrase.
fn effective_passphrase(passphrase: Option<&str>) -> Option<&str> {
    passphrase.filter(|p| !p.is_empty())
}

impl KeyRing {
    /// Create an empty key ring.
    pub fn new() -> Self {
        Self { key_pair: None }
    }

    /// Create a key ring and load a key pair from the given file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use keyring::storage::encrypted::StoreConfig;
    /// use keyring::storage::keyring::KeyRing;
    ///
    /// # fn example() -> keyring::error::Result<()> {
    /// let ring = KeyRing::open("id.key", Some("passphrase"), &StoreConfig::default())?;
    /// println!("{:?}", ring.public_key_info()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn open<P: AsRef<Path>>(
        path: P,
        passphrase: Option<&str>,
        config: &StoreConfig,
    ) -> Result<Self> {
        let mut ring = Self::new();
        ring.load(path, passphrase, config)?;
        Ok(ring)
    }

    /// The resident key pair record, if any.
    pub fn record(&self) -> Option<&KeyPairRecord> {
        self.key_pair.as_ref()
    }

    /// Load a key pair from a file, replacing any resident record.
    ///
    /// Without a passphrase the file must be the single-line plain form;
    /// with one it must be the three-line sealed form, opened with the same
    /// [`StoreConfig`] it was saved under.
    pub fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
        passphrase: Option<&str>,
        config: &StoreConfig,
    ) -> Result<&KeyPairRecord> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(KeyRingError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let container = match effective_passphrase(passphrase) {
            Some(passphrase) => open(&content, passphrase, config)?,
            None => {
                let line = content.lines().next().unwrap_or("");
                hex_decode(line)?
            }
        };

        let record = decode(&container)?;
        Ok(self.key_pair.insert(record))
    }

    /// Save the resident key pair to a file.
    ///
    /// Fails with [`KeyRingError::NoKeyLoaded`] if the ring is empty.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        passphrase: Option<&str>,
        config: &StoreConfig,
    ) -> Result<()> {
        let record = self.key_pair.as_ref().ok_or(KeyRingError::NoKeyLoaded)?;
        let container = encode(record)?;

        let content = match effective_passphrase(passphrase) {
            Some(passphrase) => seal(&container, passphrase, config)?,
            None => hex_encode(&container),
        };

        fs::write(path, content)?;
        Ok(())
    }

    /// Drop the resident key pair, if any.
    pub fn clear(&mut self) {
        self.key_pair = None;
    }

    /// Project the public-facing fields of the resident key pair.
    pub fn public_key_info(&self) -> Result<PublicKeyInfo> {
        self.key_pair
            .as_ref()
            .map(KeyPairRecord::public_key_info)
            .ok_or(KeyRingError::NoKeyLoaded)
    }

    /// Generate a fresh key pair, replacing any resident record, and return
    /// its public projection.
    pub fn create_key_pair(&mut self, request: &KeyGenRequest) -> Result<PublicKeyInfo> {
        let record = generate_key_pair(request)?;
        Ok(self.key_pair.insert(record).public_key_info())
    }

    /// Install an already-built record, replacing any resident one.
    pub fn set_record(&mut self, record: KeyPairRecord) -> &KeyPairRecord {
        self.key_pair.insert(record)
    }
}
