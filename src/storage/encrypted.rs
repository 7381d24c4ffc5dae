//! Passphrase-based encryption for key containers at rest.
//!
//! The encrypted file form is three hex text lines: salt, IV, ciphertext.
//! The key is derived from the passphrase with PBKDF2-HMAC-SHA1 and the
//! container is encrypted with AES in CFB mode, so the ciphertext is exactly
//! as long as the plaintext. Iteration count and AES key size are not stored
//! in the file; callers must supply the same [`StoreConfig`] on both sides.
//!
//! There is no authentication tag. A wrong passphrase or corrupted file
//! decrypts to garbage that surfaces, at best, as a container parse error
//! downstream.

use crate::codec::hex::{hex_decode, hex_encode};
use crate::error::{KeyRingError, Result};
use aes::{Aes128, Aes192, Aes256};
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;

type Aes128CfbEnc = cfb_mode::Encryptor<Aes128>;
type Aes128CfbDec = cfb_mode::Decryptor<Aes128>;
type Aes192CfbEnc = cfb_mode::Encryptor<Aes192>;
type Aes192CfbDec = cfb_mode::Decryptor<Aes192>;
type Aes256CfbEnc = cfb_mode::Encryptor<Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

/// The length of the key derivation salt.
pub const SALT_LENGTH: usize = 16;

/// The length of the cipher initialization vector (the AES block size).
pub const IV_LENGTH: usize = 16;

/// Key derivation and cipher parameters for the encrypted store.
///
/// These are a compatibility contract: a file sealed under one configuration
/// only opens under the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// PBKDF2 iteration count.
    pub pbkdf_iterations: u32,

    /// AES key size in bits; must be 128, 192 or 256.
    pub aes_key_size_bits: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pbkdf_iterations: 1000,
            aes_key_size_bits: 256,
        }
    }
}

impl StoreConfig {
    /// The derived key length in bytes, validating the configured size.
    fn key_length(&self) -> Result<usize> {
        match self.aes_key_size_bits {
            128 => Ok(16),
            192 => Ok(24),
            256 => Ok(32),
            other => Err(KeyRingError::UnsupportedKeySize(other)),
        }
    }
}

/// Derive a symmetric key from a passphrase and salt using PBKDF2-HMAC-SHA1.
///
/// SHA-1 and the low default iteration count are preserved legacy behavior;
/// changing either breaks every existing encrypted key file.
pub fn derive_key(passphrase: &[u8], salt: &[u8], config: &StoreConfig) -> Result<Vec<u8>> {
    let mut key = vec![0u8; config.key_length()?];
    pbkdf2_hmac::<Sha1>(passphrase, salt, config.pbkdf_iterations, &mut key);
    Ok(key)
}

fn encrypt_in_place(key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<()> {
    match key.len() {
        16 => Aes128CfbEnc::new_from_slices(key, iv)
            .map_err(|e| KeyRingError::Cipher(e.to_string()))?
            .encrypt(buf),
        24 => Aes192CfbEnc::new_from_slices(key, iv)
            .map_err(|e| KeyRingError::Cipher(e.to_string()))?
            .encrypt(buf),
        32 => Aes256CfbEnc::new_from_slices(key, iv)
            .map_err(|e| KeyRingError::Cipher(e.to_string()))?
            .encrypt(buf),
        other => return Err(KeyRingError::UnsupportedKeySize(other as u32 * 8)),
    }
    Ok(())
}

fn decrypt_in_place(key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<()> {
    match key.len() {
        16 => Aes128CfbDec::new_from_slices(key, iv)
            .map_err(|e| KeyRingError::Cipher(e.to_string()))?
            .decrypt(buf),
        24 => Aes192CfbDec::new_from_slices(key, iv)
            .map_err(|e| KeyRingError::Cipher(e.to_string()))?
            .decrypt(buf),
        32 => Aes256CfbDec::new_from_slices(key, iv)
            .map_err(|e| KeyRingError::Cipher(e.to_string()))?
            .decrypt(buf),
        other => return Err(KeyRingError::UnsupportedKeySize(other as u32 * 8)),
    }
    Ok(())
}

/// Seal a binary container under a passphrase.
///
/// Generates a fresh random salt and IV, derives the key and returns the
/// three-line encrypted file content: hex(salt), hex(iv), hex(ciphertext).
///
/// # Example
///
/// ```
/// use keyring::storage::encrypted::{open, seal, StoreConfig};
///
/// let config = StoreConfig::default();
/// let sealed = seal(b"key\x01\x00\x01\xab", "correct horse", &config).unwrap();
///
/// assert_eq!(sealed.lines().count(), 3);
/// let reopened = open(&sealed, "correct horse", &config).unwrap();
/// assert_eq!(reopened, b"key\x01\x00\x01\xab");
/// ```
pub fn seal(plaintext: &[u8], passphrase: &str, config: &StoreConfig) -> Result<String> {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    let key = derive_key(passphrase.as_bytes(), &salt, config)?;

    let mut iv = [0u8; IV_LENGTH];
    OsRng.fill_bytes(&mut iv);

    let mut buf = plaintext.to_vec();
    encrypt_in_place(&key, &iv, &mut buf)?;

    Ok(format!(
        "{}\n{}\n{}",
        hex_encode(&salt),
        hex_encode(&iv),
        hex_encode(&buf)
    ))
}

/// Open a sealed file content back into the binary container.
///
/// Parses the three lines, re-derives the key from the passphrase and the
/// stored salt, and decrypts. The result is whatever the cipher produces:
/// with a wrong passphrase this is garbage, and only the downstream container
/// decode will notice, if anything does.
pub fn open(content: &str, passphrase: &str, config: &StoreConfig) -> Result<Vec<u8>> {
    let mut lines = content.lines();
    let salt_line = lines
        .next()
        .ok_or_else(|| KeyRingError::InvalidContainer("missing salt line".to_string()))?;
    let iv_line = lines
        .next()
        .ok_or_else(|| KeyRingError::InvalidContainer("missing IV line".to_string()))?;
    // An empty ciphertext leaves no third line to read.
    let cipher_line = lines.next().unwrap_or("");

    let salt = hex_decode(salt_line)?;
    let iv = hex_decode(iv_line)?;
    let mut buf = hex_decode(cipher_line)?;

    if iv.len() != IV_LENGTH {
        return Err(KeyRingError::InvalidContainer(format!(
            "initialization vector must be {} bytes, got {}",
            IV_LENGTH,
            iv.len()
        )));
    }

    let key = derive_key(passphrase.as_bytes(), &salt, config)?;
    decrypt_in_place(&key, &iv, &mut buf)?;
    Ok(buf)
}
