//! Key pair storage module.
//!
//! This module provides file persistence for key pair records: the
//! passphrase-based encrypted store and the key ring owner that ties the
//! codecs and the store together.

pub mod encrypted;
pub mod keyring;
