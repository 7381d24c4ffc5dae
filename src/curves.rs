//! Named elliptic curve registry.
//!
//! This module maps curve names to the single-byte identifiers used in the
//! key container format. The enumeration is closed and versioned: identifiers
//! `0x01`-`0x0f` denote prime (`secp*`) curves, `0x80`-`0x91` denote binary
//! (`sect*`) curves. Adding a curve means assigning a new unused byte value;
//! existing values are never reused or renumbered, otherwise previously
//! written key files become unreadable.

use crate::error::{KeyRingError, Result};

/// The full curve enumeration, in identifier order.
const CURVES: &[(u8, &str)] = &[
    // Prime curves
    (0x01, "secp112r1"),
    (0x02, "secp112r2"),
    (0x03, "secp128r1"),
    (0x04, "secp128r2"),
    (0x05, "secp160r1"),
    (0x06, "secp160r2"),
    (0x07, "secp160k1"),
    (0x08, "secp192r1"),
    (0x09, "secp192k1"),
    (0x0a, "secp224r1"),
    (0x0b, "secp224k1"),
    (0x0c, "secp256r1"),
    (0x0d, "secp256k1"),
    (0x0e, "secp384r1"),
    (0x0f, "secp521r1"),
    // Binary curves
    (0x80, "sect113r1"),
    (0x81, "sect113r2"),
    (0x82, "sect131r1"),
    (0x83, "sect131r2"),
    (0x84, "sect163r1"),
    (0x85, "sect163r2"),
    (0x86, "sect163k1"),
    (0x87, "sect193r1"),
    (0x88, "sect193r2"),
    (0x89, "sect233r1"),
    (0x8a, "sect233k1"),
    (0x8b, "sect239r1"),
    (0x8c, "sect283r1"),
    (0x8d, "sect283k1"),
    (0x8e, "sect409r1"),
    (0x8f, "sect409k1"),
    (0x90, "sect571r1"),
    (0x91, "sect571k1"),
];

/// Look up the container identifier byte for a curve name.
///
/// # Example
///
/// ```
/// use keyring::curves::id_from_name;
///
/// assert_eq!(id_from_name("secp256r1").unwrap(), 0x0c);
/// assert!(id_from_name("bogus").is_err());
/// ```
pub fn id_from_name(name: &str) -> Result<u8> {
    CURVES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(id, _)| *id)
        .ok_or_else(|| KeyRingError::UnknownCurve(name.to_string()))
}

/// Look up the curve name for a container identifier byte.
///
/// # Example
///
/// ```
/// use keyring::curves::name_from_id;
///
/// assert_eq!(name_from_id(0x0d).unwrap(), "secp256k1");
/// assert!(name_from_id(0x50).is_err());
/// ```
pub fn name_from_id(id: u8) -> Result<&'static str> {
    CURVES
        .iter()
        .find(|(i, _)| *i == id)
        .map(|(_, name)| *name)
        .ok_or(KeyRingError::UnknownCurveId(id))
}

/// Whether a curve name denotes a binary (`sect*`) curve.
///
/// Binary curves are enumerated in the registry for container compatibility
/// but rejected by key generation.
pub fn is_binary(name: &str) -> bool {
    name.starts_with("sect")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_bijection() {
        for (id, name) in CURVES {
            assert_eq!(id_from_name(name).unwrap(), *id);
            assert_eq!(name_from_id(*id).unwrap(), *name);
        }
    }

    #[test]
    fn test_registry_size() {
        assert_eq!(CURVES.len(), 33);
        assert_eq!(CURVES.iter().filter(|(_, n)| !is_binary(n)).count(), 15);
        assert_eq!(CURVES.iter().filter(|(_, n)| is_binary(n)).count(), 18);
    }

    #[test]
    fn test_unknown_name() {
        let result = id_from_name("bogus");
        assert!(matches!(result, Err(KeyRingError::UnknownCurve(_))));
    }

    #[test]
    fn test_unknown_id_between_ranges() {
        // The gap between the prime and binary ranges is unassigned.
        for id in [0x00, 0x10, 0x50, 0x7f] {
            let result = name_from_id(id);
            assert!(matches!(result, Err(KeyRingError::UnknownCurveId(_))));
        }
    }

    #[test]
    fn test_unknown_id_above_range() {
        for id in [0x92, 0xa0, 0xff] {
            let result = name_from_id(id);
            assert!(matches!(result, Err(KeyRingError::UnknownCurveId(_))));
        }
    }

    #[test]
    fn test_is_binary() {
        assert!(is_binary("sect571k1"));
        assert!(!is_binary("secp256r1"));
    }
}
