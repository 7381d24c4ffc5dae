//! Key pair generation.
//!
//! This module generates fresh key pair records using a cryptographically
//! secure random number generator. RSA and DSA are generated by modulus bit
//! length; the elliptic-curve types are generated over a named prime curve.
//!
//! Every curve in the registry decodes from a key container, but generation
//! needs an arithmetic backend: secp256r1, secp256k1 and secp384r1 are
//! supported. Binary (`sect*`) curves are rejected outright.

use crate::curves;
use crate::error::{KeyRingError, Result};
use crate::keypair::{KeyPairRecord, KeyType};
use dsa::KeySize;
use elliptic_curve::sec1::ToEncodedPoint;
use num_bigint_dig::BigUint;
use rand::rngs::OsRng;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};

/// A request to generate one key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyGenRequest {
    /// RSA by modulus bit length (1024-16384).
    Rsa {
        /// Modulus size in bits
        modulus_bits: usize,
    },
    /// DSA by modulus bit length (1024, 2048 or 3072).
    Dsa {
        /// Modulus size in bits
        modulus_bits: usize,
    },
    /// ECDSA over a named prime curve.
    Ecdsa {
        /// Registry name of the curve
        curve_name: String,
    },
    /// ECIES over a named prime curve.
    Ecies {
        /// Registry name of the curve
        curve_name: String,
    },
    /// ECDH over a named prime curve.
    Ecdh {
        /// Registry name of the curve
        curve_name: String,
    },
}

impl KeyGenRequest {
    /// The key type this request produces.
    pub fn key_type(&self) -> KeyType {
        match self {
            KeyGenRequest::Rsa { .. } => KeyType::Rsa,
            KeyGenRequest::Dsa { .. } => KeyType::Dsa,
            KeyGenRequest::Ecdsa { .. } => KeyType::Ecdsa,
            KeyGenRequest::Ecies { .. } => KeyType::Ecies,
            KeyGenRequest::Ecdh { .. } => KeyType::Ecdh,
        }
    }
}

/// Reduce a big-endian byte string to the minimal encoding of its integer
/// value.
fn min_be(bytes: &[u8]) -> Vec<u8> {
    BigUint::from_bytes_be(bytes).to_bytes_be()
}

/// Generate a key pair record for the given request.
///
/// # Example
///
/// ```no_run
/// use keyring::keypair::generate::{generate_key_pair, KeyGenRequest};
///
/// # fn example() -> keyring::error::Result<()> {
/// let record = generate_key_pair(&KeyGenRequest::Ecdsa {
///     curve_name: "secp256r1".to_string(),
/// })?;
/// assert_eq!(record.key_type().as_str(), "ecdsa");
/// # Ok(())
/// # }
/// ```
pub fn generate_key_pair(request: &KeyGenRequest) -> Result<KeyPairRecord> {
    match request {
        KeyGenRequest::Rsa { modulus_bits } => generate_rsa(*modulus_bits),
        KeyGenRequest::Dsa { modulus_bits } => generate_dsa(*modulus_bits),
        KeyGenRequest::Ecdsa { curve_name } => {
            let material = generate_ec_material(curve_name)?;
            Ok(KeyPairRecord::Ecdsa {
                curve_name: curve_name.clone(),
                public_key_x: material.x,
                public_key_y: material.y,
                private_key: material.scalar,
            })
        }
        KeyGenRequest::Ecies { curve_name } => {
            let material = generate_ec_material(curve_name)?;
            Ok(KeyPairRecord::Ecies {
                curve_name: curve_name.clone(),
                public_key_x: material.x,
                public_key_y: material.y,
                private_key: material.scalar,
            })
        }
        KeyGenRequest::Ecdh { curve_name } => {
            let material = generate_ec_material(curve_name)?;
            Ok(KeyPairRecord::Ecdh {
                curve_name: curve_name.clone(),
                public_key: material.point,
                private_key: material.scalar,
            })
        }
    }
}

fn generate_rsa(modulus_bits: usize) -> Result<KeyPairRecord> {
    if !(1024..=16384).contains(&modulus_bits) {
        return Err(KeyRingError::InvalidKeySize(format!(
            "RSA modulus must be between 1024 and 16384 bits, got {}",
            modulus_bits
        )));
    }

    let private = rsa::RsaPrivateKey::new(&mut OsRng, modulus_bits)
        .map_err(|e| KeyRingError::KeyGeneration(e.to_string()))?;

    Ok(KeyPairRecord::Rsa {
        modulus: private.n().to_bytes_be(),
        public_exponent: private.e().to_bytes_be(),
        private_exponent: private.d().to_bytes_be(),
    })
}

fn generate_dsa(modulus_bits: usize) -> Result<KeyPairRecord> {
    let key_size = match modulus_bits {
        1024 => KeySize::DSA_1024_160,
        2048 => KeySize::DSA_2048_256,
        3072 => KeySize::DSA_3072_256,
        other => {
            return Err(KeyRingError::InvalidKeySize(format!(
                "DSA modulus must be 1024, 2048 or 3072 bits, got {}",
                other
            )))
        }
    };

    let components = dsa::Components::generate(&mut OsRng, key_size);
    let signing_key = dsa::SigningKey::generate(&mut OsRng, components);
    let verifying_key = signing_key.verifying_key();

    Ok(KeyPairRecord::Dsa {
        prime_field: verifying_key.components().p().to_bytes_be(),
        divider: verifying_key.components().q().to_bytes_be(),
        base: verifying_key.components().g().to_bytes_be(),
        public_element: verifying_key.y().to_bytes_be(),
        private_exponent: signing_key.x().to_bytes_be(),
    })
}

/// The raw outputs of one elliptic-curve key generation.
struct EcMaterial {
    x: Vec<u8>,
    y: Vec<u8>,
    point: Vec<u8>,
    scalar: Vec<u8>,
}

fn affine_part(part: Option<&[u8]>) -> Result<Vec<u8>> {
    part.map(min_be)
        .ok_or_else(|| KeyRingError::KeyGeneration("public point has no affine coordinates".to_string()))
}

fn generate_ec_material(curve_name: &str) -> Result<EcMaterial> {
    curves::id_from_name(curve_name)?;
    if curves::is_binary(curve_name) {
        return Err(KeyRingError::UnsupportedCurve(
            "binary curves are not supported yet, please use a prime curve".to_string(),
        ));
    }

    match curve_name {
        "secp256r1" => {
            let secret = p256::SecretKey::random(&mut OsRng);
            let public = secret.public_key().to_encoded_point(false);
            Ok(EcMaterial {
                x: affine_part(public.x().map(|v| v.as_slice()))?,
                y: affine_part(public.y().map(|v| v.as_slice()))?,
                point: min_be(public.as_bytes()),
                scalar: min_be(&secret.to_bytes()),
            })
        }
        "secp256k1" => {
            let secret = k256::SecretKey::random(&mut OsRng);
            let public = secret.public_key().to_encoded_point(false);
            Ok(EcMaterial {
                x: affine_part(public.x().map(|v| v.as_slice()))?,
                y: affine_part(public.y().map(|v| v.as_slice()))?,
                point: min_be(public.as_bytes()),
                scalar: min_be(&secret.to_bytes()),
            })
        }
        "secp384r1" => {
            let secret = p384::SecretKey::random(&mut OsRng);
            let public = secret.public_key().to_encoded_point(false);
            Ok(EcMaterial {
                x: affine_part(public.x().map(|v| v.as_slice()))?,
                y: affine_part(public.y().map(|v| v.as_slice()))?,
                point: min_be(public.as_bytes()),
                scalar: min_be(&secret.to_bytes()),
            })
        }
        other => Err(KeyRingError::UnsupportedCurve(format!(
            "no key generation backend for {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::container::{decode, encode};

    #[test]
    fn test_generate_rsa() {
        let record = generate_key_pair(&KeyGenRequest::Rsa { modulus_bits: 1024 }).unwrap();

        match &record {
            KeyPairRecord::Rsa {
                modulus,
                public_exponent,
                private_exponent,
            } => {
                // Minimal encoding of a 1024-bit modulus is exactly 128 bytes.
                assert_eq!(modulus.len(), 128);
                assert_eq!(public_exponent, &vec![0x01, 0x00, 0x01]);
                assert!(!private_exponent.is_empty());
            }
            other => panic!("expected rsa record, got {:?}", other.key_type()),
        }

        // Generated records survive the container round trip.
        assert_eq!(decode(&encode(&record).unwrap()).unwrap(), record);
    }

    #[test]
    fn test_generate_rsa_invalid_size() {
        for bits in [0, 512, 1023, 16385] {
            let result = generate_key_pair(&KeyGenRequest::Rsa { modulus_bits: bits });
            assert!(matches!(result, Err(KeyRingError::InvalidKeySize(_))));
        }
    }

    #[test]
    fn test_generate_dsa_invalid_size() {
        for bits in [512, 1536, 4096] {
            let result = generate_key_pair(&KeyGenRequest::Dsa { modulus_bits: bits });
            assert!(matches!(result, Err(KeyRingError::InvalidKeySize(_))));
        }
    }

    #[test]
    #[ignore = "DSA parameter generation takes minutes in debug builds"]
    fn test_generate_dsa() {
        let record = generate_key_pair(&KeyGenRequest::Dsa { modulus_bits: 1024 }).unwrap();

        match &record {
            KeyPairRecord::Dsa {
                prime_field,
                divider,
                base,
                public_element,
                private_exponent,
            } => {
                assert_eq!(prime_field.len(), 128);
                assert_eq!(divider.len(), 20);
                assert!(!base.is_empty());
                assert!(!public_element.is_empty());
                assert!(!private_exponent.is_empty());
            }
            other => panic!("expected dsa record, got {:?}", other.key_type()),
        }

        assert_eq!(decode(&encode(&record).unwrap()).unwrap(), record);
    }

    #[test]
    fn test_generate_ecdsa_each_supported_curve() {
        for curve in ["secp256r1", "secp256k1", "secp384r1"] {
            let record = generate_key_pair(&KeyGenRequest::Ecdsa {
                curve_name: curve.to_string(),
            })
            .unwrap();

            match &record {
                KeyPairRecord::Ecdsa {
                    curve_name,
                    public_key_x,
                    public_key_y,
                    private_key,
                } => {
                    assert_eq!(curve_name, curve);
                    assert!(!public_key_x.is_empty());
                    assert!(!public_key_y.is_empty());
                    assert!(!private_key.is_empty());
                    // Minimal encoding never carries a leading zero byte.
                    assert_ne!(public_key_x[0], 0x00);
                    assert_ne!(public_key_y[0], 0x00);
                }
                other => panic!("expected ecdsa record, got {:?}", other.key_type()),
            }

            assert_eq!(decode(&encode(&record).unwrap()).unwrap(), record);
        }
    }

    #[test]
    fn test_generate_ecies() {
        let record = generate_key_pair(&KeyGenRequest::Ecies {
            curve_name: "secp256k1".to_string(),
        })
        .unwrap();
        assert_eq!(record.key_type(), KeyType::Ecies);
        assert_eq!(decode(&encode(&record).unwrap()).unwrap(), record);
    }

    #[test]
    fn test_generate_ecdh_public_key_is_uncompressed_point() {
        let record = generate_key_pair(&KeyGenRequest::Ecdh {
            curve_name: "secp384r1".to_string(),
        })
        .unwrap();

        match &record {
            KeyPairRecord::Ecdh {
                public_key,
                private_key,
                ..
            } => {
                assert_eq!(public_key[0], 0x04);
                assert_eq!(public_key.len(), 1 + 2 * 48);
                assert!(!private_key.is_empty());
            }
            other => panic!("expected ecdh record, got {:?}", other.key_type()),
        }
    }

    #[test]
    fn test_generate_is_randomized() {
        let request = KeyGenRequest::Ecdsa {
            curve_name: "secp256r1".to_string(),
        };
        let record1 = generate_key_pair(&request).unwrap();
        let record2 = generate_key_pair(&request).unwrap();
        assert_ne!(record1, record2);
    }

    #[test]
    fn test_binary_curve_rejected() {
        let result = generate_key_pair(&KeyGenRequest::Ecdsa {
            curve_name: "sect571k1".to_string(),
        });
        assert!(matches!(result, Err(KeyRingError::UnsupportedCurve(_))));
    }

    #[test]
    fn test_unknown_curve_rejected() {
        let result = generate_key_pair(&KeyGenRequest::Ecdh {
            curve_name: "secp999r1".to_string(),
        });
        assert!(matches!(result, Err(KeyRingError::UnknownCurve(_))));
    }

    #[test]
    fn test_prime_curve_without_backend_rejected() {
        let result = generate_key_pair(&KeyGenRequest::Ecies {
            curve_name: "secp112r1".to_string(),
        });
        assert!(matches!(result, Err(KeyRingError::UnsupportedCurve(_))));
    }

    #[test]
    fn test_request_key_type() {
        let request = KeyGenRequest::Ecdh {
            curve_name: "secp256r1".to_string(),
        };
        assert_eq!(request.key_type(), KeyType::Ecdh);
    }
}
