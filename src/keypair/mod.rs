//! Key pair records.
//!
//! This module defines the in-memory representation of one asymmetric key
//! pair: a closed set of five key types, each carrying exactly the fields its
//! schema requires. Numeric fields hold the minimal big-endian encoding of
//! the underlying unsigned integer.

pub mod generate;

use crate::codec::hex::{hex_decode, hex_encode};
use crate::curves;
use crate::error::{KeyRingError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// The five supported key pair kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// RSA encryption/signature keys
    Rsa,
    /// DSA signature keys
    Dsa,
    /// ECDSA signature keys over a named curve
    Ecdsa,
    /// ECIES encryption keys over a named curve
    Ecies,
    /// ECDH key agreement keys over a named curve
    Ecdh,
}

impl KeyType {
    /// The lowercase algorithm name.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Rsa => "rsa",
            KeyType::Dsa => "dsa",
            KeyType::Ecdsa => "ecdsa",
            KeyType::Ecies => "ecies",
            KeyType::Ecdh => "ecdh",
        }
    }

    /// Parse an algorithm name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "rsa" => Ok(KeyType::Rsa),
            "dsa" => Ok(KeyType::Dsa),
            "ecdsa" => Ok(KeyType::Ecdsa),
            "ecies" => Ok(KeyType::Ecies),
            "ecdh" => Ok(KeyType::Ecdh),
            _ => Err(KeyRingError::UnknownKeyType(name.to_string())),
        }
    }

    /// The container tag byte for this key type.
    ///
    /// Container tags are a separate byte space from curve identifiers.
    pub fn tag_byte(&self) -> u8 {
        match self {
            KeyType::Ecdsa => 0x00,
            KeyType::Rsa => 0x01,
            KeyType::Dsa => 0x02,
            KeyType::Ecdh => 0x03,
            KeyType::Ecies => 0x04,
        }
    }

    /// Dispatch a container tag byte.
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0x00 => Ok(KeyType::Ecdsa),
            0x01 => Ok(KeyType::Rsa),
            0x02 => Ok(KeyType::Dsa),
            0x03 => Ok(KeyType::Ecdh),
            0x04 => Ok(KeyType::Ecies),
            _ => Err(KeyRingError::UnknownKeyType(format!("0x{:02x}", tag))),
        }
    }

    /// The required field names for this key type, in container order.
    ///
    /// These are the external (camelCase) names used by loose-field
    /// construction and the public projection; `keyType` itself is not
    /// listed.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            KeyType::Rsa => &["modulus", "publicExponent", "privateExponent"],
            KeyType::Dsa => &[
                "primeField",
                "divider",
                "base",
                "publicElement",
                "privateExponent",
            ],
            KeyType::Ecdsa | KeyType::Ecies => {
                &["curveName", "publicKeyX", "publicKeyY", "privateKey"]
            }
            KeyType::Ecdh => &["curveName", "publicKey", "privateKey"],
        }
    }
}

/// One asymmetric key pair, tagged by algorithm.
///
/// Each variant carries exactly the fields required for its key type, so a
/// structurally incomplete record cannot be represented. Numeric fields are
/// raw big-endian byte strings; curve names are validated against the curve
/// registry at every construction boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPairRecord {
    /// RSA key pair.
    Rsa {
        /// The public modulus n
        modulus: Vec<u8>,
        /// The public exponent e
        public_exponent: Vec<u8>,
        /// The private exponent d
        private_exponent: Vec<u8>,
    },
    /// DSA key pair.
    Dsa {
        /// The prime modulus p
        prime_field: Vec<u8>,
        /// The subgroup order q
        divider: Vec<u8>,
        /// The subgroup generator g
        base: Vec<u8>,
        /// The public element y
        public_element: Vec<u8>,
        /// The private exponent x
        private_exponent: Vec<u8>,
    },
    /// ECDSA key pair over a named curve.
    Ecdsa {
        /// Registry name of the curve
        curve_name: String,
        /// Affine x coordinate of the public point
        public_key_x: Vec<u8>,
        /// Affine y coordinate of the public point
        public_key_y: Vec<u8>,
        /// The private scalar
        private_key: Vec<u8>,
    },
    /// ECIES key pair over a named curve.
    Ecies {
        /// Registry name of the curve
        curve_name: String,
        /// Affine x coordinate of the public point
        public_key_x: Vec<u8>,
        /// Affine y coordinate of the public point
        public_key_y: Vec<u8>,
        /// The private scalar
        private_key: Vec<u8>,
    },
    /// ECDH key pair over a named curve.
    Ecdh {
        /// Registry name of the curve
        curve_name: String,
        /// The encoded public element
        public_key: Vec<u8>,
        /// The private scalar
        private_key: Vec<u8>,
    },
}

impl KeyPairRecord {
    /// The key type of this record.
    pub fn key_type(&self) -> KeyType {
        match self {
            KeyPairRecord::Rsa { .. } => KeyType::Rsa,
            KeyPairRecord::Dsa { .. } => KeyType::Dsa,
            KeyPairRecord::Ecdsa { .. } => KeyType::Ecdsa,
            KeyPairRecord::Ecies { .. } => KeyType::Ecies,
            KeyPairRecord::Ecdh { .. } => KeyType::Ecdh,
        }
    }

    /// Build a record from a loose field map, as received from a binding
    /// boundary.
    ///
    /// The map must contain `keyType` plus exactly the required fields for
    /// that type, no more and no fewer. Numeric values are hex strings;
    /// `curveName` must be in the curve registry.
    ///
    /// # Example
    ///
    /// ```
    /// use keyring::keypair::KeyPairRecord;
    /// use std::collections::HashMap;
    ///
    /// let mut fields = HashMap::new();
    /// fields.insert("keyType".to_string(), "rsa".to_string());
    /// fields.insert("modulus".to_string(), "00ab".to_string());
    /// fields.insert("publicExponent".to_string(), "010001".to_string());
    /// fields.insert("privateExponent".to_string(), "1234".to_string());
    ///
    /// let record = KeyPairRecord::from_fields(&fields).unwrap();
    /// assert_eq!(record.key_type().as_str(), "rsa");
    /// ```
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self> {
        let type_name = fields
            .get("keyType")
            .ok_or_else(|| KeyRingError::MissingField("keyType".to_string()))?;
        let key_type = KeyType::from_name(type_name)?;

        let required = key_type.required_fields();
        for name in fields.keys() {
            if name != "keyType" && !required.contains(&name.as_str()) {
                return Err(KeyRingError::UnexpectedField(name.clone()));
            }
        }

        let bytes = |name: &str| -> Result<Vec<u8>> {
            let value = fields
                .get(name)
                .ok_or_else(|| KeyRingError::MissingField(name.to_string()))?;
            hex_decode(value)
        };
        let curve = |name: &str| -> Result<String> {
            let value = fields
                .get(name)
                .ok_or_else(|| KeyRingError::MissingField(name.to_string()))?;
            curves::id_from_name(value)?;
            Ok(value.clone())
        };

        match key_type {
            KeyType::Rsa => Ok(KeyPairRecord::Rsa {
                modulus: bytes("modulus")?,
                public_exponent: bytes("publicExponent")?,
                private_exponent: bytes("privateExponent")?,
            }),
            KeyType::Dsa => Ok(KeyPairRecord::Dsa {
                prime_field: bytes("primeField")?,
                divider: bytes("divider")?,
                base: bytes("base")?,
                public_element: bytes("publicElement")?,
                private_exponent: bytes("privateExponent")?,
            }),
            KeyType::Ecdsa => Ok(KeyPairRecord::Ecdsa {
                curve_name: curve("curveName")?,
                public_key_x: bytes("publicKeyX")?,
                public_key_y: bytes("publicKeyY")?,
                private_key: bytes("privateKey")?,
            }),
            KeyType::Ecies => Ok(KeyPairRecord::Ecies {
                curve_name: curve("curveName")?,
                public_key_x: bytes("publicKeyX")?,
                public_key_y: bytes("publicKeyY")?,
                private_key: bytes("privateKey")?,
            }),
            KeyType::Ecdh => Ok(KeyPairRecord::Ecdh {
                curve_name: curve("curveName")?,
                public_key: bytes("publicKey")?,
                private_key: bytes("privateKey")?,
            }),
        }
    }

    /// Project the public-facing fields of this record.
    ///
    /// Private fields are omitted; numeric values come out as lowercase hex
    /// strings.
    pub fn public_key_info(&self) -> PublicKeyInfo {
        match self {
            KeyPairRecord::Rsa {
                modulus,
                public_exponent,
                ..
            } => PublicKeyInfo::Rsa {
                modulus: hex_encode(modulus),
                public_exponent: hex_encode(public_exponent),
            },
            KeyPairRecord::Dsa {
                prime_field,
                divider,
                base,
                public_element,
                ..
            } => PublicKeyInfo::Dsa {
                prime_field: hex_encode(prime_field),
                divider: hex_encode(divider),
                base: hex_encode(base),
                public_element: hex_encode(public_element),
            },
            KeyPairRecord::Ecdsa {
                curve_name,
                public_key_x,
                public_key_y,
                ..
            } => PublicKeyInfo::Ecdsa {
                curve_name: curve_name.clone(),
                public_key: PublicPoint {
                    x: hex_encode(public_key_x),
                    y: hex_encode(public_key_y),
                },
            },
            KeyPairRecord::Ecies {
                curve_name,
                public_key_x,
                public_key_y,
                ..
            } => PublicKeyInfo::Ecies {
                curve_name: curve_name.clone(),
                public_key: PublicPoint {
                    x: hex_encode(public_key_x),
                    y: hex_encode(public_key_y),
                },
            },
            KeyPairRecord::Ecdh {
                curve_name,
                public_key,
                ..
            } => PublicKeyInfo::Ecdh {
                curve_name: curve_name.clone(),
                public_key: hex_encode(public_key),
            },
        }
    }
}

/// An affine public point, hex-encoded per coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicPoint {
    /// Affine x coordinate
    pub x: String,
    /// Affine y coordinate
    pub y: String,
}

/// The public projection of a key pair record.
///
/// Serializes to the JSON shape the binding layer exposes, tagged by
/// `keyType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "keyType", rename_all = "lowercase")]
pub enum PublicKeyInfo {
    /// RSA public parameters.
    #[serde(rename_all = "camelCase")]
    Rsa {
        /// The public modulus n
        modulus: String,
        /// The public exponent e
        public_exponent: String,
    },
    /// DSA public parameters.
    #[serde(rename_all = "camelCase")]
    Dsa {
        /// The prime modulus p
        prime_field: String,
        /// The subgroup order q
        divider: String,
        /// The subgroup generator g
        base: String,
        /// The public element y
        public_element: String,
    },
    /// ECDSA public parameters.
    #[serde(rename_all = "camelCase")]
    Ecdsa {
        /// Registry name of the curve
        curve_name: String,
        /// The public point
        public_key: PublicPoint,
    },
    /// ECIES public parameters.
    #[serde(rename_all = "camelCase")]
    Ecies {
        /// Registry name of the curve
        curve_name: String,
        /// The public point
        public_key: PublicPoint,
    },
    /// ECDH public parameters.
    #[serde(rename_all = "camelCase")]
    Ecdh {
        /// Registry name of the curve
        curve_name: String,
        /// The encoded public element
        public_key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rsa_fields() -> HashMap<String, String> {
        let mut fields = HashMap::new();
        fields.insert("keyType".to_string(), "rsa".to_string());
        fields.insert("modulus".to_string(), "00ab".to_string());
        fields.insert("publicExponent".to_string(), "010001".to_string());
        fields.insert("privateExponent".to_string(), "1234".to_string());
        fields
    }

    #[test]
    fn test_key_type_names_round_trip() {
        for key_type in [
            KeyType::Rsa,
            KeyType::Dsa,
            KeyType::Ecdsa,
            KeyType::Ecies,
            KeyType::Ecdh,
        ] {
            assert_eq!(KeyType::from_name(key_type.as_str()).unwrap(), key_type);
            assert_eq!(KeyType::from_tag(key_type.tag_byte()).unwrap(), key_type);
        }
    }

    #[test]
    fn test_key_type_tag_values() {
        assert_eq!(KeyType::Ecdsa.tag_byte(), 0x00);
        assert_eq!(KeyType::Rsa.tag_byte(), 0x01);
        assert_eq!(KeyType::Dsa.tag_byte(), 0x02);
        assert_eq!(KeyType::Ecdh.tag_byte(), 0x03);
        assert_eq!(KeyType::Ecies.tag_byte(), 0x04);
    }

    #[test]
    fn test_unknown_key_type_name() {
        let result = KeyType::from_name("ed25519");
        assert!(matches!(result, Err(KeyRingError::UnknownKeyType(_))));
    }

    #[test]
    fn test_unknown_tag_byte() {
        let result = KeyType::from_tag(0x05);
        assert!(matches!(result, Err(KeyRingError::UnknownKeyType(_))));
    }

    #[test]
    fn test_from_fields_rsa() {
        let record = KeyPairRecord::from_fields(&rsa_fields()).unwrap();
        assert_eq!(
            record,
            KeyPairRecord::Rsa {
                modulus: vec![0x00, 0xab],
                public_exponent: vec![0x01, 0x00, 0x01],
                private_exponent: vec![0x12, 0x34],
            }
        );
    }

    #[test]
    fn test_from_fields_ecdsa() {
        let mut fields = HashMap::new();
        fields.insert("keyType".to_string(), "ecdsa".to_string());
        fields.insert("curveName".to_string(), "secp256r1".to_string());
        fields.insert("publicKeyX".to_string(), "0a".to_string());
        fields.insert("publicKeyY".to_string(), "0b".to_string());
        fields.insert("privateKey".to_string(), "0c".to_string());

        let record = KeyPairRecord::from_fields(&fields).unwrap();
        assert_eq!(record.key_type(), KeyType::Ecdsa);
    }

    #[test]
    fn test_from_fields_missing_field() {
        let mut fields = rsa_fields();
        fields.remove("privateExponent");

        let result = KeyPairRecord::from_fields(&fields);
        assert!(matches!(result, Err(KeyRingError::MissingField(name)) if name == "privateExponent"));
    }

    #[test]
    fn test_from_fields_missing_key_type() {
        let mut fields = rsa_fields();
        fields.remove("keyType");

        let result = KeyPairRecord::from_fields(&fields);
        assert!(matches!(result, Err(KeyRingError::MissingField(name)) if name == "keyType"));
    }

    #[test]
    fn test_from_fields_unexpected_field() {
        let mut fields = rsa_fields();
        fields.insert("curveName".to_string(), "secp256r1".to_string());

        let result = KeyPairRecord::from_fields(&fields);
        assert!(matches!(result, Err(KeyRingError::UnexpectedField(name)) if name == "curveName"));
    }

    #[test]
    fn test_from_fields_bad_hex() {
        let mut fields = rsa_fields();
        fields.insert("modulus".to_string(), "zz".to_string());

        let result = KeyPairRecord::from_fields(&fields);
        assert!(matches!(result, Err(KeyRingError::MalformedEncoding(_))));
    }

    #[test]
    fn test_from_fields_unknown_curve() {
        let mut fields = HashMap::new();
        fields.insert("keyType".to_string(), "ecdh".to_string());
        fields.insert("curveName".to_string(), "secp999r1".to_string());
        fields.insert("publicKey".to_string(), "0a".to_string());
        fields.insert("privateKey".to_string(), "0b".to_string());

        let result = KeyPairRecord::from_fields(&fields);
        assert!(matches!(result, Err(KeyRingError::UnknownCurve(_))));
    }

    #[test]
    fn test_public_key_info_rsa_omits_private_exponent() {
        let record = KeyPairRecord::from_fields(&rsa_fields()).unwrap();
        let info = record.public_key_info();

        assert_eq!(
            info,
            PublicKeyInfo::Rsa {
                modulus: "00ab".to_string(),
                public_exponent: "010001".to_string(),
            }
        );

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["keyType"], "rsa");
        assert_eq!(json["modulus"], "00ab");
        assert_eq!(json["publicExponent"], "010001");
        assert!(json.get("privateExponent").is_none());
    }

    #[test]
    fn test_public_key_info_ec_point_shape() {
        let record = KeyPairRecord::Ecies {
            curve_name: "secp256k1".to_string(),
            public_key_x: vec![0x0a],
            public_key_y: vec![0x0b],
            private_key: vec![0x0c],
        };
        let json = serde_json::to_value(record.public_key_info()).unwrap();

        assert_eq!(json["keyType"], "ecies");
        assert_eq!(json["curveName"], "secp256k1");
        assert_eq!(json["publicKey"]["x"], "0a");
        assert_eq!(json["publicKey"]["y"], "0b");
        assert!(json.get("privateKey").is_none());
    }

    #[test]
    fn test_public_key_info_ecdh() {
        let record = KeyPairRecord::Ecdh {
            curve_name: "secp384r1".to_string(),
            public_key: vec![0x04, 0x01, 0x02],
            private_key: vec![0x0c],
        };
        let json = serde_json::to_value(record.public_key_info()).unwrap();

        assert_eq!(json["keyType"], "ecdh");
        assert_eq!(json["publicKey"], "040102");
        assert!(json.get("privateKey").is_none());
    }
}
