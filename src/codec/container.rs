//! Binary key container codec.
//!
//! A container starts with the 3-byte ASCII magic `"key"`, followed by one
//! key-type tag byte, then (for curve-bearing types) one curve identifier
//! byte, then each field of the schema in its fixed order as a 2-byte
//! big-endian length followed by that many raw bytes. Encode and decode are
//! exact inverses over well-formed records.

use crate::curves;
use crate::error::{KeyRingError, Result};
use crate::keypair::{KeyPairRecord, KeyType};

/// Container format tag. Not a key pair field.
const MAGIC: &[u8; 3] = b"key";

/// A bounds-checked cursor over a container buffer.
///
/// Every read names the construct it was after, so a short buffer produces a
/// `TruncatedInput` error pointing at the field that was cut off.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_bytes(&mut self, count: usize, what: &str) -> Result<&'a [u8]> {
        let remaining = self.buf.len() - self.pos;
        if remaining < count {
            return Err(KeyRingError::TruncatedInput(format!(
                "expected {} bytes for {}, {} remaining",
                count, what, remaining
            )));
        }
        let slice = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.read_bytes(1, what)?[0])
    }

    fn read_u16_be(&mut self, what: &str) -> Result<u16> {
        let bytes = self.read_bytes(2, what)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}

fn write_field(buf: &mut Vec<u8>, name: &str, value: &[u8]) -> Result<()> {
    let length = u16::try_from(value.len()).map_err(|_| {
        KeyRingError::OversizedField(format!("{} is {} bytes, maximum is 65535", name, value.len()))
    })?;
    buf.extend_from_slice(&length.to_be_bytes());
    buf.extend_from_slice(value);
    Ok(())
}

fn read_field(reader: &mut Reader<'_>, name: &str) -> Result<Vec<u8>> {
    let length = reader.read_u16_be(name)? as usize;
    Ok(reader.read_bytes(length, name)?.to_vec())
}

/// Encode a key pair record into a binary container.
///
/// Fails with [`KeyRingError::UnknownCurve`] if the record carries a curve
/// name outside the registry, and [`KeyRingError::OversizedField`] if a field
/// value exceeds 65535 bytes.
///
/// # Example
///
/// ```
/// use keyring::codec::container::{decode, encode};
/// use keyring::keypair::KeyPairRecord;
///
/// let record = KeyPairRecord::Rsa {
///     modulus: vec![0x00, 0xab],
///     public_exponent: vec![0x01, 0x00, 0x01],
///     private_exponent: vec![0x12, 0x34],
/// };
///
/// let container = encode(&record).unwrap();
/// assert_eq!(&container[..3], b"key");
/// assert_eq!(decode(&container).unwrap(), record);
/// ```
pub fn encode(record: &KeyPairRecord) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.extend_from_slice(MAGIC);
    buf.push(record.key_type().tag_byte());

    match record {
        KeyPairRecord::Rsa {
            modulus,
            public_exponent,
            private_exponent,
        } => {
            write_field(&mut buf, "modulus", modulus)?;
            write_field(&mut buf, "publicExponent", public_exponent)?;
            write_field(&mut buf, "privateExponent", private_exponent)?;
        }
        KeyPairRecord::Dsa {
            prime_field,
            divider,
            base,
            public_element,
            private_exponent,
        } => {
            write_field(&mut buf, "primeField", prime_field)?;
            write_field(&mut buf, "divider", divider)?;
            write_field(&mut buf, "base", base)?;
            write_field(&mut buf, "publicElement", public_element)?;
            write_field(&mut buf, "privateExponent", private_exponent)?;
        }
        KeyPairRecord::Ecdsa {
            curve_name,
            public_key_x,
            public_key_y,
            private_key,
        }
        | KeyPairRecord::Ecies {
            curve_name,
            public_key_x,
            public_key_y,
            private_key,
        } => {
            buf.push(curves::id_from_name(curve_name)?);
            write_field(&mut buf, "publicKeyX", public_key_x)?;
            write_field(&mut buf, "publicKeyY", public_key_y)?;
            write_field(&mut buf, "privateKey", private_key)?;
        }
        KeyPairRecord::Ecdh {
            curve_name,
            public_key,
            private_key,
        } => {
            buf.push(curves::id_from_name(curve_name)?);
            write_field(&mut buf, "publicKey", public_key)?;
            write_field(&mut buf, "privateKey", private_key)?;
        }
    }

    Ok(buf)
}

/// Decode a binary container into a key pair record.
///
/// Fails with [`KeyRingError::InvalidContainer`] if the magic prefix is
/// wrong, [`KeyRingError::UnknownKeyType`] for an unassigned tag byte,
/// [`KeyRingError::UnknownCurveId`] for an unassigned curve identifier and
/// [`KeyRingError::TruncatedInput`] if the buffer ends before the declared
/// field data. Trailing bytes after a well-formed container are ignored.
pub fn decode(bytes: &[u8]) -> Result<KeyPairRecord> {
    let mut reader = Reader::new(bytes);

    let magic = reader.read_bytes(MAGIC.len(), "magic prefix")?;
    if magic != MAGIC {
        return Err(KeyRingError::InvalidContainer(format!(
            "bad magic prefix {:02x?}",
            magic
        )));
    }

    let key_type = KeyType::from_tag(reader.read_u8("key type tag")?)?;
    match key_type {
        KeyType::Rsa => Ok(KeyPairRecord::Rsa {
            modulus: read_field(&mut reader, "modulus")?,
            public_exponent: read_field(&mut reader, "publicExponent")?,
            private_exponent: read_field(&mut reader, "privateExponent")?,
        }),
        KeyType::Dsa => Ok(KeyPairRecord::Dsa {
            prime_field: read_field(&mut reader, "primeField")?,
            divider: read_field(&mut reader, "divider")?,
            base: read_field(&mut reader, "base")?,
            public_element: read_field(&mut reader, "publicElement")?,
            private_exponent: read_field(&mut reader, "privateExponent")?,
        }),
        KeyType::Ecdsa | KeyType::Ecies => {
            let curve_name = curves::name_from_id(reader.read_u8("curve identifier")?)?.to_string();
            let public_key_x = read_field(&mut reader, "publicKeyX")?;
            let public_key_y = read_field(&mut reader, "publicKeyY")?;
            let private_key = read_field(&mut reader, "privateKey")?;
            if key_type == KeyType::Ecdsa {
                Ok(KeyPairRecord::Ecdsa {
                    curve_name,
                    public_key_x,
                    public_key_y,
                    private_key,
                })
            } else {
                Ok(KeyPairRecord::Ecies {
                    curve_name,
                    public_key_x,
                    public_key_y,
                    private_key,
                })
            }
        }
        KeyType::Ecdh => Ok(KeyPairRecord::Ecdh {
            curve_name: curves::name_from_id(reader.read_u8("curve identifier")?)?.to_string(),
            public_key: read_field(&mut reader, "publicKey")?,
            private_key: read_field(&mut reader, "privateKey")?,
        }),
    }
}
