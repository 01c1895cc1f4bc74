//! Decoded private key values and their classification.

use pkcs8::ObjectIdentifier;
use strum_macros::{Display, EnumIter};

/// Algorithm OIDs recognised inside PKCS#8 `AlgorithmIdentifier`s.
pub(crate) mod oids {
    use pkcs8::ObjectIdentifier;

    pub const RSA_ENCRYPTION: ObjectIdentifier =
        ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
    pub const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
    pub const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
    pub const X25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.110");

    pub const SECP224R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.33");
    pub const PRIME256V1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
    pub const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
    pub const SECP521R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");
}

/// NIST curves an ECDSA key may be defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum NamedCurve {
    #[strum(serialize = "P-224")]
    P224,
    #[strum(serialize = "P-256")]
    P256,
    #[strum(serialize = "P-384")]
    P384,
    #[strum(serialize = "P-521")]
    P521,
}

impl NamedCurve {
    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        [
            (oids::SECP224R1, NamedCurve::P224),
            (oids::PRIME256V1, NamedCurve::P256),
            (oids::SECP384R1, NamedCurve::P384),
            (oids::SECP521R1, NamedCurve::P521),
        ]
        .into_iter()
        .find_map(|(known, curve)| (known == *oid).then_some(curve))
    }

    /// Nominal size of the curve order in bits.
    pub fn bit_size(self) -> usize {
        match self {
            NamedCurve::P224 => 224,
            NamedCurve::P256 => 256,
            NamedCurve::P384 => 384,
            NamedCurve::P521 => 521,
        }
    }

    /// Bytes needed to hold a private scalar.
    pub fn scalar_len(self) -> usize {
        self.bit_size().div_ceil(8)
    }
}

/// A successfully decoded private key, reduced to what the metadata needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Rsa { modulus_bits: usize },
    Ecdsa { curve: NamedCurve },
    /// `key_len` is the seed length in bytes.
    Ed25519 { key_len: usize },
    /// Structurally valid key of an algorithm the metadata has no label for.
    Unrecognized { algorithm: String },
}

/// Bit length of a big-endian unsigned integer.
pub fn bit_length(be_bytes: &[u8]) -> usize {
    match be_bytes.iter().position(|&b| b != 0) {
        Some(first) => {
            let significant = &be_bytes[first..];
            significant.len() * 8 - significant[0].leading_zeros() as usize
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_curve_bit_sizes() {
        assert_eq!(NamedCurve::P224.bit_size(), 224);
        assert_eq!(NamedCurve::P256.bit_size(), 256);
        assert_eq!(NamedCurve::P384.bit_size(), 384);
        assert_eq!(NamedCurve::P521.bit_size(), 521);
        assert_eq!(NamedCurve::P521.scalar_len(), 66);
        assert_eq!(NamedCurve::P256.scalar_len(), 32);
    }

    #[test]
    fn test_curve_oid_lookup() {
        for curve in NamedCurve::iter() {
            let oid = match curve {
                NamedCurve::P224 => oids::SECP224R1,
                NamedCurve::P256 => oids::PRIME256V1,
                NamedCurve::P384 => oids::SECP384R1,
                NamedCurve::P521 => oids::SECP521R1,
            };
            assert_eq!(NamedCurve::from_oid(&oid), Some(curve));
        }
        // secp256k1
        let k1 = ObjectIdentifier::new_unwrap("1.3.132.0.10");
        assert_eq!(NamedCurve::from_oid(&k1), None);
    }

    #[test]
    fn test_curve_display() {
        assert_eq!(NamedCurve::P256.to_string(), "P-256");
        assert_eq!(NamedCurve::P521.to_string(), "P-521");
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(&[]), 0);
        assert_eq!(bit_length(&[0, 0]), 0);
        assert_eq!(bit_length(&[0x01]), 1);
        assert_eq!(bit_length(&[0x80, 0x00]), 16);
        assert_eq!(bit_length(&[0x00, 0x7f, 0xff]), 15);

        let mut modulus = vec![0xc3u8];
        modulus.extend(std::iter::repeat(0xa5).take(255));
        assert_eq!(bit_length(&modulus), 2048);
    }
}
