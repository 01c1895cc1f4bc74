//! Private key encodings and the order they are tried in.
//!
//! A PEM label is not trusted to say which encoding a block holds, so each
//! block is offered to every encoding in [`KeyEncoding::FALLBACK_ORDER`] and
//! the first one that decodes wins.

use log::trace;
use pkcs8::der::{asn1::OctetStringRef, Decode};
use pkcs8::{ObjectIdentifier, PrivateKeyInfo};
use sec1::EcPrivateKey;
use strum_macros::{Display, EnumIter};

use super::algorithm::{bit_length, oids, NamedCurve, PrivateKey};
use crate::config::ED25519_SEED_LEN;
use crate::error_handling::KeyDecodeError;

/// DER encodings a private key block may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum KeyEncoding {
    /// Algorithm-generic `PrivateKeyInfo` (RFC 5208).
    #[strum(serialize = "PKCS#8")]
    Pkcs8,
    /// RSA-only `RSAPrivateKey` (RFC 8017).
    #[strum(serialize = "PKCS#1")]
    Pkcs1,
    /// EC-only `ECPrivateKey` (RFC 5915).
    #[strum(serialize = "SEC1")]
    Sec1,
}

impl KeyEncoding {
    pub const FALLBACK_ORDER: [KeyEncoding; 3] =
        [KeyEncoding::Pkcs8, KeyEncoding::Pkcs1, KeyEncoding::Sec1];

    pub fn decode(self, der: &[u8]) -> Result<PrivateKey, KeyDecodeError> {
        match self {
            KeyEncoding::Pkcs8 => decode_pkcs8(der),
            KeyEncoding::Pkcs1 => decode_pkcs1(der),
            KeyEncoding::Sec1 => decode_sec1(der, None),
        }
    }
}

/// Tries every encoding in fallback order and returns the first success.
pub fn decode_private_key(der: &[u8]) -> Option<(KeyEncoding, PrivateKey)> {
    KeyEncoding::FALLBACK_ORDER
        .into_iter()
        .find_map(|encoding| match encoding.decode(der) {
            Ok(key) => Some((encoding, key)),
            Err(e) => {
                trace!("Not a {encoding} private key: {e}");
                None
            }
        })
}

fn decode_pkcs8(der: &[u8]) -> Result<PrivateKey, KeyDecodeError> {
    let info = PrivateKeyInfo::try_from(der)?;
    let algorithm = info.algorithm.oid;

    if algorithm == oids::RSA_ENCRYPTION {
        decode_pkcs1(info.private_key)
    } else if algorithm == oids::EC_PUBLIC_KEY {
        // The curve normally sits in the algorithm parameters; SEC1's own
        // parameters are the fallback.
        let curve = info.algorithm.parameters_oid().ok();
        decode_sec1(info.private_key, curve)
    } else if algorithm == oids::ED25519 {
        let seed = OctetStringRef::from_der(info.private_key)?;
        let key_len = seed.as_bytes().len();
        if key_len != ED25519_SEED_LEN {
            return Err(KeyDecodeError::InvalidKeyLength {
                expected: ED25519_SEED_LEN,
                actual: key_len,
            });
        }
        Ok(PrivateKey::Ed25519 { key_len })
    } else if algorithm == oids::X25519 {
        Ok(PrivateKey::Unrecognized {
            algorithm: "X25519".to_string(),
        })
    } else {
        Err(KeyDecodeError::UnsupportedAlgorithm(algorithm.to_string()))
    }
}

fn decode_pkcs1(der: &[u8]) -> Result<PrivateKey, KeyDecodeError> {
    let key = pkcs1::RsaPrivateKey::try_from(der)?;
    let modulus_bits = bit_length(key.modulus.as_bytes());
    if modulus_bits == 0 {
        return Err(KeyDecodeError::EmptyModulus);
    }
    Ok(PrivateKey::Rsa { modulus_bits })
}

fn decode_sec1(
    der: &[u8],
    outer_curve: Option<ObjectIdentifier>,
) -> Result<PrivateKey, KeyDecodeError> {
    let key = EcPrivateKey::try_from(der)?;
    let oid = outer_curve
        .or_else(|| key.parameters.as_ref().and_then(|params| params.named_curve()))
        .ok_or(KeyDecodeError::MissingCurve)?;
    let curve = NamedCurve::from_oid(&oid)
        .ok_or_else(|| KeyDecodeError::UnsupportedCurve(oid.to_string()))?;

    if key.private_key.len() > curve.scalar_len() {
        return Err(KeyDecodeError::ScalarTooLong {
            curve: curve.to_string(),
            max: curve.scalar_len(),
            actual: key.private_key.len(),
        });
    }
    Ok(PrivateKey::Ecdsa { curve })
}
