//! Private key analysis.
//!
//! Reads a key file, walks its PEM blocks and reports the algorithm and size
//! of the first block that decodes as a private key. Blocks that carry curve
//! parameters only are skipped, and blocks no encoding accepts do not end the
//! scan since a later block may hold the key.

mod algorithm;
mod decode;

use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::config::EC_PARAMETERS_LABEL;
use crate::error_handling::AnalysisError;
use crate::pem::PemBlocks;

pub use algorithm::{NamedCurve, PrivateKey};
pub use decode::{decode_private_key, KeyEncoding};

/// Algorithm label reported for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KeyType {
    Rsa,
    Ecdsa,
}

/// Metadata of a private key file.
///
/// `key_type` and `size` are set together on success; `error` is set alone on
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub file: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<KeyType>,
    /// RSA modulus bits, ECDSA curve bits, or Ed25519 key bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KeyRecord {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Analyzes the private key stored at `path`.
///
/// Never fails: read, decode, and classification problems are reported in the
/// returned record's `error` field.
pub fn analyze_key(path: impl AsRef<Path>) -> KeyRecord {
    let file = path.as_ref().to_string_lossy().into_owned();
    debug!("Analyzing private key {file}");

    match inspect_key(path.as_ref(), &file) {
        Ok((key_type, size)) => {
            debug!("{file}: {key_type} key, size {size}");
            KeyRecord {
                file,
                key_type: Some(key_type),
                size: Some(size),
                error: None,
            }
        }
        Err(e) => {
            debug!("{file}: {e}");
            KeyRecord {
                file,
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    }
}

fn inspect_key(path: &Path, file: &str) -> Result<(KeyType, usize), AnalysisError> {
    let data = std::fs::read(path).map_err(|source| AnalysisError::Io {
        path: file.to_string(),
        source,
    })?;

    let key = find_private_key(&data).ok_or_else(|| AnalysisError::UnsupportedFormat {
        path: file.to_string(),
    })?;
    classify(key, file)
}

/// Returns the first PEM block of `data` that decodes as a private key.
fn find_private_key(data: &[u8]) -> Option<PrivateKey> {
    for block in PemBlocks::new(data) {
        if block.label == EC_PARAMETERS_LABEL {
            trace!("Skipping {EC_PARAMETERS_LABEL} block");
            continue;
        }
        match decode_private_key(&block.contents) {
            Some((encoding, key)) => {
                trace!("'{}' block decoded as {encoding}", block.label);
                return Some(key);
            }
            None => trace!("'{}' block is not a private key", block.label),
        }
    }
    None
}

/// Maps a decoded key onto the reported type label and size.
///
/// Ed25519 keys are reported as `ecdsa` with their size in bytes, which is
/// what consumers of this metadata have always received.
fn classify(key: PrivateKey, file: &str) -> Result<(KeyType, usize), AnalysisError> {
    match key {
        PrivateKey::Rsa { modulus_bits } => Ok((KeyType::Rsa, modulus_bits)),
        PrivateKey::Ecdsa { curve } => Ok((KeyType::Ecdsa, curve.bit_size())),
        PrivateKey::Ed25519 { key_len } => Ok((KeyType::Ecdsa, key_len)),
        PrivateKey::Unrecognized { algorithm } => Err(AnalysisError::UnknownType {
            algorithm,
            path: file.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rsa_and_ecdsa() {
        assert_eq!(
            classify(PrivateKey::Rsa { modulus_bits: 4096 }, "k").unwrap(),
            (KeyType::Rsa, 4096)
        );
        assert_eq!(
            classify(
                PrivateKey::Ecdsa {
                    curve: NamedCurve::P521
                },
                "k"
            )
            .unwrap(),
            (KeyType::Ecdsa, 521)
        );
    }

    #[test]
    fn test_classify_ed25519_keeps_legacy_label() {
        assert_eq!(
            classify(PrivateKey::Ed25519 { key_len: 32 }, "k").unwrap(),
            (KeyType::Ecdsa, 32)
        );
    }

    #[test]
    fn test_classify_unrecognized_is_error() {
        let err = classify(
            PrivateKey::Unrecognized {
                algorithm: "X25519".to_string(),
            },
            "privkey.pem",
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownType { .. }));
        assert_eq!(err.to_string(), "unknown key type X25519 for privkey.pem");
    }

    #[test]
    fn test_key_type_labels() {
        assert_eq!(KeyType::Rsa.to_string(), "rsa");
        assert_eq!(KeyType::Ecdsa.as_ref(), "ecdsa");
    }

    #[test]
    fn test_record_serialization_omits_absent_fields() {
        let record = KeyRecord {
            file: "privkey.pem".to_string(),
            error: Some("failed to read privkey.pem: denied".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "file": "privkey.pem",
                "error": "failed to read privkey.pem: denied"
            })
        );
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = KeyRecord {
            file: "privkey.pem".to_string(),
            key_type: Some(KeyType::Rsa),
            size: Some(2048),
            error: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"file":"privkey.pem","type":"rsa","size":2048}"#);

        let back: KeyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert!(back.is_ok());
    }

    #[test]
    fn test_find_private_key_skips_parameters_and_noise() {
        let data = b"-----BEGIN EC PARAMETERS-----
BggqhkjOPQMBBw==
-----END EC PARAMETERS-----
-----BEGIN CERTIFICATE REQUEST-----
bm90IGEgcmVhbCBjZXJ0aWZpY2F0ZSByZXF1ZXN0
-----END CERTIFICATE REQUEST-----
";
        assert!(find_private_key(data).is_none());
    }
}
