//! X.509 certificate analysis.
//!
//! This module reads a certificate file and extracts:
//! - Certificate subject and issuer, as RFC 4514 strings
//! - Validity period (not before/after), copied as stated without expiry checks
//! - Subject Alternative Name DNS entries
//!
//! Only the first PEM block of a file is considered. For chain files this is
//! the leaf certificate.
//!
//! Uses `x509-parser` for PEM decoding and certificate parsing.

mod extract;

use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error_handling::AnalysisError;
use crate::pem::first_block;

use extract::{asn1_time_to_utc, distinguished_name, extract_certificate_sans};

/// Metadata of a certificate file.
///
/// On success every field except `error` is filled in (`dns_names` may be
/// empty). On failure only `file` and `error` are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_after: Option<DateTime<Utc>>,
    /// Omitted from the serialized form when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CertificateRecord {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Fields extracted from a successfully parsed certificate.
struct CertificateDetails {
    subject: String,
    issuer: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    dns_names: Vec<String>,
}

/// Analyzes the certificate stored at `path`.
///
/// Never fails: read, decode, and parse problems are reported in the returned
/// record's `error` field.
///
/// # Examples
///
/// ```no_run
/// let record = cert_metadata::analyze_certificate("/etc/dehydrated/certs/example.com/cert.pem");
/// match record.error {
///     Some(e) => eprintln!("{e}"),
///     None => println!("{:?} valid until {:?}", record.subject, record.not_after),
/// }
/// ```
pub fn analyze_certificate(path: impl AsRef<Path>) -> CertificateRecord {
    let file = path.as_ref().to_string_lossy().into_owned();
    debug!("Analyzing certificate {file}");

    match inspect_certificate(path.as_ref(), &file) {
        Ok(details) => {
            debug!(
                "{file}: subject '{}', {} DNS name(s)",
                details.subject,
                details.dns_names.len()
            );
            CertificateRecord {
                file,
                subject: Some(details.subject),
                issuer: Some(details.issuer),
                not_before: Some(details.not_before),
                not_after: Some(details.not_after),
                dns_names: details.dns_names,
                error: None,
            }
        }
        Err(e) => {
            debug!("{file}: {e}");
            CertificateRecord {
                file,
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    }
}

fn inspect_certificate(path: &Path, file: &str) -> Result<CertificateDetails, AnalysisError> {
    let data = std::fs::read(path).map_err(|source| AnalysisError::Io {
        path: file.to_string(),
        source,
    })?;

    let pem = first_block(&data).ok_or_else(|| AnalysisError::Decode {
        path: file.to_string(),
    })?;

    let parse_error = |reason: String| AnalysisError::Parse {
        path: file.to_string(),
        reason,
    };

    let (rest, cert) = x509_parser::parse_x509_certificate(&pem.contents)
        .map_err(|e| parse_error(e.to_string()))?;
    if !rest.is_empty() {
        return Err(parse_error(format!(
            "{} trailing bytes after certificate",
            rest.len()
        )));
    }

    let validity = cert.validity();
    let not_before = asn1_time_to_utc(&validity.not_before)
        .ok_or_else(|| parse_error("notBefore is out of range".to_string()))?;
    let not_after = asn1_time_to_utc(&validity.not_after)
        .ok_or_else(|| parse_error("notAfter is out of range".to_string()))?;

    Ok(CertificateDetails {
        subject: distinguished_name(cert.subject()),
        issuer: distinguished_name(cert.issuer()),
        not_before,
        not_after,
        dns_names: extract_certificate_sans(&cert),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CertificateRecord {
        CertificateRecord {
            file: "test.crt".to_string(),
            subject: Some("CN=example.com".to_string()),
            issuer: Some("CN=Test CA".to_string()),
            not_before: DateTime::from_timestamp(1_752_611_334, 0),
            not_after: DateTime::from_timestamp(1_784_147_334, 0),
            dns_names: vec![
                "example.com".to_string(),
                "www.example.com".to_string(),
                "api.example.com".to_string(),
            ],
            error: None,
        }
    }

    #[test]
    fn test_dns_names_serialize_as_dns_names() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""dns_names":["example.com","www.example.com","api.example.com"]"#));
        assert!(json.contains(r#""not_before":"2025-07-15T20:28:54Z""#));
        assert!(!json.contains("error"));

        let back: CertificateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_empty_dns_names_are_omitted_and_restored_empty() {
        let record = CertificateRecord {
            dns_names: Vec::new(),
            ..sample_record()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("dns_names"));

        let back: CertificateRecord = serde_json::from_str(&json).unwrap();
        assert!(back.dns_names.is_empty());
        assert_eq!(back, record);
    }

    #[test]
    fn test_failed_record_serializes_file_and_error_only() {
        let record = CertificateRecord {
            file: "nonexistent.crt".to_string(),
            error: Some("failed to read nonexistent.crt: not found".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "file": "nonexistent.crt",
                "error": "failed to read nonexistent.crt: not found"
            })
        );
        assert!(!record.is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let record = analyze_certificate("nonexistent.crt");
        assert_eq!(record.file, "nonexistent.crt");
        let error = record.error.expect("error should be set");
        assert!(error.contains("failed to read nonexistent.crt"));
        assert!(record.subject.is_none());
        assert!(record.dns_names.is_empty());
    }
}
