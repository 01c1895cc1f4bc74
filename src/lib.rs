//! cert_metadata library: metadata extraction for on-disk certificates and keys
//!
//! This library reads PEM files of uncertain content and reports what they
//! hold: subject, issuer, validity and SAN DNS names for X.509 certificates,
//! algorithm and size for private keys. Analysis never panics and never
//! returns a partial result. Every failure ends up as a descriptive `error`
//! in the returned record.
//!
//! # Example
//!
//! ```no_run
//! use cert_metadata::{analyze_certificate, analyze_key};
//!
//! let cert = analyze_certificate("/etc/dehydrated/certs/example.com/cert.pem");
//! println!("{:?} expires {:?}", cert.dns_names, cert.not_after);
//!
//! let key = analyze_key("/etc/dehydrated/certs/example.com/privkey.pem");
//! if let Some(error) = &key.error {
//!     eprintln!("{error}");
//! }
//! ```
//!
//! Both analyzers are plain synchronous functions without shared state and
//! may be called from any number of threads at once.

pub mod certificate;
pub mod config;
mod error_handling;
pub mod initialization;
pub mod key;
pub mod metadata;
mod pem;

// Re-export public API
pub use certificate::{analyze_certificate, CertificateRecord};
pub use error_handling::{AnalysisError, InitializationError, KeyDecodeError};
pub use key::{analyze_key, KeyRecord, KeyType};
pub use metadata::{collect_domain_metadata, DomainEntry, DomainMetadata};
