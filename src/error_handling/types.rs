//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Reasons a certificate or key file produced no metadata.
///
/// The `Display` text of these errors is what callers see in a record's
/// `error` field, so every variant names the offending file.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// File missing, unreadable, or permission denied.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No PEM block could be decoded from the file.
    #[error("failed to decode PEM block for {path}")]
    Decode { path: String },

    /// A PEM block was found but its payload is not a well-formed certificate.
    #[error("failed to parse certificate for {path}: {reason}")]
    Parse { path: String, reason: String },

    /// Every PEM block was tried with every known key encoding, without success.
    #[error("unknown key format or unsupported key type for {path}")]
    UnsupportedFormat { path: String },

    /// A key decoded fine but uses an algorithm we do not classify.
    #[error("unknown key type {algorithm} for {path}")]
    UnknownType { algorithm: String, path: String },
}

/// Why one key encoding rejected a PEM block.
///
/// The wrapped parser errors only implement `std::error::Error` when their
/// `std` feature is on, so they are carried for display and not as sources.
#[derive(Error, Debug)]
pub enum KeyDecodeError {
    #[error("invalid PKCS#8 structure: {0}")]
    Pkcs8(pkcs8::Error),

    #[error("invalid PKCS#1 structure: {0}")]
    Pkcs1(pkcs1::Error),

    #[error("invalid SEC1 structure: {0}")]
    Sec1(sec1::Error),

    #[error("invalid DER encoding: {0}")]
    Der(pkcs8::der::Error),

    /// PKCS#8 algorithm identifier we have no decoder for.
    #[error("unsupported private key algorithm {0}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported elliptic curve {0}")]
    UnsupportedCurve(String),

    /// EC key with neither an outer nor an inner named curve.
    #[error("missing elliptic curve parameters")]
    MissingCurve,

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("private scalar of {actual} bytes exceeds the {max} bytes of {curve}")]
    ScalarTooLong {
        curve: String,
        max: usize,
        actual: usize,
    },

    #[error("RSA modulus is zero")]
    EmptyModulus,
}

impl From<pkcs8::Error> for KeyDecodeError {
    fn from(e: pkcs8::Error) -> Self {
        KeyDecodeError::Pkcs8(e)
    }
}

impl From<pkcs1::Error> for KeyDecodeError {
    fn from(e: pkcs1::Error) -> Self {
        KeyDecodeError::Pkcs1(e)
    }
}

impl From<sec1::Error> for KeyDecodeError {
    fn from(e: sec1::Error) -> Self {
        KeyDecodeError::Sec1(e)
    }
}

impl From<pkcs8::der::Error> for KeyDecodeError {
    fn from(e: pkcs8::der::Error) -> Self {
        KeyDecodeError::Der(e)
    }
}
