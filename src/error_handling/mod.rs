//! Error handling.
//!
//! This module provides the error types used throughout the crate:
//! - **Analysis errors**: why a certificate or key file yielded no metadata.
//!   These never escape an analyzer; they end up as the record's `error` text.
//! - **Key decode errors**: why a single key encoding rejected a PEM block.
//!   Only logged, since the next encoding or block may still succeed.
//! - **Initialization errors**: logger setup failures in the binary.

mod types;

// Re-export public API
pub use types::{AnalysisError, InitializationError, KeyDecodeError};
