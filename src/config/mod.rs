//! Application configuration and constants.
//!
//! This module provides:
//! - Constants (PEM labels, well-known file names)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, DomainArgs, LogFormat, LogLevel, PathArgs};
