//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::{self, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{LevelFilter, Record};

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors) and JSON formats for structured logging. Output goes to
/// stderr so that stdout carries nothing but the JSON result.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it for this crate's modules.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug cert_metadata key privkey.pem --log-level info
///
/// # See every PEM block and decoding attempt
/// cert_metadata key privkey.pem --log-level trace --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("cert_metadata", level);
    builder.target(env_logger::Target::Stderr);

    match format {
        LogFormat::Json => builder.format(|buf, record| write_json(buf, record)),
        LogFormat::Plain => builder.format(|buf, record| write_plain(buf, record)),
    };

    // try_init so a second initialization (e.g. in tests) reports an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Writes `record` as one JSON object per line.
fn write_json<W: Write>(buf: &mut W, record: &Record<'_>) -> io::Result<()> {
    writeln!(
        buf,
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        chrono::Utc::now().timestamp_millis(),
        record.level(),
        record.target(),
        serde_json::to_string(&record.args().to_string()).unwrap_or_else(|_| "\"\"".into())
    )
}

/// Writes `record` as `target [LEVEL] message` with a colored level.
fn write_plain<W: Write>(buf: &mut W, record: &Record<'_>) -> io::Result<()> {
    let level = record.level();
    let colored_level = match level {
        log::Level::Error => level.to_string().red(),
        log::Level::Warn => level.to_string().yellow(),
        log::Level::Info => level.to_string().green(),
        log::Level::Debug => level.to_string().blue(),
        log::Level::Trace => level.to_string().purple(),
    };

    writeln!(
        buf,
        "{} [{}] {}",
        record.target().cyan(),
        colored_level,
        record.args()
    )
}
