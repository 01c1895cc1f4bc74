//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing.
//! The analyzers themselves take no configuration; everything here only shapes
//! how the binary invokes them and reports their results.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Inspect a single certificate
/// cert_metadata cert /etc/dehydrated/certs/example.com/cert.pem
///
/// # Inspect a private key, with trace output of every decoding attempt
/// cert_metadata --log-level trace key ./privkey.pem
///
/// # Collect everything dehydrated keeps for a domain
/// cert_metadata domain --cert-dir /etc/dehydrated/certs --domain example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "cert_metadata",
    about = "Reports metadata of PEM certificates and private keys."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Pretty-print the JSON result
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to analyze.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze an X.509 certificate file
    Cert(PathArgs),
    /// Analyze a private key file
    Key(PathArgs),
    /// Analyze the well-known files of a domain directory
    Domain(DomainArgs),
}

/// A single file to analyze.
#[derive(Debug, Args)]
pub struct PathArgs {
    /// File to read
    #[arg(value_parser)]
    pub path: PathBuf,
}

/// Locates a domain directory below the certificate base directory.
#[derive(Debug, Args)]
pub struct DomainArgs {
    /// Base directory holding one sub-directory per domain
    #[arg(long, value_parser)]
    pub cert_dir: PathBuf,

    /// Domain name
    #[arg(long)]
    pub domain: String,

    /// Alias directory used instead of the domain name when set
    #[arg(long)]
    pub alias: Option<String>,
}
