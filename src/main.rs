//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cert_metadata` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - JSON output of the resulting record
//!
//! All analysis is implemented in the library crate. A record carrying an
//! `error` is still a result and is printed with exit status 0.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cert_metadata::config::{Cli, Command};
use cert_metadata::initialization::init_logger_with;
use cert_metadata::{analyze_certificate, analyze_key, collect_domain_metadata, DomainEntry};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("cert_metadata error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logger_with(cli.log_level.into(), cli.log_format).context("Failed to initialize logger")?;

    let output = match cli.command {
        Command::Cert(args) => render(&analyze_certificate(&args.path), cli.pretty),
        Command::Key(args) => render(&analyze_key(&args.path), cli.pretty),
        Command::Domain(args) => {
            let mut entry = DomainEntry::new(args.domain);
            if let Some(alias) = args.alias {
                entry = entry.with_alias(alias);
            }
            render(&collect_domain_metadata(&args.cert_dir, &entry), cli.pretty)
        }
    }
    .context("Failed to serialize result")?;

    println!("{output}");
    Ok(())
}

fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
