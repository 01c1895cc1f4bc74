//! Domain metadata aggregation.
//!
//! dehydrated keeps one directory per domain (or per alias) below its
//! certificate directory, each holding a private key, the certificate, the
//! issuer chain and the full chain. This module runs the matching analyzer on
//! each of those files and gathers the records into one JSON object keyed by
//! artifact: `key`, `cert`, `chain`, `fullchain`.
//!
//! A record that carries its own `error` is still included, and one failing
//! file never stops the others from being processed.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::certificate::analyze_certificate;
use crate::config::{
    CERTIFICATE_FILE, CHAIN_FILE, ERROR_SEPARATOR, FULLCHAIN_FILE, PRIVATE_KEY_FILE,
};
use crate::key::analyze_key;

/// Files dehydrated stores per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Artifact {
    Key,
    Cert,
    Chain,
    Fullchain,
}

impl Artifact {
    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Key => PRIVATE_KEY_FILE,
            Artifact::Cert => CERTIFICATE_FILE,
            Artifact::Chain => CHAIN_FILE,
            Artifact::Fullchain => FULLCHAIN_FILE,
        }
    }

    /// Analyzes the artifact at `path` and returns its record in map form,
    /// plus the record's own error, if any.
    fn analyze(self, path: &Path) -> Result<(Value, Option<String>), serde_json::Error> {
        match self {
            Artifact::Key => {
                let record = analyze_key(path);
                Ok((serde_json::to_value(&record)?, record.error))
            }
            Artifact::Cert | Artifact::Chain | Artifact::Fullchain => {
                let record = analyze_certificate(path);
                Ok((serde_json::to_value(&record)?, record.error))
            }
        }
    }
}

/// A domain as configured in dehydrated's `domains.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntry {
    pub domain: String,
    pub alias: Option<String>,
}

impl DomainEntry {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Name of the directory the domain's files live in: the alias when one
    /// is set, the domain otherwise.
    pub fn directory_name(&self) -> &str {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.domain,
        }
    }
}

/// Aggregated metadata of a domain directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainMetadata {
    /// Record per artifact, keyed by artifact name.
    #[serde(flatten)]
    pub entries: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainMetadata {
    pub fn get(&self, artifact: Artifact) -> Option<&Value> {
        self.entries.get(artifact.as_ref())
    }
}

pub fn domain_directory(cert_dir: &Path, entry: &DomainEntry) -> PathBuf {
    cert_dir.join(entry.directory_name())
}

/// Analyzes every well-known file of `entry`'s directory below `cert_dir`.
pub fn collect_domain_metadata(cert_dir: &Path, entry: &DomainEntry) -> DomainMetadata {
    let dir = domain_directory(cert_dir, entry);

    if matches!(std::fs::metadata(&dir), Err(ref e) if e.kind() == ErrorKind::NotFound) {
        warn!("Domain directory does not exist: {}", dir.display());
        return DomainMetadata {
            error: Some(format!("domain directory does not exist: {}", dir.display())),
            ..Default::default()
        };
    }

    info!(
        "Collecting metadata for {} from {}",
        entry.domain,
        dir.display()
    );

    let mut metadata = DomainMetadata::default();
    let mut errors = Vec::new();

    for artifact in Artifact::iter() {
        let file_name = artifact.file_name();
        match artifact.analyze(&dir.join(file_name)) {
            Ok((value, record_error)) => {
                if let Some(e) = record_error {
                    warn!("{}: {e}", entry.domain);
                }
                metadata.entries.insert(artifact.to_string(), value);
            }
            Err(e) => errors.push(format!("failed to process {file_name}: {e}")),
        }
    }

    if !errors.is_empty() {
        metadata.error = Some(errors.join(ERROR_SEPARATOR));
    }

    metadata
}
