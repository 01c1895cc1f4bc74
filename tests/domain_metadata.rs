//! Tests for aggregating the well-known files of a domain directory.

mod helpers;

use std::fs;

use cert_metadata::metadata::Artifact;
use cert_metadata::{collect_domain_metadata, DomainEntry};
use helpers::{fixture, write_file};
use tempfile::TempDir;

fn populate(dir: &std::path::Path) {
    fs::create_dir_all(dir).unwrap();
    for (name, source) in [
        ("privkey.pem", "ec_p256_with_params.pem"),
        ("cert.pem", "san_example_com.pem"),
        ("chain.pem", "no_san.pem"),
        ("fullchain.pem", "fullchain.pem"),
    ] {
        fs::copy(fixture(source), dir.join(name)).unwrap();
    }
}

#[test]
fn test_non_existent_domain_directory() {
    let cert_dir = TempDir::new().unwrap();
    let metadata = collect_domain_metadata(
        cert_dir.path(),
        &DomainEntry::new("nonexistent.example.com"),
    );

    assert!(metadata.entries.is_empty());
    let error = metadata.error.as_deref().expect("error should be set");
    assert!(error.contains("domain directory does not exist"));
    assert!(error.contains("nonexistent.example.com"));

    let json = serde_json::to_value(&metadata).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 1);
}

#[test]
fn test_valid_domain_directory() {
    let cert_dir = TempDir::new().unwrap();
    populate(&cert_dir.path().join("example.com"));

    let metadata = collect_domain_metadata(cert_dir.path(), &DomainEntry::new("example.com"));

    assert!(metadata.error.is_none());
    assert_eq!(metadata.entries.len(), 4);

    let key = metadata.get(Artifact::Key).unwrap();
    assert_eq!(key["type"], "ecdsa");
    assert_eq!(key["size"], 256);

    let cert = metadata.get(Artifact::Cert).unwrap();
    assert_eq!(cert["subject"], "CN=example.com");
    assert_eq!(cert["dns_names"].as_array().unwrap().len(), 4);

    let chain = metadata.get(Artifact::Chain).unwrap();
    assert!(chain.get("dns_names").is_none());

    let fullchain = metadata.get(Artifact::Fullchain).unwrap();
    assert_eq!(fullchain["subject"], "CN=example.com");
}

#[test]
fn test_alias_directory_is_used() {
    let cert_dir = TempDir::new().unwrap();
    populate(&cert_dir.path().join("example-alias"));

    let entry = DomainEntry::new("example.com").with_alias("example-alias");
    let metadata = collect_domain_metadata(cert_dir.path(), &entry);

    assert!(metadata.error.is_none());
    let cert_file = metadata.get(Artifact::Cert).unwrap()["file"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(cert_file.ends_with("example-alias/cert.pem"), "{cert_file}");
}

#[test]
fn test_broken_files_are_reported_per_record() {
    let cert_dir = TempDir::new().unwrap();
    let dir = cert_dir.path().join("example.com");
    fs::create_dir_all(&dir).unwrap();
    write_file(&dir, "privkey.pem", "invalid content");
    fs::copy(fixture("san_example_com.pem"), dir.join("cert.pem")).unwrap();
    // chain.pem and fullchain.pem are missing

    let metadata = collect_domain_metadata(cert_dir.path(), &DomainEntry::new("example.com"));

    // Record-level failures do not make the aggregate fail.
    assert!(metadata.error.is_none());
    assert_eq!(metadata.entries.len(), 4);

    let key = metadata.get(Artifact::Key).unwrap();
    assert!(key["error"]
        .as_str()
        .unwrap()
        .contains("unknown key format or unsupported key type"));
    assert!(key.get("type").is_none());

    assert!(metadata.get(Artifact::Cert).unwrap().get("error").is_none());

    for artifact in [Artifact::Chain, Artifact::Fullchain] {
        let record = metadata.get(artifact).unwrap();
        assert!(record["error"].as_str().unwrap().contains("failed to read"));
    }
}

#[test]
fn test_serialized_keys_are_sorted() {
    let cert_dir = TempDir::new().unwrap();
    populate(&cert_dir.path().join("example.com"));

    let metadata = collect_domain_metadata(cert_dir.path(), &DomainEntry::new("example.com"));
    let json = serde_json::to_string(&metadata).unwrap();

    let positions: Vec<usize> = ["\"cert\":", "\"chain\":", "\"fullchain\":", "\"key\":"]
        .iter()
        .map(|k| json.find(k).expect("key present"))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}
