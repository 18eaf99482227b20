use std::collections::HashMap;

use client::config::{DEFAULT_FIRESTORE_BASE_URL, DEFAULT_FUNCTIONS_REGION};

use super::*;

fn parse(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    ServerConfig::from_lookup(|key| map.get(key).cloned())
}

const REQUIRED: [(&str, &str); 2] = [("PROPDESK_PROJECT_ID", "demo-propdesk"), ("PROPDESK_API_KEY", "key-123")];

#[test]
fn from_lookup_applies_defaults() {
    let cfg = parse(&REQUIRED).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend.project_id, "demo-propdesk");
    assert_eq!(cfg.backend.api_key, "key-123");
    assert_eq!(cfg.backend.functions_region, DEFAULT_FUNCTIONS_REGION);
    assert_eq!(cfg.backend.firestore_base_url, DEFAULT_FIRESTORE_BASE_URL);
    assert_eq!(cfg.backend.functions_base_url, None);
    assert_eq!(cfg.backend.proof_upload_url, None);
}

#[test]
fn from_lookup_reads_overrides() {
    let mut vars = REQUIRED.to_vec();
    vars.extend([
        ("PORT", "8080"),
        ("PROPDESK_FUNCTIONS_REGION", "europe-west1"),
        ("PROPDESK_FUNCTIONS_BASE_URL", "http://localhost:5001/demo/us-central1/"),
        ("PROPDESK_FIRESTORE_BASE_URL", "http://localhost:8080/v1/"),
        ("PROPDESK_PROOF_UPLOAD_URL", "https://uploads.example.test/proof"),
    ]);
    let cfg = parse(&vars).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend.functions_region, "europe-west1");
    assert_eq!(cfg.backend.functions_base_url.as_deref(), Some("http://localhost:5001/demo/us-central1"));
    assert_eq!(cfg.backend.firestore_base_url, "http://localhost:8080/v1");
    assert_eq!(cfg.backend.proof_upload_url.as_deref(), Some("https://uploads.example.test/proof"));
}

#[test]
fn from_lookup_requires_project_and_key() {
    assert_eq!(parse(&[("PROPDESK_API_KEY", "k")]), Err(ConfigError::Missing { var: "PROPDESK_PROJECT_ID" }));
    assert_eq!(
        parse(&[("PROPDESK_PROJECT_ID", "p"), ("PROPDESK_API_KEY", "  ")]),
        Err(ConfigError::Missing { var: "PROPDESK_API_KEY" })
    );
}

#[test]
fn from_lookup_rejects_bad_port() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("PORT", "http"));
    assert_eq!(parse(&vars), Err(ConfigError::Invalid { var: "PORT", value: "http".into() }));
}
