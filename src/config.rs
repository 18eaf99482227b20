//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use client::config::BackendConfig;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub backend: BackendConfig,
}

impl ServerConfig {
    /// Build typed host config from environment variables.
    ///
    /// Required:
    /// - `PROPDESK_PROJECT_ID`
    /// - `PROPDESK_API_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PROPDESK_FUNCTIONS_REGION`: default `us-central1`
    /// - `PROPDESK_FUNCTIONS_BASE_URL`, `PROPDESK_FIRESTORE_BASE_URL`,
    ///   `PROPDESK_IDENTITY_BASE_URL`, `PROPDESK_TOKEN_BASE_URL`: emulator
    ///   overrides
    /// - `PROPDESK_PROOF_UPLOAD_URL`: direct proof-photo upload endpoint
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] for an absent required variable and
    /// [`ConfigError::Invalid`] for an unparseable `PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let require = |var: &'static str| get(var).ok_or(ConfigError::Missing { var });

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let mut backend = BackendConfig::for_project(&require("PROPDESK_PROJECT_ID")?, &require("PROPDESK_API_KEY")?);
        if let Some(region) = get("PROPDESK_FUNCTIONS_REGION") {
            backend.functions_region = region;
        }
        if let Some(url) = get("PROPDESK_FIRESTORE_BASE_URL") {
            backend.firestore_base_url = trim_url(&url);
        }
        if let Some(url) = get("PROPDESK_IDENTITY_BASE_URL") {
            backend.identity_base_url = trim_url(&url);
        }
        if let Some(url) = get("PROPDESK_TOKEN_BASE_URL") {
            backend.token_base_url = trim_url(&url);
        }
        backend.functions_base_url = get("PROPDESK_FUNCTIONS_BASE_URL").map(|u| trim_url(&u));
        backend.proof_upload_url = get("PROPDESK_PROOF_UPLOAD_URL");

        Ok(Self { port, backend })
    }
}

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}
