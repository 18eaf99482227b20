//! Remote backend endpoints shared by the host and the browser app.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host builds a [`BackendConfig`] from its environment and publishes it
//! at `GET /api/config`. The app fetches it once at startup and keeps it in
//! Leptos context; every network helper derives its URLs from it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com/v1";
pub const DEFAULT_FUNCTIONS_REGION: &str = "us-central1";

/// Project identity plus the base URLs of each remote collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub project_id: String,
    pub api_key: String,
    pub functions_region: String,
    /// Overrides the derived `https://{region}-{project}.cloudfunctions.net`.
    #[serde(default)]
    pub functions_base_url: Option<String>,
    pub firestore_base_url: String,
    pub identity_base_url: String,
    pub token_base_url: String,
    /// Direct multipart endpoint for checklist proof photos.
    #[serde(default)]
    pub proof_upload_url: Option<String>,
}

impl BackendConfig {
    /// Config pointing at the production endpoints for `project_id`.
    #[must_use]
    pub fn for_project(project_id: &str, api_key: &str) -> Self {
        Self {
            project_id: project_id.to_owned(),
            api_key: api_key.to_owned(),
            functions_region: DEFAULT_FUNCTIONS_REGION.to_owned(),
            functions_base_url: None,
            firestore_base_url: DEFAULT_FIRESTORE_BASE_URL.to_owned(),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_owned(),
            token_base_url: DEFAULT_TOKEN_BASE_URL.to_owned(),
            proof_upload_url: None,
        }
    }

    /// Root of the document tree: `.../projects/{p}/databases/(default)/documents`.
    #[must_use]
    pub fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.firestore_base_url.trim_end_matches('/'),
            self.project_id
        )
    }

    #[must_use]
    pub fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_root())
    }

    #[must_use]
    pub fn run_query_url(&self) -> String {
        format!("{}:runQuery", self.documents_root())
    }

    #[must_use]
    pub fn function_url(&self, name: &str) -> String {
        match &self.functions_base_url {
            Some(base) => format!("{}/{name}", base.trim_end_matches('/')),
            None => format!(
                "https://{}-{}.cloudfunctions.net/{name}",
                self.functions_region, self.project_id
            ),
        }
    }

    /// Identity provider method URL, e.g. `accounts:signInWithPassword`.
    #[must_use]
    pub fn identity_url(&self, method: &str) -> String {
        format!(
            "{}/{method}?key={}",
            self.identity_base_url.trim_end_matches('/'),
            self.api_key
        )
    }

    #[must_use]
    pub fn token_refresh_url(&self) -> String {
        format!("{}/token?key={}", self.token_base_url.trim_end_matches('/'), self.api_key)
    }
}
