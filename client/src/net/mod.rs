//! Networking modules for the remote collaborators.
//!
//! SYSTEM CONTEXT
//! ==============
//! `db` reads and writes documents, `functions` invokes callable backend
//! functions, `identity` talks to the authentication provider and `upload`
//! posts proof photos. `firestore` is the REST value codec they share and
//! `types` defines the read models they produce.

pub mod db;
pub mod error;
pub mod firestore;
pub mod functions;
pub mod http;
pub mod identity;
pub mod types;
pub mod upload;

use crate::config::BackendConfig;

/// Endpoints plus the caller's id token: everything an authenticated remote
/// call needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remote {
    pub config: BackendConfig,
    pub id_token: String,
}
