//! Backend-service configuration.
//!
//! The site shares its repository with a managed backend project (hosted
//! authentication, a document database, and blob storage). This module turns
//! the `[backend]` section of `config.toml` into three endpoint handles and
//! the public client configuration written next to the built site as
//! `backend.json`.
//!
//! Nothing here performs network I/O, and the gallery never reads or writes
//! through these handles. Sign-in flows, document schemas, and upload
//! pipelines live with the hosted platform.
//!
//! ```text
//! [backend]                       Backend::initialize
//! project_id, storage_bucket  ──▶  ├── AuthHandle     identity endpoints
//! api_key, hosts, ...              ├── DocumentStore  document URLs
//!                                  └── BlobStorage    object URLs
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BackendError {
    #[error("backend.{0} must not be empty")]
    MissingField(&'static str),
}

/// Identity of the managed backend project plus the service hosts.
///
/// Defaults carry the villa's production project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Public web API key. Not a secret; it ships to every browser.
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    /// Base URL of the identity service.
    pub auth_host: String,
    /// Base URL of the document database REST API.
    pub documents_host: String,
    /// Base URL of the blob storage REST API.
    pub storage_host: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auth_domain: "villa-altona-goa.firebaseapp.com".to_string(),
            project_id: "villa-altona-goa".to_string(),
            storage_bucket: "villa-altona-goa.appspot.com".to_string(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            auth_host: "https://identitytoolkit.googleapis.com".to_string(),
            documents_host: "https://firestore.googleapis.com".to_string(),
            storage_host: "https://firebasestorage.googleapis.com".to_string(),
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> Result<(), BackendError> {
        let required = [
            ("project_id", &self.project_id),
            ("storage_bucket", &self.storage_bucket),
            ("auth_host", &self.auth_host),
            ("documents_host", &self.documents_host),
            ("storage_host", &self.storage_host),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(BackendError::MissingField(name));
            }
        }
        Ok(())
    }
}

/// Configuration the browser-side SDK needs. Field names follow the hosted
/// platform's camelCase convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

/// Initialized handles for one backend project.
#[derive(Debug, Clone)]
pub struct Backend {
    client: ClientConfig,
    pub auth: AuthHandle,
    pub documents: DocumentStore,
    pub storage: BlobStorage,
}

impl Backend {
    pub fn initialize(config: &BackendConfig) -> Result<Self, BackendError> {
        config.validate()?;

        let client = ClientConfig {
            api_key: config.api_key.clone(),
            auth_domain: config.auth_domain.clone(),
            project_id: config.project_id.clone(),
            storage_bucket: config.storage_bucket.clone(),
            messaging_sender_id: config.messaging_sender_id.clone(),
            app_id: config.app_id.clone(),
        };

        Ok(Self {
            client,
            auth: AuthHandle {
                base: trim_base(&config.auth_host),
                api_key: config.api_key.clone(),
            },
            documents: DocumentStore {
                base: format!(
                    "{}/v1/projects/{}/databases/(default)/documents",
                    trim_base(&config.documents_host),
                    config.project_id
                ),
            },
            storage: BlobStorage {
                base: trim_base(&config.storage_host),
                bucket: config.storage_bucket.clone(),
            },
        })
    }

    pub fn project_id(&self) -> &str {
        &self.client.project_id
    }

    pub fn client_config(&self) -> &ClientConfig {
        &self.client
    }
}

/// Identity service endpoints.
#[derive(Debug, Clone)]
pub struct AuthHandle {
    base: String,
    api_key: String,
}

impl AuthHandle {
    pub fn sign_in_url(&self) -> String {
        self.endpoint("accounts:signInWithPassword")
    }

    pub fn sign_up_url(&self) -> String {
        self.endpoint("accounts:signUp")
    }

    fn endpoint(&self, action: &str) -> String {
        if self.api_key.is_empty() {
            format!("{}/v1/{}", self.base, action)
        } else {
            format!("{}/v1/{}?key={}", self.base, action, encode_component(&self.api_key))
        }
    }
}

/// Document database endpoints.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    base: String,
}

impl DocumentStore {
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base, encode_component(collection))
    }

    pub fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base,
            encode_component(collection),
            encode_component(id)
        )
    }
}

/// Blob storage endpoints.
#[derive(Debug, Clone)]
pub struct BlobStorage {
    base: String,
    bucket: String,
}

impl BlobStorage {
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Download URL for an object. The whole object path, slashes included,
    /// is a single encoded segment.
    pub fn object_url(&self, path: &str) -> String {
        format!(
            "{}/v0/b/{}/o/{}?alt=media",
            self.base,
            self.bucket,
            encode_component(path.trim_start_matches('/'))
        )
    }
}

fn trim_base(host: &str) -> String {
    host.trim_end_matches('/').to_string()
}

/// Percent-encode everything outside the URL unreserved set.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
