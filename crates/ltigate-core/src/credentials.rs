//! Consumer credential lookup.
//!
//! Credentials are owned by whatever provisions the deployment; the core
//! only reads them per-request through [`CredentialStore`].

use std::collections::HashMap;

/// A shared-secret credential of one LMS consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerCredential {
    /// OAuth consumer key.
    pub key: String,
    /// Shared consumer secret.
    pub secret: String,
}

/// Lookup capability for consumer credentials.
///
/// Returns `None` when no credential is registered for the key; callers
/// must treat that as fatal for the request being served.
pub trait CredentialStore: Send + Sync {
    /// Find the credential registered for a consumer key.
    fn lookup(&self, consumer_key: &str) -> Option<ConsumerCredential>;
}

/// Credential store backed by a fixed in-memory table.
///
/// Populated once from configuration at startup and never mutated.
#[derive(Debug, Default)]
pub struct StaticCredentialStore {
    secrets: HashMap<String, String>,
}

impl StaticCredentialStore {
    /// Create a store from `(key, secret)` pairs.
    ///
    /// Later duplicates of a key replace earlier ones.
    #[must_use]
    pub fn new<I>(credentials: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            secrets: credentials.into_iter().collect(),
        }
    }

    /// Number of registered consumers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Whether no consumers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn lookup(&self, consumer_key: &str) -> Option<ConsumerCredential> {
        self.secrets
            .get(consumer_key)
            .map(|secret| ConsumerCredential {
                key: consumer_key.to_owned(),
                secret: secret.clone(),
            })
    }
}
