//! Record store for the catalog.
//!
//! A store holds schemaless JSON documents grouped in named collections.
//! Two backends are provided: [`memory::MemoryStore`] for local runs and
//! tests, and [`remote::RemoteStore`] which talks to a hosted document
//! database over its REST document API.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde::{de::DeserializeOwned, Deserialize};

pub mod credentials;
mod error;
pub mod memory;
pub mod remote;

pub use credentials::ServiceAccount;
pub use error::StoreError;

/// Field map of a stored document.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Shared handle to a record store.
pub type Store = Arc<dyn RecordStore>;

/// A document as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned identifier
    pub id: String,
    /// Document body, without store metadata
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Deserialize the document body into a typed value.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(serde_json::Value::Object(self.fields.clone())).map_err(|e| {
            StoreError::Malformed {
                id: self.id.clone(),
                reason: e.to_string(),
            }
        })
    }
}

/// Operations every backend supports. Each call is atomic only for the
/// single document it touches.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name, used in logs.
    fn backend(&self) -> &'static str;

    /// All documents of a collection, in store-defined order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// One document, or `None` when the id is unknown.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Add a document and return the id the store assigned to it.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Overwrite the given fields of an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] when the id is unknown.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Remove a document permanently.
    ///
    /// Fails with [`StoreError::NotFound`] when the id is unknown.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Which backend to connect to.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Memory,
    Remote,
}

/// Everything needed to open a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: Backend,
    pub endpoint: String,
    pub credentials_path: PathBuf,
}

/// Open a store for the configured backend.
///
/// The remote backend reads its credential from the secret file but does
/// not contact the database until the first operation.
pub async fn connect(config: &StoreConfig) -> anyhow::Result<Store> {
    match config.backend {
        Backend::Memory => {
            tracing::info!(target: "catalog-db", backend = "memory", "opening record store");
            Ok(Arc::new(memory::MemoryStore::new()))
        }
        Backend::Remote => {
            let account = ServiceAccount::from_file(&config.credentials_path).with_context(|| {
                format!(
                    "failed to load store credentials from {}",
                    config.credentials_path.display()
                )
            })?;

            tracing::info!(
                target: "catalog-db",
                backend = "remote",
                endpoint = %config.endpoint,
                database = %account.database,
                "opening record store"
            );

            let store = remote::RemoteStore::new(&config.endpoint, account)
                .context("failed to build remote store client")?;
            Ok(Arc::new(store))
        }
    }
}

static STORE: OnceCell<Store> = OnceCell::new();

/// Open the process-wide store. Later calls return the handle opened by
/// the first one; the store lives until the process exits.
pub async fn init(config: &StoreConfig) -> anyhow::Result<Store> {
    if let Some(store) = STORE.get() {
        return Ok(store.clone());
    }

    let store = connect(config).await?;
    Ok(STORE.get_or_init(|| store).clone())
}

/// The process-wide store, if [`init`] has run.
pub fn handle() -> Option<Store> {
    STORE.get().cloned()
}
