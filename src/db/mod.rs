//! Database layer (Firestore, with an in-memory stand-in).

pub mod firestore;
pub mod memory;
mod records;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

pub use self::firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const EXERCISES: &str = "exercises";
    pub const TRACKED_EXERCISES: &str = "tracked_exercises";
    pub const REPETITIONS: &str = "repetitions";
    pub const WEIGHTS: &str = "weights";
    pub const WORKOUTS: &str = "workouts";
    pub const SPLITS: &str = "splits";
}

/// Equality filter on a top-level document field.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: &'static str,
    pub value: serde_json::Value,
}

impl FieldFilter {
    pub fn eq(field: &'static str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreStore),
    Memory(Arc<MemoryStore>),
    Offline,
}

/// Document database handle shared by all services.
///
/// Cheap to clone; every clone talks to the same store.
#[derive(Clone)]
pub struct Db {
    backend: Backend,
}

impl Db {
    /// Connect to the backend selected in `config`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage_backend {
            StorageBackend::Firestore => Self::firestore(&config.gcp_project_id).await,
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory document store; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Connect to Firestore.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn firestore(project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            backend: Backend::Firestore(FirestoreStore::connect(project_id).await?),
        })
    }

    /// Create an empty process-local store.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::default())),
        }
    }

    /// Create a mock database for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── Generic document operations ────────────────────────────

    pub(crate) async fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.get(collection, id).await,
            Backend::Memory(store) => store.get(collection, id),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// List documents matching every filter, optionally ordered ascending by
    /// `order_by`. Unordered results come back in storage order.
    pub(crate) async fn list<T>(
        &self,
        collection: &str,
        filters: Vec<FieldFilter>,
        order_by: Option<&'static str>,
    ) -> Result<Vec<T>, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.list(collection, filters, order_by).await,
            Backend::Memory(store) => store.list(collection, &filters, order_by),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Create-only write. Returns `false` if a document with `id` already
    /// exists, in which case nothing is written.
    pub(crate) async fn insert<T>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<bool, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.insert(collection, id, doc).await,
            Backend::Memory(store) => store.insert(collection, id, doc),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Create or fully replace a document.
    pub(crate) async fn put<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(store) => store.put(collection, id, doc).await,
            Backend::Memory(store) => store.put(collection, id, doc),
            Backend::Offline => Err(Self::offline()),
        }
    }

    pub(crate) async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.delete(collection, id).await,
            Backend::Memory(store) => {
                store.delete(collection, id);
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }

    pub(crate) async fn delete_many(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(store) => store.batch_delete(collection, ids).await,
            Backend::Memory(store) => {
                for id in ids {
                    store.delete(collection, id);
                }
                Ok(())
            }
            Backend::Offline => Err(Self::offline()),
        }
    }
}
