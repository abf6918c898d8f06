// src/memory/mod.rs — Question log persistence

pub mod schema;
pub mod store;
pub mod store_server;

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::core::types::LogRecord;
use crate::infra::errors::PersistenceError;
pub use store_server::StoreHandle;

/// Write-only destination for pipeline records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn append(&self, record: &LogRecord) -> Result<(), PersistenceError>;
}

/// Open (or create) the database at the given path and apply migrations.
pub fn open_store(path: &Path) -> anyhow::Result<store::Store> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    schema::run_migrations(&conn)?;
    Ok(store::Store::new(conn))
}

/// In-memory store (for testing).
pub fn open_in_memory() -> anyhow::Result<store::Store> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    schema::run_migrations(&conn)?;
    Ok(store::Store::new(conn))
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Process-wide store handle. The database is opened on first use, exactly
/// once even under concurrent first calls, and kept for the process lifetime.
#[derive(Clone)]
pub struct SharedStore {
    location: Location,
    handle: Arc<OnceCell<StoreHandle>>,
}

impl SharedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            handle: Arc::new(OnceCell::new()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            handle: Arc::new(OnceCell::new()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }

    /// The live handle, opening the database if this is the first call.
    pub async fn handle(&self) -> Result<&StoreHandle, PersistenceError> {
        self.handle
            .get_or_try_init(|| async {
                let store = match self.location {
                    Location::File(ref path) => {
                        tracing::info!(path = %path.display(), "Opening question log");
                        open_store(path)
                    }
                    Location::Memory => open_in_memory(),
                }
                .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
                let (handle, _join) = store_server::spawn_store_server(store);
                Ok::<_, PersistenceError>(handle)
            })
            .await
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<LogRecord>, PersistenceError> {
        self.handle()
            .await?
            .recent(limit)
            .await
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))
    }

    pub async fn count(&self) -> Result<usize, PersistenceError> {
        self.handle()
            .await?
            .count()
            .await
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl LogSink for SharedStore {
    async fn append(&self, record: &LogRecord) -> Result<(), PersistenceError> {
        self.handle()
            .await?
            .append(record.clone())
            .await
            .map_err(|e| PersistenceError::Write(e.to_string()))
    }
}
