//! Bounded, newest-first log of past generations.
//!
//! The whole log lives under a single storage key as a JSON array. Every
//! mutation is one read-modify-write of that array, serialized inside the
//! process by an async mutex shared between all scopes of a store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::HistoryError;
use crate::model::history::HistoryRecord;
use crate::storage::StorageService;

/// Upper bound on records kept per history log.
pub const MAX_HISTORY_RECORDS: usize = 50;

/// Scope used when the caller does not identify itself.
pub const DEFAULT_SCOPE: &str = "shared";

#[derive(Clone, Debug)]
pub struct HistoryStore {
    storage: StorageService,
    key: String,
    write_lock: Arc<Mutex<()>>,
}

impl HistoryStore {
    /// Create a store persisting the default scope through `storage`.
    pub fn new(storage: StorageService) -> Self {
        let key = history_key(&storage, DEFAULT_SCOPE);
        Self {
            storage,
            key,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A view of the same storage under another scope's key.
    ///
    /// Scoped views share the write lock of the store they came from.
    pub fn scoped(&self, scope: &str) -> Self {
        Self {
            storage: self.storage.clone(),
            key: history_key(&self.storage, scope),
            write_lock: Arc::clone(&self.write_lock),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &StorageService {
        &self.storage
    }

    /// Read the persisted log, newest first.
    ///
    /// Missing, unreadable or corrupt data all yield an empty log.
    pub async fn load(&self) -> Vec<HistoryRecord> {
        let _guard = self.write_lock.lock().await;
        self.read_records().await
    }

    /// Record a generation at the head of the log and return it.
    ///
    /// The oldest records are evicted once the log exceeds
    /// [`MAX_HISTORY_RECORDS`]. Corrupt persisted data is replaced by a fresh
    /// log. When the log cannot be read at all nothing is written, so stored
    /// records survive the outage. Either way the record is returned.
    pub async fn add(
        &self,
        user_input: impl Into<String>,
        pickup_lines: Vec<String>,
        timestamp: DateTime<Utc>,
        using_local: bool,
    ) -> HistoryRecord {
        let _guard = self.write_lock.lock().await;
        let existing = match self.try_read_records().await {
            Ok(records) => Some(records),
            Err(err @ HistoryError::CorruptPersistedData(_)) => {
                warn!(%err, history_key = %self.key, "starting a fresh history over corrupt data");
                Some(Vec::new())
            }
            Err(err @ HistoryError::StorageUnavailable(_)) => {
                warn!(%err, history_key = %self.key, "history unreadable; new record not persisted");
                None
            }
        };

        let record = HistoryRecord {
            id: fresh_id(existing.as_deref().unwrap_or_default()),
            user_input: user_input.into(),
            pickup_lines,
            timestamp,
            using_local,
        };

        let Some(mut records) = existing else {
            return record;
        };

        records.insert(0, record.clone());
        if records.len() > MAX_HISTORY_RECORDS {
            let evicted = records.len() - MAX_HISTORY_RECORDS;
            records.truncate(MAX_HISTORY_RECORDS);
            debug!(history_key = %self.key, evicted, "evicted oldest history records");
        }

        if let Err(err) = self.write_records(&records).await {
            warn!(%err, history_key = %self.key, "failed to persist new history record");
        }

        record
    }

    /// Remove the record with `id`. Returns whether a record was removed.
    ///
    /// An unknown id leaves storage untouched.
    pub async fn remove(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records().await;

        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            debug!(history_key = %self.key, id, "history record not found");
            return false;
        }

        match self.write_records(&records).await {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, history_key = %self.key, id, "failed to persist history removal");
                false
            }
        }
    }

    /// Erase the persisted log.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;

        self.storage.del(&self.key).await.map_err(|err| {
            error!(?err, history_key = %self.key, "failed to clear history");
            HistoryError::storage(err)
        })
    }

    async fn read_records(&self) -> Vec<HistoryRecord> {
        match self.try_read_records().await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, history_key = %self.key, "treating unreadable history as empty");
                Vec::new()
            }
        }
    }

    async fn try_read_records(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let Some(bytes) = self
            .storage
            .get(&self.key)
            .await
            .map_err(HistoryError::storage)?
        else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_records(&self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        let payload = serde_json::to_vec(records)?;
        self.storage
            .set(&self.key, payload)
            .await
            .map_err(HistoryError::storage)
    }
}

fn history_key(storage: &StorageService, scope: &str) -> String {
    storage.key(format!("history:{scope}"))
}

fn fresh_id(records: &[HistoryRecord]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !records.iter().any(|record| record.id == id) {
            return id;
        }
    }
}
