//! Session-scoped persistence for dashboard cache records.
//!
//! The cache lives in the visitor's server-side session, so it survives page reloads and
//! navigation but never outlives the session and is never shared between sessions. Records
//! are keyed per principal so a session that changes principal never sees another
//! principal's sections.

use std::{collections::HashMap, sync::Arc};

use dioxus_logger::tracing;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::{Session, SessionStore};

use crate::server::{
    error::Error,
    model::dashboard::{CacheEntry, CacheRecord, VersionTag, CACHE_FORMAT_VERSION},
};

/// Storage for one principal's cache record.
///
/// Loading never fails: a missing, unreadable or incompatible record is reported as `None`,
/// the same as a cache miss.
#[allow(async_fn_in_trait)]
pub trait CacheStore {
    async fn load(&self, principal_id: &str) -> Option<CacheRecord>;

    /// Company record version the stored cache was populated for.
    async fn owner_version(&self, principal_id: &str) -> Option<VersionTag>;

    async fn save(&self, principal_id: &str, record: &CacheRecord) -> Result<(), Error>;

    /// Removes the record along with its initialized flag and owner version.
    async fn clear(&self, principal_id: &str) -> Result<(), Error>;

    fn is_complete(&self, record: &CacheRecord) -> bool {
        record.is_complete()
    }
}

fn record_key(principal_id: &str) -> String {
    format!("dashboard-cache:{}", principal_id)
}

fn initialized_key(principal_id: &str) -> String {
    format!("dashboard-cache-initialized:{}", principal_id)
}

fn owner_version_key(principal_id: &str) -> String {
    format!("dashboard-cache-owner-version:{}", principal_id)
}

/// Serialized form of a cache record's entries.
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    format_version: u32,
    entries: Vec<CacheEntry>,
}

/// [`CacheStore`] backed by the visitor's `tower-sessions` session.
///
/// `Session` snapshots its record once per request, so two requests for the same session
/// each see their own copy. Every read and write here goes to the backing store by session
/// id instead, and a write only touches the principal's dashboard keys. Callers serialize
/// writes with [`super::lock::PrincipalLocks`].
#[derive(Clone)]
pub struct SessionCacheStore {
    session: Session,
    backend: Arc<dyn SessionStore>,
}

impl SessionCacheStore {
    /// # Arguments
    /// - `session` - The visitor's session, used for its id
    /// - `backend` - Store the session layer persists into
    pub fn new(session: Session, backend: Arc<dyn SessionStore>) -> Self {
        Self { session, backend }
    }

    /// Current session data as persisted, or `None` if the session was never saved.
    async fn stored_data(&self) -> Result<Option<HashMap<String, Value>>, Error> {
        let Some(id) = self.session.id() else {
            return Ok(None);
        };

        Ok(self.backend.load(&id).await?.map(|record| record.data))
    }

    /// Reads one key from the persisted session data, logging and hiding store failures.
    async fn stored_value(&self, principal_id: &str, key: &str) -> Option<Value> {
        match self.stored_data().await {
            Ok(data) => data?.remove(key),
            Err(e) => {
                tracing::warn!("Failed to read dashboard cache for {}: {}", principal_id, e);
                None
            }
        }
    }

    /// Sets (`Some`) or removes (`None`) keys on the persisted session record.
    async fn write(&self, changes: Vec<(String, Option<Value>)>) -> Result<(), Error> {
        if self.session.id().is_none() {
            // Assigns the session its id in the backing store
            self.session.save().await?;
        }

        let record = match self.session.id() {
            Some(id) => self.backend.load(&id).await?,
            None => None,
        };

        match record {
            Some(mut record) => {
                for (key, value) in changes {
                    match value {
                        Some(value) => record.data.insert(key, value),
                        None => record.data.remove(&key),
                    };
                }
                self.backend.save(&record).await?;
            }
            // Expired between the id check and the load; recreate it through the session
            None => {
                for (key, value) in changes {
                    match value {
                        Some(value) => self.session.insert_value(&key, value).await?,
                        None => self.session.remove_value(&key).await?,
                    };
                }
                self.session.save().await?;
            }
        }

        Ok(())
    }
}

fn decode_entries(principal_id: &str, value: Value) -> Option<Vec<CacheEntry>> {
    let stored = match serde_json::from_value::<StoredRecord>(value) {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!(
                "Ignoring unreadable dashboard cache for {}: {}",
                principal_id,
                e
            );
            return None;
        }
    };

    if stored.format_version != CACHE_FORMAT_VERSION {
        tracing::warn!(
            "Ignoring dashboard cache for {} with format version {} (expected {})",
            principal_id,
            stored.format_version,
            CACHE_FORMAT_VERSION
        );
        return None;
    }

    Some(stored.entries)
}

fn decode_owner_version(principal_id: &str, value: Value) -> Option<VersionTag> {
    match serde_json::from_value::<VersionTag>(value) {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::warn!(
                "Ignoring unreadable dashboard cache version for {}: {}",
                principal_id,
                e
            );
            None
        }
    }
}

impl CacheStore for SessionCacheStore {
    async fn load(&self, principal_id: &str) -> Option<CacheRecord> {
        let mut data = match self.stored_data().await {
            Ok(data) => data?,
            Err(e) => {
                tracing::warn!("Failed to read dashboard cache for {}: {}", principal_id, e);
                return None;
            }
        };

        let entries = decode_entries(principal_id, data.remove(&record_key(principal_id))?)?;
        // Flag presence is all that matters
        let initialized = data.contains_key(&initialized_key(principal_id));
        let owner_version = data
            .remove(&owner_version_key(principal_id))
            .and_then(|value| decode_owner_version(principal_id, value));

        Some(CacheRecord::from_entries(entries, owner_version, initialized))
    }

    async fn owner_version(&self, principal_id: &str) -> Option<VersionTag> {
        let value = self
            .stored_value(principal_id, &owner_version_key(principal_id))
            .await?;

        decode_owner_version(principal_id, value)
    }

    async fn save(&self, principal_id: &str, record: &CacheRecord) -> Result<(), Error> {
        let stored = StoredRecord {
            format_version: CACHE_FORMAT_VERSION,
            entries: record.entries().cloned().collect(),
        };
        let owner_version = record
            .owner_version
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        self.write(vec![
            (record_key(principal_id), Some(serde_json::to_value(stored)?)),
            (
                initialized_key(principal_id),
                record.initialized.then_some(Value::Bool(true)),
            ),
            (owner_version_key(principal_id), owner_version),
        ])
        .await
    }

    async fn clear(&self, principal_id: &str) -> Result<(), Error> {
        if self.session.id().is_none() {
            return Ok(());
        }

        self.write(vec![
            (record_key(principal_id), None),
            (initialized_key(principal_id), None),
            (owner_version_key(principal_id), None),
        ])
        .await
    }
}
