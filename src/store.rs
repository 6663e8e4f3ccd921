//src/store.rs
use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Every piece of persisted state lives under one of these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum StoreKey {
    DayIndex,
    SplitVarIndex,
    History,
    Prs,
    Chat,
    CurrentSession,
}

impl StoreKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DayIndex => "firstrep_dayIndex_v3",
            Self::SplitVarIndex => "firstrep_splitVarIndex_v3",
            Self::History => "firstrep_history_v3",
            Self::Prs => "firstrep_prs_v3",
            Self::Chat => "firstrep_chat_v3",
            Self::CurrentSession => "firstrep_currentSession_v3",
        }
    }
}

/// Key-value persistence. Writes are atomic per key.
pub trait Store {
    /// # Errors
    /// Returns `DbError` if the backend cannot be read.
    fn read_raw(&self, key: StoreKey) -> Result<Option<String>, DbError>;
    /// # Errors
    /// Returns `DbError` if the backend cannot be written.
    fn write_raw(&mut self, key: StoreKey, value: &str) -> Result<(), DbError>;
    /// # Errors
    /// Returns `DbError` if the backend cannot be written.
    fn remove(&mut self, key: StoreKey) -> Result<(), DbError>;
}

/// Reads and decodes a key. Missing or corrupt values become `fallback`.
///
/// # Errors
/// Only backend failures are reported; bad JSON is not an error.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn Store,
    key: StoreKey,
    fallback: T,
) -> Result<T, DbError> {
    let Some(raw) = store.read_raw(key)? else {
        return Ok(fallback);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key = key.as_str(), "Ignoring corrupt stored value: {e}");
            Ok(fallback)
        }
    }
}

/// # Errors
/// Returns `DbError` on serialization or backend failure.
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn Store,
    key: StoreKey,
    value: &T,
) -> Result<(), DbError> {
    let raw = serde_json::to_string(value)?;
    store.write_raw(key, &raw)
}

/// Removes every known key.
/// # Errors
/// Returns `DbError` if any removal fails.
pub fn clear_all(store: &mut dyn Store) -> Result<(), DbError> {
    for key in StoreKey::iter() {
        store.remove(key)?;
    }
    tracing::info!("Cleared all stored state");
    Ok(())
}

/// Volatile store used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<StoreKey, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read_raw(&self, key: StoreKey) -> Result<Option<String>, DbError> {
        Ok(self.values.get(&key).cloned())
    }

    fn write_raw(&mut self, key: StoreKey, value: &str) -> Result<(), DbError> {
        self.values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), DbError> {
        self.values.remove(&key);
        Ok(())
    }
}
