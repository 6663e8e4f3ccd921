//src/transfer.rs
use crate::coach::{self, ChatMessage};
use crate::db::DbError;
use crate::ledger::{self, HistoryEntry, PersonalRecord};
use crate::session;
use crate::store::{write_json, Store, StoreKey};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub const EXPORT_VERSION: &str = "firstrep-v3plus";
pub const DEFAULT_EXPORT_FILE: &str = "firstrep-export.json";

/// Largest integer an export written by a JS runtime can hold exactly.
const MAX_CURSOR: u64 = (1 << 53) - 1;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Import failed. Please upload a valid firstrep-export.json file: {0}")]
    Malformed(String),
    #[error("Import failed: field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to access stored state: {0}")]
    Store(#[from] DbError),
}

/// Snapshot of all persisted state except the in-progress session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub day_index: u64,
    pub split_var_index: BTreeMap<String, u64>,
    pub history: Vec<HistoryEntry>,
    pub prs: BTreeMap<String, PersonalRecord>,
    pub chat: Vec<ChatMessage>,
}

/// # Errors
/// Returns `DbError` on backend failure.
pub fn export_state(store: &dyn Store) -> Result<ExportPayload, DbError> {
    let payload = ExportPayload {
        version: EXPORT_VERSION.to_string(),
        exported_at: Utc::now(),
        day_index: session::read_day_index(store)?,
        split_var_index: session::read_split_var_index(store)?,
        history: ledger::list_history(store)?,
        prs: ledger::read_prs(store)?,
        chat: coach::chat_log(store)?,
    };
    tracing::info!(
        workouts = payload.history.len(),
        prs = payload.prs.len(),
        "Exported state"
    );
    Ok(payload)
}

/// Fields that were present with the right JSON type and got written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

#[derive(Debug, Default)]
struct Staged {
    day_index: Option<u64>,
    split_var_index: Option<BTreeMap<String, u64>>,
    history: Option<Vec<HistoryEntry>>,
    prs: Option<BTreeMap<String, PersonalRecord>>,
    chat: Option<Vec<ChatMessage>>,
}

/// Takes `field` if it has the expected JSON type, then decodes it fully.
///
/// A wrong JSON type is `Ok(None)`; the right type with a bad shape is an error.
fn stage<T: DeserializeOwned>(
    data: &serde_json::Map<String, Value>,
    field: &'static str,
    type_ok: fn(&Value) -> bool,
    summary: &mut ImportSummary,
) -> Result<Option<T>, TransferError> {
    let Some(value) = data.get(field) else {
        return Ok(None);
    };
    if !type_ok(value) {
        tracing::debug!(field, "Skipping field with unexpected type");
        summary.skipped.push(field);
        return Ok(None);
    }
    let decoded = serde_json::from_value(value.clone()).map_err(|e| TransferError::InvalidField {
        field,
        reason: e.to_string(),
    })?;
    summary.imported.push(field);
    Ok(Some(decoded))
}

fn check_cursor(field: &'static str, cursor: Option<u64>) -> Result<(), TransferError> {
    match cursor {
        Some(cursor) if cursor > MAX_CURSOR => Err(TransferError::InvalidField {
            field,
            reason: format!("cursor {cursor} is out of range"),
        }),
        _ => Ok(()),
    }
}

/// Applies an export file on top of the current state.
///
/// Every field is decoded before anything is written, so a bad file leaves
/// the store untouched.
/// # Errors
/// `Malformed` for unparsable JSON, `InvalidField` for a well-typed field
/// whose contents cannot be decoded.
pub fn import_state(store: &mut dyn Store, json: &str) -> Result<ImportSummary, TransferError> {
    let data: Value =
        serde_json::from_str(json).map_err(|e| TransferError::Malformed(e.to_string()))?;
    let Value::Object(data) = data else {
        return Err(TransferError::Malformed("expected a JSON object".to_string()));
    };

    let mut summary = ImportSummary::default();
    let staged = Staged {
        day_index: stage(&data, "dayIndex", Value::is_number, &mut summary)?,
        split_var_index: stage(&data, "splitVarIndex", Value::is_object, &mut summary)?,
        history: stage(&data, "history", Value::is_array, &mut summary)?,
        prs: stage(&data, "prs", Value::is_object, &mut summary)?,
        chat: stage(&data, "chat", Value::is_array, &mut summary)?,
    };

    check_cursor("dayIndex", staged.day_index)?;
    if let Some(map) = &staged.split_var_index {
        for cursor in map.values() {
            check_cursor("splitVarIndex", Some(*cursor))?;
        }
    }

    if let Some(day_index) = staged.day_index {
        write_json(store, StoreKey::DayIndex, &day_index)?;
    }
    if let Some(map) = &staged.split_var_index {
        write_json(store, StoreKey::SplitVarIndex, map)?;
    }
    if let Some(history) = &staged.history {
        write_json(store, StoreKey::History, history)?;
    }
    if let Some(prs) = &staged.prs {
        write_json(store, StoreKey::Prs, prs)?;
    }
    if let Some(chat) = &staged.chat {
        write_json(store, StoreKey::Chat, chat)?;
    }

    tracing::info!(imported = ?summary.imported, skipped = ?summary.skipped, "Import complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{clear_all, MemoryStore};
    use pretty_assertions::assert_eq;

    fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.write_raw(StoreKey::DayIndex, "5").expect("memory write");
        store
            .write_raw(StoreKey::SplitVarIndex, r#"{"push":2,"full":7}"#)
            .expect("memory write");
        store
    }

    #[test]
    fn test_export_then_import_round_trips() -> Result<(), TransferError> {
        let mut store = seeded();
        let exported = export_state(&store)?;
        assert_eq!(exported.version, EXPORT_VERSION);
        let json = serde_json::to_string_pretty(&exported)?;

        clear_all(&mut store)?;
        import_state(&mut store, &json)?;
        let again = export_state(&store)?;
        assert_eq!(again.day_index, 5);
        assert_eq!(again.split_var_index, exported.split_var_index);
        assert_eq!(again.history, exported.history);
        assert_eq!(again.prs, exported.prs);
        Ok(())
    }

    #[test]
    fn test_malformed_json_writes_nothing() -> Result<(), DbError> {
        let mut store = seeded();
        assert!(matches!(
            import_state(&mut store, "{\"dayIndex\": 1,"),
            Err(TransferError::Malformed(_))
        ));
        assert!(matches!(
            import_state(&mut store, "[1, 2]"),
            Err(TransferError::Malformed(_))
        ));
        assert_eq!(store.read_raw(StoreKey::DayIndex)?.as_deref(), Some("5"));
        Ok(())
    }

    #[test]
    fn test_wrong_typed_fields_are_left_alone() -> Result<(), TransferError> {
        let mut store = seeded();
        let summary = import_state(
            &mut store,
            r#"{"dayIndex": "9", "splitVarIndex": [], "history": [], "extra": true}"#,
        )?;
        assert_eq!(summary.imported, ["history"]);
        assert_eq!(summary.skipped, ["dayIndex", "splitVarIndex"]);
        assert_eq!(store.read_raw(StoreKey::DayIndex)?.as_deref(), Some("5"));
        assert_eq!(store.read_raw(StoreKey::History)?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn test_invalid_contents_reject_whole_import() -> Result<(), DbError> {
        let mut store = seeded();
        let result = import_state(
            &mut store,
            r#"{"dayIndex": 1, "history": [{"id": 3}]}"#,
        );
        assert!(matches!(
            result,
            Err(TransferError::InvalidField { field: "history", .. })
        ));
        // dayIndex was valid but must not be applied on its own.
        assert_eq!(store.read_raw(StoreKey::DayIndex)?.as_deref(), Some("5"));

        assert!(matches!(
            import_state(&mut store, r#"{"dayIndex": -2}"#),
            Err(TransferError::InvalidField { field: "dayIndex", .. })
        ));
        Ok(())
    }

    #[test]
    fn test_oversized_cursor_rejects_whole_import() -> Result<(), DbError> {
        let mut store = seeded();
        assert!(matches!(
            import_state(&mut store, r#"{"dayIndex": 18446744073709551615}"#),
            Err(TransferError::InvalidField { field: "dayIndex", .. })
        ));
        assert!(matches!(
            import_state(
                &mut store,
                r#"{"dayIndex": 1, "splitVarIndex": {"full": 9007199254740992}}"#
            ),
            Err(TransferError::InvalidField { field: "splitVarIndex", .. })
        ));
        assert_eq!(store.read_raw(StoreKey::DayIndex)?.as_deref(), Some("5"));
        Ok(())
    }

    #[test]
    fn test_imports_original_export_shape() -> Result<(), TransferError> {
        let mut store = MemoryStore::new();
        let json = r#"{
            "version": "firstrep-v3plus",
            "exportedAt": "2025-01-02T03:04:05.000Z",
            "dayIndex": 2,
            "splitVarIndex": {"full": 1},
            "history": [{
                "id": "w_1735787045000_a1b2c3",
                "createdAt": "2025-01-02T03:04:05.000Z",
                "split": "full",
                "variationIndex": 0,
                "sets": 3,
                "exercises": [
                    {"name": "Chest Press", "repRange": "8-12", "weight": 80, "reps": 10, "sets": 3},
                    {"name": "Plank", "repRange": "30-60", "weight": null, "reps": null, "sets": 3}
                ]
            }],
            "prs": {"Chest Press": {"weight": 80, "reps": 10, "achievedAt": "2025-01-02T03:04:05.000Z"}},
            "chat": [{"id": "w_1_2", "at": "2025-01-02T03:04:05.000Z", "role": "user", "text": "hi"}]
        }"#;
        let summary = import_state(&mut store, json)?;
        assert_eq!(summary.imported.len(), 5);

        let history = ledger::list_history(&store)?;
        assert_eq!(history[0].exercises[0].weight, Some(80.0));
        assert_eq!(history[0].exercises[1].reps, None);
        assert_eq!(ledger::read_prs(&store)?["Chest Press"].reps, 10.0);
        assert_eq!(coach::chat_log(&store)?.len(), 1);
        Ok(())
    }
}
