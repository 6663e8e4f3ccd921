use anyhow::{bail, Context, Result};
// Use anyhow::Result as standard Result for service layer
use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

// --- Declare modules ---
pub mod catalog;
pub mod coach;
mod config;
pub mod db;
pub mod injury;
pub mod ledger;
pub mod rest;
pub mod session;
pub mod store;
pub mod swap;
pub mod transfer;

// --- Expose public types ---
pub use catalog::Split;
pub use coach::{ChatMessage, Role, QUICK_PROMPTS};
pub use config::{parse_color, Config, ConfigError, SessionDefaults, StandardColor, Theme, Units};
pub use db::{DbError, SqliteStore};
pub use injury::InjuryKey;
pub use ledger::{
    Completion, ExerciseEntry, HistoryEntry, HistoryExercise, LedgerError, PersonalRecord, PrHit,
};
pub use rest::{rest_for_rep_range, RestAdvice};
pub use session::{
    GenerateError, GeneratedSession, IntensityMode, RotationHint, SessionExercise, SessionMode,
    SessionRequest, SetsMode,
};
pub use store::{MemoryStore, Store, StoreKey};
pub use transfer::{ExportPayload, ImportSummary, TransferError, DEFAULT_EXPORT_FILE};

/// Identifier for workouts and chat messages: `w_<unix millis>_<random hex>`.
pub(crate) fn new_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("w_{}_{}", Utc::now().timestamp_millis(), &random[..12])
}

// --- Service Layer ---

pub struct AppService {
    pub config: Config,
    pub store: Box<dyn Store>,
    pub db_path: PathBuf,
    pub config_path: PathBuf,
}

impl AppService {
    /// Initializes the application service.
    /// # Errors
    /// Returns `anyhow::Error` if config/db path determination, loading, or initialization fails.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        let db_path = db::get_db_path().context("Failed to determine database path")?;
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database at {db_path:?}"))?;

        Ok(Self {
            config,
            store: Box::new(store),
            db_path,
            config_path,
        })
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save(&self.config_path, &self.config)
    }

    /// Sets the measurement units.
    /// # Errors
    /// Returns `ConfigError` variants if saving fails.
    pub fn set_units(&mut self, units: Units) -> Result<(), ConfigError> {
        self.config.units = units;
        self.save_config()
    }

    /// Replaces the defaults used by `generate`.
    /// # Errors
    /// - `ConfigError::InvalidDefault` if the defaults would not pass validation.
    /// - `ConfigError` variants if saving fails.
    pub fn set_defaults(&mut self, defaults: SessionDefaults) -> Result<(), ConfigError> {
        let probe = SessionRequest {
            days_per_week: defaults.days_per_week,
            session_minutes: defaults.session_minutes,
            sets: SetsMode::Auto,
            injury: defaults.injury,
            intensity: defaults.intensity,
        };
        probe
            .validate()
            .map_err(|e| ConfigError::InvalidDefault(e.to_string()))?;
        self.config.defaults = defaults;
        self.save_config()
    }

    /// Builds a request, falling back to configured defaults for omitted values.
    pub fn session_request(
        &self,
        days_per_week: Option<u8>,
        session_minutes: Option<u16>,
        sets: SetsMode,
        injury: Option<InjuryKey>,
        intensity: Option<IntensityMode>,
    ) -> SessionRequest {
        let defaults = &self.config.defaults;
        SessionRequest {
            days_per_week: days_per_week.unwrap_or(defaults.days_per_week),
            session_minutes: session_minutes.unwrap_or(defaults.session_minutes),
            sets,
            injury: injury.unwrap_or(defaults.injury),
            intensity: intensity.unwrap_or(defaults.intensity),
        }
    }

    // --- Session ---

    /// Generates the next session and advances the rotation.
    /// # Errors
    /// Returns `GenerateError` (wrapped) for invalid input or storage failures.
    pub fn generate(&mut self, request: &SessionRequest) -> Result<GeneratedSession> {
        let session = session::generate_session(&mut *self.store, request)?;
        Ok(session)
    }

    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn current_session(&self) -> Result<Option<GeneratedSession>> {
        session::current_session(&*self.store).context("Failed to read current session")
    }

    fn require_session(&self) -> Result<GeneratedSession> {
        Ok(self.current_session()?.ok_or(LedgerError::NoSession)?)
    }

    /// Converts a 1-based position into an index into the session.
    fn index_for(session: &GeneratedSession, position: usize) -> Result<usize> {
        if position == 0 || position > session.exercises.len() {
            bail!(
                "Exercise position {position} is out of range (1-{}).",
                session.exercises.len()
            );
        }
        Ok(position - 1)
    }

    /// Steps exercise `position` (1-based) to its next alternative.
    ///
    /// Returns the exercise after the swap; swapping a single-name cycle is a no-op.
    /// # Errors
    /// Fails if nothing is generated or the position is out of range.
    pub fn swap_exercise(&mut self, position: usize) -> Result<SessionExercise> {
        let mut session = self.require_session()?;
        let index = Self::index_for(&session, position)?;
        let exercise = &mut session.exercises[index];
        if !exercise.swap.swap() {
            tracing::debug!(position, "Nothing to swap to");
        }
        let swapped = exercise.clone();
        session::save_current_session(&mut *self.store, &session)
            .context("Failed to save current session")?;
        Ok(swapped)
    }

    /// Names the exercise at `position` can be swapped to.
    /// # Errors
    /// Fails if nothing is generated or the position is out of range.
    pub fn alternatives(&self, position: usize) -> Result<Vec<String>> {
        let session = self.require_session()?;
        let index = Self::index_for(&session, position)?;
        Ok(session.exercises[index]
            .swap
            .others()
            .map(ToString::to_string)
            .collect())
    }

    /// Discards the current session without recording it. Returns whether one existed.
    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn clear_workout(&mut self) -> Result<bool> {
        let had_session = self.current_session()?.is_some();
        session::clear_current_session(&mut *self.store)
            .context("Failed to clear current session")?;
        Ok(had_session)
    }

    // --- Ledger ---

    /// Completes the current session. `entries` line up with its exercises.
    /// # Errors
    /// Returns `LedgerError` (wrapped) if there is no session or nothing was entered.
    pub fn complete_workout(&mut self, entries: &[ExerciseEntry]) -> Result<Completion> {
        let session = self.require_session()?;
        let completion = ledger::complete_workout(&mut *self.store, &session, entries)?;
        Ok(completion)
    }

    /// Same as `complete_workout`, with entries given as `(1-based position, entry)`.
    /// Later entries for the same position win.
    /// # Errors
    /// Also fails if a position is out of range.
    pub fn complete_workout_at(&mut self, entries: &[(usize, ExerciseEntry)]) -> Result<Completion> {
        let session = self.require_session()?;
        let mut aligned = vec![ExerciseEntry::default(); session.exercises.len()];
        for (position, entry) in entries {
            let index = Self::index_for(&session, *position)?;
            aligned[index] = *entry;
        }
        let completion = ledger::complete_workout(&mut *self.store, &session, &aligned)?;
        Ok(completion)
    }

    /// Congratulation text in the configured unit and display limit.
    pub fn pr_congrats(&self, hits: &[PrHit]) -> String {
        ledger::pr_congrats(
            hits,
            self.config.pr_display_limit,
            self.config.units.weight_label(),
        )
    }

    /// Most-recent-first history, optionally truncated.
    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn list_history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
        let mut history =
            ledger::list_history(&*self.store).context("Failed to read history")?;
        if let Some(limit) = limit {
            history.truncate(limit);
        }
        Ok(history)
    }

    /// # Errors
    /// Returns `LedgerError::WorkoutNotFound` (wrapped) for an unknown id.
    pub fn delete_workout(&mut self, id: &str) -> Result<()> {
        ledger::delete_workout(&mut *self.store, id)?;
        Ok(())
    }

    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn list_prs(&self) -> Result<Vec<(String, PersonalRecord)>> {
        ledger::list_prs(&*self.store).context("Failed to read personal records")
    }

    // --- Rotation ---

    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn rotation_hint(&self, days_per_week: Option<u8>) -> Result<RotationHint> {
        let days = days_per_week.unwrap_or(self.config.defaults.days_per_week);
        RotationHint::read(&*self.store, days).context("Failed to read rotation cursor")
    }

    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn reset_rotation(&mut self) -> Result<()> {
        session::reset_rotation(&mut *self.store).context("Failed to reset rotation")
    }

    /// Deletes history, PRs, rotation, variations, chat and the current session.
    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn clear_all(&mut self) -> Result<()> {
        store::clear_all(&mut *self.store).context("Failed to clear stored data")
    }

    // --- Export / Import ---

    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn export_state(&self) -> Result<ExportPayload> {
        transfer::export_state(&*self.store).context("Failed to collect export data")
    }

    /// Writes a pretty-printed export file.
    /// # Errors
    /// Fails if the state cannot be read or the file cannot be written.
    pub fn export_to(&self, path: &Path) -> Result<ExportPayload> {
        let payload = self.export_state()?;
        let json = serde_json::to_string_pretty(&payload).map_err(TransferError::from)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write export file {path:?}"))?;
        Ok(payload)
    }

    /// # Errors
    /// `TransferError` (wrapped) for bad content; I/O errors for unreadable files.
    pub fn import_from(&mut self, path: &Path) -> Result<ImportSummary> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file {path:?}"))?;
        self.import_json(&json)
    }

    /// # Errors
    /// Returns `TransferError` (wrapped) for bad content.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary> {
        let summary = transfer::import_state(&mut *self.store, json)?;
        Ok(summary)
    }

    // --- Chat ---

    /// Asks the offline coach. Blank questions are ignored.
    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn chat(&mut self, question: &str) -> Result<Option<ChatMessage>> {
        coach::ask(&mut *self.store, question).context("Failed to update chat log")
    }

    /// # Errors
    /// Returns `anyhow::Error` wrapping `DbError` variants.
    pub fn chat_log(&self) -> Result<Vec<ChatMessage>> {
        coach::chat_log(&*self.store).context("Failed to read chat log")
    }
}
