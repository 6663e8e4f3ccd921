//src/session.rs
use crate::catalog::{self, Exercise, Split};
use crate::db::DbError;
use crate::injury::InjuryKey;
use crate::rest::{self, RestAdvice, EASY_REP_RANGE};
use crate::store::{read_json, write_json, Store, StoreKey};
use crate::swap::SwapCycle;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

pub const MIN_DAYS: u8 = 1;
pub const MAX_DAYS: u8 = 6;
pub const MIN_MINUTES: u16 = 20;
pub const MAX_MINUTES: u16 = 180;
pub const MIN_CUSTOM_SETS: u8 = 1;
pub const MAX_CUSTOM_SETS: u8 = 6;

/// Rep range forced onto substituted exercises in cautious mode.
const CAUTIOUS_REP_RANGE: &str = "10-12";

const GENERIC_RECOVERY: [&str; 3] = [
    "Easy walk: 10–20 min",
    "Gentle mobility: 8–10 min",
    "Light core: 2 movements",
];
const RECOVERY_ADVICE: &str = "If anything hurts, skip it and do easy walking instead.";

const GENERIC_WARMUP: [&str; 3] = [
    "2–4 min easy bike or incline walk",
    "Dynamic mobility: 3–4 min (controlled range)",
    "2 ramp-up sets for your first lift (light → moderate)",
];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IntensityMode {
    #[default]
    Normal,
    Cautious,
    Recovery,
}

/// What the generator actually produced. Cautious sessions are still `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionMode {
    Normal,
    Recovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetsMode {
    #[default]
    Auto,
    Custom(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub days_per_week: u8,
    pub session_minutes: u16,
    pub sets: SetsMode,
    pub injury: InjuryKey,
    pub intensity: IntensityMode,
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Days per week must be between 1 and 6 (got {0}).")]
    DaysOutOfRange(u8),
    #[error("Time must be at least 20 minutes (max 180), got {0}.")]
    MinutesOutOfRange(u16),
    #[error("Custom sets must be between 1 and 6 (got {0}).")]
    CustomSetsOutOfRange(u8),
    #[error("Failed to access stored state: {0}")]
    Store(#[from] DbError),
}

/// Working sets implied by the time budget.
#[must_use]
pub const fn sets_for_minutes(minutes: u16) -> u8 {
    if minutes <= 30 {
        2
    } else if minutes <= 45 {
        3
    } else {
        4
    }
}

impl SessionRequest {
    /// Checks the input contract and resolves the set count.
    /// # Errors
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<u8, GenerateError> {
        if self.days_per_week < MIN_DAYS || self.days_per_week > MAX_DAYS {
            return Err(GenerateError::DaysOutOfRange(self.days_per_week));
        }
        if self.session_minutes < MIN_MINUTES || self.session_minutes > MAX_MINUTES {
            return Err(GenerateError::MinutesOutOfRange(self.session_minutes));
        }
        match self.sets {
            SetsMode::Auto => Ok(sets_for_minutes(self.session_minutes)),
            SetsMode::Custom(n) if n < MIN_CUSTOM_SETS || n > MAX_CUSTOM_SETS => {
                Err(GenerateError::CustomSetsOutOfRange(n))
            }
            SetsMode::Custom(n) => Ok(n),
        }
    }
}

/// An owned copy of a catalog exercise that substitution may rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedExercise {
    pub name: String,
    pub rep_range: String,
    pub alternatives: Vec<String>,
}

impl From<&Exercise> for PlannedExercise {
    fn from(ex: &Exercise) -> Self {
        Self {
            name: ex.name.to_string(),
            rep_range: ex.rep_range.to_string(),
            alternatives: ex.alternatives.iter().map(ToString::to_string).collect(),
        }
    }
}

// --- Cursors ---

/// Raw rotation cursor: the number of sessions generated since the last reset.
/// # Errors
/// Returns `DbError` on backend failure.
pub fn read_day_index(store: &dyn Store) -> Result<u64, DbError> {
    read_json(store, StoreKey::DayIndex, 0)
}

/// # Errors
/// Returns `DbError` on backend failure.
pub fn reset_rotation(store: &mut dyn Store) -> Result<(), DbError> {
    write_json(store, StoreKey::DayIndex, &0_u64)?;
    tracing::info!("Rotation reset to day 1");
    Ok(())
}

/// Reads the split for the current cursor, then moves the cursor forward.
fn advance_rotation(store: &mut dyn Store, days_per_week: u8) -> Result<Split, DbError> {
    let cursor = read_day_index(store)?;
    let split = catalog::split_for_cursor(cursor, catalog::day_cycle(days_per_week));
    write_json(store, StoreKey::DayIndex, &cursor.wrapping_add(1))?;
    tracing::debug!(cursor, %split, "Advanced rotation cursor");
    Ok(split)
}

/// Per-split variation cursors, keyed by lowercase split name.
/// # Errors
/// Returns `DbError` on backend failure.
pub fn read_split_var_index(store: &dyn Store) -> Result<BTreeMap<String, u64>, DbError> {
    read_json(store, StoreKey::SplitVarIndex, BTreeMap::new())
}

/// Selects the next variation set for `split` and advances that split's cursor.
///
/// Returns the 0-based index that was used along with an owned copy of the set.
/// # Errors
/// Returns `DbError` on backend failure.
pub fn pick_variation(
    store: &mut dyn Store,
    split: Split,
) -> Result<(usize, Vec<PlannedExercise>), DbError> {
    let sets = catalog::variations(split);
    if sets.is_empty() {
        return Ok((0, Vec::new()));
    }

    let mut map = read_split_var_index(store)?;
    let cursor = map.get(&split.to_string()).copied().unwrap_or(0);
    #[allow(clippy::cast_possible_truncation)]
    let index = (cursor % sets.len() as u64) as usize;
    map.insert(split.to_string(), cursor.wrapping_add(1));
    write_json(store, StoreKey::SplitVarIndex, &map)?;

    tracing::debug!(%split, index, "Picked variation");
    Ok((index, sets[index].iter().map(PlannedExercise::from).collect()))
}

// --- Substitution ---

fn recovery_session(injury: InjuryKey) -> Vec<PlannedExercise> {
    let lines = injury.rule().recovery;
    let lines: &[&str] = if lines.is_empty() {
        &GENERIC_RECOVERY
    } else {
        lines
    };
    lines
        .iter()
        .map(|line| PlannedExercise {
            name: (*line).to_string(),
            rep_range: EASY_REP_RANGE.to_string(),
            alternatives: vec![RECOVERY_ADVICE.to_string()],
        })
        .collect()
}

/// Alternatives followed by the replaced name, first occurrence kept.
fn merged_alternatives(ex: &PlannedExercise) -> Vec<String> {
    ex.alternatives
        .iter()
        .chain(std::iter::once(&ex.name))
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Rewrites a variation set for an injury profile and intensity.
///
/// Recovery mode discards the set entirely. Otherwise a direct swap entry
/// always wins; avoid keywords only matter in cautious mode.
#[must_use]
pub fn apply_injury_swaps(
    exercises: Vec<PlannedExercise>,
    injury: InjuryKey,
    intensity: IntensityMode,
) -> (SessionMode, Vec<PlannedExercise>) {
    if intensity == IntensityMode::Recovery {
        return (SessionMode::Recovery, recovery_session(injury));
    }

    let rule = injury.rule();
    let cautious = intensity == IntensityMode::Cautious;

    let out = exercises
        .into_iter()
        .map(|ex| {
            if let Some(replacement) = rule.direct_swap(&ex.name) {
                tracing::debug!(from = %ex.name, to = replacement, "Direct injury swap");
                PlannedExercise {
                    name: replacement.to_string(),
                    rep_range: if cautious {
                        CAUTIOUS_REP_RANGE.to_string()
                    } else {
                        ex.rep_range.clone()
                    },
                    alternatives: merged_alternatives(&ex),
                }
            } else if cautious && rule.should_avoid(&ex.name) {
                let name = ex.alternatives.first().unwrap_or(&ex.name).clone();
                tracing::debug!(from = %ex.name, to = %name, "Cautious swap to first alternative");
                PlannedExercise {
                    name,
                    rep_range: CAUTIOUS_REP_RANGE.to_string(),
                    alternatives: merged_alternatives(&ex),
                }
            } else {
                ex
            }
        })
        .collect();

    (SessionMode::Normal, out)
}

// --- Warm-up ---

const fn split_warmup(split: Split) -> [&'static str; 3] {
    match split {
        Split::Push => [
            "Band pull-aparts: 2×12",
            "Scapular push-ups: 2×8",
            "Light press warm-up: 1×12",
        ],
        Split::Pull => [
            "Band rows: 2×12",
            "Shoulder external rotation (light): 2×10",
            "Scapular retractions: 2×8",
        ],
        Split::Legs => [
            "Glute bridges: 2×10",
            "Bodyweight squat to box: 2×6",
            "Hip hinge drill: 8 reps",
        ],
        Split::Upper => [
            "Band pull-aparts: 2×12",
            "Light push + pull warm-up sets",
            "Thoracic extension (gentle): 2×6",
        ],
        Split::Lower => [
            "Glute bridges: 2×10",
            "Bodyweight squat: 2×6",
            "Calf pumps: 20 reps",
        ],
        Split::Arms => [
            "Light curls: 1×15",
            "Light pushdowns: 1×15",
            "Shoulder circles: 60 sec",
        ],
        Split::Full => [
            "Glute bridges: 2×10",
            "Band pull-aparts: 2×12",
            "Bodyweight squat: 2×6",
        ],
    }
}

/// Generic lines, then split lines, then injury lines, each kept once.
#[must_use]
pub fn warmup_plan(split: Split, injury: InjuryKey) -> Vec<String> {
    GENERIC_WARMUP
        .iter()
        .chain(split_warmup(split).iter())
        .chain(injury.rule().warmup.iter())
        .copied()
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

// --- Generated session ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionExercise {
    pub name: String,
    pub rep_range: String,
    pub alternatives: Vec<String>,
    pub swap: SwapCycle,
}

impl SessionExercise {
    fn new(planned: PlannedExercise) -> Self {
        let swap = SwapCycle::new(&planned.name, &planned.alternatives);
        Self {
            name: planned.name,
            rep_range: planned.rep_range,
            alternatives: planned.alternatives,
            swap,
        }
    }

    /// Name currently on display after any swaps.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.swap.current()
    }

    #[must_use]
    pub fn rest(&self) -> RestAdvice {
        rest::rest_for_rep_range(&self.rep_range)
    }

    #[must_use]
    pub fn is_recovery(&self) -> bool {
        self.rep_range == EASY_REP_RANGE
    }

    /// `"8-12 reps"`, or `"easy effort"` for recovery work.
    #[must_use]
    pub fn rep_text(&self) -> String {
        if self.is_recovery() {
            "easy effort".to_string()
        } else {
            format!("{} reps", self.rep_range)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSession {
    pub id: String,
    pub split: Split,
    pub variation_index: usize,
    pub sets: u8,
    pub injury: InjuryKey,
    pub intensity: IntensityMode,
    pub mode: SessionMode,
    pub warmup: Vec<String>,
    pub exercises: Vec<SessionExercise>,
}

impl GeneratedSession {
    /// `Today's Workout (PUSH • Variation 2)`
    #[must_use]
    pub fn header(&self) -> String {
        let suffix = match self.mode {
            SessionMode::Recovery => format!("Active Recovery ({})", self.injury.label()),
            SessionMode::Normal => format!("Variation {}", self.variation_index + 1),
        };
        format!(
            "Today's Workout ({} • {suffix})",
            self.split.to_string().to_uppercase()
        )
    }
}

/// Validates, advances both cursors, substitutes and stores the session.
///
/// Nothing is read or written when validation fails.
/// # Errors
/// Returns `GenerateError` for invalid input or backend failure.
pub fn generate_session(
    store: &mut dyn Store,
    request: &SessionRequest,
) -> Result<GeneratedSession, GenerateError> {
    let sets = request.validate()?;

    let split = advance_rotation(store, request.days_per_week)?;
    let (variation_index, planned) = pick_variation(store, split)?;
    let (mode, planned) = apply_injury_swaps(planned, request.injury, request.intensity);

    let session = GeneratedSession {
        id: crate::new_id(),
        split,
        variation_index,
        sets,
        injury: request.injury,
        intensity: request.intensity,
        mode,
        warmup: warmup_plan(split, request.injury),
        exercises: planned.into_iter().map(SessionExercise::new).collect(),
    };
    write_json(store, StoreKey::CurrentSession, &session)?;

    tracing::info!(
        id = %session.id,
        %split,
        variation = variation_index + 1,
        %mode,
        "Generated session"
    );
    Ok(session)
}

/// The session most recently generated and not yet completed or cleared.
/// # Errors
/// Returns `DbError` on backend failure.
pub fn current_session(store: &dyn Store) -> Result<Option<GeneratedSession>, DbError> {
    read_json(store, StoreKey::CurrentSession, None)
}

/// # Errors
/// Returns `DbError` on backend failure.
pub fn save_current_session(
    store: &mut dyn Store,
    session: &GeneratedSession,
) -> Result<(), DbError> {
    write_json(store, StoreKey::CurrentSession, session)
}

/// # Errors
/// Returns `DbError` on backend failure.
pub fn clear_current_session(store: &mut dyn Store) -> Result<(), DbError> {
    store.remove(StoreKey::CurrentSession)
}

// --- Rotation hint ---

/// Pure read of what the next generation would pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationHint {
    pub next_split: Split,
    pub variation_count: usize,
    pub cursor: u64,
}

impl RotationHint {
    /// # Errors
    /// Returns `DbError` on backend failure.
    pub fn read(store: &dyn Store, days_per_week: u8) -> Result<Self, DbError> {
        let cursor = read_day_index(store)?;
        let next_split = catalog::split_for_cursor(cursor, catalog::day_cycle(days_per_week));
        Ok(Self {
            next_split,
            variation_count: catalog::variations(next_split).len().max(1),
            cursor,
        })
    }

    #[must_use]
    pub fn day_label(&self) -> String {
        format!("Rotation: Day {}", self.cursor.saturating_add(1))
    }
}

impl fmt::Display for RotationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Next in rotation: {} (has {} workout variations)",
            self.next_split.to_string().to_uppercase(),
            self.variation_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn request(days: u8) -> SessionRequest {
        SessionRequest {
            days_per_week: days,
            session_minutes: 45,
            sets: SetsMode::Auto,
            injury: InjuryKey::None,
            intensity: IntensityMode::Normal,
        }
    }

    fn planned(name: &str, rep_range: &str, alternatives: &[&str]) -> PlannedExercise {
        PlannedExercise {
            name: name.to_string(),
            rep_range: rep_range.to_string(),
            alternatives: alternatives.iter().map(ToString::to_string).collect(),
        }
    }

    #[rstest]
    #[case(20, 2)]
    #[case(30, 2)]
    #[case(31, 3)]
    #[case(45, 3)]
    #[case(46, 4)]
    #[case(180, 4)]
    fn test_sets_for_minutes(#[case] minutes: u16, #[case] sets: u8) {
        assert_eq!(sets_for_minutes(minutes), sets);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(matches!(request(0).validate(), Err(GenerateError::DaysOutOfRange(0))));
        assert!(matches!(request(7).validate(), Err(GenerateError::DaysOutOfRange(7))));

        let mut short = request(3);
        short.session_minutes = 19;
        assert!(matches!(short.validate(), Err(GenerateError::MinutesOutOfRange(19))));
        let mut long = request(3);
        long.session_minutes = 181;
        assert!(matches!(long.validate(), Err(GenerateError::MinutesOutOfRange(181))));
        long.session_minutes = 180;
        assert_eq!(long.validate().ok(), Some(4));

        let mut custom = request(3);
        custom.sets = SetsMode::Custom(7);
        assert!(matches!(custom.validate(), Err(GenerateError::CustomSetsOutOfRange(7))));
        custom.sets = SetsMode::Custom(0);
        assert!(matches!(custom.validate(), Err(GenerateError::CustomSetsOutOfRange(0))));
        custom.sets = SetsMode::Custom(5);
        assert_eq!(custom.validate().ok(), Some(5));
    }

    #[test]
    fn test_invalid_request_touches_nothing() -> Result<(), DbError> {
        let mut store = MemoryStore::new();
        let result = generate_session(&mut store, &request(9));
        assert!(result.is_err());
        for key in [StoreKey::DayIndex, StoreKey::SplitVarIndex, StoreKey::CurrentSession] {
            assert_eq!(store.read_raw(key)?, None);
        }
        Ok(())
    }

    #[test]
    fn test_rotation_sequence() -> Result<(), GenerateError> {
        let mut store = MemoryStore::new();
        let splits = (0..4)
            .map(|_| generate_session(&mut store, &request(6)).map(|s| s.split))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(splits, [Split::Push, Split::Pull, Split::Legs, Split::Push]);
        assert_eq!(read_day_index(&store)?, 4);
        Ok(())
    }

    #[test]
    fn test_variation_cursor_is_per_split() -> Result<(), DbError> {
        let mut store = MemoryStore::new();
        let mut push = Vec::new();
        for _ in 0..2 {
            push.push(pick_variation(&mut store, Split::Push)?.0);
        }
        pick_variation(&mut store, Split::Pull)?;
        for _ in 0..2 {
            push.push(pick_variation(&mut store, Split::Push)?.0);
        }
        assert_eq!(push, [0, 1, 2, 0]);
        assert_eq!(read_split_var_index(&store)?.get("pull"), Some(&1));
        Ok(())
    }

    #[test]
    fn test_pick_variation_returns_owned_copy() -> Result<(), DbError> {
        let mut store = MemoryStore::new();
        let (_, mut exercises) = pick_variation(&mut store, Split::Push)?;
        exercises[0].name = "Changed".to_string();
        assert_eq!(catalog::variations(Split::Push)[0][0].name, "Barbell Bench Press");
        Ok(())
    }

    #[test]
    fn test_direct_swap_keeps_rep_range_in_normal_mode() {
        let input = vec![planned("Barbell Bench Press", "6-10", &["Dumbbell Bench Press", "Push-Ups"])];
        let (mode, out) = apply_injury_swaps(input, InjuryKey::Shoulder, IntensityMode::Normal);
        assert_eq!(mode, SessionMode::Normal);
        assert_eq!(
            out,
            [planned(
                "Machine Chest Press",
                "6-10",
                &["Dumbbell Bench Press", "Push-Ups", "Barbell Bench Press"]
            )]
        );
    }

    #[test]
    fn test_direct_swap_wins_over_avoid_in_cautious_mode() {
        let input = vec![planned("Cable Fly", "12-15", &["Pec Deck"])];
        let (_, out) = apply_injury_swaps(input, InjuryKey::Shoulder, IntensityMode::Cautious);
        assert_eq!(out[0].name, "Pec Deck (light)");
        assert_eq!(out[0].rep_range, "10-12");
    }

    #[test]
    fn test_cautious_avoid_uses_first_alternative() {
        let input = vec![
            planned("Incline Dumbbell Press", "8-12", &["Incline Machine Press", "Incline Machine Press"]),
            planned("Landmine Press", "8-12", &[]),
            planned("Lat Pulldown", "8-12", &["High Row Machine"]),
        ];
        let (mode, out) = apply_injury_swaps(input, InjuryKey::Shoulder, IntensityMode::Cautious);
        assert_eq!(mode, SessionMode::Normal);
        assert_eq!(
            out,
            [
                planned("Incline Machine Press", "10-12", &["Incline Machine Press", "Incline Dumbbell Press"]),
                planned("Landmine Press", "10-12", &["Landmine Press"]),
                planned("Lat Pulldown", "8-12", &["High Row Machine"]),
            ]
        );
    }

    #[test]
    fn test_avoid_keywords_ignored_in_normal_mode() {
        let input = vec![planned("Incline Dumbbell Press", "8-12", &["Incline Machine Press"])];
        let (_, out) = apply_injury_swaps(input.clone(), InjuryKey::Shoulder, IntensityMode::Normal);
        assert_eq!(out, input);
    }

    #[rstest]
    #[case(InjuryKey::None, 3, "Easy walk: 10–20 min")]
    #[case(InjuryKey::Shoulder, 4, "Band external rotation: 3×12")]
    #[case(InjuryKey::Cardio, 2, "Easy bike or walk: 10–15 min")]
    fn test_recovery_replaces_everything(
        #[case] injury: InjuryKey,
        #[case] len: usize,
        #[case] first: &str,
    ) {
        let input = vec![planned("Leg Press", "8-12", &[])];
        let (mode, out) = apply_injury_swaps(input, injury, IntensityMode::Recovery);
        assert_eq!(mode, SessionMode::Recovery);
        assert_eq!(out.len(), len);
        assert_eq!(out[0].name, first);
        assert!(out.iter().all(|ex| ex.rep_range == EASY_REP_RANGE));
        assert_eq!(out[0].alternatives, [RECOVERY_ADVICE]);
    }

    #[test]
    fn test_merged_alternatives_keep_first_occurrence() {
        let ex = planned(
            "Cable Curl",
            "10-12",
            &["Hammer Curl", "Cable Curl", "Hammer Curl", "cable curl"],
        );
        assert_eq!(
            merged_alternatives(&ex),
            ["Hammer Curl", "Cable Curl", "cable curl"]
        );
    }

    #[test]
    fn test_warmup_dedups_across_sources() {
        // "Band pull-aparts: 2×12" is both a push line and a shoulder line.
        let plan = warmup_plan(Split::Push, InjuryKey::Shoulder);
        assert_eq!(plan.len(), 3 + 3 + 3);
        assert_eq!(plan[0], GENERIC_WARMUP[0]);
        assert_eq!(
            plan.iter().filter(|l| *l == "Band pull-aparts: 2×12").count(),
            1
        );
        assert_eq!(plan.last().map(String::as_str), Some("1–2 light ramp-up sets on first press"));
    }

    #[test]
    fn test_header_and_hint() -> Result<(), GenerateError> {
        let mut store = MemoryStore::new();
        let hint = RotationHint::read(&store, 6)?;
        assert_eq!(hint.to_string(), "Next in rotation: PUSH (has 3 workout variations)");
        assert_eq!(hint.day_label(), "Rotation: Day 1");

        let session = generate_session(&mut store, &request(6))?;
        assert_eq!(session.header(), "Today's Workout (PUSH • Variation 1)");
        assert_eq!(RotationHint::read(&store, 6)?.day_label(), "Rotation: Day 2");

        let mut recovery = request(6);
        recovery.injury = InjuryKey::Knee;
        recovery.intensity = IntensityMode::Recovery;
        let session = generate_session(&mut store, &recovery)?;
        assert_eq!(session.header(), "Today's Workout (PULL • Active Recovery (Knee))");
        assert_eq!(session.exercises[0].rep_text(), "easy effort");
        Ok(())
    }

    #[test]
    fn test_generated_session_is_stored() -> Result<(), GenerateError> {
        let mut store = MemoryStore::new();
        let session = generate_session(&mut store, &request(3))?;
        assert_eq!(current_session(&store)?, Some(session.clone()));
        assert_eq!(session.split, Split::Full);
        assert_eq!(session.sets, 3);
        assert_eq!(session.exercises[0].display_name(), session.exercises[0].name);

        clear_current_session(&mut store)?;
        assert_eq!(current_session(&store)?, None);
        Ok(())
    }
}
