//src/ledger.rs
use crate::catalog::Split;
use crate::db::DbError;
use crate::session::GeneratedSession;
use crate::store::{read_json, write_json, Store, StoreKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("No workout to complete. Generate a workout first.")]
    NoSession,
    #[error("Enter weight/reps for at least one exercise before completing.")]
    NoEntries,
    #[error("Workout entry not found: ID {0}")]
    WorkoutNotFound(String),
    #[error("Failed to access stored state: {0}")]
    Store(#[from] DbError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryExercise {
    pub name: String,
    pub rep_range: String,
    pub weight: Option<f64>,
    pub reps: Option<f64>,
    pub sets: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub split: Split,
    pub variation_index: usize,
    pub sets: u8,
    pub exercises: Vec<HistoryExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub weight: f64,
    pub reps: f64,
    pub achieved_at: DateTime<Utc>,
}

impl PersonalRecord {
    /// Heavier wins; at equal weight, more reps wins. Ties are not better.
    #[must_use]
    pub fn is_better_than(&self, current: Option<&Self>) -> bool {
        match current {
            None => true,
            Some(current) => {
                self.weight > current.weight
                    || (self.weight == current.weight && self.reps > current.reps)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrHit {
    pub name: String,
    pub old: Option<PersonalRecord>,
    pub new: PersonalRecord,
}

/// Parses user input. Blank, unparsable, negative and non-finite values are absent.
#[must_use]
pub fn sanitize_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
}

/// User-entered numbers for one exercise of the session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExerciseEntry {
    pub weight: Option<f64>,
    pub reps: Option<f64>,
}

impl ExerciseEntry {
    /// Normalizes the values the same way text input is normalized.
    #[must_use]
    pub fn new(weight: Option<f64>, reps: Option<f64>) -> Self {
        let valid = |n: f64| n.is_finite() && n >= 0.0;
        Self {
            weight: weight.filter(|n| valid(*n)),
            reps: reps.filter(|n| valid(*n)),
        }
    }

    #[must_use]
    pub fn parse(weight: &str, reps: &str) -> Self {
        Self {
            weight: sanitize_number(weight),
            reps: sanitize_number(reps),
        }
    }

    const fn has_any(&self) -> bool {
        self.weight.is_some() || self.reps.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub entry: HistoryEntry,
    pub pr_hits: Vec<PrHit>,
}

/// # Errors
/// Returns `DbError` on backend failure.
pub fn list_history(store: &dyn Store) -> Result<Vec<HistoryEntry>, DbError> {
    read_json(store, StoreKey::History, Vec::new())
}

/// # Errors
/// Returns `DbError` on backend failure.
pub fn read_prs(store: &dyn Store) -> Result<BTreeMap<String, PersonalRecord>, DbError> {
    read_json(store, StoreKey::Prs, BTreeMap::new())
}

/// Records sorted by exercise name, ignoring case.
/// # Errors
/// Returns `DbError` on backend failure.
pub fn list_prs(store: &dyn Store) -> Result<Vec<(String, PersonalRecord)>, DbError> {
    let mut prs: Vec<_> = read_prs(store)?.into_iter().collect();
    prs.sort_by_key(|(name, _)| name.to_lowercase());
    Ok(prs)
}

/// Records a finished session and updates personal records.
///
/// `entries` is matched to `session.exercises` by position; missing positions
/// count as empty. Only an exercise with both weight and reps can set a PR.
/// Nothing is written unless at least one value was entered.
/// # Errors
/// `NoSession` for an empty session, `NoEntries` when nothing was entered.
pub fn complete_workout(
    store: &mut dyn Store,
    session: &GeneratedSession,
    entries: &[ExerciseEntry],
) -> Result<Completion, LedgerError> {
    if session.exercises.is_empty() {
        return Err(LedgerError::NoSession);
    }

    let mut history = list_history(store)?;
    let mut prs = read_prs(store)?;
    let now = Utc::now();

    let mut has_any_entry = false;
    let mut pr_hits = Vec::new();
    let mut exercises = Vec::with_capacity(session.exercises.len());

    for (i, ex) in session.exercises.iter().enumerate() {
        let entry = entries.get(i).copied().unwrap_or_default();
        let name = ex.display_name().to_string();
        has_any_entry |= entry.has_any();

        if let (Some(weight), Some(reps)) = (entry.weight, entry.reps) {
            let candidate = PersonalRecord {
                weight,
                reps,
                achieved_at: now,
            };
            let current = prs.get(&name);
            if candidate.is_better_than(current) {
                pr_hits.push(PrHit {
                    name: name.clone(),
                    old: current.cloned(),
                    new: candidate.clone(),
                });
                prs.insert(name.clone(), candidate);
            }
        }

        exercises.push(HistoryExercise {
            name,
            rep_range: ex.rep_range.clone(),
            weight: entry.weight,
            reps: entry.reps,
            sets: session.sets,
        });
    }

    if !has_any_entry {
        return Err(LedgerError::NoEntries);
    }

    let entry = HistoryEntry {
        id: session.id.clone(),
        created_at: now,
        split: session.split,
        variation_index: session.variation_index,
        sets: session.sets,
        exercises,
    };
    history.insert(0, entry.clone());

    write_json(store, StoreKey::History, &history)?;
    write_json(store, StoreKey::Prs, &prs)?;
    store.remove(StoreKey::CurrentSession)?;

    for hit in &pr_hits {
        tracing::info!(exercise = %hit.name, weight = hit.new.weight, reps = hit.new.reps, "New PR");
    }
    tracing::info!(id = %entry.id, pr_hits = pr_hits.len(), "Workout completed");
    Ok(Completion { entry, pr_hits })
}

/// Removes a history entry. Personal records are left as they are.
/// # Errors
/// `WorkoutNotFound` if no entry has that id.
pub fn delete_workout(store: &mut dyn Store, id: &str) -> Result<(), LedgerError> {
    let mut history = list_history(store)?;
    let before = history.len();
    history.retain(|w| w.id != id);
    if history.len() == before {
        return Err(LedgerError::WorkoutNotFound(id.to_string()));
    }
    write_json(store, StoreKey::History, &history)?;
    tracing::info!(id, "Deleted workout (PRs are not recalculated)");
    Ok(())
}

/// Formats a number without a trailing `.0` for whole values.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

fn format_record(pr: &PersonalRecord, unit: &str) -> String {
    format!("{} {unit} × {}", format_number(pr.weight), format_number(pr.reps))
}

/// Congratulation text for the first `limit` hits, with a tail for the rest.
#[must_use]
pub fn pr_congrats(hits: &[PrHit], limit: usize, unit: &str) -> String {
    let lines: Vec<String> = hits
        .iter()
        .take(limit)
        .map(|hit| {
            let old = hit
                .old
                .as_ref()
                .map_or_else(|| "First record!".to_string(), |pr| format_record(pr, unit));
            format!("• {}: {old} → {}", hit.name, format_record(&hit.new, unit))
        })
        .collect();
    let more = if hits.len() > limit {
        format!("\n(+{} more PRs)", hits.len() - limit)
    } else {
        String::new()
    };
    format!(
        "PR HIT. CONGRATS.\n\n{}{more}\n\nKeep going—small wins compound.",
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injury::InjuryKey;
    use crate::session::{generate_session, IntensityMode, SessionRequest, SetsMode};
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn new_session(store: &mut MemoryStore) -> GeneratedSession {
        let request = SessionRequest {
            days_per_week: 3,
            session_minutes: 60,
            sets: SetsMode::Auto,
            injury: InjuryKey::None,
            intensity: IntensityMode::Normal,
        };
        generate_session(store, &request).expect("valid request")
    }

    fn entry(weight: f64, reps: f64) -> ExerciseEntry {
        ExerciseEntry::new(Some(weight), Some(reps))
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("abc", None)]
    #[case("-5", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    #[case("0", Some(0.0))]
    #[case("102.5", Some(102.5))]
    fn test_sanitize_number(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(sanitize_number(raw), expected);
    }

    #[test]
    fn test_no_entries_writes_nothing() -> Result<(), DbError> {
        let mut store = MemoryStore::new();
        let session = new_session(&mut store);
        let entries = [ExerciseEntry::parse("", "x"), ExerciseEntry::new(Some(-1.0), None)];
        let result = complete_workout(&mut store, &session, &entries);
        assert!(matches!(result, Err(LedgerError::NoEntries)));
        assert_eq!(store.read_raw(StoreKey::History)?, None);
        assert_eq!(store.read_raw(StoreKey::Prs)?, None);
        assert!(store.read_raw(StoreKey::CurrentSession)?.is_some());
        Ok(())
    }

    #[test]
    fn test_partial_entry_recorded_without_pr() -> Result<(), LedgerError> {
        let mut store = MemoryStore::new();
        let session = new_session(&mut store);
        let done = complete_workout(&mut store, &session, &[ExerciseEntry::new(Some(50.0), None)])?;

        assert!(done.pr_hits.is_empty());
        assert_eq!(done.entry.exercises.len(), session.exercises.len());
        assert_eq!(done.entry.exercises[0].weight, Some(50.0));
        assert_eq!(done.entry.exercises[0].reps, None);
        assert_eq!(done.entry.exercises[1].weight, None);
        assert_eq!(done.entry.sets, 4);
        assert!(read_prs(&store)?.is_empty());
        assert_eq!(store.read_raw(StoreKey::CurrentSession)?, None);
        Ok(())
    }

    #[test]
    fn test_pr_ordering() -> Result<(), LedgerError> {
        let mut store = MemoryStore::new();
        let mut session = new_session(&mut store);
        session.exercises.truncate(1);
        let mut hits = Vec::new();
        for (w, r) in [(100.0, 5.0), (100.0, 5.0), (100.0, 6.0), (105.0, 3.0), (104.0, 20.0)] {
            hits.push(complete_workout(&mut store, &session, &[entry(w, r)])?.pr_hits.len());
        }
        assert_eq!(hits, [1, 0, 1, 1, 0]);

        let prs = list_prs(&store)?;
        assert_eq!(prs.len(), 1);
        assert_eq!((prs[0].1.weight, prs[0].1.reps), (105.0, 3.0));
        assert_eq!(list_history(&store)?.len(), 5);
        Ok(())
    }

    #[test]
    fn test_history_is_most_recent_first() -> Result<(), LedgerError> {
        let mut store = MemoryStore::new();
        let first = new_session(&mut store);
        complete_workout(&mut store, &first, &[entry(10.0, 10.0)])?;
        let second = new_session(&mut store);
        complete_workout(&mut store, &second, &[entry(10.0, 10.0)])?;

        let ids: Vec<_> = list_history(&store)?.into_iter().map(|w| w.id).collect();
        assert_eq!(ids, [second.id, first.id]);
        Ok(())
    }

    #[test]
    fn test_swapped_name_is_recorded() -> Result<(), LedgerError> {
        let mut store = MemoryStore::new();
        let mut session = new_session(&mut store);
        session.exercises[0].swap.swap();
        let swapped = session.exercises[0].display_name().to_string();
        let done = complete_workout(&mut store, &session, &[entry(20.0, 8.0)])?;
        assert_eq!(done.entry.exercises[0].name, swapped);
        assert!(read_prs(&store)?.contains_key(&swapped));
        Ok(())
    }

    #[test]
    fn test_delete_keeps_prs() -> Result<(), LedgerError> {
        let mut store = MemoryStore::new();
        let session = new_session(&mut store);
        complete_workout(&mut store, &session, &[entry(60.0, 8.0)])?;
        let prs_before = read_prs(&store)?;

        delete_workout(&mut store, &session.id)?;
        assert!(list_history(&store)?.is_empty());
        assert_eq!(read_prs(&store)?, prs_before);

        assert!(matches!(
            delete_workout(&mut store, &session.id),
            Err(LedgerError::WorkoutNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_pr_congrats_text() {
        let at = Utc::now();
        let pr = |weight, reps| PersonalRecord { weight, reps, achieved_at: at };
        let hits: Vec<PrHit> = (0..6)
            .map(|i| PrHit {
                name: format!("Lift {i}"),
                old: (i > 0).then(|| pr(100.0, 5.0)),
                new: pr(102.5, 5.0),
            })
            .collect();

        let text = pr_congrats(&hits, 4, "lbs");
        assert!(text.starts_with("PR HIT. CONGRATS.\n\n• Lift 0: First record! → 102.5 lbs × 5\n"));
        assert!(text.contains("• Lift 1: 100 lbs × 5 → 102.5 lbs × 5"));
        assert!(!text.contains("Lift 4"));
        assert!(text.contains("\n(+2 more PRs)\n"));

        assert!(!pr_congrats(&hits[..1], 4, "kg").contains("more PRs"));
    }
}
