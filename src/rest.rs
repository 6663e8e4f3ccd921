//src/rest.rs
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Rep range used for active-recovery placeholders. Has no rest prescription.
pub const EASY_REP_RANGE: &str = "easy";

const DEFAULT_REST: &str = "1–2 min";

struct RestRule {
    min: u32,
    max: u32,
    rest: &'static str,
    note: &'static str,
}

// Evaluated in order, first match wins.
const REST_RULES: [RestRule; 4] = [
    RestRule { min: 1, max: 5, rest: "3–5 min", note: "Heavy strength work" },
    RestRule { min: 6, max: 10, rest: "2–3 min", note: "Strength / hypertrophy" },
    RestRule { min: 10, max: 12, rest: "1–2 min", note: "Hypertrophy" },
    RestRule { min: 12, max: 20, rest: "45–90 sec", note: "Higher reps / conditioning" },
];

static REP_RANGE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*-\s*([0-9]+)").ok());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestAdvice {
    pub rest: String,
    pub note: String,
}

impl RestAdvice {
    fn new(rest: &str, note: &str) -> Self {
        Self {
            rest: rest.to_string(),
            note: note.to_string(),
        }
    }

    fn fallback() -> Self {
        Self::new(DEFAULT_REST, "")
    }
}

/// Recommends rest between sets for a rep range such as `"8-12"`.
///
/// The first pass looks for a rule that fully contains the range, the second
/// only requires the low end to fit. Anything unparsable gets the default.
#[must_use]
pub fn rest_for_rep_range(rep_range: &str) -> RestAdvice {
    let Some((lo, hi)) = parse_rep_range(rep_range) else {
        return RestAdvice::fallback();
    };

    REST_RULES
        .iter()
        .find(|r| lo >= r.min && hi <= r.max)
        .or_else(|| REST_RULES.iter().find(|r| lo >= r.min && lo <= r.max))
        .map_or_else(RestAdvice::fallback, |r| RestAdvice::new(r.rest, r.note))
}

fn parse_rep_range(rep_range: &str) -> Option<(u32, u32)> {
    let caps = REP_RANGE_RE.as_ref()?.captures(rep_range)?;
    let lo = caps.get(1)?.as_str().parse().ok()?;
    let hi = caps.get(2)?.as_str().parse().ok()?;
    Some((lo, hi))
}

/// Rest text as shown next to an exercise. Recovery work is done "as needed".
#[must_use]
pub fn rest_label(rep_range: &str) -> String {
    if rep_range == EASY_REP_RANGE {
        "as needed".to_string()
    } else {
        rest_for_rep_range(rep_range).rest
    }
}

/// Coaching tip shown under an exercise.
#[must_use]
pub fn rest_tip(rep_range: &str) -> String {
    let advice = rest_for_rep_range(rep_range);
    if !advice.note.is_empty() {
        advice.note
    } else if rep_range == EASY_REP_RANGE {
        "Keep it pain-free.".to_string()
    } else {
        "Focus on clean reps.".to_string()
    }
}
