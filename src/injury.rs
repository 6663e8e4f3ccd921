//src/injury.rs
use crate::catalog;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

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
pub enum InjuryKey {
    #[default]
    None,
    Shoulder,
    Elbow,
    Wrist,
    Lowback,
    Knee,
    Ankle,
    Hip,
    Neck,
    Cardio,
}

#[derive(Debug)]
pub struct InjuryRule {
    pub label: &'static str,
    /// Substrings of a lowercased exercise name that mark it as risky.
    pub avoid: &'static [&'static str],
    /// Lowercased catalog name -> replacement name.
    pub swaps: &'static [(&'static str, &'static str)],
    pub warmup: &'static [&'static str],
    pub recovery: &'static [&'static str],
}

impl InjuryRule {
    /// Direct replacement for an exercise, matched case-insensitively on the full name.
    #[must_use]
    pub fn direct_swap(&self, exercise_name: &str) -> Option<&'static str> {
        let key = exercise_name.to_lowercase();
        self.swaps
            .iter()
            .find(|(from, _)| *from == key)
            .map(|(_, to)| *to)
    }

    #[must_use]
    pub fn should_avoid(&self, exercise_name: &str) -> bool {
        let name = exercise_name.to_lowercase();
        self.avoid.iter().any(|token| name.contains(token))
    }
}

impl InjuryKey {
    #[must_use]
    pub fn rule(self) -> &'static InjuryRule {
        match self {
            Self::None => &NONE,
            Self::Shoulder => &SHOULDER,
            Self::Elbow => &ELBOW,
            Self::Wrist => &WRIST,
            Self::Lowback => &LOWBACK,
            Self::Knee => &KNEE,
            Self::Ankle => &ANKLE,
            Self::Hip => &HIP,
            Self::Neck => &NECK,
            Self::Cardio => &CARDIO,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.rule().label
    }
}

/// Direct-swap keys that do not name any catalog exercise, as `(injury, key)`.
///
/// An empty result means every substitution can actually fire.
#[must_use]
pub fn validate_injury_table() -> Vec<(InjuryKey, &'static str)> {
    let catalog_names: Vec<String> = catalog::all_exercises()
        .map(|e| e.name.to_lowercase())
        .collect();

    InjuryKey::iter()
        .flat_map(|key| key.rule().swaps.iter().map(move |(from, _)| (key, *from)))
        .filter(|(_, from)| !catalog_names.iter().any(|name| name == from))
        .collect()
}

static NONE: InjuryRule = InjuryRule {
    label: "None",
    avoid: &[],
    swaps: &[],
    warmup: &[],
    recovery: &[],
};

static SHOULDER: InjuryRule = InjuryRule {
    label: "Shoulder",
    avoid: &["bench", "press", "overhead", "fly", "dip"],
    swaps: &[
        ("barbell bench press", "Machine Chest Press"),
        ("dumbbell bench press", "Machine Chest Press"),
        ("seated dumbbell shoulder press", "Landmine Press"),
        ("arnold press", "Landmine Press"),
        ("cable fly", "Pec Deck (light)"),
        ("tricep dips (assisted)", "Cable Tricep Pushdown"),
    ],
    warmup: &[
        "Band external rotations: 2×12",
        "Scapular wall slides: 2×8",
        "Band pull-aparts: 2×12",
        "1–2 light ramp-up sets on first press",
    ],
    recovery: &[
        "Band external rotation: 3×12",
        "Face pulls (light): 3×12",
        "Serratus wall slides: 2×8",
        "Easy incline walk: 10–15 min",
    ],
};

static ELBOW: InjuryRule = InjuryRule {
    label: "Elbow",
    avoid: &["curl", "extension", "skull", "dip"],
    swaps: &[
        ("ez-bar curl", "Cable Curl (light)"),
        ("skull crushers (light)", "Rope Pushdown (light)"),
        ("overhead tricep extension", "Cable Tricep Pushdown (light)"),
    ],
    warmup: &[
        "Wrist flexor/extensor warm-up: 1–2 min each",
        "Very light curls: 1×15",
        "Tricep pushdowns (light): 1×15",
    ],
    recovery: &[
        "Light band curls: 2×20",
        "Light band pushdowns: 2×20",
        "Forearm stretching: 2×30 sec each",
    ],
};

// "push-ups" only ever appears as an alternative, never as a catalog name,
// so that entry cannot fire during generation.
static WRIST: InjuryRule = InjuryRule {
    label: "Wrist",
    avoid: &["push-up", "bench", "curl", "press"],
    swaps: &[
        ("push-ups", "Machine Chest Press"),
        ("dumbbell curl", "Cable Curl (neutral grip if possible)"),
        ("dumbbell bench press", "Machine Chest Press"),
    ],
    warmup: &[
        "Wrist circles: 60 sec",
        "Forearm extensor stretch: 2×20 sec",
        "Neutral-grip warm-up sets where possible",
    ],
    recovery: &[
        "Light grip work (pain-free): 2×20 sec",
        "Forearm mobility: 5 min",
        "Easy bike: 10–15 min",
    ],
};

static LOWBACK: InjuryRule = InjuryRule {
    label: "Lower back",
    avoid: &["deadlift", "rdl", "good morning", "row (unsupported)"],
    swaps: &[
        ("romanian deadlift (db)", "Hamstring Curl"),
        ("one-arm dumbbell row", "Chest-Supported Row"),
    ],
    warmup: &[
        "Cat-cow: 6 reps",
        "Hip hinge drill (bodyweight): 8 reps",
        "Glute bridge: 2×10",
        "Light ramp-up sets on legs",
    ],
    recovery: &[
        "McGill curl-up (gentle): 2×6",
        "Side plank (short holds): 2×20 sec",
        "Bird dog: 2×6/side",
        "Easy walk: 10–20 min",
    ],
};

static KNEE: InjuryRule = InjuryRule {
    label: "Knee",
    avoid: &["lunge", "split squat", "deep squat"],
    swaps: &[
        ("walking lunges", "Leg Press (shorter range)"),
        ("split squat", "Leg Press (shorter range)"),
        ("goblet squat", "Leg Press"),
    ],
    warmup: &[
        "Quad activation (TKE band): 2×12",
        "Glute bridges: 2×10",
        "Bodyweight squat to a box: 2×6 (pain-free)",
    ],
    recovery: &[
        "TKE band: 3×12",
        "Step-ups (very low box): 2×8/side",
        "Bike (easy): 10–15 min",
    ],
};

static ANKLE: InjuryRule = InjuryRule {
    label: "Ankle",
    avoid: &["lunge", "jump", "calf raise (heavy)"],
    swaps: &[
        ("walking lunges", "Leg Press"),
        ("standing calf raise", "Seated Calf Raise (light)"),
    ],
    warmup: &[
        "Ankle circles: 60 sec",
        "Calf stretch: 2×20 sec",
        "Tibialis raises (light): 2×12",
    ],
    recovery: &[
        "Ankle dorsiflexion rocks: 2×10",
        "Seated calf raises (light): 2×15",
        "Easy bike: 10–15 min",
    ],
};

static HIP: InjuryRule = InjuryRule {
    label: "Hip",
    avoid: &["deep squat", "lunge"],
    swaps: &[
        ("walking lunges", "Hamstring Curl"),
        ("split squat", "Leg Press (shorter range)"),
    ],
    warmup: &[
        "Hip flexor stretch: 2×20 sec",
        "Glute bridge: 2×10",
        "Side-lying clamshell: 2×12",
    ],
    recovery: &[
        "Clamshell: 3×12",
        "Glute bridge (easy): 3×10",
        "Easy walk: 10–20 min",
    ],
};

static NECK: InjuryRule = InjuryRule {
    label: "Neck",
    avoid: &["shrug", "heavy overhead"],
    swaps: &[
        ("seated dumbbell shoulder press", "Landmine Press"),
        ("arnold press", "Machine Shoulder Press (light)"),
    ],
    warmup: &[
        "Chin tucks: 2×8",
        "Neck mobility (gentle): 60 sec",
        "Band pull-aparts: 2×12",
    ],
    recovery: &[
        "Chin tucks: 3×8",
        "Thoracic extension (gentle): 2×6",
        "Easy walk: 10–20 min",
    ],
};

static CARDIO: InjuryRule = InjuryRule {
    label: "Low cardio tolerance",
    avoid: &[],
    swaps: &[],
    warmup: &[
        "2–4 min easy bike or incline walk",
        "Nasal-breathing pace: keep it easy",
        "Use longer rest if needed",
    ],
    recovery: &["Easy bike or walk: 10–15 min", "Breathing: 2 min slow exhales"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_direct_swap_is_case_insensitive() {
        let rule = InjuryKey::Shoulder.rule();
        assert_eq!(rule.direct_swap("Barbell Bench Press"), Some("Machine Chest Press"));
        assert_eq!(rule.direct_swap("BARBELL BENCH PRESS"), Some("Machine Chest Press"));
        assert_eq!(rule.direct_swap("Barbell Bench"), None);
    }

    #[test]
    fn test_should_avoid_matches_substrings() {
        let rule = InjuryKey::Shoulder.rule();
        assert!(rule.should_avoid("Incline Dumbbell Press"));
        assert!(rule.should_avoid("Tricep Dips (assisted)"));
        assert!(!rule.should_avoid("Lat Pulldown"));
        assert!(!InjuryKey::None.rule().should_avoid("Barbell Bench Press"));
    }

    #[test]
    fn test_only_known_unmatched_swap_keys() {
        assert_eq!(
            validate_injury_table(),
            vec![(InjuryKey::Wrist, "push-ups")]
        );
    }

    #[test]
    fn test_swap_keys_are_lowercase() {
        for key in InjuryKey::iter() {
            for (from, _) in key.rule().swaps {
                assert_eq!(*from, from.to_lowercase(), "{key}: {from}");
            }
        }
    }

    #[test]
    fn test_parse_and_label() {
        assert_eq!(InjuryKey::from_str("LowBack").ok(), Some(InjuryKey::Lowback));
        assert_eq!(InjuryKey::Lowback.label(), "Lower back");
        assert_eq!(InjuryKey::default(), InjuryKey::None);
        assert_eq!(InjuryKey::None.to_string(), "none");
    }
}
