//src/catalog.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A training split. Each split owns a set of pre-authored variations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Split {
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    Arms,
    Full,
}

/// A catalog entry. Immutable for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub name: &'static str,
    pub rep_range: &'static str,
    pub alternatives: &'static [&'static str],
}

pub type VariationSet = [Exercise; 4];

const fn ex(
    name: &'static str,
    rep_range: &'static str,
    alternatives: &'static [&'static str],
) -> Exercise {
    Exercise {
        name,
        rep_range,
        alternatives,
    }
}

/// Splits trained in rotation for a given weekly frequency.
#[must_use]
pub const fn day_cycle(days_per_week: u8) -> &'static [Split] {
    match days_per_week {
        6 => &[Split::Push, Split::Pull, Split::Legs],
        5 => &[Split::Upper, Split::Lower, Split::Arms],
        4 => &[Split::Upper, Split::Lower],
        _ => &[Split::Full],
    }
}

/// Split at `cursor` in the cycle. The cursor is stored raw and reduced here.
#[must_use]
pub fn split_for_cursor(cursor: u64, cycle: &[Split]) -> Split {
    if cycle.is_empty() {
        return Split::Full;
    }
    let len = cycle.len() as u64;
    #[allow(clippy::cast_possible_truncation)]
    cycle[(cursor % len) as usize]
}

#[must_use]
pub const fn variations(split: Split) -> &'static [VariationSet] {
    match split {
        Split::Push => PUSH,
        Split::Pull => PULL,
        Split::Legs => LEGS,
        Split::Upper => UPPER,
        Split::Lower => LOWER,
        Split::Arms => ARMS,
        Split::Full => FULL,
    }
}

/// Every exercise in the catalog, in split/variation order. Names may repeat.
pub fn all_exercises() -> impl Iterator<Item = &'static Exercise> {
    use strum::IntoEnumIterator;
    Split::iter().flat_map(|split| variations(split).iter().flatten())
}

const PUSH: &[VariationSet] = &[
    [
        ex("Barbell Bench Press", "6-10", &["Dumbbell Bench Press", "Machine Chest Press", "Push-Ups"]),
        ex("Seated Dumbbell Shoulder Press", "8-12", &["Machine Shoulder Press", "Standing Dumbbell Press", "Landmine Press"]),
        ex("Incline Dumbbell Press", "8-12", &["Incline Machine Press", "Incline Barbell Press", "Push-Ups (feet elevated)"]),
        ex("Cable Tricep Pushdown", "10-12", &["Rope Pushdown", "Dips (assisted)", "Close-Grip Push-Ups"]),
    ],
    [
        ex("Machine Chest Press", "8-12", &["Barbell Bench Press", "Dumbbell Bench Press", "Push-Ups"]),
        ex("Lateral Raises", "12-15", &["Cable Lateral Raise", "Machine Lateral Raise", "Lean-Away DB Lateral Raise"]),
        ex("Incline Machine Press", "10-12", &["Incline DB Press", "Incline Barbell Press", "Push-Ups (feet elevated)"]),
        ex("Overhead Tricep Extension", "10-12", &["Cable OH Extension", "Skull Crushers", "Close-Grip Bench (light)"]),
    ],
    [
        ex("Dumbbell Bench Press", "8-12", &["Machine Chest Press", "Barbell Bench Press", "Push-Ups"]),
        ex("Arnold Press", "8-12", &["Seated DB Press", "Machine Shoulder Press", "Landmine Press"]),
        ex("Cable Fly", "12-15", &["Pec Deck", "DB Fly (light)", "Push-Up Plus"]),
        ex("Tricep Dips (assisted)", "8-12", &["Bench Dips", "Cable Pushdown", "Close-Grip Push-Ups"]),
    ],
];

const PULL: &[VariationSet] = &[
    [
        ex("Lat Pulldown", "8-12", &["Assisted Pull-Ups", "Band Pull-Downs", "High Row Machine"]),
        ex("Seated Cable Row", "8-12", &["Chest-Supported Row", "Dumbbell Row", "Machine Row"]),
        ex("Face Pull", "12-15", &["Rear Delt Fly", "Band Face Pull", "Reverse Pec Deck"]),
        ex("Dumbbell Curl", "10-12", &["Cable Curl", "EZ-Bar Curl", "Hammer Curl"]),
    ],
    [
        ex("Assisted Pull-Ups", "6-10", &["Lat Pulldown", "Band-Assisted Pull-Ups", "High Row Machine"]),
        ex("Chest-Supported Row", "8-12", &["Seated Row", "Dumbbell Row", "Machine Row"]),
        ex("Reverse Pec Deck", "12-15", &["Rear Delt Fly", "Face Pull", "Band Pull-Aparts"]),
        ex("Hammer Curl", "10-12", &["Incline DB Curl", "Cable Curl", "EZ-Bar Curl"]),
    ],
    [
        ex("High Row Machine", "8-12", &["Lat Pulldown", "Assisted Pull-Ups", "Band Pull-Downs"]),
        ex("One-Arm Dumbbell Row", "8-12", &["Seated Row", "Machine Row", "Chest-Supported Row"]),
        ex("Rear Delt Fly", "12-15", &["Face Pull", "Reverse Pec Deck", "Band Pull-Aparts"]),
        ex("Cable Curl", "10-12", &["DB Curl", "EZ-Bar Curl", "Hammer Curl"]),
    ],
];

const LEGS: &[VariationSet] = &[
    [
        ex("Leg Press", "8-12", &["Goblet Squat", "Hack Squat Machine", "Smith Squat (light)"]),
        ex("Goblet Squat", "8-12", &["Leg Press", "Smith Squat", "Bodyweight Squat (slow)"]),
        ex("Hamstring Curl", "10-12", &["Romanian Deadlift (light)", "Glute Bridge", "Swiss Ball Curl"]),
        ex("Standing Calf Raise", "12-15", &["Seated Calf Raise", "Leg Press Calf Press", "Single-Leg Calf Raise"]),
    ],
    [
        ex("Hack Squat Machine", "6-10", &["Leg Press", "Goblet Squat", "Smith Squat"]),
        ex("Romanian Deadlift (DB)", "8-12", &["Hamstring Curl", "Good Morning (light)", "Hip Hinge with KB"]),
        ex("Walking Lunges", "10-12", &["Split Squat", "Step-Ups", "Leg Press (higher reps)"]),
        ex("Seated Calf Raise", "12-15", &["Standing Calf Raise", "Single-Leg Calf Raise", "Leg Press Calf Press"]),
    ],
    [
        ex("Smith Squat (light)", "8-12", &["Leg Press", "Goblet Squat", "Hack Squat"]),
        ex("Leg Extension", "10-12", &["Split Squat", "Step-Ups", "Goblet Squat (slow)"]),
        ex("Hamstring Curl", "10-12", &["RDL (DB)", "Glute Bridge", "Swiss Ball Curl"]),
        ex("Calf Raises (any)", "12-15", &["Standing Calf Raise", "Seated Calf Raise", "Single-Leg Calf Raise"]),
    ],
];

const UPPER: &[VariationSet] = &[
    [
        ex("Chest Press", "8-12", &["Bench Press", "DB Bench Press", "Push-Ups"]),
        ex("Lat Pulldown", "8-12", &["Assisted Pull-Ups", "High Row Machine", "Band Pull-Downs"]),
        ex("Seated Dumbbell Shoulder Press", "8-12", &["Machine Shoulder Press", "Arnold Press", "Landmine Press"]),
        ex("Seated Cable Row", "8-12", &["Chest-Supported Row", "Machine Row", "DB Row"]),
    ],
    [
        ex("Dumbbell Bench Press", "8-12", &["Chest Press Machine", "Bench Press", "Push-Ups"]),
        ex("High Row Machine", "8-12", &["Lat Pulldown", "Assisted Pull-Ups", "Band Pull-Downs"]),
        ex("Lateral Raises", "12-15", &["Cable Lateral Raise", "Machine Lateral Raise", "Lean-Away DB Raise"]),
        ex("Chest-Supported Row", "8-12", &["Seated Row", "Machine Row", "DB Row"]),
    ],
];

const LOWER: &[VariationSet] = &[
    [
        ex("Leg Press", "8-12", &["Goblet Squat", "Hack Squat", "Smith Squat (light)"]),
        ex("Hamstring Curl", "10-12", &["RDL (DB)", "Glute Bridge", "Swiss Ball Curl"]),
        ex("Split Squat", "8-12", &["Lunges", "Step-Ups", "Leg Press (higher reps)"]),
        ex("Calf Raise", "12-15", &["Seated Calf Raise", "Standing Calf Raise", "Single-Leg Calf Raise"]),
    ],
    [
        ex("Hack Squat Machine", "6-10", &["Leg Press", "Goblet Squat", "Smith Squat"]),
        ex("Romanian Deadlift (DB)", "8-12", &["Hamstring Curl", "Hip Hinge (KB)", "Glute Bridge"]),
        ex("Leg Extension", "10-12", &["Step-Ups", "Split Squat", "Goblet Squat (slow)"]),
        ex("Seated Calf Raise", "12-15", &["Standing Calf Raise", "Single-Leg Calf Raise", "Leg Press Calf Press"]),
    ],
];

const ARMS: &[VariationSet] = &[
    [
        ex("EZ-Bar Curl", "8-12", &["DB Curl", "Cable Curl", "Hammer Curl"]),
        ex("Hammer Curl", "10-12", &["Incline DB Curl", "Cable Curl", "DB Curl"]),
        ex("Cable Tricep Pushdown", "10-12", &["Rope Pushdown", "Dips (assisted)", "Close-Grip Push-Ups"]),
        ex("Overhead Tricep Extension", "10-12", &["Cable OH Extension", "Skull Crushers", "Tricep Pushdown"]),
    ],
    [
        ex("Incline Dumbbell Curl", "10-12", &["DB Curl", "Cable Curl", "EZ-Bar Curl"]),
        ex("Cable Curl", "10-12", &["DB Curl", "EZ-Bar Curl", "Hammer Curl"]),
        ex("Skull Crushers (light)", "8-12", &["Overhead Extension", "Cable Pushdown", "Close-Grip Push-Ups"]),
        ex("Rope Pushdown", "10-12", &["Cable Pushdown", "Dips (assisted)", "Overhead Extension"]),
    ],
];

const FULL: &[VariationSet] = &[
    [
        ex("Chest Press", "8-12", &["DB Bench Press", "Bench Press", "Push-Ups"]),
        ex("Lat Pulldown", "8-12", &["Assisted Pull-Ups", "High Row Machine", "Band Pull-Downs"]),
        ex("Leg Press", "8-12", &["Goblet Squat", "Hack Squat", "Smith Squat (light)"]),
        ex("Plank", "30-60", &["Dead Bug", "Pallof Press", "Side Plank"]),
    ],
    [
        ex("Dumbbell Bench Press", "8-12", &["Chest Press Machine", "Bench Press", "Push-Ups"]),
        ex("Seated Cable Row", "8-12", &["Chest-Supported Row", "Machine Row", "DB Row"]),
        ex("Goblet Squat", "8-12", &["Leg Press", "Smith Squat", "Bodyweight Squat"]),
        ex("Dead Bug", "10-12", &["Plank", "Pallof Press", "Bird Dog"]),
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(6, &[Split::Push, Split::Pull, Split::Legs])]
    #[case(5, &[Split::Upper, Split::Lower, Split::Arms])]
    #[case(4, &[Split::Upper, Split::Lower])]
    #[case(3, &[Split::Full])]
    #[case(1, &[Split::Full])]
    fn test_day_cycle(#[case] days: u8, #[case] expected: &[Split]) {
        assert_eq!(day_cycle(days), expected);
    }

    #[test]
    fn test_split_for_cursor_wraps_raw_cursor() {
        let cycle = day_cycle(6);
        let splits: Vec<Split> = (0..4).map(|c| split_for_cursor(c, cycle)).collect();
        assert_eq!(splits, [Split::Push, Split::Pull, Split::Legs, Split::Push]);
        assert_eq!(split_for_cursor(1_000_001, cycle), Split::Pull);
    }

    #[test]
    fn test_every_split_has_variations() {
        for split in Split::iter() {
            assert!(!variations(split).is_empty(), "{split} has no variations");
        }
    }

    #[test]
    fn test_alternatives_differ_from_name() {
        for exercise in all_exercises() {
            assert!(
                !exercise.alternatives.contains(&exercise.name),
                "{} lists itself as an alternative",
                exercise.name
            );
        }
    }

    #[test]
    fn test_split_names() {
        assert_eq!(Split::Legs.to_string(), "legs");
        assert_eq!(Split::from_str("PUSH").ok(), Some(Split::Push));
        assert!(Split::from_str("cardio").is_err());
    }
}
