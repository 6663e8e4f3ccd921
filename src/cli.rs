// src/cli.rs
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use firstrep_lib::{ExerciseEntry, InjuryKey, IntensityMode, Units};
use std::path::PathBuf;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan rotating workouts, log sets and track PRs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Print history and PR listings as CSV
    #[arg(long, global = true)]
    pub export_csv: bool,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntensityCli {
    Normal,
    Cautious,
    Recovery,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitsCli {
    Metric,
    Imperial,
}

impl From<IntensityCli> for IntensityMode {
    fn from(value: IntensityCli) -> Self {
        match value {
            IntensityCli::Normal => Self::Normal,
            IntensityCli::Cautious => Self::Cautious,
            IntensityCli::Recovery => Self::Recovery,
        }
    }
}

impl From<UnitsCli> for Units {
    fn from(value: UnitsCli) -> Self {
        match value {
            UnitsCli::Metric => Self::Metric,
            UnitsCli::Imperial => Self::Imperial,
        }
    }
}

/// Parses an injury profile name such as `shoulder` or `lowback`.
pub fn parse_injury(s: &str) -> Result<InjuryKey, String> {
    InjuryKey::from_str(s.trim()).map_err(|_| {
        let valid: Vec<String> = InjuryKey::iter().map(|k| k.to_string()).collect();
        format!("Unknown injury '{s}'. Use one of: {}", valid.join(", "))
    })
}

/// Parses `POS:WEIGHT:REPS`. Either number may be left blank, e.g. `3::12`.
pub fn parse_entry(s: &str) -> Result<(usize, ExerciseEntry), String> {
    let mut parts = s.splitn(3, ':');
    let (Some(pos), Some(weight), Some(reps)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("Invalid entry '{s}'. Use POS:WEIGHT:REPS, e.g. 1:135:8"));
    };
    let pos: usize = pos
        .trim()
        .parse()
        .map_err(|_| format!("Invalid exercise position '{pos}' in '{s}'"))?;
    Ok((pos, ExerciseEntry::parse(weight, reps)))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the next workout in the rotation
    Generate {
        /// Training days per week (1-6); picks the split cycle
        #[arg(short, long)]
        days: Option<u8>,
        /// Time available in minutes (20-180); sets the number of sets
        #[arg(short = 't', long)]
        minutes: Option<u16>,
        /// Use a fixed number of sets (1-6) instead of deriving it from time
        #[arg(short, long)]
        sets: Option<u8>,
        /// Injury profile (none, shoulder, elbow, wrist, lowback, knee, ankle, hip, neck, cardio)
        #[arg(short, long, value_parser = parse_injury)]
        injury: Option<InjuryKey>,
        /// How hard to push around the injury
        #[arg(long, value_enum)]
        intensity: Option<IntensityCli>,
    },
    /// Show the current workout
    Show,
    /// Swap an exercise to its next alternative
    Swap {
        /// Exercise position as shown by `show` (1-based)
        position: usize,
    },
    /// List the alternatives for an exercise
    Alternatives {
        /// Exercise position as shown by `show` (1-based)
        position: usize,
    },
    /// Complete the current workout and update PRs
    Complete {
        /// POS:WEIGHT:REPS for an exercise; repeat for each one (e.g. -e 1:135:8 -e 2::12)
        #[arg(short, long = "entry", value_parser = parse_entry, required = true)]
        entries: Vec<(usize, ExerciseEntry)>,
    },
    /// Discard the current workout without saving it
    ClearWorkout,
    /// List completed workouts, most recent first
    History {
        /// Show only the last N workouts
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete a completed workout (PRs are not recalculated)
    DeleteWorkout {
        /// Workout ID as shown by `history`
        id: String,
    },
    /// List personal records
    Prs,
    /// Show which split comes next
    Rotation {
        /// Training days per week used for the cycle
        #[arg(short, long)]
        days: Option<u8>,
    },
    /// Reset the rotation to day 1
    ResetRotation,
    /// Delete ALL history, PRs, rotation, variations and chat
    ClearAll {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Export all data to a JSON file
    Export {
        /// Output file (default: firstrep-export.json)
        path: Option<PathBuf>,
    },
    /// Import data from an exported JSON file
    Import { path: PathBuf },
    /// Ask the offline coach a question
    Chat {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show the chat history
    ChatLog,
    /// List suggested questions for the coach
    QuickPrompts,
    /// Set default units (Metric/Imperial)
    SetUnits {
        #[arg(value_enum)]
        units: UnitsCli,
    },
    /// Set the defaults used by `generate`
    SetDefaults {
        #[arg(short, long)]
        days: Option<u8>,
        #[arg(short = 't', long)]
        minutes: Option<u16>,
        #[arg(short, long, value_parser = parse_injury)]
        injury: Option<InjuryKey>,
        #[arg(long, value_enum)]
        intensity: Option<IntensityCli>,
    },
    /// Show the path to the config file
    ConfigPath,
    /// Show the path to the database file
    DbPath,
    GenerateCompletion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_entry() {
        let (pos, entry) = parse_entry("2:135:8").unwrap();
        assert_eq!(pos, 2);
        assert_eq!(entry, ExerciseEntry::new(Some(135.0), Some(8.0)));

        let (_, entry) = parse_entry("3::12").unwrap();
        assert_eq!(entry, ExerciseEntry::new(None, Some(12.0)));

        let (_, entry) = parse_entry("1:-5:abc").unwrap();
        assert_eq!(entry, ExerciseEntry::default());

        assert!(parse_entry("1:100").is_err());
        assert!(parse_entry("x:100:5").is_err());
    }

    #[test]
    fn test_parse_injury() {
        assert_eq!(parse_injury("Shoulder"), Ok(InjuryKey::Shoulder));
        let err = parse_injury("toe").unwrap_err();
        assert!(err.contains("lowback"));
    }

    #[test]
    fn test_complete_collects_entries() {
        let cli = Cli::try_parse_from(["firstrep", "complete", "-e", "1:100:5", "--entry", "4::10"]).unwrap();
        match cli.command {
            Commands::Complete { entries } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[1].0, 4);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
