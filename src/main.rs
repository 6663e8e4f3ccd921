//src/main.rs
mod cli;

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use firstrep_lib::{
    ledger::format_number, AppService, ChatMessage, GeneratedSession,
    HistoryEntry, LedgerError, PersonalRecord, Role, SessionDefaults, SessionExercise, SetsMode,
    Units, DEFAULT_EXPORT_FILE, QUICK_PROMPTS,
};
use std::io::{self, stdout};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli_args = cli::parse_args();
    let export_csv = cli_args.export_csv;

    // Logs go to stderr so tables and CSV on stdout stay clean.
    let default_level = if cli_args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command(); // Get the command structure
        let bin_name = cmd.get_name().to_string(); // Get the binary name

        eprintln!("Generating completion script for {shell}..."); // Print to stderr
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout()); // Print script to stdout
        return Ok(()); // Exit after generating script
    }

    // Initialize the application service (loads config, opens the store)
    let mut service =
        AppService::initialize().context("Failed to initialize application service")?;
    let header_color = firstrep_lib::parse_color(&service.config.theme.header_color)
        .map(Color::from)
        .unwrap_or(Color::Green); // Fallback

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            unreachable!("completion scripts are written before the service starts");
        }
        // --- Session Commands ---
        cli::Commands::Generate {
            days,
            minutes,
            sets,
            injury,
            intensity,
        } => {
            let sets = sets.map_or(SetsMode::Auto, SetsMode::Custom);
            let request =
                service.session_request(days, minutes, sets, injury, intensity.map(Into::into));
            match service.generate(&request) {
                Ok(session) => {
                    print_session(&session, header_color, service.config.units);
                    println!("Workout generated. Rotation + variation advanced.");
                    println!("{}", service.rotation_hint(Some(request.days_per_week))?);
                }
                Err(e) => bail!("Error generating workout: {e}"),
            }
        }
        cli::Commands::Show => match service.current_session()? {
            Some(session) => print_session(&session, header_color, service.config.units),
            None => println!("No workout in progress. Run `generate` first."),
        },
        cli::Commands::Swap { position } => match service.swap_exercise(position) {
            Ok(exercise) if exercise.swap.option_count() < 2 => {
                println!("'{}' has no alternatives to swap to.", exercise.display_name());
            }
            Ok(exercise) => println!(
                "Exercise {position} is now '{}' ({}/{}).",
                exercise.display_name(),
                exercise.swap.index() + 1,
                exercise.swap.option_count()
            ),
            Err(e) => bail!("Error swapping exercise: {e}"),
        },
        cli::Commands::Alternatives { position } => match service.alternatives(position) {
            Ok(alternatives) if alternatives.is_empty() => println!("No alternatives listed."),
            Ok(alternatives) => {
                println!("Alternatives (if equipment is busy):");
                for alt in alternatives {
                    println!("  • {alt}");
                }
            }
            Err(e) => bail!("Error listing alternatives: {e}"),
        },
        cli::Commands::Complete { entries } => match service.complete_workout_at(&entries) {
            Ok(completion) if completion.pr_hits.is_empty() => {
                println!("Completed. History and PRs updated.");
            }
            Ok(completion) => {
                println!("Completed. PRs updated—nice work.\n");
                println!("{}", service.pr_congrats(&completion.pr_hits));
            }
            Err(e) => bail!("Error completing workout: {e}"),
        },
        cli::Commands::ClearWorkout => {
            if service.clear_workout()? {
                println!("Workout cleared (not completed).");
            } else {
                println!("No workout in progress.");
            }
        }

        // --- History / PR Commands ---
        cli::Commands::History { limit } => {
            let history = service.list_history(limit)?;
            if history.is_empty() {
                println!("No workouts completed yet.");
            } else if export_csv {
                print_history_csv(&history, service.config.units)?;
            } else {
                print_history_table(&history, header_color, service.config.units);
            }
        }
        cli::Commands::DeleteWorkout { id } => match service.delete_workout(&id) {
            Ok(()) => println!("Workout deleted. (PRs are not recalculated automatically.)"),
            Err(e) => {
                if let Some(LedgerError::WorkoutNotFound(id)) = e.downcast_ref::<LedgerError>() {
                    println!("No workout with ID '{id}'. Nothing deleted.");
                    return Ok(()); // Exit gracefully
                }
                bail!("Error deleting workout: {e}");
            }
        },
        cli::Commands::Prs => {
            let prs = service.list_prs()?;
            if prs.is_empty() {
                println!("No PRs yet. Complete workouts with weight + reps.");
            } else if export_csv {
                print_prs_csv(&prs, service.config.units)?;
            } else {
                print_prs_table(&prs, header_color, service.config.units);
            }
        }

        // --- Rotation / Data Commands ---
        cli::Commands::Rotation { days } => {
            let hint = service.rotation_hint(days)?;
            println!("{hint}");
            println!("{}", hint.day_label());
        }
        cli::Commands::ResetRotation => {
            service.reset_rotation()?;
            println!("Rotation reset to the start.");
        }
        cli::Commands::ClearAll { yes } => {
            if !yes {
                bail!("This will delete ALL FirstRep history, PRs, rotation, variations, and chat. Re-run with --yes to confirm.");
            }
            service.clear_all()?;
            println!("All data cleared.");
        }
        cli::Commands::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            match service.export_to(&path) {
                Ok(payload) => println!(
                    "Exported {} workouts and {} PRs to {}.",
                    payload.history.len(),
                    payload.prs.len(),
                    path.display()
                ),
                Err(e) => bail!("Error exporting data: {e}"),
            }
        }
        cli::Commands::Import { path } => match service.import_from(&path) {
            Ok(summary) => {
                println!("Import complete.");
                if !summary.imported.is_empty() {
                    println!("Updated: {}", summary.imported.join(", "));
                }
                if !summary.skipped.is_empty() {
                    println!("Ignored (wrong type): {}", summary.skipped.join(", "));
                }
            }
            Err(e) => bail!("{e:#}"),
        },

        // --- Chat Commands ---
        cli::Commands::Chat { text } => match service.chat(&text.join(" "))? {
            Some(reply) => println!("{}", reply.text),
            None => println!("Ask a question first."),
        },
        cli::Commands::ChatLog => {
            let log = service.chat_log()?;
            if log.is_empty() {
                println!("No messages yet.");
            } else {
                print_chat(&log);
            }
        }
        cli::Commands::QuickPrompts => {
            for prompt in QUICK_PROMPTS {
                println!("• {prompt}");
            }
        }

        // --- Config Commands ---
        cli::Commands::SetUnits { units } => {
            let units = Units::from(units);
            service.set_units(units)?;
            println!("Units set to {units:?} ({}).", units.weight_label());
        }
        cli::Commands::SetDefaults {
            days,
            minutes,
            injury,
            intensity,
        } => {
            let current = service.config.defaults.clone();
            let defaults = SessionDefaults {
                days_per_week: days.unwrap_or(current.days_per_week),
                session_minutes: minutes.unwrap_or(current.session_minutes),
                injury: injury.unwrap_or(current.injury),
                intensity: intensity.map_or(current.intensity, Into::into),
            };
            match service.set_defaults(defaults) {
                Ok(()) => {
                    let d = &service.config.defaults;
                    println!(
                        "Defaults: {} days/week, {} min, injury {}, intensity {}.",
                        d.days_per_week, d.session_minutes, d.injury, d.intensity
                    );
                }
                Err(e) => bail!("Error setting defaults: {e}"),
            }
        }
        cli::Commands::ConfigPath => {
            println!("Config file is located at: {:?}", service.get_config_path());
        }
        cli::Commands::DbPath => {
            println!("Database file is located at: {:?}", service.get_db_path());
        }
    }

    Ok(())
}

// --- Display Helpers ---

fn print_session(session: &GeneratedSession, header_color: Color, units: Units) {
    println!("{}", session.header());
    println!(
        "Sets: {} • Injury: {} • Mode: {}\n",
        session.sets,
        session.injury.label(),
        session.intensity
    );

    println!("Warm-up (5–10 minutes):");
    for line in &session.warmup {
        println!("  • {line}");
    }
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new("Prescription").fg(header_color),
            Cell::new("Rest").fg(header_color),
            Cell::new("Tip").fg(header_color),
        ]);

    for (i, exercise) in session.exercises.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            exercise_cell(exercise),
            Cell::new(format!("{} sets × {}", session.sets, exercise.rep_text())),
            Cell::new(firstrep_lib::rest::rest_label(&exercise.rep_range)),
            Cell::new(firstrep_lib::rest::rest_tip(&exercise.rep_range)),
        ]);
    }
    println!("{table}");
    println!(
        "Enter weight ({}) + reps for at least one exercise with `complete -e POS:WEIGHT:REPS`.",
        units.weight_label()
    );
    println!("Use `swap POS` to rotate alternatives if equipment is busy.");
}

fn exercise_cell(exercise: &SessionExercise) -> Cell {
    let cell = Cell::new(exercise.display_name());
    if exercise.swap.index() == 0 {
        cell
    } else {
        cell.add_attribute(Attribute::Italic)
    }
}

fn optional_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_number)
}

fn print_history_table(history: &[HistoryEntry], header_color: Color, units: Units) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(header_color),
            Cell::new("Date (UTC)").fg(header_color),
            Cell::new("Split").fg(header_color),
            Cell::new("Var.").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new(format!("Weight ({})", units.weight_label())).fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Sets").fg(header_color),
            Cell::new("Rest").fg(header_color),
        ]);

    for workout in history {
        for (i, exercise) in workout.exercises.iter().enumerate() {
            // Workout columns only on the first row of each workout
            let (id, date, split, variation) = if i == 0 {
                (
                    workout.id.clone(),
                    workout.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    workout.split.to_string().to_uppercase(),
                    (workout.variation_index + 1).to_string(),
                )
            } else {
                Default::default()
            };
            table.add_row(vec![
                Cell::new(id),
                Cell::new(date),
                Cell::new(split),
                Cell::new(variation),
                Cell::new(&exercise.name),
                Cell::new(optional_number(exercise.weight)),
                Cell::new(optional_number(exercise.reps)),
                Cell::new(exercise.sets),
                Cell::new(firstrep_lib::rest::rest_label(&exercise.rep_range)),
            ]);
        }
    }
    println!("{table}");
}

fn print_prs_table(prs: &[(String, PersonalRecord)], header_color: Color, units: Units) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Exercise").fg(header_color),
            Cell::new(format!("Best ({})", units.weight_label())).fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Achieved").fg(header_color),
        ]);

    for (name, pr) in prs {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format_number(pr.weight)),
            Cell::new(format_number(pr.reps)),
            Cell::new(pr.achieved_at.format("%Y-%m-%d").to_string()),
        ]);
    }
    println!("{table}");
}

fn print_chat(log: &[ChatMessage]) {
    for message in log {
        let marker = match message.role {
            Role::User => ">",
            Role::Bot => "<",
        };
        println!(
            "{marker} {} ({})\n{}\n",
            message.role,
            message.at.format("%Y-%m-%d %H:%M"),
            message.text
        );
    }
}

fn print_history_csv(history: &[HistoryEntry], units: Units) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());

    // Write header
    writer.write_record([
        "ID",
        "Timestamp_UTC",
        "Split",
        "Variation",
        "Exercise",
        "Rep_Range",
        &format!("Weight_{}", units.weight_label()),
        "Reps",
        "Sets",
    ])?;

    for workout in history {
        for exercise in &workout.exercises {
            writer.write_record([
                workout.id.clone(),
                workout.created_at.to_rfc3339(), // Use ISO 8601/RFC3339 for CSV
                workout.split.to_string(),
                (workout.variation_index + 1).to_string(),
                exercise.name.clone(),
                exercise.rep_range.clone(),
                exercise.weight.map_or(String::new(), format_number),
                exercise.reps.map_or(String::new(), format_number),
                exercise.sets.to_string(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn print_prs_csv(prs: &[(String, PersonalRecord)], units: Units) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record([
        "Exercise",
        &format!("Weight_{}", units.weight_label()),
        "Reps",
        "Achieved_At_UTC",
    ])?;
    for (name, pr) in prs {
        writer.write_record([
            name.clone(),
            format_number(pr.weight),
            format_number(pr.reps),
            pr.achieved_at.to_rfc3339(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
