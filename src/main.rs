// RoboSched - main.rs
//
// Console entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (platform default or --config)
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to the `runs` and `users` commands

use robosched::app::mock::{self, MakeUsersOptions};
use robosched::app::schedule_store;
use robosched::app::state::ConsoleState;
use robosched::core::export;
use robosched::core::labels::LabeledEnum;
use robosched::core::model::{self, ScheduleDefinition, ScheduledRun, WeekStart};
use robosched::core::query::SortDirection;
use robosched::core::user::{self, QuickFilter, UserRole, UserSortKey};
use robosched::platform::config::{self, AppConfig, PlatformPaths};
use robosched::util::constants;
use robosched::util::error::{ExportError, Result, RoboSchedError};
use robosched::util::logging;

use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// RoboSched - cleaning-robot schedule console.
///
/// Projects weekly cleaning schedules onto the calendar and lists the
/// console's user directory with search, role filters and sorting.
#[derive(Parser, Debug)]
#[command(name = "robosched", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show scheduled runs (this week by default).
    Runs(RunsArgs),
    /// List mock users with search, role filter and sort.
    Users(UsersArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct RunsArgs {
    /// Every run in the current week (default).
    #[arg(long, conflicts_with_all = ["next", "previous"])]
    week: bool,

    /// Only the next run after now.
    #[arg(long, conflicts_with = "previous")]
    next: bool,

    /// Only the most recent run before now.
    #[arg(long)]
    previous: bool,

    /// Schedule TOML file (overrides config and built-in demo schedules).
    #[arg(short = 's', long = "schedules")]
    schedules: Option<PathBuf>,

    /// First day of the week: sunday or monday.
    #[arg(long = "week-start")]
    week_start: Option<String>,

    /// Treat this local time as now ("YYYY-MM-DD HH:MM").
    #[arg(long)]
    now: Option<String>,

    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write to a file instead of stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct UsersArgs {
    /// Number of users to generate.
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Generator seed (same seed, same users).
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that a generated user is an admin (0.0-1.0).
    #[arg(long = "admin-ratio")]
    admin_ratio: Option<f64>,

    /// Case-insensitive search over name and email.
    #[arg(short = 'q', long = "query")]
    query: Option<String>,

    /// Regex search over name and email.
    #[arg(long)]
    regex: Option<String>,

    /// Quick filter applied before --role: all, admin or member.
    #[arg(long)]
    quick: Option<String>,

    /// Keep only these roles (repeatable): admin, member.
    #[arg(short = 'r', long = "role")]
    roles: Vec<String>,

    /// Sort key: name, email or role.
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending.
    #[arg(long)]
    desc: bool,

    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write to a file instead of stdout.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so that its level can apply.
    let platform_paths = PlatformPaths::resolve();
    let (app_config, config_warnings) = match cli.config.as_deref() {
        Some(path) => match config::load_config_file(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => config::load_config(&platform_paths.config_dir),
    };

    logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "RoboSched starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let result = match &cli.command {
        Command::Runs(args) => run_runs(args, &app_config, &platform_paths),
        Command::Users(args) => run_users(args, &app_config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

// =============================================================================
// runs
// =============================================================================

fn run_runs(args: &RunsArgs, app_config: &AppConfig, paths: &PlatformPaths) -> Result<()> {
    let week_start = match args.week_start.as_deref() {
        Some(raw) => parse_labeled::<WeekStart>("week-start", raw)?,
        None => app_config.week_start,
    };

    let now = match args.now.as_deref() {
        Some(raw) => model::parse_local_datetime(raw)?,
        None => Local::now().naive_local(),
    };

    let schedule_file = schedule_store::resolve_schedule_file(
        args.schedules.as_deref(),
        app_config.schedule_file.as_deref(),
        &paths.config_dir,
    );

    let (schedules, errors) = schedule_store::load_all_schedules(schedule_file.as_deref());
    if schedules.is_empty() {
        if let Some(first) = errors.into_iter().next() {
            return Err(first.into());
        }
    } else {
        for err in &errors {
            tracing::warn!(error = %err, "Schedule loading warning");
            eprintln!("Warning: {err}");
        }
    }

    let state = ConsoleState::new(schedules, Vec::new(), week_start);
    let runs: Vec<ScheduledRun<'_, ScheduleDefinition>> = if args.next {
        state.upcoming(now).into_iter().collect()
    } else if args.previous {
        state.latest(now).into_iter().collect()
    } else {
        state.this_week(now.date())
    };

    tracing::info!(now = %now, runs = runs.len(), "Runs projected");

    let (mut writer, target) = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Text => export::export_runs_text(&runs, &mut writer, &target)?,
        OutputFormat::Csv => export::export_runs_csv(&runs, &mut writer, &target)?,
        OutputFormat::Json => export::export_runs_json(&runs, &mut writer, &target)?,
    };
    finish_output(writer, &target)
}

// =============================================================================
// users
// =============================================================================

fn run_users(args: &UsersArgs, app_config: &AppConfig) -> Result<()> {
    let count = args.count.unwrap_or(app_config.user_count);
    if count > constants::ABSOLUTE_MAX_MOCK_USERS {
        return Err(RoboSchedError::InvalidArgument {
            name: "count",
            value: count.to_string(),
            reason: format!("maximum is {}", constants::ABSOLUTE_MAX_MOCK_USERS),
        });
    }

    let admin_ratio = args.admin_ratio.unwrap_or(app_config.admin_ratio);
    if !(0.0..=1.0).contains(&admin_ratio) {
        return Err(RoboSchedError::InvalidArgument {
            name: "admin-ratio",
            value: admin_ratio.to_string(),
            reason: "must be between 0.0 and 1.0".to_string(),
        });
    }

    let options = MakeUsersOptions {
        seed: args.seed.unwrap_or(app_config.seed),
        domain: app_config.email_domain.clone(),
        admin_ratio,
        ..MakeUsersOptions::default()
    };
    let users = mock::make_users(count, &options);

    let mut query = user::default_user_query();
    if let Some(text) = &args.query {
        query.free_text = text.clone();
    }
    if let Some(pattern) = &args.regex {
        query.set_regex(pattern)?;
    }

    if let Some(raw) = args.quick.as_deref() {
        parse_labeled::<QuickFilter>("quick", raw)?.apply(&mut query);
    }
    if !args.roles.is_empty() {
        let roles = args
            .roles
            .iter()
            .map(|raw| parse_labeled::<UserRole>("role", raw))
            .collect::<Result<Vec<_>>>()?;
        user::set_roles(&mut query, &roles);
    }

    if let Some(raw) = args.sort.as_deref() {
        query.sort_key = parse_labeled::<UserSortKey>("sort", raw)?;
    }
    if args.desc {
        query.sort_direction = SortDirection::Desc;
    }

    let mut state = ConsoleState::new(Vec::new(), users, app_config.week_start);
    state.set_query(query);
    let visible = state.visible_users();

    tracing::info!(
        total = state.users.len(),
        visible = visible.len(),
        "Users listed"
    );

    let (mut writer, target) = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Text => export::export_users_text(&visible, &mut writer, &target)?,
        OutputFormat::Csv => export::export_users_csv(&visible, &mut writer, &target)?,
        OutputFormat::Json => export::export_users_json(&visible, &mut writer, &target)?,
    };
    finish_output(writer, &target)
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse a labelled enum argument (value, key name or display label).
fn parse_labeled<E: LabeledEnum>(name: &'static str, raw: &str) -> Result<E> {
    E::parse_loose(raw).ok_or_else(|| RoboSchedError::InvalidArgument {
        name,
        value: raw.to_string(),
        reason: format!(
            "expected one of: {}",
            E::all().iter().map(|e| e.value()).collect::<Vec<_>>().join(", ")
        ),
    })
}

fn open_output(path: Option<&Path>) -> Result<(Box<dyn Write>, String)> {
    match path {
        Some(p) => {
            let target = p.display().to_string();
            let file = File::create(p).map_err(|e| ExportError::Io {
                target: target.clone(),
                source: e,
            })?;
            Ok((Box::new(BufWriter::new(file)), target))
        }
        None => Ok((Box::new(io::stdout().lock()), "stdout".to_string())),
    }
}

fn finish_output(mut writer: Box<dyn Write>, target: &str) -> Result<()> {
    writer.flush().map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;
    Ok(())
}
