// RoboSched - app/schedule_store.rs
//
// Loads schedule definitions from the built-in demo set (embedded in the
// binary) or from a user schedule file on disk. Entries are validated one
// by one; invalid entries are reported and skipped (non-fatal).

use crate::core::model::ScheduleDefinition;
use crate::core::validation::{self, RawScheduleForm};
use crate::util::constants;
use crate::util::error::ScheduleError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEMO_SCHEDULES: &str = include_str!("../../schedules/demo.toml");

/// On-disk schedule file: a list of `[[schedule]]` tables.
#[derive(Debug, Default, Deserialize)]
struct ScheduleFile {
    #[serde(default)]
    schedule: Vec<RawScheduleForm>,
}

/// Parse a schedule file's TOML content into raw forms.
pub fn parse_schedules_toml(
    content: &str,
    path: &Path,
) -> Result<Vec<RawScheduleForm>, ScheduleError> {
    let file: ScheduleFile = toml::from_str(content).map_err(|e| ScheduleError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(file.schedule)
}

/// Validate raw forms, keeping the valid ones in file order.
///
/// Entry indices in errors are 1-based, matching how a user counts the
/// tables in the file.
pub fn validate_entries(
    forms: &[RawScheduleForm],
    path: &Path,
) -> (Vec<ScheduleDefinition>, Vec<ScheduleError>) {
    let mut schedules = Vec::with_capacity(forms.len());
    let mut errors = Vec::new();

    for (i, form) in forms.iter().enumerate() {
        match validation::validate_schedule(form) {
            Ok(def) => schedules.push(def),
            Err(field_errors) => {
                tracing::warn!(
                    path = %path.display(),
                    index = i + 1,
                    errors = field_errors.len(),
                    "Skipping invalid schedule entry"
                );
                errors.push(ScheduleError::InvalidEntry {
                    path: path.to_path_buf(),
                    index: i + 1,
                    errors: field_errors,
                });
            }
        }
    }

    (schedules, errors)
}

/// The demo schedules shipped with the binary.
pub fn builtin_schedules() -> Vec<ScheduleDefinition> {
    let path = PathBuf::from("<builtin>/demo.toml");
    let forms = match parse_schedules_toml(DEMO_SCHEDULES, &path) {
        Ok(forms) => forms,
        Err(e) => {
            tracing::error!(error = %e, "Built-in schedules failed to parse");
            return Vec::new();
        }
    };

    let (schedules, errors) = validate_entries(&forms, &path);
    for e in &errors {
        tracing::error!(error = %e, "Built-in schedule is invalid");
    }
    schedules
}

/// Load and validate one schedule file.
///
/// The file is size-checked before reading. A file that cannot be read or
/// parsed yields no schedules and a single error.
pub fn load_schedule_file(path: &Path) -> (Vec<ScheduleDefinition>, Vec<ScheduleError>) {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            return (
                Vec::new(),
                vec![ScheduleError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }],
            )
        }
    };

    if metadata.len() > constants::MAX_SCHEDULE_FILE_SIZE {
        return (
            Vec::new(),
            vec![ScheduleError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                max_size: constants::MAX_SCHEDULE_FILE_SIZE,
            }],
        );
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return (
                Vec::new(),
                vec![ScheduleError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }],
            )
        }
    };

    match parse_schedules_toml(&content, path) {
        Ok(forms) => validate_entries(&forms, path),
        Err(e) => (Vec::new(), vec![e]),
    }
}

/// Pick the schedule file to load, if any.
///
/// Precedence: the command-line path, then the config's `schedule_file`,
/// then `schedules.toml` in the config directory when it exists. `None`
/// means the built-in demo set.
pub fn resolve_schedule_file(
    cli: Option<&Path>,
    config: Option<&Path>,
    config_dir: &Path,
) -> Option<PathBuf> {
    if let Some(path) = cli.or(config) {
        return Some(path.to_path_buf());
    }
    let default = config_dir.join(constants::SCHEDULE_FILE_NAME);
    if default.is_file() {
        tracing::debug!(path = %default.display(), "Using schedule file from config directory");
        Some(default)
    } else {
        None
    }
}

/// Load the schedules to show: the user file when one is given, otherwise
/// the built-in demo set.
///
/// Returns the schedules and any non-fatal errors encountered.
pub fn load_all_schedules(
    user_file: Option<&Path>,
) -> (Vec<ScheduleDefinition>, Vec<ScheduleError>) {
    let (mut schedules, mut errors) = match user_file {
        Some(path) => {
            let (schedules, errors) = load_schedule_file(path);
            tracing::info!(
                path = %path.display(),
                loaded = schedules.len(),
                rejected = errors.len(),
                "Loaded user schedule file"
            );
            (schedules, errors)
        }
        None => {
            let schedules = builtin_schedules();
            tracing::info!(builtin_count = schedules.len(), "Loaded built-in schedules");
            (schedules, Vec::new())
        }
    };

    if schedules.len() > constants::MAX_SCHEDULES {
        tracing::warn!(
            count = schedules.len(),
            max = constants::MAX_SCHEDULES,
            "Too many schedules loaded, truncating"
        );
        errors.push(ScheduleError::TooManySchedules {
            count: schedules.len(),
            max: constants::MAX_SCHEDULES,
        });
        schedules.truncate(constants::MAX_SCHEDULES);
    }

    (schedules, errors)
}
