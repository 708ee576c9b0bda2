// RoboSched - platform/config.rs
//
// Platform directory resolution and config.toml loading with validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::labels::LabeledEnum;
use crate::core::model::WeekStart;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for RoboSched configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/robosched/ or %APPDATA%\RoboSched\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so that a newer config file still
/// loads with an older binary.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[schedule]` section.
    pub schedule: ScheduleSection,
    /// `[users]` section.
    pub users: UsersSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[schedule]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScheduleSection {
    /// "sunday" or "monday".
    pub week_starts_on: Option<String>,
    /// Schedule TOML file; relative paths resolve against the config file.
    pub schedule_file: Option<String>,
}

/// `[users]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UsersSection {
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub admin_ratio: Option<f64>,
    pub email_domain: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Schedule --
    pub week_start: WeekStart,
    pub schedule_file: Option<PathBuf>,

    // -- Users --
    pub user_count: usize,
    pub seed: u64,
    pub admin_ratio: f64,
    pub email_domain: String,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            schedule_file: None,
            user_count: constants::DEFAULT_MOCK_USER_COUNT,
            seed: constants::DEFAULT_MOCK_SEED,
            admin_ratio: constants::USER_PAGE_ADMIN_RATIO,
            email_domain: constants::DEFAULT_EMAIL_DOMAIN.to_string(),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match load_config_file(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Load and validate an explicitly named config file.
///
/// Unlike [`load_config`], a missing or malformed file is an error.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "Loaded config file");

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(validate(raw, base_dir))
}

/// Validate each field against named constants, accumulating all warnings.
fn validate(raw: RawConfig, base_dir: &Path) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Schedule: week_starts_on --
    if let Some(ref week_start) = raw.schedule.week_starts_on {
        match WeekStart::parse_loose(week_start) {
            Some(ws) => config.week_start = ws,
            None => warnings.push(format!(
                "[schedule] week_starts_on = \"{week_start}\" is not recognised. \
                 Expected \"sunday\" or \"monday\". Using default (sunday).",
            )),
        }
    }

    // -- Schedule: schedule_file --
    if let Some(ref file) = raw.schedule.schedule_file {
        let file = file.trim();
        if file.is_empty() {
            warnings.push("[schedule] schedule_file is empty. Using built-in schedules.".to_string());
        } else {
            config.schedule_file = Some(base_dir.join(file));
        }
    }

    // -- Users: count --
    if let Some(count) = raw.users.count {
        if count <= constants::ABSOLUTE_MAX_MOCK_USERS {
            config.user_count = count;
        } else {
            warnings.push(format!(
                "[users] count = {count} is out of range (0-{}). Using default ({}).",
                constants::ABSOLUTE_MAX_MOCK_USERS,
                constants::DEFAULT_MOCK_USER_COUNT,
            ));
        }
    }

    if let Some(seed) = raw.users.seed {
        config.seed = seed;
    }

    // -- Users: admin_ratio --
    if let Some(ratio) = raw.users.admin_ratio {
        if (0.0..=1.0).contains(&ratio) {
            config.admin_ratio = ratio;
        } else {
            warnings.push(format!(
                "[users] admin_ratio = {ratio} is out of range (0.0-1.0). Using default ({}).",
                constants::USER_PAGE_ADMIN_RATIO,
            ));
        }
    }

    // -- Users: email_domain --
    if let Some(ref domain) = raw.users.email_domain {
        let domain = domain.trim();
        if !domain.is_empty() && !domain.contains('@') && !domain.contains(char::is_whitespace) {
            config.email_domain = domain.to_string();
        } else {
            warnings.push(format!(
                "[users] email_domain = \"{domain}\" is not a valid domain. Using default ({}).",
                constants::DEFAULT_EMAIL_DOMAIN,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}
