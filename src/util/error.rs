// RoboSched - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation: every boundary failure names the
// subsystem that produced it and keeps its underlying cause.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all RoboSched operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum RoboSchedError {
    /// A time-of-day or date-time string could not be parsed.
    Time(TimeParseError),

    /// Schedule file loading or validation failed.
    Schedule(ScheduleError),

    /// Query construction failed.
    Query(QueryError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// A command-line argument could not be interpreted.
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for RoboSchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(e) => write!(f, "Time error: {e}"),
            Self::Schedule(e) => write!(f, "Schedule error: {e}"),
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::InvalidArgument {
                name,
                value,
                reason,
            } => write!(f, "Invalid value '{value}' for --{name}: {reason}"),
        }
    }
}

impl std::error::Error for RoboSchedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            Self::Schedule(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidArgument { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Time-of-day errors
// ---------------------------------------------------------------------------

/// Errors produced when parsing an `HH:MM` time of day or a
/// `YYYY-MM-DD HH:MM` local date-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// The string is not two digits, a colon, and two digits.
    Format { input: String },

    /// Hour or minute lies outside its range.
    OutOfRange { input: String, hour: u32, minute: u32 },

    /// The string is not a valid `YYYY-MM-DD HH:MM` date-time.
    DateTime { input: String, reason: String },
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format { input } => {
                write!(f, "'{input}' is not a time of day in HH:MM form")
            }
            Self::OutOfRange {
                input,
                hour,
                minute,
            } => write!(
                f,
                "'{input}' is out of range (hour {hour} must be 0-23, minute {minute} must be 0-59)"
            ),
            Self::DateTime { input, reason } => {
                write!(f, "'{input}' is not a date-time in YYYY-MM-DD HH:MM form: {reason}")
            }
        }
    }
}

impl std::error::Error for TimeParseError {}

impl From<TimeParseError> for RoboSchedError {
    fn from(e: TimeParseError) -> Self {
        Self::Time(e)
    }
}

// ---------------------------------------------------------------------------
// Form field errors
// ---------------------------------------------------------------------------

/// A single rejected form field, with the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name (e.g. "name", "cleaningOptions.cleanMode").
    pub field: String,

    /// Human-readable message for the field.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ---------------------------------------------------------------------------
// Schedule errors
// ---------------------------------------------------------------------------

/// Errors related to schedule file loading and validation.
#[derive(Debug)]
pub enum ScheduleError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Schedule file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A schedule entry failed form validation.
    InvalidEntry {
        path: PathBuf,
        index: usize,
        errors: Vec<FieldError>,
    },

    /// Maximum number of schedules exceeded.
    TooManySchedules { count: usize, max: usize },

    /// I/O error reading a schedule file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Schedule file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::InvalidEntry {
                path,
                index,
                errors,
            } => {
                write!(f, "'{}' schedule #{index}: ", path.display())?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            Self::TooManySchedules { count, max } => {
                write!(f, "Too many schedules loaded ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading schedule file '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ScheduleError> for RoboSchedError {
    fn from(e: ScheduleError) -> Self {
        Self::Schedule(e)
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Errors related to building a list query.
#[derive(Debug)]
pub enum QueryError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid search regex '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<QueryError> for RoboSchedError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error flushing the export.
    Io { target: String, source: io::Error },

    /// CSV serialisation error.
    Csv { target: String, source: csv::Error },

    /// JSON serialisation error.
    Json {
        target: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { target, source } => write!(f, "Export I/O error '{target}': {source}"),
            Self::Csv { target, source } => write!(f, "CSV export error '{target}': {source}"),
            Self::Json { target, source } => {
                write!(f, "JSON export error '{target}': {source}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for RoboSchedError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// Only raised for a config file named explicitly on the command line; the
/// platform default file degrades to defaults with warnings instead.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The named config file does not exist.
    NotFound { path: PathBuf },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::NotFound { path } => {
                write!(f, "Config file '{}' does not exist", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ConfigError> for RoboSchedError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Repository errors
// ---------------------------------------------------------------------------

/// Errors raised by the in-memory repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// An item with this ID is already stored.
    DuplicateId { id: String },

    /// No item with this ID is stored.
    NotFound { id: String },
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "An item with ID '{id}' already exists"),
            Self::NotFound { id } => write!(f, "No item with ID '{id}'"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Convenience type alias for RoboSched results.
pub type Result<T> = std::result::Result<T, RoboSchedError>;
