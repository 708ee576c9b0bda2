// RoboSched - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "RoboSched";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "RoboSched";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Schedules
// =============================================================================

/// Number of days in one projection window.
pub const DAYS_PER_WEEK: i64 = 7;

/// Maximum size of a schedule TOML file.
pub const MAX_SCHEDULE_FILE_SIZE: u64 = 256 * 1024; // 256 KB

/// Maximum number of schedules accepted from a single file.
pub const MAX_SCHEDULES: usize = 500;

/// Date part of a projected run's display (e.g. `03/09`).
pub const RUN_DATE_FORMAT: &str = "%m/%d";

/// Time part of a projected run's display (e.g. `08:00`).
pub const RUN_TIME_FORMAT: &str = "%H:%M";

/// Format accepted for the `--now` CLI override.
pub const NOW_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

// =============================================================================
// Mock users
// =============================================================================

/// Default seed for the mock user generator (same seed, same users).
pub const DEFAULT_MOCK_SEED: u64 = 123;

/// Default number of mock users listed by the console.
pub const DEFAULT_MOCK_USER_COUNT: usize = 10;

/// Hard upper bound on generated users (prevents configuration mistakes).
pub const ABSOLUTE_MAX_MOCK_USERS: usize = 100_000;

/// Default e-mail domain for generated users.
pub const DEFAULT_EMAIL_DOMAIN: &str = "example.com";

/// Default probability that a generated user is an admin.
pub const DEFAULT_ADMIN_RATIO: f64 = 0.2;

/// Admin ratio used by the user list page.
pub const USER_PAGE_ADMIN_RATIO: f64 = 0.4;

/// Prefix of generated user identifiers.
pub const USER_ID_PREFIX: &str = "usr_";

// =============================================================================
// Labels
// =============================================================================

/// Label shown when a cleaning option type cannot be resolved.
pub const UNKNOWN_LABEL: &str = "不明";

/// Placeholder shown for the value of an unresolvable cleaning option.
pub const UNKNOWN_VALUE_LABEL: &str = "-";

// =============================================================================
// Configuration / logging
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Schedule file looked up next to the configuration file.
pub const SCHEDULE_FILE_NAME: &str = "schedules.toml";

/// Default log level when neither RUST_LOG, --debug nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted log level names for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
