// RoboSched - tests/e2e_console.rs
//
// End-to-end tests for the console pipelines.
//
// These tests exercise real schedule files and config files on disk,
// real TOML parsing and form validation, the weekly projector and the
// user list query, through to CSV/JSON export. No mocks beyond the
// seeded user generator the console itself uses.

use chrono::{NaiveDate, NaiveDateTime};
use robosched::app::mock::{make_users, MakeUsersOptions};
use robosched::app::schedule_store::{self, load_all_schedules, load_schedule_file};
use robosched::app::state::ConsoleState;
use robosched::core::export;
use robosched::core::model::{DayOfWeek, WeekStart};
use robosched::core::query::SortDirection;
use robosched::core::user::{self, QuickFilter, UserRole, UserSortKey};
use robosched::platform::config;
use robosched::util::error::{ConfigError, ScheduleError};
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn fixture_state(week_start: WeekStart) -> ConsoleState {
    let (schedules, _) = load_schedule_file(&fixture("schedules_sample.toml"));
    ConsoleState::new(schedules, Vec::new(), week_start)
}

// =============================================================================
// Schedule file loading
// =============================================================================

/// The fixture holds three valid entries and one invalid one.
#[test]
fn e2e_fixture_loads_valid_entries_and_reports_invalid() {
    let (schedules, errors) = load_schedule_file(&fixture("schedules_sample.toml"));

    let names: Vec<_> = schedules.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["平日の朝", "週末", "日曜の夜"]);
    assert_eq!(schedules[0].day, DayOfWeek::Mon);
    assert_eq!(schedules[2].day, DayOfWeek::Sun);

    assert_eq!(errors.len(), 1, "errors: {errors:?}");
    match &errors[0] {
        ScheduleError::InvalidEntry { index, errors, .. } => {
            assert_eq!(*index, 4);
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, ["time", "cleaningOptions.cleanMode"]);
        }
        other => panic!("expected InvalidEntry, got {other:?}"),
    }
}

#[test]
fn e2e_oversized_schedule_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.toml");
    fs::write(&path, "#".repeat(300 * 1024)).unwrap();

    let (schedules, errors) = load_all_schedules(Some(&path));
    assert!(schedules.is_empty());
    assert!(matches!(
        errors.as_slice(),
        [ScheduleError::FileTooLarge { .. }]
    ));
}

#[test]
fn e2e_malformed_schedule_file_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[schedule]\nname = \"x\"\n").unwrap();

    let (schedules, errors) = load_schedule_file(&path);
    assert!(schedules.is_empty());
    assert!(matches!(errors.as_slice(), [ScheduleError::TomlParse { .. }]));
}

// =============================================================================
// Projection
// =============================================================================

#[test]
fn e2e_week_view_sunday_start() {
    let state = fixture_state(WeekStart::Sunday);
    let runs = state.this_week(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());

    let got: Vec<_> = runs
        .iter()
        .map(|r| (r.datetime, r.source.name.as_str()))
        .collect();
    assert_eq!(
        got,
        [
            (at(2025, 3, 9, 21, 0), "日曜の夜"),
            (at(2025, 3, 10, 7, 30), "平日の朝"),
            (at(2025, 3, 15, 10, 0), "週末"),
        ]
    );
}

#[test]
fn e2e_week_view_monday_start() {
    let state = fixture_state(WeekStart::Monday);
    let runs = state.this_week(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());

    let dates: Vec<_> = runs.iter().map(|r| r.datetime).collect();
    assert_eq!(
        dates,
        [
            at(2025, 3, 10, 7, 30),
            at(2025, 3, 15, 10, 0),
            at(2025, 3, 16, 21, 0),
        ]
    );
}

#[test]
fn e2e_next_and_previous_runs() {
    let state = fixture_state(WeekStart::Sunday);
    let now = at(2025, 3, 11, 12, 0);

    let next = state.upcoming(now).unwrap();
    assert_eq!(next.datetime, at(2025, 3, 15, 10, 0));
    assert_eq!(next.source.name, "週末");

    let previous = state.latest(now).unwrap();
    assert_eq!(previous.datetime, at(2025, 3, 10, 7, 30));
}

/// A run exactly at `now` counts as already past for both directions.
#[test]
fn e2e_exact_match_is_skipped() {
    let state = fixture_state(WeekStart::Sunday);
    let now = at(2025, 3, 16, 21, 0);

    assert_eq!(state.upcoming(now).unwrap().datetime, at(2025, 3, 17, 7, 30));
    assert_eq!(state.latest(now).unwrap().datetime, at(2025, 3, 15, 10, 0));
}

#[test]
fn e2e_builtin_week_exports_csv() {
    let state = ConsoleState::new(
        schedule_store::builtin_schedules(),
        Vec::new(),
        WeekStart::Sunday,
    );
    let runs = state.this_week(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.csv");
    let file = fs::File::create(&path).unwrap();
    let written = export::export_runs_csv(&runs, file, "runs.csv").unwrap();
    assert_eq!(written, 2);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(
        lines,
        [
            "datetime,day,time,name,room",
            "2025-03-10T08:00:00,mon,08:00,朝の掃除,リビング",
            "2025-03-12T20:30:00,wed,20:30,夜の掃除,寝室",
        ]
    );
}

// =============================================================================
// User list
// =============================================================================

#[test]
fn e2e_user_list_filter_sort_export() {
    let options = MakeUsersOptions {
        admin_ratio: 0.4,
        ..MakeUsersOptions::default()
    };
    let mut state = ConsoleState::new(Vec::new(), make_users(40, &options), WeekStart::Sunday);

    let mut query = user::default_user_query();
    user::set_roles(&mut query, &[UserRole::Member]);
    query.sort_key = UserSortKey::Email;
    query.sort_direction = SortDirection::Desc;
    state.set_query(query);

    let visible = state.visible_users();
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|u| u.role == UserRole::Member));
    for pair in visible.windows(2) {
        assert!(pair[0].email >= pair[1].email);
    }

    let mut buf = Vec::new();
    export::export_users_json(&visible, &mut buf, "users.json").unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value.as_array().unwrap().len(), visible.len());
    assert_eq!(value[0]["role"], "MEMBER");
}

/// Narrowing the query never adds rows; re-applying it changes nothing.
#[test]
fn e2e_query_monotonic_and_idempotent() {
    let mut state = ConsoleState::new(
        Vec::new(),
        make_users(60, &MakeUsersOptions::default()),
        WeekStart::Sunday,
    );

    state.set_search_text("sato");
    let broad: Vec<_> = state.visible_users().iter().map(|u| u.id.clone()).collect();

    state.apply_quick_filter(QuickFilter::Admin);
    let narrow: Vec<_> = state.visible_users().iter().map(|u| u.id.clone()).collect();
    assert!(narrow.iter().all(|id| broad.contains(id)));

    state.apply_query();
    let again: Vec<_> = state.visible_users().iter().map(|u| u.id.clone()).collect();
    assert_eq!(narrow, again);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn e2e_config_file_drives_settings() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"
[schedule]
week_starts_on = "monday"
schedule_file = "schedules.toml"

[users]
count = 5
seed = 99
"#,
    )
    .unwrap();
    fs::copy(
        fixture("schedules_sample.toml"),
        dir.path().join("schedules.toml"),
    )
    .unwrap();

    let (cfg, warnings) = config::load_config(dir.path());
    assert!(warnings.is_empty(), "warnings: {warnings:?}");
    assert_eq!(cfg.week_start, WeekStart::Monday);
    assert_eq!(cfg.user_count, 5);
    assert_eq!(cfg.seed, 99);

    let (schedules, errors) = load_all_schedules(cfg.schedule_file.as_deref());
    assert_eq!(schedules.len(), 3);
    assert_eq!(errors.len(), 1);
}

#[test]
fn e2e_malformed_config_falls_back_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[users\ncount = ").unwrap();

    let (cfg, warnings) = config::load_config(dir.path());
    assert_eq!(cfg, config::AppConfig::default());
    assert_eq!(warnings.len(), 1);

    assert!(matches!(
        config::load_config_file(&path),
        Err(ConfigError::TomlParse { .. })
    ));
}
