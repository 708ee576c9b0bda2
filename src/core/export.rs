// RoboSched - core/export.rs
//
// Text, CSV and JSON export of projected runs and queried users.
// Core layer: writes to any Write trait object.

use crate::core::cleaning;
use crate::core::labels::LabeledEnum;
use crate::core::model::{ScheduleDefinition, ScheduledRun};
use crate::core::user::User;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;

/// Serialised shape of one projected run.
#[derive(Debug, Serialize)]
struct RunRecord<'a> {
    datetime: String,
    schedule: &'a ScheduleDefinition,
}

/// Write projected runs as console text, one block per run with its
/// cleaning options and memo indented below.
pub fn export_runs_text<W: Write>(
    runs: &[ScheduledRun<'_, ScheduleDefinition>],
    mut writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let io_err = |e| ExportError::Io {
        target: target.to_string(),
        source: e,
    };

    if runs.is_empty() {
        writeln!(writer, "No scheduled runs.").map_err(io_err)?;
        return Ok(0);
    }

    for run in runs {
        let def = run.source;
        writeln!(
            writer,
            "{}  {}  [{}] {}",
            run.display_datetime(),
            def.name,
            def.room,
            def.code.label()
        )
        .map_err(io_err)?;

        for option in &def.cleaning_options {
            let labels =
                cleaning::display_labels(def.code, option.option_type.value(), &option.value);
            writeln!(writer, "    {}: {}", labels.type_label, labels.value_label)
                .map_err(io_err)?;
        }
        if !def.memo.is_empty() {
            writeln!(writer, "    memo: {}", def.memo).map_err(io_err)?;
        }
    }

    Ok(runs.len())
}

/// Export projected runs to CSV.
///
/// Writes: datetime, day, time, name, room
pub fn export_runs_csv<W: Write>(
    runs: &[ScheduledRun<'_, ScheduleDefinition>],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e| ExportError::Csv {
        target: target.to_string(),
        source: e,
    };

    csv_writer
        .write_record(["datetime", "day", "time", "name", "room"])
        .map_err(csv_err)?;

    for run in runs {
        csv_writer
            .write_record([
                run.datetime.format("%Y-%m-%dT%H:%M:%S").to_string().as_str(),
                run.source.day.value(),
                run.source.time.to_string().as_str(),
                run.source.name.as_str(),
                run.source.room.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;

    Ok(runs.len())
}

/// Export projected runs to JSON (array of `{datetime, schedule}` objects).
pub fn export_runs_json<W: Write>(
    runs: &[ScheduledRun<'_, ScheduleDefinition>],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let records: Vec<RunRecord<'_>> = runs
        .iter()
        .map(|run| RunRecord {
            datetime: run.datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
            schedule: run.source,
        })
        .collect();

    serde_json::to_writer_pretty(writer, &records).map_err(|e| ExportError::Json {
        target: target.to_string(),
        source: e,
    })?;
    Ok(records.len())
}

/// Export users to CSV.
///
/// Writes: id, name, email, role
pub fn export_users_csv<W: Write>(
    users: &[&User],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e| ExportError::Csv {
        target: target.to_string(),
        source: e,
    };

    csv_writer
        .write_record(["id", "name", "email", "role"])
        .map_err(csv_err)?;

    for user in users {
        csv_writer
            .write_record([
                user.id.as_str(),
                user.name.as_str(),
                user.email.as_str(),
                user.role.value(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;

    Ok(users.len())
}

/// Write users as aligned console columns: id, name, email, role label.
pub fn export_users_text<W: Write>(
    users: &[&User],
    mut writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let io_err = |e| ExportError::Io {
        target: target.to_string(),
        source: e,
    };

    if users.is_empty() {
        writeln!(writer, "No matching users.").map_err(io_err)?;
        return Ok(0);
    }

    for u in users {
        writeln!(
            writer,
            "{:<22} {:<22} {:<36} {}",
            u.id,
            u.name,
            u.email,
            u.role.label()
        )
        .map_err(io_err)?;
    }

    Ok(users.len())
}

/// Export users to JSON (array of objects).
pub fn export_users_json<W: Write>(
    users: &[&User],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, users).map_err(|e| ExportError::Json {
        target: target.to_string(),
        source: e,
    })?;
    Ok(users.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cleaning::ExternalServiceCode;
    use crate::core::model::{DayOfWeek, WeekStart};
    use crate::core::schedule::runs_this_week;
    use crate::core::user::UserRole;
    use chrono::NaiveDate;

    fn schedule(name: &str, day: DayOfWeek, time: &str) -> ScheduleDefinition {
        ScheduleDefinition {
            name: name.to_string(),
            day,
            time: time.parse().unwrap(),
            room: "リビング".to_string(),
            memo: String::new(),
            cleaning_options: Vec::new(),
            code: ExternalServiceCode::Panasonic,
        }
    }

    fn users() -> Vec<User> {
        vec![User {
            id: "usr_0001".to_string(),
            name: "Sato Taro".to_string(),
            email: "taro.sato1@example.com".to_string(),
            role: UserRole::Admin,
        }]
    }

    #[test]
    fn test_runs_text_uses_japanese_weekday() {
        let mut def = schedule("朝の掃除", DayOfWeek::Mon, "08:00");
        def.memo = "ラグを片付ける".to_string();
        let schedules = vec![def];
        let date = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        let runs = runs_this_week(&schedules, date, WeekStart::Sunday);
        let mut buf = Vec::new();
        assert_eq!(export_runs_text(&runs, &mut buf, "stdout").unwrap(), 1);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert!(lines[0].starts_with("03/10 (月) 08:00  朝の掃除  [リビング] "), "{output}");
        assert_eq!(lines[1], "    memo: ラグを片付ける");
    }

    #[test]
    fn test_empty_text_exports() {
        let mut buf = Vec::new();
        assert_eq!(export_runs_text(&[], &mut buf, "stdout").unwrap(), 0);
        assert_eq!(export_users_text(&[], &mut buf, "stdout").unwrap(), 0);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "No scheduled runs.\nNo matching users.\n"
        );
    }

    #[test]
    fn test_users_text_shows_role_label() {
        let users = users();
        let refs: Vec<&User> = users.iter().collect();
        let mut buf = Vec::new();
        export_users_text(&refs, &mut buf, "stdout").unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("usr_0001 "));
        assert!(output.trim_end().ends_with("管理者"));
    }

    #[test]
    fn test_runs_csv_export() {
        let schedules = vec![schedule("朝の掃除", DayOfWeek::Mon, "08:00")];
        let date = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        let runs = runs_this_week(&schedules, date, WeekStart::Sunday);
        let mut buf = Vec::new();
        let count = export_runs_csv(&runs, &mut buf, "runs.csv").unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("datetime,day,time,name,room\n"));
        assert!(output.contains("2025-03-10T08:00:00,mon,08:00,朝の掃除,リビング"));
    }

    #[test]
    fn test_runs_json_export() {
        let schedules = vec![schedule("夜の掃除", DayOfWeek::Wed, "20:30")];
        let date = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        let runs = runs_this_week(&schedules, date, WeekStart::Sunday);
        let mut buf = Vec::new();
        export_runs_json(&runs, &mut buf, "runs.json").unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["datetime"], "2025-03-12T20:30:00");
        assert_eq!(value[0]["schedule"]["name"], "夜の掃除");
    }

    #[test]
    fn test_users_csv_export() {
        let users = users();
        let refs: Vec<&User> = users.iter().collect();
        let mut buf = Vec::new();
        let count = export_users_csv(&refs, &mut buf, "users.csv").unwrap();
        assert_eq!(count, 1);
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("id,name,email,role"));
        assert!(output.contains("usr_0001,Sato Taro,taro.sato1@example.com,ADMIN"));
    }

    #[test]
    fn test_users_json_export() {
        let users = users();
        let refs: Vec<&User> = users.iter().collect();
        let mut buf = Vec::new();
        export_users_json(&refs, &mut buf, "users.json").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["role"], "ADMIN");
    }
}
