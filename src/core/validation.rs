// RoboSched - core/validation.rs
//
// Schedule form validation. Turns the raw, all-string form shape (as typed
// in the console or read from a schedule file) into a typed
// `ScheduleDefinition`, reporting every rejected field at once.
// Core layer: accepts already-deserialised data, never touches the filesystem.

use crate::core::cleaning::{self, CleaningOptionType, ExternalServiceCode};
use crate::core::labels::LabeledEnum;
use crate::core::model::{CleaningSetting, DayOfWeek, ScheduleDefinition, TimeOfDay};
use crate::util::error::{FieldError, TimeParseError};
use serde::Deserialize;
use std::collections::HashSet;

/// Raw cleaning option as entered: both sides are free strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCleaningSetting {
    #[serde(rename = "type")]
    pub option_type: String,
    pub value: String,
}

/// Raw schedule form. Every field is a string so that nothing is rejected
/// before validation can report it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawScheduleForm {
    pub name: String,
    pub day: String,
    pub time: String,
    pub room: String,
    pub memo: String,
    pub code: String,
    pub cleaning_options: Vec<RawCleaningSetting>,
}

/// Validate a raw form into a schedule definition.
///
/// Checks:
/// 1. `name` and `room` are non-empty after trimming
/// 2. `day` parses as a day of week (value, key name, or label)
/// 3. `time` is a valid `HH:MM`
/// 4. `code` names a supported vendor
/// 5. each cleaning option type is known, offered by the vendor, and not
///    repeated; each value is one of the vendor's choices for that type
///
/// Returns all field errors, not just the first.
pub fn validate_schedule(form: &RawScheduleForm) -> Result<ScheduleDefinition, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "スケジュール名を入力してください"));
    }

    let room = form.room.trim();
    if room.is_empty() {
        errors.push(FieldError::new("room", "部屋を選択してください"));
    }

    let day = DayOfWeek::parse_loose(&form.day);
    if day.is_none() {
        errors.push(FieldError::new("day", "曜日を選択してください"));
    }

    let time = match form.time.trim().parse::<TimeOfDay>() {
        Ok(t) => Some(t),
        Err(e) => {
            errors.push(FieldError::new("time", time_message(&e)));
            None
        }
    };

    let code = ExternalServiceCode::parse_loose(&form.code);
    if code.is_none() {
        errors.push(FieldError::new(
            "code",
            format!("対応していないサービスです: '{}'", form.code),
        ));
    }

    let cleaning_options = match code {
        Some(code) => validate_options(code, &form.cleaning_options, &mut errors),
        None => Vec::new(),
    };

    match (day, time, code) {
        (Some(day), Some(time), Some(code)) if errors.is_empty() => Ok(ScheduleDefinition {
            name: name.to_string(),
            day,
            time,
            room: room.to_string(),
            memo: form.memo.trim().to_string(),
            cleaning_options,
            code,
        }),
        _ => Err(errors),
    }
}

fn validate_options(
    code: ExternalServiceCode,
    raw: &[RawCleaningSetting],
    errors: &mut Vec<FieldError>,
) -> Vec<CleaningSetting> {
    let supported = cleaning::available_types(code);
    let mut seen: HashSet<CleaningOptionType> = HashSet::new();
    let mut settings = Vec::with_capacity(raw.len());

    for option in raw {
        let field = format!("cleaningOptions.{}", option.option_type.trim());

        let Some(option_type) = CleaningOptionType::parse_loose(&option.option_type) else {
            errors.push(FieldError::new(field, "不明な清掃設定です"));
            continue;
        };

        if !supported.contains(&option_type) {
            errors.push(FieldError::new(
                field,
                format!("{}は{}では設定できません", option_type.label(), code.label()),
            ));
            continue;
        }

        if !seen.insert(option_type) {
            errors.push(FieldError::new(
                field,
                format!("{}が重複しています", option_type.label()),
            ));
            continue;
        }

        let value = option.value.trim();
        let valid = cleaning::choices(code, option_type)
            .iter()
            .any(|choice| choice.value == value);
        if !valid {
            errors.push(FieldError::new(
                field,
                format!("{}に指定できない値です: '{value}'", option_type.label()),
            ));
            continue;
        }

        settings.push(CleaningSetting {
            option_type,
            value: value.to_string(),
        });
    }

    settings
}

/// Form-facing message for a rejected time of day.
fn time_message(err: &TimeParseError) -> String {
    match err {
        TimeParseError::OutOfRange { input, .. } => format!("時刻が範囲外です: '{input}'"),
        TimeParseError::Format { .. } | TimeParseError::DateTime { .. } => {
            "時刻はHH:MM形式で入力してください".to_string()
        }
    }
}
