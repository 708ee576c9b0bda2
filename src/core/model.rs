// RoboSched - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::core::cleaning::{CleaningOptionType, ExternalServiceCode};
use crate::core::labels::LabeledEnum;
use crate::util::constants;
use crate::util::error::TimeParseError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Day of week
// =============================================================================

/// Day on which a recurring schedule fires.
///
/// Serialised as the lower-case three-letter code used by the schedule form
/// (`"mon"` .. `"sun"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    /// Day index with Sunday = 0 .. Saturday = 6.
    pub fn index_from_sunday(&self) -> u32 {
        self.to_chrono().num_days_from_sunday()
    }

    pub fn to_chrono(self) -> Weekday {
        match self {
            DayOfWeek::Mon => Weekday::Mon,
            DayOfWeek::Tue => Weekday::Tue,
            DayOfWeek::Wed => Weekday::Wed,
            DayOfWeek::Thu => Weekday::Thu,
            DayOfWeek::Fri => Weekday::Fri,
            DayOfWeek::Sat => Weekday::Sat,
            DayOfWeek::Sun => Weekday::Sun,
        }
    }

    pub fn from_chrono(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

impl LabeledEnum for DayOfWeek {
    fn all() -> &'static [Self] {
        &[
            DayOfWeek::Mon,
            DayOfWeek::Tue,
            DayOfWeek::Wed,
            DayOfWeek::Thu,
            DayOfWeek::Fri,
            DayOfWeek::Sat,
            DayOfWeek::Sun,
        ]
    }

    fn value(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "mon",
            DayOfWeek::Tue => "tue",
            DayOfWeek::Wed => "wed",
            DayOfWeek::Thu => "thu",
            DayOfWeek::Fri => "fri",
            DayOfWeek::Sat => "sat",
            DayOfWeek::Sun => "sun",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "monday",
            DayOfWeek::Tue => "tuesday",
            DayOfWeek::Wed => "wednesday",
            DayOfWeek::Thu => "thursday",
            DayOfWeek::Fri => "friday",
            DayOfWeek::Sat => "saturday",
            DayOfWeek::Sun => "sunday",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "月",
            DayOfWeek::Tue => "火",
            DayOfWeek::Wed => "水",
            DayOfWeek::Thu => "木",
            DayOfWeek::Fri => "金",
            DayOfWeek::Sat => "土",
            DayOfWeek::Sun => "日",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// =============================================================================
// Time of day
// =============================================================================

/// A wall-clock time with minute precision, written `HH:MM`.
///
/// Can only be built from a valid hour (0-23) and minute (0-59), so every
/// value reaching the projector is well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }

    /// This time on the given date, seconds zeroed.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    /// Accepts exactly `HH:MM` (two digits each side).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(TimeParseError::Format {
                input: s.to_string(),
            });
        }

        let digit = |i: usize| u32::from(bytes[i] - b'0');
        let hour = digit(0) * 10 + digit(1);
        let minute = digit(3) * 10 + digit(4);

        Self::new(hour, minute).ok_or_else(|| TimeParseError::OutOfRange {
            input: s.to_string(),
            hour,
            minute,
        })
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse a local wall-clock instant written `YYYY-MM-DD HH:MM`.
///
/// Surrounding whitespace is ignored; seconds are zero.
pub fn parse_local_datetime(input: &str) -> Result<NaiveDateTime, TimeParseError> {
    NaiveDateTime::parse_from_str(input.trim(), constants::NOW_INPUT_FORMAT).map_err(|e| {
        TimeParseError::DateTime {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

// =============================================================================
// Recurring schedules
// =============================================================================

/// Anything that fires once a week on a fixed day at a fixed time.
///
/// Implemented by the bare `RecurringSchedule` and by the console's full
/// `ScheduleDefinition`, so both can be projected without copying.
pub trait Recurrence {
    fn day(&self) -> DayOfWeek;
    fn time(&self) -> TimeOfDay;
}

/// A rule firing on one fixed weekday at one fixed time, repeating weekly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurringSchedule {
    pub day: DayOfWeek,
    pub time: TimeOfDay,
}

impl RecurringSchedule {
    pub fn new(day: DayOfWeek, time: TimeOfDay) -> Self {
        Self { day, time }
    }
}

impl Recurrence for RecurringSchedule {
    fn day(&self) -> DayOfWeek {
        self.day
    }

    fn time(&self) -> TimeOfDay {
        self.time
    }
}

/// First day of a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

impl LabeledEnum for WeekStart {
    fn all() -> &'static [Self] {
        &[WeekStart::Sunday, WeekStart::Monday]
    }

    fn value(&self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            WeekStart::Sunday => "sun",
            WeekStart::Monday => "mon",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            WeekStart::Sunday => "日曜始まり",
            WeekStart::Monday => "月曜始まり",
        }
    }
}

// =============================================================================
// Schedule definition (console form data)
// =============================================================================

/// One cleaning option chosen for a schedule (e.g. suction level = strong).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningSetting {
    #[serde(rename = "type")]
    pub option_type: CleaningOptionType,
    pub value: String,
}

/// A cleaning schedule as edited in the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDefinition {
    /// Schedule name shown on the card (e.g. "朝の掃除").
    pub name: String,
    pub day: DayOfWeek,
    pub time: TimeOfDay,
    /// Room the robot cleans.
    pub room: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub cleaning_options: Vec<CleaningSetting>,
    /// Robot vendor; decides which cleaning options apply.
    pub code: ExternalServiceCode,
}

impl Recurrence for ScheduleDefinition {
    fn day(&self) -> DayOfWeek {
        self.day
    }

    fn time(&self) -> TimeOfDay {
        self.time
    }
}

// =============================================================================
// Scheduled run (projection output)
// =============================================================================

/// One concrete materialisation of a recurring schedule.
///
/// Derived on demand from the clock and a schedule list, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRun<'a, S> {
    pub datetime: NaiveDateTime,
    pub source: &'a S,
}

impl<S> ScheduledRun<'_, S> {
    /// Card-style timestamp with the weekday label, e.g. `03/10 (月) 08:00`.
    pub fn display_datetime(&self) -> String {
        let day = DayOfWeek::from_chrono(self.datetime.weekday());
        format!(
            "{} ({}) {}",
            self.datetime.format(constants::RUN_DATE_FORMAT),
            day.label(),
            self.datetime.format(constants::RUN_TIME_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_parse_valid() {
        let t: TimeOfDay = "20:30".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (20, 30));
        assert_eq!(t.to_string(), "20:30");
        assert_eq!("00:00".parse::<TimeOfDay>().unwrap().hour(), 0);
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().minute(), 59);
    }

    #[test]
    fn test_time_parse_rejects_loose_forms() {
        for bad in ["8:00", "08:0", "0800", "08-00", " 08:00", "ab:cd", ""] {
            assert!(
                matches!(bad.parse::<TimeOfDay>(), Err(TimeParseError::Format { .. })),
                "{bad:?} should be a format error"
            );
        }
    }

    #[test]
    fn test_time_parse_out_of_range() {
        assert!(matches!(
            "24:00".parse::<TimeOfDay>(),
            Err(TimeParseError::OutOfRange { hour: 24, .. })
        ));
        assert!(matches!(
            "12:60".parse::<TimeOfDay>(),
            Err(TimeParseError::OutOfRange { minute: 60, .. })
        ));
    }

    #[test]
    fn test_time_applies_to_date_with_zero_seconds() {
        let t = TimeOfDay::new(8, 15).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(t.on(date).to_string(), "2025-03-10 08:15:00");
    }

    #[test]
    fn test_day_round_trips_through_chrono() {
        for day in DayOfWeek::all() {
            assert_eq!(DayOfWeek::from_chrono(day.to_chrono()), *day);
        }
        assert_eq!(DayOfWeek::Sun.index_from_sunday(), 0);
        assert_eq!(DayOfWeek::Sat.index_from_sunday(), 6);
    }

    #[test]
    fn test_day_parse_loose_accepts_labels() {
        assert_eq!(DayOfWeek::parse_loose("Wed"), Some(DayOfWeek::Wed));
        assert_eq!(DayOfWeek::parse_loose("friday"), Some(DayOfWeek::Fri));
        assert_eq!(DayOfWeek::parse_loose("日"), Some(DayOfWeek::Sun));
    }

    #[test]
    fn test_schedule_definition_json_shape() {
        let def = ScheduleDefinition {
            name: "夜の掃除".to_string(),
            day: DayOfWeek::Wed,
            time: "20:30".parse().unwrap(),
            room: "寝室".to_string(),
            memo: String::new(),
            cleaning_options: vec![CleaningSetting {
                option_type: CleaningOptionType::SilentMode,
                value: "on".to_string(),
            }],
            code: ExternalServiceCode::Dyson,
        };
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["day"], "wed");
        assert_eq!(json["time"], "20:30");
        assert_eq!(json["code"], "dyson");
        assert_eq!(json["cleaningOptions"][0]["type"], "silentMode");
    }

    #[test]
    fn test_parse_local_datetime_accepts_minute_form() {
        let dt = parse_local_datetime(" 2025-03-11 12:05 ").unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2025, 3, 11)
                .unwrap()
                .and_hms_opt(12, 5, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_local_datetime_rejects_other_forms() {
        for input in [
            "",
            "2025-03-11",
            "2025-03-11T12:00",
            "2025/03/11 12:00",
            "2025-02-30 12:00",
            "2025-03-11 24:00",
            "12:00",
        ] {
            let err = parse_local_datetime(input).unwrap_err();
            assert!(
                matches!(err, TimeParseError::DateTime { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_run_display_uses_day_label() {
        let def = RecurringSchedule::new(DayOfWeek::Mon, "08:00".parse().unwrap());
        let run = ScheduledRun {
            datetime: parse_local_datetime("2025-03-10 08:00").unwrap(),
            source: &def,
        };
        assert_eq!(run.display_datetime(), "03/10 (月) 08:00");
    }
}
