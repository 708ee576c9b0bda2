// RoboSched - core/schedule.rs
//
// Schedule-run projector: maps weekly recurrence rules onto concrete
// calendar instants relative to an injected "now".
// Core layer: pure functions, no clock access, no I/O.
//
// All instants are naive local wall-clock times; the caller decides which
// clock "now" comes from.

use crate::core::model::{Recurrence, ScheduledRun, WeekStart};
use crate::util::constants::DAYS_PER_WEEK;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// First day of the week containing `date`.
///
/// A date that already falls on `week_start` maps to itself.
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let today = date.weekday().num_days_from_sunday();
    let first = week_start.weekday().num_days_from_sunday();
    let offset = (today + 7 - first) % 7;
    date - Duration::days(i64::from(offset))
}

/// Every run of `schedules` in the week containing `reference`.
///
/// Walks the 7 days from the week start and emits one run per
/// (schedule, matching day) pair. Output is sorted ascending by datetime;
/// runs at the same instant keep their input order. Duplicate instants are
/// all retained.
pub fn runs_this_week<S: Recurrence>(
    schedules: &[S],
    reference: NaiveDate,
    week_start: WeekStart,
) -> Vec<ScheduledRun<'_, S>> {
    let start = start_of_week(reference, week_start);
    let mut runs = Vec::new();

    for offset in 0..DAYS_PER_WEEK {
        let date = start + Duration::days(offset);
        let weekday = date.weekday();
        for schedule in schedules {
            if schedule.day().to_chrono() == weekday {
                runs.push(ScheduledRun {
                    datetime: schedule.time().on(date),
                    source: schedule,
                });
            }
        }
    }

    // sort_by_key is stable, so same-instant runs stay in input order.
    runs.sort_by_key(|run| run.datetime);
    runs
}

/// The next occurrence of one schedule, 1 minute to 7 days after `now`.
///
/// Today counts only while the schedule's time is strictly later than now;
/// an exact match is already past and rolls a full week ahead.
fn next_occurrence<S: Recurrence>(schedule: &S, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date();
    let now_day = today.weekday().num_days_from_sunday();
    let target = schedule.day().index_from_sunday();
    let time = schedule.time();

    if target == now_day && time.as_naive_time() > now.time() {
        return time.on(today);
    }

    let mut ahead = (target + 7 - now_day) % 7;
    if ahead == 0 {
        ahead = 7;
    }
    time.on(today + Duration::days(i64::from(ahead)))
}

/// The most recent occurrence of one schedule, up to 7 days before `now`.
fn previous_occurrence<S: Recurrence>(schedule: &S, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date();
    let now_day = today.weekday().num_days_from_sunday();
    let target = schedule.day().index_from_sunday();
    let time = schedule.time();

    if target == now_day && time.as_naive_time() < now.time() {
        return time.on(today);
    }

    let mut behind = (now_day + 7 - target) % 7;
    if behind == 0 {
        behind = 7;
    }
    time.on(today - Duration::days(i64::from(behind)))
}

/// Earliest upcoming run strictly after `now`, or `None` for no schedules.
///
/// When several schedules fire at the same instant the first in input
/// order wins.
pub fn next_run<S: Recurrence>(schedules: &[S], now: NaiveDateTime) -> Option<ScheduledRun<'_, S>> {
    schedules
        .iter()
        .map(|schedule| ScheduledRun {
            datetime: next_occurrence(schedule, now),
            source: schedule,
        })
        .filter(|run| run.datetime > now)
        .reduce(|best, run| if run.datetime < best.datetime { run } else { best })
}

/// Latest past run strictly before `now`, or `None` for no schedules.
///
/// When several schedules fired at the same instant the first in input
/// order wins.
pub fn previous_run<S: Recurrence>(
    schedules: &[S],
    now: NaiveDateTime,
) -> Option<ScheduledRun<'_, S>> {
    schedules
        .iter()
        .map(|schedule| ScheduledRun {
            datetime: previous_occurrence(schedule, now),
            source: schedule,
        })
        .filter(|run| run.datetime < now)
        .reduce(|best, run| if run.datetime > best.datetime { run } else { best })
}
