// RoboSched - app/state.rs
//
// Console state. Holds the schedule repository, the user list, the
// current user query and the filtered view of that list.
// Owned by whichever front end drives it (the CLI in this crate).

use crate::app::repository::{Record, Repository};
use crate::core::model::{
    DayOfWeek, Recurrence, ScheduleDefinition, ScheduledRun, TimeOfDay, WeekStart,
};
use crate::core::query::{self, SortDirection};
use crate::core::schedule;
use crate::core::user::{self, QuickFilter, User, UserQuery, UserSortKey};
use crate::core::validation::{self, RawScheduleForm};
use crate::util::error::{FieldError, QueryError, RepositoryError};
use chrono::{NaiveDate, NaiveDateTime};

impl<T: Recurrence> Recurrence for Record<T> {
    fn day(&self) -> DayOfWeek {
        self.data.day()
    }

    fn time(&self) -> TimeOfDay {
        self.data.time()
    }
}

/// Unwrap a run projected over repository records to the stored schedule.
fn unwrap_run<'a>(
    run: ScheduledRun<'a, Record<ScheduleDefinition>>,
) -> ScheduledRun<'a, ScheduleDefinition> {
    ScheduledRun {
        datetime: run.datetime,
        source: &run.source.data,
    }
}

/// Top-level console state.
#[derive(Debug)]
pub struct ConsoleState {
    /// Schedules keyed by generated ID, in creation order.
    pub schedules: Repository<ScheduleDefinition>,

    /// Full user directory (unfiltered).
    pub users: Vec<User>,

    /// Current search, role filter and sort of the user list.
    pub user_query: UserQuery,

    /// Indices into `users` matching `user_query`, in display order.
    pub filtered_indices: Vec<usize>,

    /// First day of the week for the weekly view.
    pub week_start: WeekStart,

    next_schedule_seq: u32,
}

impl ConsoleState {
    /// Create state from loaded schedules and users. The user view starts
    /// unfiltered, sorted by name.
    pub fn new(
        schedules: Vec<ScheduleDefinition>,
        users: Vec<User>,
        week_start: WeekStart,
    ) -> Self {
        let mut state = Self {
            schedules: Repository::new(),
            users,
            user_query: user::default_user_query(),
            filtered_indices: Vec::new(),
            week_start,
            next_schedule_seq: 1,
        };
        for def in schedules {
            if let Err(e) = state.insert_schedule(def) {
                tracing::warn!(error = %e, "Schedule not stored");
            }
        }
        state.apply_query();
        state
    }

    // -------------------------------------------------------------------------
    // User list
    // -------------------------------------------------------------------------

    /// Recompute the filtered view from the users and the current query.
    pub fn apply_query(&mut self) {
        self.filtered_indices = query::query_indices(&self.users, &self.user_query);
        tracing::debug!(
            total = self.users.len(),
            visible = self.filtered_indices.len(),
            "User query applied"
        );
    }

    /// Replace the whole query and refresh the view.
    pub fn set_query(&mut self, query: UserQuery) {
        self.user_query = query;
        self.apply_query();
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.user_query.free_text = text.to_string();
        self.apply_query();
    }

    /// Switch the free-text search to a regex over name and email.
    /// On error the previous query is kept.
    pub fn set_search_regex(&mut self, pattern: &str) -> Result<(), QueryError> {
        self.user_query.set_regex(pattern)?;
        self.apply_query();
        Ok(())
    }

    pub fn apply_quick_filter(&mut self, filter: QuickFilter) {
        filter.apply(&mut self.user_query);
        self.apply_query();
    }

    /// Column-header sort: the active key flips direction, a new key
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: UserSortKey) {
        if self.user_query.sort_key == key {
            self.user_query.sort_direction = self.user_query.sort_direction.toggled();
        } else {
            self.user_query.sort_key = key;
            self.user_query.sort_direction = SortDirection::Asc;
        }
        self.apply_query();
    }

    /// Users in the current view, in display order.
    pub fn visible_users(&self) -> Vec<&User> {
        self.filtered_indices
            .iter()
            .filter_map(|&i| self.users.get(i))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Schedules
    // -------------------------------------------------------------------------

    /// Runs in the week containing `reference`, earliest first.
    pub fn this_week(&self, reference: NaiveDate) -> Vec<ScheduledRun<'_, ScheduleDefinition>> {
        schedule::runs_this_week(self.schedules.records(), reference, self.week_start)
            .into_iter()
            .map(unwrap_run)
            .collect()
    }

    /// The next run strictly after `now`.
    pub fn upcoming(&self, now: NaiveDateTime) -> Option<ScheduledRun<'_, ScheduleDefinition>> {
        schedule::next_run(self.schedules.records(), now).map(unwrap_run)
    }

    /// The most recent run strictly before `now`.
    pub fn latest(&self, now: NaiveDateTime) -> Option<ScheduledRun<'_, ScheduleDefinition>> {
        schedule::previous_run(self.schedules.records(), now).map(unwrap_run)
    }

    /// Validate a form and store it. Returns the new schedule's ID.
    pub fn add_schedule(&mut self, form: &RawScheduleForm) -> Result<String, Vec<FieldError>> {
        let def = validation::validate_schedule(form)?;
        self.insert_schedule(def)
            .map_err(|e| vec![FieldError::new("id", e.to_string())])
    }

    pub fn remove_schedule(&mut self, id: &str) -> Result<ScheduleDefinition, RepositoryError> {
        let removed = self.schedules.remove(id)?;
        tracing::info!(id, name = %removed.name, "Schedule removed");
        Ok(removed)
    }

    fn insert_schedule(&mut self, def: ScheduleDefinition) -> Result<String, RepositoryError> {
        let id = format!("sch_{:03}", self.next_schedule_seq);
        self.next_schedule_seq += 1;
        let name = def.name.clone();
        self.schedules.insert(id.clone(), def)?;
        tracing::debug!(id = %id, name = %name, "Schedule stored");
        Ok(id)
    }
}
