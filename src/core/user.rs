// RoboSched - core/user.rs
//
// User directory records and the query vocabulary for the user list:
// searchable fields, the role filter, sort keys, and quick-filter presets.

use crate::core::labels::LabeledEnum;
use crate::core::query::{QuerySpec, Queryable, SortDirection, SortValue};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Role
// =============================================================================

/// Console permission level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    /// Fixed sort weight: admins list before members.
    pub fn weight(&self) -> u32 {
        match self {
            UserRole::Admin => 0,
            UserRole::Member => 1,
        }
    }
}

impl LabeledEnum for UserRole {
    fn all() -> &'static [Self] {
        &[UserRole::Admin, UserRole::Member]
    }

    fn value(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Member => "MEMBER",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "管理者",
            UserRole::Member => "一般",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// =============================================================================
// User record
// =============================================================================

/// A console user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Categorical fields of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Role,
}

/// Sort keys offered by the user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserSortKey {
    #[default]
    Name,
    Email,
    Role,
}

impl LabeledEnum for UserSortKey {
    fn all() -> &'static [Self] {
        &[UserSortKey::Name, UserSortKey::Email, UserSortKey::Role]
    }

    fn value(&self) -> &'static str {
        match self {
            UserSortKey::Name => "name",
            UserSortKey::Email => "email",
            UserSortKey::Role => "role",
        }
    }

    fn key(&self) -> &'static str {
        self.value()
    }

    fn label(&self) -> &'static str {
        match self {
            UserSortKey::Name => "名前",
            UserSortKey::Email => "メール",
            UserSortKey::Role => "権限",
        }
    }
}

impl Queryable for User {
    type Field = UserField;
    type SortKey = UserSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn category(&self, field: UserField) -> &str {
        match field {
            UserField::Role => self.role.value(),
        }
    }

    fn sort_value(&self, key: UserSortKey) -> SortValue {
        match key {
            UserSortKey::Name => SortValue::text(&self.name),
            UserSortKey::Email => SortValue::text(&self.email),
            UserSortKey::Role => SortValue::Ordinal(self.role.weight()),
        }
    }
}

/// Query over the user list.
pub type UserQuery = QuerySpec<UserField, UserSortKey>;

/// The list's initial view: no filters, name ascending.
pub fn default_user_query() -> UserQuery {
    UserQuery::new(UserSortKey::default(), SortDirection::Asc)
}

/// Roles currently selected in the role filter, in display order.
pub fn selected_roles(query: &UserQuery) -> Vec<UserRole> {
    match query.allowed(UserField::Role) {
        Some(set) => UserRole::all()
            .iter()
            .copied()
            .filter(|role| set.contains(role.value()))
            .collect(),
        None => Vec::new(),
    }
}

/// Replace the role filter. An empty slice clears it.
pub fn set_roles(query: &mut UserQuery, roles: &[UserRole]) {
    query.set_allowed(UserField::Role, roles.iter().map(|r| r.value()));
}

// =============================================================================
// Quick filters
// =============================================================================

/// One-click role presets shown above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFilter {
    All,
    Admin,
    Member,
}

impl LabeledEnum for QuickFilter {
    fn all() -> &'static [Self] {
        &[QuickFilter::All, QuickFilter::Admin, QuickFilter::Member]
    }

    fn value(&self) -> &'static str {
        match self {
            QuickFilter::All => "all",
            QuickFilter::Admin => "admin",
            QuickFilter::Member => "member",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            QuickFilter::All => "everyone",
            QuickFilter::Admin => "admins",
            QuickFilter::Member => "members",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            QuickFilter::All => "すべて",
            QuickFilter::Admin => UserRole::Admin.label(),
            QuickFilter::Member => UserRole::Member.label(),
        }
    }
}

impl QuickFilter {
    fn role(&self) -> Option<UserRole> {
        match self {
            QuickFilter::All => None,
            QuickFilter::Admin => Some(UserRole::Admin),
            QuickFilter::Member => Some(UserRole::Member),
        }
    }

    /// Set the role filter to this preset, leaving text and sort alone.
    pub fn apply(&self, query: &mut UserQuery) {
        match self.role() {
            None => set_roles(query, &[]),
            Some(role) => set_roles(query, &[role]),
        }
    }

    /// Whether the role filter currently equals this preset.
    pub fn is_active(&self, query: &UserQuery) -> bool {
        let roles = selected_roles(query);
        match self.role() {
            None => roles.is_empty(),
            Some(role) => roles == [role],
        }
    }
}
