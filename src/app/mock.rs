// RoboSched - app/mock.rs
//
// Deterministic mock user directory. The same seed and options always
// produce the same users, so list views and tests are reproducible.

use crate::core::user::{User, UserRole};
use crate::util::constants;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FIRST_NAMES: [&str; 10] = [
    "Taro", "Hanako", "Sora", "Ren", "Aoi", "Yui", "Haruto", "Yuna", "Kaito", "Mio",
];

const LAST_NAMES: [&str; 10] = [
    "Watanabe",
    "Sato",
    "Suzuki",
    "Takahashi",
    "Tanaka",
    "Ito",
    "Yamamoto",
    "Nakamura",
    "Kobayashi",
    "Kato",
];

/// Options for [`make_users`].
#[derive(Debug, Clone, PartialEq)]
pub struct MakeUsersOptions {
    pub seed: u64,
    /// Email domain, without the `@`.
    pub domain: String,
    /// Probability in `0.0..=1.0` that a generated user is an admin.
    pub admin_ratio: f64,
    /// Force the first user to be an admin.
    pub ensure_at_least_one_admin: bool,
    /// Offset added to the sequence number embedded in each email.
    pub start_index: usize,
}

impl Default for MakeUsersOptions {
    fn default() -> Self {
        Self {
            seed: constants::DEFAULT_MOCK_SEED,
            domain: constants::DEFAULT_EMAIL_DOMAIN.to_string(),
            admin_ratio: constants::DEFAULT_ADMIN_RATIO,
            ensure_at_least_one_admin: true,
            start_index: 1,
        }
    }
}

/// Generate `count` users.
///
/// Names are "Last First"; emails are `first.last{n}@domain` in lower
/// case, where `n` is the zero-based position plus `start_index`, so every
/// email is unique within one call.
pub fn make_users(count: usize, options: &MakeUsersOptions) -> Vec<User> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut users = Vec::with_capacity(count);

    for i in 0..count {
        let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];

        let handle = format!("{first}.{last}{}", i + options.start_index).to_lowercase();
        let id = format!("{}{:016x}", constants::USER_ID_PREFIX, rng.random::<u64>());

        let mut role = if rng.random::<f64>() < options.admin_ratio {
            UserRole::Admin
        } else {
            UserRole::Member
        };
        if options.ensure_at_least_one_admin && i == 0 {
            role = UserRole::Admin;
        }

        users.push(User {
            id,
            name: format!("{last} {first}"),
            email: format!("{handle}@{}", options.domain),
            role,
        });
    }

    tracing::debug!(
        count,
        seed = options.seed,
        admins = users.iter().filter(|u| u.role == UserRole::Admin).count(),
        "Generated mock users"
    );

    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_users() {
        let options = MakeUsersOptions::default();
        assert_eq!(make_users(25, &options), make_users(25, &options));
    }

    #[test]
    fn test_different_seed_differs() {
        let a = make_users(25, &MakeUsersOptions::default());
        let b = make_users(
            25,
            &MakeUsersOptions {
                seed: 7,
                ..MakeUsersOptions::default()
            },
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_count_and_zero() {
        assert_eq!(make_users(10, &MakeUsersOptions::default()).len(), 10);
        assert!(make_users(0, &MakeUsersOptions::default()).is_empty());
    }

    #[test]
    fn test_record_shapes() {
        let users = make_users(50, &MakeUsersOptions::default());
        for (i, user) in users.iter().enumerate() {
            let hex = user.id.strip_prefix("usr_").unwrap();
            assert_eq!(hex.len(), 16);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));

            let (last, first) = user.name.split_once(' ').unwrap();
            assert!(LAST_NAMES.contains(&last));
            assert!(FIRST_NAMES.contains(&first));

            let expected = format!("{first}.{last}{}@example.com", i + 1).to_lowercase();
            assert_eq!(user.email, expected);
        }
        let emails: HashSet<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), users.len());
    }

    #[test]
    fn test_first_user_forced_admin() {
        let options = MakeUsersOptions {
            admin_ratio: 0.0,
            ..MakeUsersOptions::default()
        };
        let users = make_users(20, &options);
        assert_eq!(users[0].role, UserRole::Admin);
        assert!(users[1..].iter().all(|u| u.role == UserRole::Member));

        let options = MakeUsersOptions {
            admin_ratio: 0.0,
            ensure_at_least_one_admin: false,
            ..MakeUsersOptions::default()
        };
        assert!(make_users(20, &options)
            .iter()
            .all(|u| u.role == UserRole::Member));
    }

    #[test]
    fn test_full_admin_ratio() {
        let options = MakeUsersOptions {
            admin_ratio: 1.0,
            ..MakeUsersOptions::default()
        };
        assert!(make_users(20, &options)
            .iter()
            .all(|u| u.role == UserRole::Admin));
    }

    #[test]
    fn test_domain_and_start_index() {
        let options = MakeUsersOptions {
            domain: "robots.test".to_string(),
            start_index: 100,
            ..MakeUsersOptions::default()
        };
        let users = make_users(2, &options);
        assert!(users[0].email.ends_with("100@robots.test"));
        assert!(users[1].email.ends_with("101@robots.test"));
    }
}
