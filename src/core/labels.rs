// RoboSched - core/labels.rs
//
// One parser for the console's string-union enums (weekday, user role,
// cleaning option type, vendor code). Every enum exposes a canonical value,
// a key name, and a display label; parsing tries them in a fixed order.
// Core layer: pure logic.

/// An enum with a fixed set of variants, each carrying three spellings.
///
/// - `value`: the canonical wire/storage spelling (e.g. `"ADMIN"`, `"mon"`)
/// - `key`: the identifier-style name (e.g. `"admin"`, `"monday"`)
/// - `label`: the display label shown in the console (e.g. `"管理者"`, `"月"`)
pub trait LabeledEnum: Sized + Copy + 'static {
    /// All variants in display order.
    fn all() -> &'static [Self];

    /// Canonical value.
    fn value(&self) -> &'static str;

    /// Key name.
    fn key(&self) -> &'static str;

    /// Display label.
    fn label(&self) -> &'static str;

    /// Parse loosely from user or file input.
    ///
    /// Precedence, first hit wins:
    /// 1. input is trimmed; an empty result parses to `None`
    /// 2. exact canonical value
    /// 3. canonical value, ignoring ASCII case
    /// 4. key name, ignoring ASCII case
    /// 5. exact display label
    fn parse_loose(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let all = Self::all();
        all.iter()
            .find(|v| v.value() == trimmed)
            .or_else(|| all.iter().find(|v| v.value().eq_ignore_ascii_case(trimmed)))
            .or_else(|| all.iter().find(|v| v.key().eq_ignore_ascii_case(trimmed)))
            .or_else(|| all.iter().find(|v| v.label() == trimmed))
            .copied()
    }
}

/// A `(value, label)` pair for select-style controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionItem {
    pub value: &'static str,
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Key and value differ in case only for one variant so each rule
    // can be exercised in isolation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Quiet,
        Turbo,
    }

    impl LabeledEnum for Mode {
        fn all() -> &'static [Self] {
            &[Mode::Quiet, Mode::Turbo]
        }
        fn value(&self) -> &'static str {
            match self {
                Mode::Quiet => "QUIET",
                Mode::Turbo => "TRB",
            }
        }
        fn key(&self) -> &'static str {
            match self {
                Mode::Quiet => "quiet",
                Mode::Turbo => "turbo",
            }
        }
        fn label(&self) -> &'static str {
            match self {
                Mode::Quiet => "静音",
                Mode::Turbo => "強力",
            }
        }
    }

    #[test]
    fn test_exact_value() {
        assert_eq!(Mode::parse_loose("TRB"), Some(Mode::Turbo));
    }

    #[test]
    fn test_value_ignoring_case() {
        assert_eq!(Mode::parse_loose("trb"), Some(Mode::Turbo));
    }

    #[test]
    fn test_key_name() {
        assert_eq!(Mode::parse_loose("Turbo"), Some(Mode::Turbo));
    }

    #[test]
    fn test_label() {
        assert_eq!(Mode::parse_loose("静音"), Some(Mode::Quiet));
    }

    #[test]
    fn test_trim_and_empty() {
        assert_eq!(Mode::parse_loose("  QUIET \n"), Some(Mode::Quiet));
        assert_eq!(Mode::parse_loose("   "), None);
        assert_eq!(Mode::parse_loose("loud"), None);
    }
}
