// RoboSched - core/cleaning.rs
//
// Cleaning option catalog: which settings each robot vendor supports,
// the choices offered for each, and their display labels.
// Core layer: static data and pure lookups.

use crate::core::labels::{LabeledEnum, OptionItem};
use crate::util::constants::{UNKNOWN_LABEL, UNKNOWN_VALUE_LABEL};
use serde::{Deserialize, Serialize};

// =============================================================================
// Vendor codes
// =============================================================================

/// Robot vendor a schedule is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalServiceCode {
    Panasonic,
    Dyson,
}

impl LabeledEnum for ExternalServiceCode {
    fn all() -> &'static [Self] {
        &[ExternalServiceCode::Panasonic, ExternalServiceCode::Dyson]
    }

    fn value(&self) -> &'static str {
        match self {
            ExternalServiceCode::Panasonic => "panasonic",
            ExternalServiceCode::Dyson => "dyson",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            ExternalServiceCode::Panasonic => "Panasonic",
            ExternalServiceCode::Dyson => "Dyson",
        }
    }

    fn label(&self) -> &'static str {
        self.key()
    }
}

// =============================================================================
// Option types
// =============================================================================

/// Kind of cleaning setting. Shared by all vendors; each vendor supports a
/// subset (see `available_types`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CleaningOptionType {
    CleanMode,
    WorkingMode,
    SilentMode,
    UvSterilize,
    AutoReturn,
}

impl LabeledEnum for CleaningOptionType {
    fn all() -> &'static [Self] {
        &[
            CleaningOptionType::CleanMode,
            CleaningOptionType::WorkingMode,
            CleaningOptionType::SilentMode,
            CleaningOptionType::UvSterilize,
            CleaningOptionType::AutoReturn,
        ]
    }

    fn value(&self) -> &'static str {
        match self {
            CleaningOptionType::CleanMode => "cleanMode",
            CleaningOptionType::WorkingMode => "workingMode",
            CleaningOptionType::SilentMode => "silentMode",
            CleaningOptionType::UvSterilize => "uvSterilize",
            CleaningOptionType::AutoReturn => "autoReturn",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            CleaningOptionType::CleanMode => "CleanMode",
            CleaningOptionType::WorkingMode => "WorkingMode",
            CleaningOptionType::SilentMode => "SilentMode",
            CleaningOptionType::UvSterilize => "UVSterilize",
            CleaningOptionType::AutoReturn => "AutoReturn",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CleaningOptionType::CleanMode => "吸引レベル",
            CleaningOptionType::WorkingMode => "水拭き",
            CleaningOptionType::SilentMode => "静音モード",
            CleaningOptionType::UvSterilize => "UV除菌",
            CleaningOptionType::AutoReturn => "自動帰還",
        }
    }
}

// =============================================================================
// Per-vendor choices
// =============================================================================

const fn item(value: &'static str, label: &'static str) -> OptionItem {
    OptionItem { value, label }
}

const PANASONIC_CLEAN_MODE: &[OptionItem] = &[
    item("quiet", "静音"),
    item("normal", "標準"),
    item("strong", "強力"),
];
const PANASONIC_WORKING_MODE: &[OptionItem] = &[item("on", "あり"), item("off", "なし")];
const DYSON_SILENT_MODE: &[OptionItem] = &[item("on", "オン"), item("off", "オフ")];
const DYSON_YES_NO: &[OptionItem] = &[item("true", "あり"), item("false", "なし")];

/// Choices offered by `code` for an option type. Empty when the vendor does
/// not support the type.
pub fn choices(code: ExternalServiceCode, option_type: CleaningOptionType) -> &'static [OptionItem] {
    use CleaningOptionType::*;
    match (code, option_type) {
        (ExternalServiceCode::Panasonic, CleanMode) => PANASONIC_CLEAN_MODE,
        (ExternalServiceCode::Panasonic, WorkingMode) => PANASONIC_WORKING_MODE,
        (ExternalServiceCode::Dyson, SilentMode) => DYSON_SILENT_MODE,
        (ExternalServiceCode::Dyson, UvSterilize) => DYSON_YES_NO,
        (ExternalServiceCode::Dyson, AutoReturn) => DYSON_YES_NO,
        _ => &[],
    }
}

/// Option types a vendor supports, in catalog order.
pub fn available_types(code: ExternalServiceCode) -> Vec<CleaningOptionType> {
    CleaningOptionType::all()
        .iter()
        .copied()
        .filter(|t| !choices(code, *t).is_empty())
        .collect()
}

/// Display label for a chosen value. Unknown values are shown as-is.
pub fn value_label<'a>(
    code: ExternalServiceCode,
    option_type: CleaningOptionType,
    value: &'a str,
) -> &'a str {
    choices(code, option_type)
        .iter()
        .find(|opt| opt.value == value)
        .map(|opt| opt.label)
        .unwrap_or(value)
}

/// Type and value labels for one schedule card line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLabel {
    pub type_label: String,
    pub value_label: String,
}

/// Resolve labels for a raw (type, value) pair as stored on a schedule.
///
/// An unrecognised type yields the `不明` / `-` placeholder pair.
pub fn display_labels(code: ExternalServiceCode, raw_type: &str, value: &str) -> DisplayLabel {
    match CleaningOptionType::parse_loose(raw_type) {
        Some(option_type) => DisplayLabel {
            type_label: option_type.label().to_string(),
            value_label: value_label(code, option_type, value).to_string(),
        },
        None => {
            tracing::debug!(raw_type, "Unknown cleaning option type");
            DisplayLabel {
                type_label: UNKNOWN_LABEL.to_string(),
                value_label: UNKNOWN_VALUE_LABEL.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_types_per_vendor() {
        assert_eq!(
            available_types(ExternalServiceCode::Panasonic),
            vec![CleaningOptionType::CleanMode, CleaningOptionType::WorkingMode]
        );
        assert_eq!(
            available_types(ExternalServiceCode::Dyson),
            vec![
                CleaningOptionType::SilentMode,
                CleaningOptionType::UvSterilize,
                CleaningOptionType::AutoReturn
            ]
        );
    }

    #[test]
    fn test_unsupported_type_has_no_choices() {
        assert!(choices(ExternalServiceCode::Dyson, CleaningOptionType::CleanMode).is_empty());
    }

    #[test]
    fn test_value_label_lookup_and_fallback() {
        assert_eq!(
            value_label(ExternalServiceCode::Panasonic, CleaningOptionType::CleanMode, "strong"),
            "強力"
        );
        assert_eq!(
            value_label(ExternalServiceCode::Panasonic, CleaningOptionType::CleanMode, "max"),
            "max"
        );
    }

    #[test]
    fn test_display_labels() {
        let labels = display_labels(ExternalServiceCode::Dyson, "uvSterilize", "true");
        assert_eq!(labels.type_label, "UV除菌");
        assert_eq!(labels.value_label, "あり");

        let unknown = display_labels(ExternalServiceCode::Dyson, "turbo", "on");
        assert_eq!(unknown.type_label, "不明");
        assert_eq!(unknown.value_label, "-");
    }

    #[test]
    fn test_vendor_code_parse() {
        assert_eq!(
            ExternalServiceCode::parse_loose("Dyson"),
            Some(ExternalServiceCode::Dyson)
        );
        assert_eq!(ExternalServiceCode::parse_loose("irobot"), None);
    }
}
