use super::feedback::Locale;
use serde::{Deserialize, Serialize};

/// Which field ids are eligible for pre-fill at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchScope {
    /// Direct table, then keyword fallback, for every field.
    #[default]
    AllFields,
    /// Only `citizen_*` ids, through the direct table alone. Service-specific
    /// fields often describe someone other than the logged-in citizen.
    CitizenPrefixedOnly,
}

impl MatchScope {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "all_fields" => Some(Self::AllFields),
            "citizen" | "citizen_prefixed" | "citizen_prefixed_only" => {
                Some(Self::CitizenPrefixedOnly)
            }
            _ => None,
        }
    }
}

/// Resolver behavior switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillOptions {
    #[serde(default)]
    pub match_scope: MatchScope,
    /// Format CPF, phones and CEP the way masked inputs display them.
    #[serde(default)]
    pub apply_masks: bool,
    #[serde(default)]
    pub locale: Locale,
}
