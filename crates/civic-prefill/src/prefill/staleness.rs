use super::accessor::read_attribute;
use super::domain::{CitizenProfile, FieldKind, FieldValue, ResolvedValues};
use super::normalizer::normalize_field_id;
use super::{Classification, FieldResolver};
use serde::Serialize;

/// Whether stored pre-fill values still agree with the current profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityReport {
    pub is_valid: bool,
    pub stale_field_ids: Vec<String>,
}

impl FieldResolver {
    /// Flags every stored field whose attribute now reads a different,
    /// non-empty value from `profile`.
    pub fn check_still_valid(
        &self,
        values: &ResolvedValues,
        profile: &CitizenProfile,
    ) -> ValidityReport {
        let stale_field_ids: Vec<String> = values
            .iter()
            .filter(|(field_id, stored)| {
                let Classification::Matched(attribute, _) =
                    self.classify(field_id, &normalize_field_id(field_id))
                else {
                    return false;
                };

                read_attribute(attribute, profile, self.options.apply_masks)
                    .is_some_and(|current| !agrees_with(stored, &current))
            })
            .map(|(field_id, _)| field_id.clone())
            .collect();

        if !stale_field_ids.is_empty() {
            tracing::debug!(stale = stale_field_ids.len(), "prefilled values are outdated");
        }

        ValidityReport {
            is_valid: stale_field_ids.is_empty(),
            stale_field_ids,
        }
    }
}

/// A current value the stored kind cannot hold would never have been
/// pre-filled, so it does not count as a change.
fn agrees_with(stored: &FieldValue, current: &str) -> bool {
    let coerced = match stored {
        FieldValue::Text(text) => return text == current,
        FieldValue::Number(_) => FieldKind::Number.coerce(current),
        FieldValue::Bool(_) => FieldKind::Boolean.coerce(current),
    };
    coerced.map_or(true, |value| value == *stored)
}
