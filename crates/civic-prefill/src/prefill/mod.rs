//! Form pre-fill: maps arbitrary form-field ids onto citizen profile attributes.
//!
//! Resolution runs in three tiers: an exact lookup of the normalized id in a
//! curated table, a keyword fallback for ids the table does not know, and the
//! field kind's empty default when neither yields a value. An explicit table
//! hit is final even when the profile has nothing for that attribute.

mod accessor;
pub mod catalog;
pub mod domain;
mod feedback;
mod mapping;
pub mod masks;
mod normalizer;
mod observer;
mod options;
mod rules;
pub mod schema;
mod staleness;

pub use accessor::format_date_for_input;
pub use domain::{
    Address, CanonicalAttribute, CitizenProfile, FieldKind, FieldMatch, FieldValue, FormField,
    MatchTier, ResolvedValues,
};
pub use feedback::{
    describe_completeness, describe_completeness_in, list_prefilled_field_ids, Completeness,
    Locale,
};
pub use normalizer::normalize_field_id;
pub use observer::{NoopObserver, PrefillEvent, PrefillObserver, RecordingObserver, TracingObserver};
pub use options::{MatchScope, PrefillOptions};
pub use staleness::ValidityReport;

use std::sync::Arc;

const CITIZEN_PREFIX: &str = "citizen_";

/// Outcome of classifying a single field id.
enum Classification {
    Skipped,
    Matched(CanonicalAttribute, MatchTier),
    Unrecognized,
}

/// Stateless resolver; safe to share and call concurrently.
#[derive(Clone)]
pub struct FieldResolver {
    options: PrefillOptions,
    observer: Arc<dyn PrefillObserver>,
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new(PrefillOptions::default())
    }
}

impl std::fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldResolver")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl FieldResolver {
    pub fn new(options: PrefillOptions) -> Self {
        Self {
            options,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn PrefillObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn options(&self) -> &PrefillOptions {
        &self.options
    }

    /// Initial value for every field; type defaults when `profile` is `None`.
    pub fn resolve(
        &self,
        fields: &[FormField],
        profile: Option<&CitizenProfile>,
    ) -> ResolvedValues {
        let Some(profile) = profile else {
            self.observer.observe(&PrefillEvent::ProfileMissing {
                field_count: fields.len(),
            });
            return fields
                .iter()
                .map(|field| (field.id.clone(), field.kind.default_value()))
                .collect();
        };

        let mut values = ResolvedValues::new();
        let mut prefilled = 0;

        for field in fields {
            let value = match self.resolve_field(field, profile) {
                Some(value) => {
                    prefilled += 1;
                    value
                }
                None => field.kind.default_value(),
            };
            values.insert(field.id.clone(), value);
        }

        self.observer.observe(&PrefillEvent::Completed {
            prefilled,
            total: fields.len(),
        });

        values
    }

    /// Classification decision for `field_id` without consulting a profile.
    pub fn explain(&self, field_id: &str) -> FieldMatch {
        let normalized_id = normalize_field_id(field_id);
        let (attribute, tier) = match self.classify(field_id, &normalized_id) {
            Classification::Matched(attribute, tier) => (Some(attribute), Some(tier)),
            Classification::Skipped | Classification::Unrecognized => (None, None),
        };

        FieldMatch {
            field_id: field_id.to_string(),
            normalized_id,
            attribute,
            tier,
        }
    }

    pub fn describe_completeness(&self, prefilled: usize, total: usize) -> String {
        describe_completeness_in(prefilled, total, self.options.locale)
    }

    /// The citizen scope gate looks at the raw id, lower-cased only, so
    /// `Citizen Name` or `-citizen_name` stay service fields.
    fn classify(&self, field_id: &str, normalized_id: &str) -> Classification {
        let citizen_only = self.options.match_scope == MatchScope::CitizenPrefixedOnly;
        if citizen_only && !field_id.to_lowercase().starts_with(CITIZEN_PREFIX) {
            return Classification::Skipped;
        }

        if let Some(attribute) = mapping::attribute_for_normalized(normalized_id) {
            return Classification::Matched(attribute, MatchTier::Direct);
        }

        if citizen_only {
            return Classification::Unrecognized;
        }

        match rules::classify(normalized_id) {
            Some(attribute) => Classification::Matched(attribute, MatchTier::Semantic),
            None => Classification::Unrecognized,
        }
    }

    fn resolve_field(&self, field: &FormField, profile: &CitizenProfile) -> Option<FieldValue> {
        let normalized_id = normalize_field_id(&field.id);

        let (attribute, tier) = match self.classify(&field.id, &normalized_id) {
            Classification::Matched(attribute, tier) => (attribute, tier),
            Classification::Skipped => {
                self.observer.observe(&PrefillEvent::CustomFieldSkipped {
                    field_id: field.id.clone(),
                });
                return None;
            }
            Classification::Unrecognized => {
                self.observer.observe(&PrefillEvent::Unrecognized {
                    field_id: field.id.clone(),
                    normalized_id,
                });
                return None;
            }
        };

        let value = accessor::read_attribute(attribute, profile, self.options.apply_masks)
            .and_then(|raw| field.kind.coerce(&raw))
            .filter(FieldValue::is_filled);

        let Some(value) = value else {
            self.observer.observe(&PrefillEvent::AttributeEmpty {
                field_id: field.id.clone(),
                attribute,
                tier,
            });
            return None;
        };

        let option_match = (field.kind == FieldKind::Select)
            .then(|| field.options.iter().any(|option| *option == value.to_string()));

        self.observer.observe(&PrefillEvent::Prefilled {
            field_id: field.id.clone(),
            normalized_id,
            attribute,
            tier,
            option_match,
        });

        Some(value)
    }
}

/// Resolves with default options and tracing diagnostics.
pub fn resolve(fields: &[FormField], profile: Option<&CitizenProfile>) -> ResolvedValues {
    FieldResolver::default().resolve(fields, profile)
}

/// Staleness check with default options.
pub fn check_still_valid(values: &ResolvedValues, profile: &CitizenProfile) -> ValidityReport {
    FieldResolver::default().check_still_valid(values, profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maria() -> CitizenProfile {
        CitizenProfile {
            id: "c-1".to_string(),
            legal_id: "12345678900".to_string(),
            full_name: "Maria Silva".to_string(),
            email: "maria@x.com".to_string(),
            birth_date: Some("2010-03-15T00:00:00.000Z".to_string()),
            marital_status: Some("Casado(a)".to_string()),
            ..CitizenProfile::default()
        }
    }

    fn recording_resolver(options: PrefillOptions) -> (FieldResolver, Arc<RecordingObserver>) {
        let recorder = Arc::new(RecordingObserver::default());
        let resolver = FieldResolver::new(options).with_observer(recorder.clone());
        (resolver, recorder)
    }

    #[test]
    fn resolves_direct_matches() {
        let fields = vec![
            FormField::new("applicantName", FieldKind::Text),
            FormField::new("applicantCpf", FieldKind::Text),
            FormField::new("applicantEmail", FieldKind::Text),
        ];

        let values = resolve(&fields, Some(&maria()));

        assert_eq!(values.len(), 3);
        assert_eq!(values["applicantName"], FieldValue::Text("Maria Silva".into()));
        assert_eq!(values["applicantCpf"], FieldValue::Text("12345678900".into()));
        assert_eq!(values["applicantEmail"], FieldValue::Text("maria@x.com".into()));
    }

    #[test]
    fn direct_hit_with_empty_value_skips_semantic_fallback() {
        let (resolver, recorder) = recording_resolver(PrefillOptions::default());
        // "telefone" is a direct entry; Maria has no phone.
        let fields = vec![FormField::new("telefone", FieldKind::Text)];

        let values = resolver.resolve(&fields, Some(&maria()));

        assert_eq!(values["telefone"], FieldValue::Text(String::new()));
        assert!(recorder.events().contains(&PrefillEvent::AttributeEmpty {
            field_id: "telefone".into(),
            attribute: CanonicalAttribute::Phone,
            tier: MatchTier::Direct,
        }));
    }

    #[test]
    fn semantic_fallback_fills_unknown_ids() {
        let (resolver, recorder) = recording_resolver(PrefillOptions::default());
        let fields = vec![FormField::new("guardianResponsibleName", FieldKind::Text)];

        let values = resolver.resolve(&fields, Some(&maria()));

        assert_eq!(
            values["guardianResponsibleName"],
            FieldValue::Text("Maria Silva".into())
        );
        assert!(recorder.events().iter().any(|event| matches!(
            event,
            PrefillEvent::Prefilled {
                tier: MatchTier::Semantic,
                attribute: CanonicalAttribute::Name,
                ..
            }
        )));
    }

    #[test]
    fn select_records_option_match_without_auto_selecting() {
        let (resolver, recorder) = recording_resolver(PrefillOptions::default());
        let fields = vec![
            FormField::new("estadoCivil", FieldKind::Select)
                .with_options(["Solteiro(a)", "Casado(a)"]),
            FormField::new("rendaFamiliar", FieldKind::Select)
                .with_options(["Até 1 salário mínimo", "1 a 2 salários mínimos"]),
        ];

        let values = resolver.resolve(&fields, Some(&maria()));

        assert_eq!(values["estadoCivil"], FieldValue::Text("Casado(a)".into()));
        assert_eq!(values["rendaFamiliar"], FieldValue::Text(String::new()));
        assert!(recorder.events().iter().any(|event| matches!(
            event,
            PrefillEvent::Prefilled { field_id, option_match: Some(true), .. } if field_id == "estadoCivil"
        )));
    }

    #[test]
    fn citizen_scope_ignores_service_fields() {
        let options = PrefillOptions {
            match_scope: MatchScope::CitizenPrefixedOnly,
            ..PrefillOptions::default()
        };
        let (resolver, recorder) = recording_resolver(options);
        let fields = vec![
            FormField::new("citizen_name", FieldKind::Text),
            FormField::new("nomeResponsavel", FieldKind::Text),
            FormField::new("citizen_guardianname", FieldKind::Text),
        ];

        let values = resolver.resolve(&fields, Some(&maria()));

        assert_eq!(values["citizen_name"], FieldValue::Text("Maria Silva".into()));
        assert_eq!(values["nomeResponsavel"], FieldValue::Text(String::new()));
        // prefixed but unknown: no keyword fallback in this scope
        assert_eq!(values["citizen_guardianname"], FieldValue::Text(String::new()));
        assert!(recorder
            .events()
            .contains(&PrefillEvent::CustomFieldSkipped {
                field_id: "nomeResponsavel".into()
            }));
    }

    #[test]
    fn citizen_scope_checks_the_raw_prefix() {
        let options = PrefillOptions {
            match_scope: MatchScope::CitizenPrefixedOnly,
            ..PrefillOptions::default()
        };
        let (resolver, recorder) = recording_resolver(options);
        let fields = vec![
            FormField::new("CITIZEN_NAME", FieldKind::Text),
            FormField::new("Citizen Name", FieldKind::Text),
            FormField::new("-citizen_name", FieldKind::Text),
        ];

        let values = resolver.resolve(&fields, Some(&maria()));

        assert_eq!(values["CITIZEN_NAME"], FieldValue::Text("Maria Silva".into()));
        assert_eq!(values["Citizen Name"], FieldValue::Text(String::new()));
        assert_eq!(values["-citizen_name"], FieldValue::Text(String::new()));
        let skipped = recorder
            .events()
            .into_iter()
            .filter(|event| matches!(event, PrefillEvent::CustomFieldSkipped { .. }))
            .count();
        assert_eq!(skipped, 2);
        assert_eq!(resolver.explain("Citizen Name").attribute, None);
    }

    #[test]
    fn zero_and_false_profile_values_count_as_empty() {
        let (resolver, recorder) = recording_resolver(PrefillOptions::default());
        let mut profile = maria();
        profile.family_income = Some("0".into());
        profile.occupation = Some("nao".into());
        let fields = vec![
            FormField::new("renda", FieldKind::Number),
            FormField::new("profissao", FieldKind::Checkbox),
        ];

        let values = resolver.resolve(&fields, Some(&profile));

        assert_eq!(values["renda"], FieldValue::Number(0.0));
        assert_eq!(values["profissao"], FieldValue::Bool(false));
        assert!(list_prefilled_field_ids(&fields, &values).is_empty());
        let events = recorder.events();
        assert!(events.contains(&PrefillEvent::AttributeEmpty {
            field_id: "renda".into(),
            attribute: CanonicalAttribute::FamilyIncome,
            tier: MatchTier::Direct,
        }));
        assert!(!events
            .iter()
            .any(|event| matches!(event, PrefillEvent::Prefilled { .. })));
        assert_eq!(
            events.last(),
            Some(&PrefillEvent::Completed {
                prefilled: 0,
                total: 2
            })
        );
    }

    #[test]
    fn masks_follow_options() {
        let resolver = FieldResolver::new(PrefillOptions {
            apply_masks: true,
            ..PrefillOptions::default()
        })
        .with_observer(Arc::new(NoopObserver));
        let fields = vec![FormField::new("cpf", FieldKind::Text)];

        let values = resolver.resolve(&fields, Some(&maria()));

        assert_eq!(values["cpf"], FieldValue::Text("123.456.789-00".into()));
    }

    #[test]
    fn number_fields_fall_back_when_text_does_not_parse() {
        let mut profile = maria();
        profile.family_income = Some("1 a 2 salários mínimos".into());
        let fields = vec![FormField::new("renda", FieldKind::Number)];

        let values = resolve(&fields, Some(&profile));

        assert_eq!(values["renda"], FieldValue::Number(0.0));
    }

    #[test]
    fn explain_reports_tier_and_attribute() {
        let resolver = FieldResolver::default();

        let direct = resolver.explain("Data de Nascimento");
        assert_eq!(direct.normalized_id, "data_de_nascimento");
        assert_eq!(direct.attribute, Some(CanonicalAttribute::BirthDate));
        assert_eq!(direct.tier, Some(MatchTier::Direct));

        let semantic = resolver.explain("emailDoGuardiao");
        assert_eq!(semantic.attribute, Some(CanonicalAttribute::Email));
        assert_eq!(semantic.tier, Some(MatchTier::Semantic));

        let unknown = resolver.explain("numeroDoLote");
        assert_eq!(unknown.attribute, None);
        assert_eq!(unknown.tier, None);
    }

    #[test]
    fn completed_event_counts_prefilled_fields() {
        let (resolver, recorder) = recording_resolver(PrefillOptions::default());
        let fields = vec![
            FormField::new("nome", FieldKind::Text),
            FormField::new("observacoes", FieldKind::Textarea),
        ];

        resolver.resolve(&fields, Some(&maria()));

        assert_eq!(
            recorder.events().last(),
            Some(&PrefillEvent::Completed {
                prefilled: 1,
                total: 2
            })
        );
    }
}
