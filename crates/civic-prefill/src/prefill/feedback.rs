use super::domain::{FormField, ResolvedValues};
use serde::{Deserialize, Serialize};

/// Language for user-facing status messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR", alias = "pt", alias = "pt_br")]
    PtBr,
    #[serde(rename = "en", alias = "en-US")]
    English,
}

impl Locale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" => Some(Self::PtBr),
            "en" | "en-us" | "en_us" => Some(Self::English),
            _ => None,
        }
    }
}

/// Ids whose resolved value is non-empty, non-zero or true, in field order.
pub fn list_prefilled_field_ids(fields: &[FormField], values: &ResolvedValues) -> Vec<String> {
    fields
        .iter()
        .filter(|field| values.get(&field.id).is_some_and(|value| value.is_filled()))
        .map(|field| field.id.clone())
        .collect()
}

/// Which of the three completeness states a form is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Completeness {
    NothingPrefilled,
    AllPrefilled,
    Partial { prefilled: usize, total: usize },
}

impl Completeness {
    pub fn from_counts(prefilled: usize, total: usize) -> Self {
        if prefilled == 0 {
            Completeness::NothingPrefilled
        } else if prefilled >= total {
            Completeness::AllPrefilled
        } else {
            Completeness::Partial { prefilled, total }
        }
    }

    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Completeness::NothingPrefilled, Locale::PtBr) => {
                "Preencha todos os campos abaixo".to_string()
            }
            (Completeness::NothingPrefilled, Locale::English) => {
                "Fill in all the fields below".to_string()
            }
            (Completeness::AllPrefilled, Locale::PtBr) => {
                "✓ Todos os campos foram pré-preenchidos com seus dados. Revise e confirme."
                    .to_string()
            }
            (Completeness::AllPrefilled, Locale::English) => {
                "✓ All fields were prefilled with your data. Review and confirm.".to_string()
            }
            (Completeness::Partial { prefilled, total }, Locale::PtBr) => format!(
                "✓ {prefilled} de {total} campos foram pré-preenchidos. Complete os campos restantes."
            ),
            (Completeness::Partial { prefilled, total }, Locale::English) => format!(
                "✓ {prefilled} of {total} fields were prefilled. Complete the remaining fields."
            ),
        }
    }
}

pub fn describe_completeness(prefilled: usize, total: usize) -> String {
    describe_completeness_in(prefilled, total, Locale::default())
}

pub fn describe_completeness_in(prefilled: usize, total: usize, locale: Locale) -> String {
    Completeness::from_counts(prefilled, total).message(locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefill::domain::{FieldKind, FieldValue};

    #[test]
    fn prefilled_ids_skip_defaults() {
        let fields = vec![
            FormField::new("nome", FieldKind::Text),
            FormField::new("idade", FieldKind::Number),
            FormField::new("aceite", FieldKind::Checkbox),
            FormField::new("renda", FieldKind::Number),
            FormField::new("missing", FieldKind::Text),
        ];
        let mut values = ResolvedValues::new();
        values.insert("nome".into(), FieldValue::Text("Ana".into()));
        values.insert("idade".into(), FieldValue::Number(0.0));
        values.insert("aceite".into(), FieldValue::Bool(false));
        values.insert("renda".into(), FieldValue::Number(1200.0));

        assert_eq!(list_prefilled_field_ids(&fields, &values), vec!["nome", "renda"]);
    }

    #[test]
    fn completeness_messages_cover_three_states() {
        assert_eq!(describe_completeness(0, 4), "Preencha todos os campos abaixo");
        assert!(describe_completeness(4, 4).contains("Todos os campos"));
        let partial = describe_completeness(3, 5);
        assert!(partial.contains('3') && partial.contains('5'));

        let english = describe_completeness_in(3, 5, Locale::English);
        assert_eq!(
            english,
            "✓ 3 of 5 fields were prefilled. Complete the remaining fields."
        );
        assert_eq!(
            describe_completeness_in(0, 0, Locale::English),
            "Fill in all the fields below"
        );
    }

    #[test]
    fn locale_parsing_accepts_common_spellings() {
        assert_eq!(Locale::parse("pt-BR"), Some(Locale::PtBr));
        assert_eq!(Locale::parse("EN"), Some(Locale::English));
        assert_eq!(Locale::parse("fr"), None);
    }
}
