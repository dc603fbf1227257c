use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Citizen record owned by the identity subsystem; read-only here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenProfile {
    pub id: String,
    #[serde(alias = "cpf")]
    pub legal_id: String,
    #[serde(alias = "name")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub phone_secondary: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default, alias = "rg")]
    pub national_id: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub family_income: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Postal address. Accepts the backend's Portuguese column names as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, alias = "logradouro")]
    pub street: Option<String>,
    #[serde(default, alias = "numero")]
    pub number: Option<String>,
    #[serde(default, alias = "complemento")]
    pub complement: Option<String>,
    #[serde(default, alias = "bairro")]
    pub neighborhood: Option<String>,
    #[serde(default, alias = "cidade")]
    pub city: Option<String>,
    #[serde(default, alias = "uf")]
    pub state: Option<String>,
    #[serde(default, alias = "cep")]
    pub zip_code: Option<String>,
    #[serde(default, alias = "pontoReferencia")]
    pub reference_point: Option<String>,
}

/// Input control kind; decides the empty default and value coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Date,
    Number,
    Boolean,
    Checkbox,
    Select,
    #[serde(other)]
    Other,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Email => "email",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select => "select",
            FieldKind::Other => "other",
        }
    }

    pub fn default_value(self) -> FieldValue {
        match self {
            FieldKind::Number => FieldValue::Number(0.0),
            FieldKind::Boolean | FieldKind::Checkbox => FieldValue::Bool(false),
            FieldKind::Select
            | FieldKind::Text
            | FieldKind::Textarea
            | FieldKind::Email
            | FieldKind::Date
            | FieldKind::Other => FieldValue::Text(String::new()),
        }
    }

    /// Converts a profile-derived text into a value of this kind.
    pub fn coerce(self, raw: &str) -> Option<FieldValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        match self {
            FieldKind::Number => parse_number(trimmed).map(FieldValue::Number),
            FieldKind::Boolean | FieldKind::Checkbox => parse_flag(trimmed).map(FieldValue::Bool),
            _ => Some(FieldValue::Text(raw.to_string())),
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    let candidate = if value.contains(',') {
        value.replace('.', "").replace(',', ".")
    } else {
        value.to_string()
    };
    candidate.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "sim" | "yes" | "1" => Some(true),
        "false" | "nao" | "não" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Form-input descriptor supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FormField {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: None,
            required: false,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Value assigned to a single field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Largest magnitude an `f64` holds without losing integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for FieldValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Bool(flag) => serializer.serialize_bool(*flag),
            // whole numbers go out as JSON integers: `0`, not `0.0`
            FieldValue::Number(number)
                if number.fract() == 0.0 && number.abs() <= MAX_EXACT_INTEGER =>
            {
                serializer.serialize_i64(*number as i64)
            }
            FieldValue::Number(number) => serializer.serialize_f64(*number),
            FieldValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl FieldValue {
    /// True when the value counts as pre-filled (non-empty, non-zero, true).
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Number(number) => *number != 0.0,
            FieldValue::Bool(flag) => *flag,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

/// Field id to resolved value, one entry per input field.
pub type ResolvedValues = BTreeMap<String, FieldValue>;

/// Closed vocabulary of profile attributes a field can be sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalAttribute {
    Name,
    LegalId,
    NationalId,
    BirthDate,
    MotherName,
    MaritalStatus,
    Occupation,
    FamilyIncome,
    Email,
    Phone,
    PhoneSecondary,
    FullAddress,
    Street,
    Number,
    Complement,
    Neighborhood,
    City,
    State,
    ZipCode,
    ReferencePoint,
}

impl CanonicalAttribute {
    pub const ALL: [CanonicalAttribute; 20] = [
        CanonicalAttribute::Name,
        CanonicalAttribute::LegalId,
        CanonicalAttribute::NationalId,
        CanonicalAttribute::BirthDate,
        CanonicalAttribute::MotherName,
        CanonicalAttribute::MaritalStatus,
        CanonicalAttribute::Occupation,
        CanonicalAttribute::FamilyIncome,
        CanonicalAttribute::Email,
        CanonicalAttribute::Phone,
        CanonicalAttribute::PhoneSecondary,
        CanonicalAttribute::FullAddress,
        CanonicalAttribute::Street,
        CanonicalAttribute::Number,
        CanonicalAttribute::Complement,
        CanonicalAttribute::Neighborhood,
        CanonicalAttribute::City,
        CanonicalAttribute::State,
        CanonicalAttribute::ZipCode,
        CanonicalAttribute::ReferencePoint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalAttribute::Name => "name",
            CanonicalAttribute::LegalId => "legalId",
            CanonicalAttribute::NationalId => "nationalId",
            CanonicalAttribute::BirthDate => "birthDate",
            CanonicalAttribute::MotherName => "motherName",
            CanonicalAttribute::MaritalStatus => "maritalStatus",
            CanonicalAttribute::Occupation => "occupation",
            CanonicalAttribute::FamilyIncome => "familyIncome",
            CanonicalAttribute::Email => "email",
            CanonicalAttribute::Phone => "phone",
            CanonicalAttribute::PhoneSecondary => "phoneSecondary",
            CanonicalAttribute::FullAddress => "fullAddress",
            CanonicalAttribute::Street => "street",
            CanonicalAttribute::Number => "number",
            CanonicalAttribute::Complement => "complement",
            CanonicalAttribute::Neighborhood => "neighborhood",
            CanonicalAttribute::City => "city",
            CanonicalAttribute::State => "state",
            CanonicalAttribute::ZipCode => "zipCode",
            CanonicalAttribute::ReferencePoint => "referencePoint",
        }
    }
}

impl fmt::Display for CanonicalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which tier produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Direct,
    Semantic,
}

impl MatchTier {
    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Direct => "direct",
            MatchTier::Semantic => "semantic",
        }
    }
}

/// Classification decision for one field id, independent of any profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    pub field_id: String,
    pub normalized_id: String,
    pub attribute: Option<CanonicalAttribute>,
    pub tier: Option<MatchTier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_field_kind() {
        assert_eq!(FieldKind::Number.default_value(), FieldValue::Number(0.0));
        assert_eq!(FieldKind::Checkbox.default_value(), FieldValue::Bool(false));
        assert_eq!(FieldKind::Boolean.default_value(), FieldValue::Bool(false));
        assert_eq!(
            FieldKind::Select.default_value(),
            FieldValue::Text(String::new())
        );
        assert_eq!(FieldKind::Date.default_value(), FieldValue::Text(String::new()));
    }

    #[test]
    fn coerce_parses_brazilian_decimal_for_numbers() {
        assert_eq!(
            FieldKind::Number.coerce("1.500,50"),
            Some(FieldValue::Number(1500.5))
        );
        assert_eq!(FieldKind::Number.coerce("42"), Some(FieldValue::Number(42.0)));
        assert_eq!(FieldKind::Number.coerce("até 1 salário"), None);
        assert_eq!(FieldKind::Checkbox.coerce("Sim"), Some(FieldValue::Bool(true)));
        assert_eq!(FieldKind::Text.coerce("   "), None);
    }

    #[test]
    fn profile_accepts_backend_field_names() {
        let profile: CitizenProfile = serde_json::from_str(
            r#"{
                "id": "c-1",
                "cpf": "12345678900",
                "name": "Maria Silva",
                "email": "maria@x.com",
                "rg": "MG-12.345.678",
                "address": { "logradouro": "Rua das Flores", "numero": "10", "uf": "MG", "cep": "30110000" }
            }"#,
        )
        .expect("profile parses");

        assert_eq!(profile.legal_id, "12345678900");
        assert_eq!(profile.full_name, "Maria Silva");
        assert_eq!(profile.national_id.as_deref(), Some("MG-12.345.678"));
        let address = profile.address.expect("address present");
        assert_eq!(address.street.as_deref(), Some("Rua das Flores"));
        assert_eq!(address.state.as_deref(), Some("MG"));
        assert_eq!(address.zip_code.as_deref(), Some("30110000"));
    }

    #[test]
    fn whole_numbers_serialize_as_integers() {
        let json = serde_json::to_string(&vec![
            FieldValue::Number(0.0),
            FieldValue::Number(1500.5),
            FieldValue::Number(-3.0),
            FieldValue::Bool(false),
            FieldValue::Text(String::new()),
        ])
        .expect("values serialize");
        assert_eq!(json, r#"[0,1500.5,-3,false,""]"#);

        let parsed: FieldValue = serde_json::from_str("0").expect("integer parses");
        assert_eq!(parsed, FieldValue::Number(0.0));
    }

    #[test]
    fn form_field_accepts_type_key_and_unknown_kinds() {
        let field: FormField =
            serde_json::from_str(r#"{"id":"anexo","type":"file","required":true}"#)
                .expect("field parses");
        assert_eq!(field.kind, FieldKind::Other);
        assert!(field.required);
        assert!(field.options.is_empty());
    }
}
