use super::domain::{Address, CanonicalAttribute, CitizenProfile};
use super::masks::{mask_cep, mask_cpf, mask_phone};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Reads the profile value behind `attribute`, `None` when absent or blank.
pub(crate) fn read_attribute(
    attribute: CanonicalAttribute,
    profile: &CitizenProfile,
    apply_masks: bool,
) -> Option<String> {
    let address = profile.address.as_ref();
    let value = match attribute {
        CanonicalAttribute::Name => Some(profile.full_name.clone()),
        CanonicalAttribute::LegalId => {
            Some(masked(&profile.legal_id, apply_masks, mask_cpf))
        }
        CanonicalAttribute::NationalId => profile.national_id.clone(),
        CanonicalAttribute::BirthDate => profile.birth_date.as_deref().map(format_date_for_input),
        CanonicalAttribute::MotherName => profile.mother_name.clone(),
        CanonicalAttribute::MaritalStatus => profile.marital_status.clone(),
        CanonicalAttribute::Occupation => profile.occupation.clone(),
        CanonicalAttribute::FamilyIncome => profile.family_income.clone(),
        CanonicalAttribute::Email => Some(profile.email.clone()),
        CanonicalAttribute::Phone => profile
            .phone
            .as_deref()
            .map(|phone| masked(phone, apply_masks, mask_phone)),
        CanonicalAttribute::PhoneSecondary => profile
            .phone_secondary
            .as_deref()
            .map(|phone| masked(phone, apply_masks, mask_phone)),
        CanonicalAttribute::FullAddress => address.map(full_address),
        CanonicalAttribute::Street => address.and_then(|a| a.street.clone()),
        CanonicalAttribute::Number => address.and_then(|a| a.number.clone()),
        CanonicalAttribute::Complement => address.and_then(|a| a.complement.clone()),
        CanonicalAttribute::Neighborhood => address.and_then(|a| a.neighborhood.clone()),
        CanonicalAttribute::City => address.and_then(|a| a.city.clone()),
        CanonicalAttribute::State => address.and_then(|a| a.state.clone()),
        CanonicalAttribute::ZipCode => address
            .and_then(|a| a.zip_code.as_deref())
            .map(|cep| masked(cep, apply_masks, mask_cep)),
        CanonicalAttribute::ReferencePoint => address.and_then(|a| a.reference_point.clone()),
    };

    value.filter(|text| !text.trim().is_empty())
}

fn masked(value: &str, apply_masks: bool, mask: fn(&str) -> String) -> String {
    if apply_masks {
        mask(value)
    } else {
        value.to_string()
    }
}

/// Street, number, neighborhood, city and state joined with ", ".
fn full_address(address: &Address) -> String {
    [
        &address.street,
        &address.number,
        &address.neighborhood,
        &address.city,
        &address.state,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref().map(str::trim))
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// `YYYY-MM-DD` as expected by calendar inputs; empty when unparseable.
pub fn format_date_for_input(value: &str) -> String {
    parse_date(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    ["%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}
