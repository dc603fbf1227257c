//! Display masks used by the portal's masked inputs.

use phonenumber::country::Id as CountryId;
use phonenumber::Mode;

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `000.000.000-00`
pub fn mask_cpf(value: &str) -> String {
    let digits = digits(value);
    if digits.len() != 11 {
        return value.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Brazilian national format, `(00) 00000-0000` for mobiles and
/// `(00) 0000-0000` for landlines. Numbers that do not parse as valid BR
/// numbers come back unchanged.
pub fn mask_phone(value: &str) -> String {
    if digits(value).len() < 10 {
        return value.to_string();
    }

    match phonenumber::parse(Some(CountryId::BR), value) {
        Ok(number) if phonenumber::is_valid(&number) => {
            number.format().mode(Mode::National).to_string()
        }
        Ok(_) | Err(_) => {
            tracing::debug!(phone = value, "phone left unmasked");
            value.to_string()
        }
    }
}

/// `00000-000`
pub fn mask_cep(value: &str) -> String {
    let digits = digits(value);
    if digits.len() != 8 {
        return value.to_string();
    }
    format!("{}-{}", &digits[0..5], &digits[5..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_well_formed_values() {
        assert_eq!(mask_cpf("12345678900"), "123.456.789-00");
        assert_eq!(mask_cpf("123.456.789-00"), "123.456.789-00");
        assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(mask_phone("1133334444"), "(11) 3333-4444");
        assert_eq!(mask_cep("30110000"), "30110-000");
    }

    #[test]
    fn leaves_values_with_unexpected_length_untouched() {
        assert_eq!(mask_cpf("12.345.678/0001-90"), "12.345.678/0001-90");
        assert_eq!(mask_phone("98765"), "98765");
        assert_eq!(mask_cep("123"), "123");
    }

    #[test]
    fn phone_mask_accepts_country_code_and_punctuation() {
        assert_eq!(mask_phone("+55 11 98765-4321"), "(11) 98765-4321");
        assert_eq!(mask_phone("(11) 3333-4444"), "(11) 3333-4444");
    }

    #[test]
    fn invalid_phone_is_left_unmasked() {
        assert_eq!(mask_phone("00000000000"), "00000000000");
    }
}
