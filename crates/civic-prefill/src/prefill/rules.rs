use super::domain::CanonicalAttribute;

/// One keyword heuristic; rules are tried in slice order and the first hit wins.
pub(crate) struct ClassificationRule {
    pub attribute: CanonicalAttribute,
    pub matches: fn(&str) -> bool,
}

const NAME_HOLDERS: &[&str] = &[
    "solicitante",
    "requerente",
    "responsavel",
    "declarante",
    "denunciante",
    "proprietario",
    "titular",
    "cidadao",
    "pessoa",
    "usuario",
    "cliente",
    "beneficiario",
    "interessado",
];

const ADDRESS_KEYWORDS: &[&str] = &[
    "endereco",
    "address",
    "logradouro",
    "rua",
    "street",
    "bairro",
    "neighborhood",
    "cidade",
    "city",
    "municipio",
    "cep",
    "zipcode",
];

const SECONDARY_MARKERS: &[&str] = &["secundario", "secondary", "2", "alternativo", "alternative"];

/// Secondary phone sits ahead of phone: it refines the same predicate.
pub(crate) const SEMANTIC_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        attribute: CanonicalAttribute::Name,
        matches: is_name,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::LegalId,
        matches: is_legal_id,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::Email,
        matches: is_email,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::PhoneSecondary,
        matches: is_secondary_phone,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::Phone,
        matches: is_phone,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::FullAddress,
        matches: is_address,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::NationalId,
        matches: is_national_id,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::BirthDate,
        matches: is_birth_date,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::MotherName,
        matches: is_mother_name,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::MaritalStatus,
        matches: is_marital_status,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::Occupation,
        matches: is_occupation,
    },
    ClassificationRule {
        attribute: CanonicalAttribute::FamilyIncome,
        matches: is_family_income,
    },
];

/// Keyword fallback for ids missing from the direct table.
pub(crate) fn classify(normalized_id: &str) -> Option<CanonicalAttribute> {
    SEMANTIC_RULES
        .iter()
        .find(|rule| (rule.matches)(normalized_id))
        .map(|rule| rule.attribute)
}

fn contains_any(id: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| id.contains(needle))
}

fn is_name(id: &str) -> bool {
    id.ends_with("name") || id.ends_with("nome") || contains_any(id, NAME_HOLDERS)
}

fn is_legal_id(id: &str) -> bool {
    contains_any(id, &["cpf", "documento", "doc"]) || id == "cpfcnpj" || id == "cpf_cnpj"
}

fn is_email(id: &str) -> bool {
    contains_any(id, &["email", "e_mail", "mail", "correio"])
}

fn is_phone(id: &str) -> bool {
    contains_any(id, &["telefone", "phone", "celular", "fone", "tel", "mobile"])
        || (id.contains("contato") && !is_name(id))
}

fn is_secondary_phone(id: &str) -> bool {
    is_phone(id) && contains_any(id, SECONDARY_MARKERS)
}

fn is_address(id: &str) -> bool {
    contains_any(id, ADDRESS_KEYWORDS)
}

fn is_national_id(id: &str) -> bool {
    id.contains("rg")
        || id.contains("identidade")
        || (id.contains("carteira") && id.contains("identidade"))
}

fn is_birth_date(id: &str) -> bool {
    contains_any(
        id,
        &[
            "nascimento",
            "birthdate",
            "birth_date",
            "dateofbirth",
            "date_of_birth",
        ],
    ) || (id.contains("data") && id.contains("nasc"))
}

fn is_mother_name(id: &str) -> bool {
    id.contains("mae")
        || id.contains("mother")
        || (id.contains("filiacao") && id.contains("materna"))
}

fn is_marital_status(id: &str) -> bool {
    contains_any(id, &["estadocivil", "estado_civil", "marital"])
        || (id.contains("civil") && id.contains("status"))
}

fn is_occupation(id: &str) -> bool {
    contains_any(id, &["profissao", "ocupacao", "occupation", "profession"])
        || (id.contains("atividade") && id.contains("profissional"))
}

fn is_family_income(id: &str) -> bool {
    id.contains("renda") || id.contains("income")
}
