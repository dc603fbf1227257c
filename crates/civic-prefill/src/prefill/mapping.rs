use super::domain::CanonicalAttribute;
use super::normalizer::normalize_field_id;
use std::collections::HashMap;
use std::sync::OnceLock;

static DIRECT_FIELD_MAP: OnceLock<HashMap<String, CanonicalAttribute>> = OnceLock::new();

/// Exact lookup of an already normalized field id.
pub(crate) fn attribute_for_normalized(normalized_id: &str) -> Option<CanonicalAttribute> {
    direct_field_map().get(normalized_id).copied()
}

fn direct_field_map() -> &'static HashMap<String, CanonicalAttribute> {
    DIRECT_FIELD_MAP.get_or_init(|| {
        use CanonicalAttribute::*;

        const ID_TO_ATTRIBUTE: &[(CanonicalAttribute, &[&str])] = &[
            (
                Name,
                &[
                    "citizen_name",
                    "nome",
                    "name",
                    "nome_completo",
                    "nomecompleto",
                    "full_name",
                    "fullname",
                    // "<role>Name" forms used across service catalogs
                    "applicantname",
                    "requestername",
                    "requestorname",
                    "reportername",
                    "complainantname",
                    "ownername",
                    "responsiblename",
                    "proposername",
                    "username",
                    "personname",
                    "contactname",
                    "parentname",
                    "participantname",
                    "studentname",
                    "athletename",
                    "producername",
                    "artisanname",
                    "organizername",
                    "coordinatorname",
                    "architectname",
                    "engineername",
                    "surveyorname",
                    "guidename",
                    "visitorname",
                    "solicitante",
                    "requerente",
                    "responsavel",
                    "declarante",
                    "denunciante",
                    "proprietario",
                    "titular",
                ],
            ),
            // CPF/CNPJ ids get the citizen's CPF: only natural persons file here.
            (
                LegalId,
                &[
                    "citizen_cpf",
                    "cpf",
                    "documento",
                    "document",
                    "doc",
                    "cpf_cnpj",
                    "cpfcnpj",
                    "cpfoucnpj",
                    "cpf_ou_cnpj",
                    "applicantcpf",
                    "requestercpf",
                    "reportercpf",
                    "complainantcpf",
                    "ownercpf",
                    "responsiblecpf",
                    "usercpf",
                    "studentcpf",
                    "parentcpf",
                    "participantcpf",
                    "athletecpf",
                    "producercpf",
                    "artisancpf",
                    "coordinatorcpf",
                    "cpf_solicitante",
                    "cpf_requerente",
                    "cpf_responsavel",
                    "cpf_proprietario",
                    "cpf_declarante",
                ],
            ),
            (
                NationalId,
                &[
                    "citizen_rg",
                    "rg",
                    "identidade",
                    "carteira_identidade",
                    "numero_rg",
                    "rg_numero",
                    "applicantrg",
                    "requesterrg",
                    "reporterrg",
                    "ownerrg",
                    "responsiblerg",
                    "userrg",
                    "studentrg",
                    "parentrg",
                    "participantrg",
                ],
            ),
            (
                BirthDate,
                &[
                    "citizen_birthdate",
                    "datanascimento",
                    "data_nascimento",
                    "data_de_nascimento",
                    "birthdate",
                    "birth_date",
                    "nascimento",
                    "dtnascimento",
                    "dt_nascimento",
                    "dateofbirth",
                    "date_of_birth",
                    "applicantbirthdate",
                    "requesterbirthdate",
                    "studentbirthdate",
                    "participantbirthdate",
                ],
            ),
            (
                MotherName,
                &[
                    "citizen_mothername",
                    "nomemae",
                    "nome_mae",
                    "mothername",
                    "mother_name",
                    "mae",
                    "nome_da_mae",
                    "nomedamae",
                    "nomecompletomae",
                    "nome_completo_mae",
                    "filiacao_materna",
                    "filiacaomaterna",
                ],
            ),
            (
                MaritalStatus,
                &[
                    "citizen_maritalstatus",
                    "estadocivil",
                    "estado_civil",
                    "maritalstatus",
                    "marital_status",
                    "civilstatus",
                    "civil_status",
                ],
            ),
            (
                Occupation,
                &[
                    "citizen_occupation",
                    "profissao",
                    "ocupacao",
                    "occupation",
                    "profession",
                    "atividade",
                    "atividade_profissional",
                    "atividadeprofissional",
                    "cargo",
                ],
            ),
            (
                FamilyIncome,
                &[
                    "citizen_familyincome",
                    "rendafamiliar",
                    "renda_familiar",
                    "familyincome",
                    "family_income",
                    "renda",
                    "renda_mensal",
                    "rendamensal",
                    "income",
                ],
            ),
            (
                PhoneSecondary,
                &[
                    "citizen_phonesecondary",
                    "telefonesecundario",
                    "telefone_secundario",
                    "secondaryphone",
                    "secondary_phone",
                    "telefone2",
                    "telefone_2",
                    "phone2",
                    "phone_2",
                    "celular2",
                    "celular_2",
                    "telefone_alternativo",
                    "telefonealternativo",
                    "alternativephone",
                    "alternative_phone",
                    "phonesecondary",
                    "applicantphonesecondary",
                    "requesterphonesecondary",
                ],
            ),
            (
                Email,
                &[
                    "citizen_email",
                    "email",
                    "e-mail",
                    "mail",
                    "correio",
                    "applicantemail",
                    "requesteremail",
                    "reporteremail",
                    "complainantemail",
                    "owneremail",
                    "responsibleemail",
                    "useremail",
                    "studentemail",
                    "parentemail",
                    "participantemail",
                    "athleteemail",
                    "produceremail",
                    "artisanemail",
                    "coordinatoremail",
                    "contactemail",
                    "email_contato",
                    "email_solicitante",
                    "email_responsavel",
                    "emailcontato",
                    "contatoemail",
                ],
            ),
            (
                Phone,
                &[
                    "citizen_phone",
                    "telefone",
                    "phone",
                    "celular",
                    "fone",
                    "tel",
                    "contato",
                    "mobile",
                    "applicantphone",
                    "requesterphone",
                    "reporterphone",
                    "complainantphone",
                    "ownerphone",
                    "responsiblephone",
                    "userphone",
                    "studentphone",
                    "parentphone",
                    "participantphone",
                    "athletephone",
                    "producerphone",
                    "artisanphone",
                    "coordinatorphone",
                    "contactphone",
                    "emergencyphone",
                    "telefone_contato",
                    "telefone_celular",
                    "telefone_solicitante",
                    "telefone_responsavel",
                    "phonecontact",
                    "contatotelefone",
                ],
            ),
            (
                FullAddress,
                &[
                    "endereco",
                    "address",
                    "endereco_completo",
                    "fulladdress",
                    "full_address",
                    "applicantaddress",
                    "useraddress",
                    "studentaddress",
                    "artisanaddress",
                ],
            ),
            (
                Street,
                &[
                    "citizen_address",
                    "citizen_street",
                    "rua",
                    "logradouro",
                    "street",
                    "endereco_rua",
                    "via",
                ],
            ),
            (
                Number,
                &[
                    "citizen_addressnumber",
                    "numero",
                    "number",
                    "endereco_numero",
                    "num",
                ],
            ),
            (
                Complement,
                &[
                    "citizen_addresscomplement",
                    "complemento",
                    "complement",
                    "endereco_complemento",
                    "compl",
                ],
            ),
            (
                Neighborhood,
                &[
                    "citizen_neighborhood",
                    "bairro",
                    "neighborhood",
                    "neighbourhood",
                    "endereco_bairro",
                    "distrito",
                ],
            ),
            (
                City,
                &[
                    "citizen_city",
                    "cidade",
                    "city",
                    "municipio",
                    "endereco_cidade",
                    "localidade",
                ],
            ),
            (
                State,
                &[
                    "citizen_state",
                    "estado",
                    "state",
                    "uf",
                    "endereco_estado",
                ],
            ),
            (
                ZipCode,
                &[
                    "citizen_zipcode",
                    "cep",
                    "zipcode",
                    "zip_code",
                    "codigo_postal",
                    "endereco_cep",
                    "postalcode",
                ],
            ),
            (
                ReferencePoint,
                &[
                    "citizen_referencepoint",
                    "pontoreferencia",
                    "ponto_referencia",
                    "referencepoint",
                    "reference_point",
                    "referencia",
                    "endereco_referencia",
                ],
            ),
        ];

        let capacity = ID_TO_ATTRIBUTE.iter().map(|(_, ids)| ids.len()).sum();
        let mut map = HashMap::with_capacity(capacity);
        for (attribute, ids) in ID_TO_ATTRIBUTE {
            for id in *ids {
                map.insert(normalize_field_id(id), *attribute);
            }
        }
        map
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(field_id: &str) -> Option<CanonicalAttribute> {
    attribute_for_normalized(&normalize_field_id(field_id))
}
