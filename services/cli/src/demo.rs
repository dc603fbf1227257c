use crate::commands::describe_match;
use clap::Args;
use civic_prefill::error::AppError;
use civic_prefill::prefill::{
    list_prefilled_field_ids, Address, CitizenProfile, FieldKind, FieldResolver, FieldValue,
    FormField, PrefillEvent, PrefillOptions, RecordingObserver,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Resolve the sample form without a profile (anonymous visitor)
    #[arg(long)]
    pub(crate) anonymous: bool,
    /// Skip the staleness check after the profile update
    #[arg(long)]
    pub(crate) skip_staleness: bool,
}

pub(crate) fn run_demo(args: DemoArgs, options: PrefillOptions) -> Result<(), AppError> {
    let DemoArgs {
        anonymous,
        skip_staleness,
    } = args;

    let fields = school_enrollment_form();
    let profile = sample_profile();
    let recorder = Arc::new(RecordingObserver::default());
    let resolver = FieldResolver::new(options).with_observer(recorder.clone());

    println!("Form pre-fill demo: Matrícula Escolar");
    let values = resolver.resolve(&fields, (!anonymous).then_some(&profile));
    let prefilled = list_prefilled_field_ids(&fields, &values);
    let events = recorder.events();

    println!();
    for field in &fields {
        let value = &values[&field.id];
        let badge = if prefilled.contains(&field.id) {
            "[auto]"
        } else {
            "      "
        };
        let label = field.label.as_deref().unwrap_or(&field.id);
        println!(
            "  {badge} {label:<32} {:<36} {}",
            render_value(value),
            decision_for(&resolver, &field.id, &events)
        );
    }
    println!(
        "\n{}",
        resolver.describe_completeness(prefilled.len(), fields.len())
    );

    if anonymous || skip_staleness {
        return Ok(());
    }

    let mut moved = profile.clone();
    moved.phone = Some("31977776666".to_string());
    if let Some(address) = moved.address.as_mut() {
        address.street = Some("Avenida Juscelino Kubitschek".to_string());
        address.number = Some("1200".to_string());
    }

    let report = resolver.check_still_valid(&values, &moved);
    println!("\nProfile updated (new phone and street)");
    if report.is_valid {
        println!("  saved values are still current");
    } else {
        println!(
            "  {} field(s) now differ from the profile: {}",
            report.stale_field_ids.len(),
            report.stale_field_ids.join(", ")
        );
    }

    Ok(())
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) if text.is_empty() => "\"\"".to_string(),
        FieldValue::Text(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Tier note for a field, with a select-mismatch hint when the recorder saw one.
fn decision_for(resolver: &FieldResolver, field_id: &str, events: &[PrefillEvent]) -> String {
    let decision = describe_match(&resolver.explain(field_id));
    let option_miss = events.iter().any(|event| {
        matches!(
            event,
            PrefillEvent::Prefilled { field_id: id, option_match: Some(false), .. } if id == field_id
        )
    });

    if option_miss {
        format!("{decision}, not among options")
    } else {
        decision
    }
}

fn school_enrollment_form() -> Vec<FormField> {
    let labelled = |id: &str, kind: FieldKind, label: &str| {
        let mut field = FormField::new(id, kind);
        field.label = Some(label.to_string());
        field
    };

    vec![
        labelled("guardianFullName", FieldKind::Text, "Nome do responsável").required(),
        labelled("guardianCpf", FieldKind::Text, "CPF do responsável").required(),
        labelled("guardianEmail", FieldKind::Email, "E-mail").required(),
        labelled("telefoneContato", FieldKind::Text, "Telefone para contato"),
        labelled("endereco", FieldKind::Textarea, "Endereço"),
        labelled("cep", FieldKind::Text, "CEP"),
        labelled("studentName", FieldKind::Text, "Nome do aluno"),
        labelled("studentBirthDate", FieldKind::Date, "Nascimento do aluno"),
        labelled("rendaFamiliar", FieldKind::Select, "Renda familiar").with_options([
            "Até 1 salário mínimo",
            "1 a 2 salários mínimos",
            "Acima de 2 salários mínimos",
        ]),
        labelled("serieDesejada", FieldKind::Select, "Série desejada")
            .with_options(["1º ano", "2º ano", "3º ano"]),
        labelled("aceiteTermos", FieldKind::Checkbox, "Aceito os termos"),
    ]
}

fn sample_profile() -> CitizenProfile {
    CitizenProfile {
        id: "demo-citizen".to_string(),
        legal_id: "12345678900".to_string(),
        full_name: "Maria Aparecida Silva".to_string(),
        email: "maria.silva@example.com".to_string(),
        phone: Some("31988887777".to_string()),
        birth_date: Some("1986-04-22T00:00:00.000Z".to_string()),
        family_income: Some("1 a 2 salários mínimos".to_string()),
        address: Some(Address {
            street: Some("Rua Direita".to_string()),
            number: Some("45".to_string()),
            neighborhood: Some("Centro".to_string()),
            city: Some("Ouro Preto".to_string()),
            state: Some("MG".to_string()),
            zip_code: Some("35400000".to_string()),
            ..Address::default()
        }),
        ..CitizenProfile::default()
    }
}
