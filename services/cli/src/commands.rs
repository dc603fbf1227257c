use crate::infra::{build_resolver, load_form, read_json};
use civic_prefill::error::AppError;
use civic_prefill::prefill::catalog::{CatalogAudit, CoverageReport};
use civic_prefill::prefill::{
    list_prefilled_field_ids, CitizenProfile, FieldMatch, FieldResolver, FormField,
    PrefillEvent, PrefillOptions, ResolvedValues,
};
use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ResolveArgs {
    /// Form definition (field array, `{"fields": [...]}` or JSON Schema)
    #[arg(long)]
    pub(crate) form: PathBuf,
    /// Citizen profile JSON; omit to get type defaults only
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// Include per-field classification events in the output
    #[arg(long)]
    pub(crate) trace: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Previously resolved values (field id to value)
    #[arg(long)]
    pub(crate) values: PathBuf,
    /// Current citizen profile JSON
    #[arg(long)]
    pub(crate) profile: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    /// Field ids to classify
    #[arg(required = true)]
    pub(crate) field_ids: Vec<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CoverageArgs {
    /// CSV with `service,field_id,kind` columns
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Print JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    /// Form order, not key order.
    values: Map<String, Value>,
    prefilled: Vec<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<PrefillEvent>>,
}

pub(crate) fn run_resolve(args: ResolveArgs, options: PrefillOptions) -> Result<(), AppError> {
    let ResolveArgs {
        form,
        profile,
        trace,
    } = args;

    let fields = load_form(&form)?;
    let profile: Option<CitizenProfile> = profile
        .as_deref()
        .map(read_json::<CitizenProfile>)
        .transpose()?;
    info!(
        form = %form.display(),
        fields = fields.len(),
        has_profile = profile.is_some(),
        "resolving form"
    );

    let (resolver, recorder) = build_resolver(options, trace);
    let values = resolver.resolve(&fields, profile.as_ref());
    let prefilled = list_prefilled_field_ids(&fields, &values);
    let message = resolver.describe_completeness(prefilled.len(), fields.len());

    let output = ResolveOutput {
        values: in_field_order(&fields, &values)?,
        prefilled,
        message,
        events: recorder.map(|recorder| recorder.events()),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) fn run_check(args: CheckArgs, options: PrefillOptions) -> Result<(), AppError> {
    let values: ResolvedValues = read_json(&args.values)?;
    let profile: CitizenProfile = read_json(&args.profile)?;

    let report = FieldResolver::new(options).check_still_valid(&values, &profile);
    info!(
        stored = values.len(),
        stale = report.stale_field_ids.len(),
        "checked saved values"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn run_explain(args: ExplainArgs, options: PrefillOptions) -> Result<(), AppError> {
    let resolver = FieldResolver::new(options);
    let decisions: Vec<FieldMatch> = args
        .field_ids
        .iter()
        .map(|field_id| resolver.explain(field_id))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decisions)?);
        return Ok(());
    }

    let width = decisions
        .iter()
        .flat_map(|decision| [&decision.field_id, &decision.normalized_id])
        .map(|id| id.chars().count())
        .max()
        .unwrap_or(0)
        .max("normalized".len());
    println!("{:<width$}  {:<width$}  attribute", "field", "normalized");
    for decision in &decisions {
        println!(
            "{:<width$}  {:<width$}  {}",
            decision.field_id,
            decision.normalized_id,
            describe_match(decision)
        );
    }
    Ok(())
}

pub(crate) fn run_coverage(args: CoverageArgs, options: PrefillOptions) -> Result<(), AppError> {
    let report = CatalogAudit::from_path(&args.catalog, &FieldResolver::new(options))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_coverage(&report);
    }
    Ok(())
}

fn in_field_order(
    fields: &[FormField],
    values: &ResolvedValues,
) -> Result<Map<String, Value>, serde_json::Error> {
    let mut ordered = Map::with_capacity(values.len());
    for field in fields {
        if let Some(value) = values.get(&field.id) {
            ordered.insert(field.id.clone(), serde_json::to_value(value)?);
        }
    }
    Ok(ordered)
}

pub(crate) fn describe_match(decision: &FieldMatch) -> String {
    match (decision.attribute, decision.tier) {
        (Some(attribute), Some(tier)) => format!("{attribute} ({})", tier.label()),
        _ => "-".to_string(),
    }
}

fn render_coverage(report: &CoverageReport) {
    println!("Field catalog coverage");
    println!(
        "  {} fields, {} distinct ids",
        report.total_fields, report.unique_ids
    );
    println!(
        "  direct: {}  semantic: {}  unclassified: {}  ({:.1}% covered)",
        report.direct,
        report.semantic,
        report.unclassified.len(),
        report.coverage_ratio() * 100.0
    );

    if !report.by_attribute.is_empty() {
        println!("\nBy attribute");
        for (attribute, count) in &report.by_attribute {
            println!("  {:<16} {count}", attribute.as_str());
        }
    }

    if !report.by_kind.is_empty() {
        println!("\nBy input kind");
        for (kind, count) in &report.by_kind {
            println!("  {:<16} {count}", kind.as_str());
        }
    }

    if !report.unclassified.is_empty() {
        println!("\nUnclassified ids");
        for field_id in &report.unclassified {
            println!("  {field_id}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_prefill::prefill::{CanonicalAttribute, FieldKind, FieldValue, MatchTier};

    #[test]
    fn describe_match_shows_attribute_and_tier() {
        let decision = FieldMatch {
            field_id: "emailDoGuardiao".to_string(),
            normalized_id: "emaildoguardiao".to_string(),
            attribute: Some(CanonicalAttribute::Email),
            tier: Some(MatchTier::Semantic),
        };
        assert_eq!(describe_match(&decision), "email (semantic)");

        let unknown = FieldMatch {
            attribute: None,
            tier: None,
            ..decision
        };
        assert_eq!(describe_match(&unknown), "-");
    }

    #[test]
    fn resolved_values_print_in_form_order() {
        let fields = vec![
            FormField::new("nome", FieldKind::Text),
            FormField::new("idade", FieldKind::Number),
            FormField::new("aceite", FieldKind::Checkbox),
        ];
        let values: ResolvedValues = fields
            .iter()
            .map(|field| (field.id.clone(), field.kind.default_value()))
            .chain([("nome".to_string(), FieldValue::Text("Ana".into()))])
            .collect();

        let ordered = in_field_order(&fields, &values).expect("values convert");

        assert_eq!(
            serde_json::to_string(&ordered).expect("map serializes"),
            r#"{"nome":"Ana","idade":0,"aceite":false}"#
        );
    }
}
