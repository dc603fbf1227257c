use civic_prefill::error::AppError;
use civic_prefill::prefill::schema::parse_form_definition;
use civic_prefill::prefill::{
    FieldResolver, FormField, Locale, MatchScope, PrefillOptions, RecordingObserver,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

pub(crate) fn parse_scope(raw: &str) -> Result<MatchScope, String> {
    MatchScope::parse(raw).ok_or_else(|| format!("unknown scope '{raw}' (expected all or citizen)"))
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("unknown locale '{raw}' (expected pt-BR or en)"))
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_form(path: &Path) -> Result<Vec<FormField>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_form_definition(&raw)?)
}

/// Resolver wired to an in-memory recorder when `trace` is set.
pub(crate) fn build_resolver(
    options: PrefillOptions,
    trace: bool,
) -> (FieldResolver, Option<Arc<RecordingObserver>>) {
    let resolver = FieldResolver::new(options);
    if !trace {
        return (resolver, None);
    }

    let recorder = Arc::new(RecordingObserver::default());
    (resolver.with_observer(recorder.clone()), Some(recorder))
}
