//! Coverage audit over the field ids used across a service catalog.

use super::domain::{CanonicalAttribute, FieldKind, MatchTier};
use super::FieldResolver;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read field catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid field catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("field catalog row {row} has an empty service or field id")]
    BlankRow { row: usize },
}

/// One catalog row: a field used by a service form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub service: String,
    pub field_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub kind: Option<FieldKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub total_fields: usize,
    pub unique_ids: usize,
    pub direct: usize,
    pub semantic: usize,
    pub unclassified: Vec<String>,
    pub by_attribute: BTreeMap<CanonicalAttribute, usize>,
    /// Rows per declared input kind; rows without a kind are not counted.
    pub by_kind: BTreeMap<FieldKind, usize>,
}

impl CoverageReport {
    /// Share of catalog rows that resolve to some attribute.
    pub fn coverage_ratio(&self) -> f32 {
        if self.total_fields == 0 {
            return 0.0;
        }
        (self.direct + self.semantic) as f32 / self.total_fields as f32
    }
}

pub struct CatalogAudit;

impl CatalogAudit {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        resolver: &FieldResolver,
    ) -> Result<CoverageReport, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, resolver)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        resolver: &FieldResolver,
    ) -> Result<CoverageReport, CatalogError> {
        let entries = parse_entries(reader)?;
        Ok(Self::audit(&entries, resolver))
    }

    pub fn audit(entries: &[CatalogEntry], resolver: &FieldResolver) -> CoverageReport {
        let mut report = CoverageReport {
            total_fields: entries.len(),
            ..CoverageReport::default()
        };
        let mut unique = BTreeSet::new();
        let mut unclassified = BTreeSet::new();

        for entry in entries {
            let decision = resolver.explain(&entry.field_id);
            unique.insert(decision.normalized_id.clone());
            if let Some(kind) = entry.kind {
                *report.by_kind.entry(kind).or_insert(0) += 1;
            }

            match (decision.attribute, decision.tier) {
                (Some(attribute), Some(tier)) => {
                    match tier {
                        MatchTier::Direct => report.direct += 1,
                        MatchTier::Semantic => report.semantic += 1,
                    }
                    *report.by_attribute.entry(attribute).or_insert(0) += 1;
                }
                _ => {
                    unclassified.insert(entry.field_id.clone());
                }
            }
        }

        report.unique_ids = unique.len();
        report.unclassified = unclassified.into_iter().collect();

        tracing::info!(
            total = report.total_fields,
            direct = report.direct,
            semantic = report.semantic,
            unclassified = report.unclassified.len(),
            "field catalog audited"
        );

        report
    }
}

fn parse_entries<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (index, record) in csv_reader.deserialize::<CatalogEntry>().enumerate() {
        let entry = record?;
        if entry.service.is_empty() || entry.field_id.is_empty() {
            // 1-based data row, header excluded
            return Err(CatalogError::BlankRow { row: index + 1 });
        }
        entries.push(entry);
    }
    Ok(entries)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<FieldKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(kind) => FieldKind::deserialize(serde::de::value::StrDeserializer::<D::Error>::new(
            kind,
        ))
        .map(Some),
    }
}
