//! Consolidates legacy free-text concert rows into catalog entries.

mod parser;

pub use parser::LegacyConcertRow;

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::catalog::{EntityKind, EntryId, NameCatalog, Resolution};
use crate::matching::MatchReason;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to read legacy export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid legacy CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog already holds works; legacy data looks migrated")]
    AlreadyMigrated,
    #[error("legacy row {row}: unrecognized date '{value}'")]
    InvalidDate { row: usize, value: String },
}

/// Concert record referring to catalog entries instead of free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcertRecord {
    pub date: Option<NaiveDate>,
    pub title: String,
    pub orchestra: Option<EntryId>,
    pub conductor: Option<EntryId>,
    pub soloists: Vec<EntryId>,
    pub works: Vec<EntryId>,
    pub rating: String,
}

/// A legacy spelling folded into an entry stored under another spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeNote {
    pub kind: EntityKind,
    pub input: String,
    pub matched: String,
    pub reason: MatchReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub records: Vec<ConcertRecord>,
    pub created: BTreeMap<EntityKind, usize>,
    pub merges: Vec<MergeNote>,
}

impl MigrationReport {
    pub fn created_for(&self, kind: EntityKind) -> usize {
        self.created.get(&kind).copied().unwrap_or(0)
    }

    pub fn created_total(&self) -> usize {
        self.created.values().sum()
    }
}

pub struct LegacyMigrator;

impl LegacyMigrator {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &mut NameCatalog,
    ) -> Result<MigrationReport, MigrationError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &mut NameCatalog,
    ) -> Result<MigrationReport, MigrationError> {
        let rows = parser::parse_rows(reader)?;
        Self::migrate(catalog, rows)
    }

    /// Resolves every legacy name through the catalog, reusing entries the
    /// matcher accepts and creating the rest.
    ///
    /// Refuses to run against a catalog that already contains works. Fails
    /// without touching the catalog when any row carries an invalid date.
    pub fn migrate(
        catalog: &mut NameCatalog,
        rows: Vec<LegacyConcertRow>,
    ) -> Result<MigrationReport, MigrationError> {
        let mut report = MigrationReport::default();
        if rows.is_empty() {
            return Ok(report);
        }
        if catalog.entries_of(EntityKind::Work).next().is_some() {
            return Err(MigrationError::AlreadyMigrated);
        }

        // Every row is validated before the catalog changes, so a bad date
        // leaves it untouched.
        let dates = rows
            .iter()
            .enumerate()
            .map(|(index, row)| row_date(index + 1, row))
            .collect::<Result<Vec<_>, _>>()?;

        for (row, date) in rows.into_iter().zip(dates) {
            let orchestra = resolve_into(
                catalog,
                &mut report,
                EntityKind::Orchestra,
                row.orchestra.as_deref(),
            );
            let conductor = resolve_into(
                catalog,
                &mut report,
                EntityKind::Conductor,
                row.conductor.as_deref(),
            );
            // Legacy rows carry a single soloist.
            let soloists = resolve_into(
                catalog,
                &mut report,
                EntityKind::Soloist,
                row.soloist.as_deref(),
            )
            .into_iter()
            .collect();
            let composer = resolve_into(
                catalog,
                &mut report,
                EntityKind::Composer,
                row.composer.as_deref(),
            );

            let works: Vec<EntryId> = match row.work.as_deref() {
                Some(title) => catalog
                    .resolve_work(title, composer)
                    .map(|resolution| {
                        record_resolution(&mut report, EntityKind::Work, title, &resolution)
                    })
                    .into_iter()
                    .collect(),
                None => Vec::new(),
            };

            let title = row
                .title
                .or_else(|| row.work.clone())
                .unwrap_or_default();

            report.records.push(ConcertRecord {
                date,
                title,
                orchestra,
                conductor,
                soloists,
                works,
                rating: merge_ratings(row.rating1.as_deref(), row.rating2.as_deref()),
            });
        }

        info!(
            records = report.records.len(),
            created = report.created_total(),
            merged = report.merges.len(),
            "legacy migration finished"
        );
        Ok(report)
    }
}

fn row_date(row: usize, legacy: &LegacyConcertRow) -> Result<Option<NaiveDate>, MigrationError> {
    legacy
        .date
        .as_deref()
        .map(|raw| {
            parser::parse_date(raw).ok_or_else(|| MigrationError::InvalidDate {
                row,
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn resolve_into(
    catalog: &mut NameCatalog,
    report: &mut MigrationReport,
    kind: EntityKind,
    raw: Option<&str>,
) -> Option<EntryId> {
    let input = raw?;
    let resolution = catalog.resolve(kind, input)?;
    Some(record_resolution(report, kind, input, &resolution))
}

fn record_resolution(
    report: &mut MigrationReport,
    kind: EntityKind,
    input: &str,
    resolution: &Resolution,
) -> EntryId {
    match resolution {
        Resolution::Created { id } => {
            *report.created.entry(kind).or_default() += 1;
            *id
        }
        Resolution::Existing(found) => {
            let input = input.trim();
            if found.entry.name != input {
                debug!(
                    kind = kind.label(),
                    input,
                    matched = %found.entry.name,
                    reason = found.reason.label(),
                    "legacy name folded into existing entry"
                );
                report.merges.push(MergeNote {
                    kind,
                    input: input.to_string(),
                    matched: found.entry.name.clone(),
                    reason: found.reason,
                });
            }
            found.entry.id
        }
    }
}

fn merge_ratings(first: Option<&str>, second: Option<&str>) -> String {
    [first, second]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
