use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::{EntityKind, NameCatalog, UnknownEntityKind};
use crate::matching::NameMatcher;

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {row}: {source}")]
    UnknownKind {
        row: usize,
        #[source]
        source: UnknownEntityKind,
    },
}

/// Loads master data from a `Kind,Name[,Composer]` CSV export.
///
/// Rows are stored as-is so that existing duplicates stay visible to
/// [`NameCatalog::duplicate_groups`]. A work's composer column is resolved
/// against the composers loaded so far.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        matcher: NameMatcher,
    ) -> Result<NameCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, matcher)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        matcher: NameMatcher,
    ) -> Result<NameCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut catalog = NameCatalog::new(matcher);
        let mut skipped = 0usize;

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = record?;
            let row_number = index + 1;
            let kind: EntityKind = row
                .kind
                .parse()
                .map_err(|source| CatalogImportError::UnknownKind {
                    row: row_number,
                    source,
                })?;

            let Some(name) = row.name else {
                debug!(row = row_number, "skipping catalog row without a name");
                skipped += 1;
                continue;
            };

            let parent = match (kind, row.composer.as_deref()) {
                (EntityKind::Work, Some(composer)) => catalog
                    .resolve(EntityKind::Composer, composer)
                    .map(|resolution| resolution.id()),
                _ => None,
            };
            catalog.insert(kind, &name, parent);
        }

        info!(entries = catalog.len(), skipped, "catalog loaded");
        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Kind", alias = "kind", alias = "Typ")]
    kind: String,
    #[serde(
        rename = "Name",
        alias = "name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    name: Option<String>,
    #[serde(
        rename = "Composer",
        alias = "composer",
        alias = "Komponist",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    composer: Option<String>,
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
