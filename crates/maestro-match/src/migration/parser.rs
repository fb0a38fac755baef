use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::io::Read;

use crate::catalog::empty_string_as_none;

/// One concert from the legacy single-table export, free-text columns only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LegacyConcertRow {
    #[serde(
        rename = "Date",
        alias = "Datum",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub date: Option<String>,
    #[serde(
        rename = "Title",
        alias = "Bezeichnung",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub title: Option<String>,
    #[serde(
        rename = "Orchestra",
        alias = "Orchester",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub orchestra: Option<String>,
    #[serde(
        rename = "Conductor",
        alias = "Dirigent",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub conductor: Option<String>,
    #[serde(
        rename = "Soloist",
        alias = "Solist",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub soloist: Option<String>,
    #[serde(
        rename = "Composer",
        alias = "Komponist",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub composer: Option<String>,
    #[serde(
        rename = "Work",
        alias = "Werk",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub work: Option<String>,
    #[serde(
        rename = "Rating1",
        alias = "Bewertung1",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub rating1: Option<String>,
    #[serde(
        rename = "Rating2",
        alias = "Bewertung2",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub rating2: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<LegacyConcertRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<LegacyConcertRow>()
        .collect::<Result<Vec<_>, _>>()
}

/// Accepts RFC 3339 timestamps, ISO dates and German `DD.MM.YYYY` dates.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    ["%Y-%m-%d", "%d.%m.%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}
