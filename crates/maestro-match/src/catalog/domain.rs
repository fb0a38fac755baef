use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::matching::MatchReason;

/// Master-data tables a concert record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Composer,
    Conductor,
    Orchestra,
    Soloist,
    Venue,
    Work,
}

impl EntityKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Composer,
            Self::Conductor,
            Self::Orchestra,
            Self::Soloist,
            Self::Venue,
            Self::Work,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Composer => "Composer",
            Self::Conductor => "Conductor",
            Self::Orchestra => "Orchestra",
            Self::Soloist => "Soloist",
            Self::Venue => "Venue",
            Self::Work => "Work",
        }
    }

    /// Work titles are compared exactly; "Symphony No. 5" and "Symphony
    /// No. 6" are one edit apart.
    pub const fn is_fuzzy(self) -> bool {
        !matches!(self, Self::Work)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "composer" | "komponist" => Ok(Self::Composer),
            "conductor" | "dirigent" => Ok(Self::Conductor),
            "orchestra" | "orchester" => Ok(Self::Orchestra),
            "soloist" | "solist" => Ok(Self::Soloist),
            "venue" | "ort" => Ok(Self::Venue),
            "work" | "werk" => Ok(Self::Work),
            _ => Err(UnknownEntityKind(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind '{0}'")]
pub struct UnknownEntityKind(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stored master-data row. `parent` links a work to its composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub kind: EntityKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntryId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogMatch {
    pub entry: CatalogEntry,
    pub reason: MatchReason,
}

/// Outcome of a find-or-create lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    Existing(CatalogMatch),
    Created { id: EntryId },
}

impl Resolution {
    pub fn id(&self) -> EntryId {
        match self {
            Resolution::Existing(found) => found.entry.id,
            Resolution::Created { id } => *id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Resolution::Created { .. })
    }
}
