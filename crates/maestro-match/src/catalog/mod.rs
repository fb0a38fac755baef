//! In-memory master data for composers, conductors, orchestras, soloists,
//! venues and works, with fuzzy find-or-create on top of [`NameMatcher`].

mod dedupe;
pub mod domain;
mod importer;

pub use dedupe::{DuplicateGroup, DuplicateLink};
pub use domain::{CatalogEntry, CatalogMatch, EntityKind, EntryId, Resolution, UnknownEntityKind};
pub use importer::{CatalogImportError, CatalogImporter};

pub(crate) use importer::empty_string_as_none;

use crate::matching::{MatchReason, NameMatcher};

#[derive(Debug, Clone, Default)]
pub struct NameCatalog {
    matcher: NameMatcher,
    entries: Vec<CatalogEntry>,
}

impl NameCatalog {
    pub fn new(matcher: NameMatcher) -> Self {
        Self {
            matcher,
            entries: Vec::new(),
        }
    }

    pub fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entries_of(&self, kind: EntityKind) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&CatalogEntry> {
        let index = id.0.checked_sub(1)? as usize;
        self.entries.get(index)
    }

    /// Stores `name` verbatim (trimmed) without checking for duplicates.
    pub fn insert(&mut self, kind: EntityKind, name: &str, parent: Option<EntryId>) -> EntryId {
        let id = EntryId(self.entries.len() as u32 + 1);
        self.entries.push(CatalogEntry {
            id,
            kind,
            name: name.trim().to_string(),
            parent,
        });
        id
    }

    /// Every entry of `kind` matching `name`, strongest evidence first, then
    /// by id.
    pub fn candidates(&self, kind: EntityKind, name: &str) -> Vec<CatalogMatch> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<CatalogMatch> = self
            .entries_of(kind)
            .filter_map(|entry| {
                self.reason_for(kind, &entry.name, name)
                    .map(|reason| CatalogMatch {
                        entry: entry.clone(),
                        reason,
                    })
            })
            .collect();
        matches.sort_by_key(|found| (found.reason.rank(), found.entry.id));
        matches
    }

    pub fn lookup(&self, kind: EntityKind, name: &str) -> Option<CatalogMatch> {
        self.candidates(kind, name).into_iter().next()
    }

    /// Finds the best existing entry for `name` or inserts a new one.
    /// Blank names resolve to nothing.
    pub fn resolve(&mut self, kind: EntityKind, name: &str) -> Option<Resolution> {
        if kind == EntityKind::Work {
            return self.resolve_work(name, None);
        }

        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        if let Some(found) = self.lookup(kind, name) {
            return Some(Resolution::Existing(found));
        }

        let id = self.insert(kind, name, None);
        Some(Resolution::Created { id })
    }

    /// Works are keyed by title and composer. Without a composer any work of
    /// that title is reused.
    pub fn resolve_work(&mut self, title: &str, composer: Option<EntryId>) -> Option<Resolution> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let existing = self.entries_of(EntityKind::Work).find(|entry| {
            entry.name.to_lowercase() == title.to_lowercase()
                && (composer.is_none() || entry.parent == composer)
        });

        if let Some(entry) = existing {
            return Some(Resolution::Existing(CatalogMatch {
                entry: entry.clone(),
                reason: MatchReason::Identical,
            }));
        }

        let id = self.insert(EntityKind::Work, title, composer);
        Some(Resolution::Created { id })
    }

    fn reason_for(&self, kind: EntityKind, stored: &str, input: &str) -> Option<MatchReason> {
        if kind.is_fuzzy() {
            self.matcher.explain(stored, input)
        } else {
            (stored.to_lowercase() == input.to_lowercase()).then_some(MatchReason::Identical)
        }
    }
}
