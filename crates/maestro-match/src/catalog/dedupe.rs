use serde::Serialize;
use std::collections::BTreeMap;

use super::{CatalogEntry, EntityKind, EntryId, NameCatalog};
use crate::matching::MatchReason;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateLink {
    pub left: EntryId,
    pub right: EntryId,
    pub reason: MatchReason,
}

/// Entries that the matcher connects, directly or through each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub kind: EntityKind,
    pub members: Vec<CatalogEntry>,
    pub links: Vec<DuplicateLink>,
}

impl NameCatalog {
    /// Connected components of the pairwise match relation among entries of
    /// `kind`. Singletons are omitted; groups come ordered by smallest id.
    pub fn duplicate_groups(&self, kind: EntityKind) -> Vec<DuplicateGroup> {
        let entries: Vec<&CatalogEntry> = self.entries_of(kind).collect();
        let mut parents: Vec<usize> = (0..entries.len()).collect();
        let mut links = Vec::new();

        for left in 0..entries.len() {
            for right in (left + 1)..entries.len() {
                if let Some(reason) =
                    self.reason_for(kind, &entries[left].name, &entries[right].name)
                {
                    links.push((left, right, reason));
                    union(&mut parents, left, right);
                }
            }
        }

        let mut groups: BTreeMap<usize, DuplicateGroup> = BTreeMap::new();
        for index in 0..entries.len() {
            let root = find(&mut parents, index);
            groups
                .entry(root)
                .or_insert_with(|| DuplicateGroup {
                    kind,
                    members: Vec::new(),
                    links: Vec::new(),
                })
                .members
                .push(entries[index].clone());
        }

        for (left, right, reason) in links {
            let root = find(&mut parents, left);
            if let Some(group) = groups.get_mut(&root) {
                group.links.push(DuplicateLink {
                    left: entries[left].id,
                    right: entries[right].id,
                    reason,
                });
            }
        }

        groups
            .into_values()
            .filter(|group| group.members.len() > 1)
            .collect()
    }
}

fn find(parents: &mut [usize], index: usize) -> usize {
    let mut root = index;
    while parents[root] != root {
        root = parents[root];
    }

    let mut current = index;
    while parents[current] != root {
        let next = parents[current];
        parents[current] = root;
        current = next;
    }
    root
}

/// Keeps the smaller index as root so roots sort like their groups.
fn union(parents: &mut [usize], left: usize, right: usize) {
    let left = find(parents, left);
    let right = find(parents, right);
    if left != right {
        parents[left.max(right)] = left.min(right);
    }
}
