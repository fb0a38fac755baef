use serde::{Deserialize, Serialize};
use tracing::trace;

use super::distance::levenshtein_distance;
use super::last_name::is_last_name_match;
use super::normalizer::normalize;
use crate::config::MatchingConfig;

/// Longest normalized name, in characters, still compared by edit distance.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 256;

/// Rule that made two names count as the same entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MatchReason {
    Identical,
    LastName,
    Normalized,
    Fuzzy { distance: usize, tolerance: usize },
}

impl MatchReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identical => "identical",
            Self::LastName => "last name",
            Self::Normalized => "normalized spelling",
            Self::Fuzzy { .. } => "similar spelling",
        }
    }

    /// Sort key for ranking candidates, strongest evidence first.
    pub(crate) const fn rank(self) -> (u8, usize) {
        match self {
            Self::Identical => (0, 0),
            Self::Normalized => (1, 0),
            Self::LastName => (2, 0),
            Self::Fuzzy { distance, .. } => (3, distance),
        }
    }
}

/// Edit distance allowed for a normalized name of `len` characters.
pub const fn tolerance_for(len: usize) -> usize {
    match len {
        0..=4 => 0,
        5..=8 => 1,
        _ => 2,
    }
}

/// Fuzzy equality policy for composer, conductor, orchestra, soloist and
/// venue names.
///
/// Rules are tried in a fixed order: case-insensitive equality, last-name
/// variants, normalized equality, then Levenshtein distance over the
/// normalized forms with a length-scaled tolerance. Last-name matching must
/// stay ahead of normalization: swapping them changes which short last
/// names match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatcher {
    max_input_chars: usize,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_CHARS)
    }
}

impl NameMatcher {
    pub const fn new(max_input_chars: usize) -> Self {
        Self { max_input_chars }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.max_input_chars)
    }

    pub const fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    pub fn is_match(&self, left: &str, right: &str) -> bool {
        self.explain(left, right).is_some()
    }

    /// Same decision as [`is_match`](Self::is_match), reporting the rule
    /// that fired.
    pub fn explain(&self, left: &str, right: &str) -> Option<MatchReason> {
        if left.trim().is_empty() || right.trim().is_empty() {
            return None;
        }

        if left.to_lowercase() == right.to_lowercase() {
            return Some(MatchReason::Identical);
        }

        if is_last_name_match(left, right) {
            return Some(MatchReason::LastName);
        }

        let left = normalize(left);
        let right = normalize(right);
        if left == right {
            return Some(MatchReason::Normalized);
        }

        self.within_tolerance(&left, &right)
    }

    /// Candidates matching `name`, strongest first. Ties keep input order.
    pub fn best_matches<'a, I>(&self, name: &str, candidates: I) -> Vec<(&'a str, MatchReason)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut matches: Vec<(&'a str, MatchReason)> = candidates
            .into_iter()
            .filter_map(|candidate| {
                self.explain(candidate, name)
                    .map(|reason| (candidate, reason))
            })
            .collect();
        matches.sort_by_key(|(_, reason)| reason.rank());
        matches
    }

    fn within_tolerance(&self, left: &str, right: &str) -> Option<MatchReason> {
        let left_len = left.chars().count();
        let right_len = right.chars().count();
        let len = left_len.max(right_len);

        if len > self.max_input_chars {
            trace!(len, limit = self.max_input_chars, "name too long for edit distance");
            return None;
        }

        let tolerance = tolerance_for(len);
        if tolerance == 0 || left_len.abs_diff(right_len) > tolerance {
            return None;
        }
        if initials_conflict(left, right) {
            return None;
        }

        let distance = levenshtein_distance(left, right);
        (distance <= tolerance).then_some(MatchReason::Fuzzy {
            distance,
            tolerance,
        })
    }
}

/// Names of the same shape that differ in a single-letter token, such as
/// `ort a` and `ort b`, are never typos of each other.
fn initials_conflict(left: &str, right: &str) -> bool {
    let left: Vec<&str> = left.split(' ').collect();
    let right: Vec<&str> = right.split(' ').collect();

    left.len() == right.len()
        && left.iter().zip(&right).any(|(l, r)| {
            l != r && l.chars().count() == 1 && r.chars().count() == 1
        })
}
