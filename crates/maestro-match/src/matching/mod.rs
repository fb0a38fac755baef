//! Fuzzy equality for human and ensemble names.
//!
//! The free functions use the default [`NameMatcher`] policy; construct a
//! matcher from [`MatchingConfig`](crate::config::MatchingConfig) to apply
//! a configured input-size limit.

mod distance;
mod last_name;
mod matcher;
mod normalizer;
pub mod router;

pub use distance::levenshtein_distance;
pub use last_name::{is_last_name_match, last_name_variations};
pub use matcher::{tolerance_for, MatchReason, NameMatcher, DEFAULT_MAX_INPUT_CHARS};
pub use normalizer::normalize;
pub use router::name_router;

pub fn is_match(left: &str, right: &str) -> bool {
    NameMatcher::default().is_match(left, right)
}
