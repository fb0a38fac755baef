pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod migration;
pub mod telemetry;

pub use matching::{
    is_last_name_match, is_match, last_name_variations, levenshtein_distance, normalize,
    MatchReason, NameMatcher,
};
