use std::collections::BTreeSet;

use super::normalizer::strip_diacritics;

/// Candidate family-name spellings of `full_name`: the last token and, for
/// names with at least two tokens, the last two tokens joined by a space.
///
/// Only diacritics and separators are handled here; umlaut spelling and
/// phonetic folding belong to [`normalize`](super::normalize). Every
/// character that is neither alphanumeric nor whitespace, symbols such as
/// `&` and `+` included, splits tokens, so hyphenated names split too.
pub fn last_name_variations(full_name: &str) -> BTreeSet<String> {
    let spaced: String = strip_diacritics(full_name)
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    let tokens: Vec<&str> = spaced.split_whitespace().collect();

    let mut variations = BTreeSet::new();
    match tokens.as_slice() {
        [] => {}
        [only] => {
            variations.insert((*only).to_string());
        }
        [.., second_last, last] => {
            variations.insert((*last).to_string());
            variations.insert(format!("{second_last} {last}"));
        }
    }
    variations
}

/// True when any last-name variation of one name equals one of the other,
/// ignoring case.
pub fn is_last_name_match(stored_name: &str, input_name: &str) -> bool {
    let stored: BTreeSet<String> = last_name_variations(stored_name)
        .into_iter()
        .map(|variant| variant.to_lowercase())
        .collect();

    last_name_variations(input_name)
        .iter()
        .any(|variant| stored.contains(&variant.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variations(name: &str) -> Vec<String> {
        last_name_variations(name).into_iter().collect()
    }

    #[test]
    fn empty_names_have_no_variations() {
        assert!(last_name_variations("").is_empty());
        assert!(last_name_variations(" - . ").is_empty());
    }

    #[test]
    fn single_token_yields_itself() {
        assert_eq!(variations("Karajan"), vec!["Karajan"]);
    }

    #[test]
    fn multi_token_yields_last_and_last_two() {
        assert_eq!(
            variations("Herbert von Karajan"),
            vec!["Karajan", "von Karajan"]
        );
    }

    #[test]
    fn symbols_split_tokens_like_punctuation() {
        assert_eq!(variations("Brahms&Joachim"), vec!["Brahms Joachim", "Joachim"]);
        assert_eq!(variations("Duo A+B"), vec!["A B", "B"]);
    }

    #[test]
    fn hyphens_split_tokens_and_diacritics_are_stripped() {
        assert_eq!(
            variations("Nikolai Rimsky-Korsakov"),
            vec!["Korsakov", "Rimsky Korsakov"]
        );
        assert_eq!(variations("Antonín Dvořák"), vec!["Antonin Dvorak", "Dvorak"]);
    }

    #[test]
    fn umlauts_are_not_spelled_out() {
        assert_eq!(variations("Müller"), vec!["Muller"]);
    }

    #[test]
    fn last_name_match_ignores_case() {
        assert!(is_last_name_match("Herbert von Karajan", "karajan"));
        assert!(is_last_name_match("KARAJAN", "Herbert von Karajan"));
        assert!(is_last_name_match("Nikolai Rimsky-Korsakov", "Korsakov"));
        assert!(is_last_name_match("Rimsky-Korsakov", "N. Rimsky Korsakov"));
    }

    #[test]
    fn first_names_alone_do_not_match() {
        assert!(!is_last_name_match("Herbert von Karajan", "Herbert"));
        assert!(!is_last_name_match("", "Karajan"));
        assert!(!is_last_name_match("Karajan", ""));
    }
}
