//! Candidate normalization, validation and deduplication.
//!
//! Each candidate goes through, in order:
//!
//! 1. trim, skipping empty results
//! 2. prefix `#` when missing
//! 3. collapse internal whitespace runs into `_`
//! 4. match against [`HASHTAG_PATTERN`]; non-matching candidates are dropped
//! 5. case-insensitive dedup, keeping the first spelling seen
//! 6. stop once `count` hashtags have been accepted
//!
//! Sanitizing never fails. A short result is the caller's concern.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::schema::HASHTAG_PATTERN;

lazy_static! {
    static ref HASHTAG_RE: Regex =
        Regex::new(HASHTAG_PATTERN).expect("hashtag pattern is valid");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

/// Check a string against the hashtag grammar.
pub fn is_valid_hashtag(tag: &str) -> bool {
    HASHTAG_RE.is_match(tag)
}

/// Apply the repair steps (trim, `#` prefix, whitespace collapse) to one candidate.
///
/// Returns `None` for candidates that are empty after trimming. The result is
/// not yet checked against the grammar.
pub fn normalize(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }

    let prefixed = if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    };

    Some(WHITESPACE_RE.replace_all(&prefixed, "_").into_owned())
}

/// Turn raw candidates into at most `count` valid, case-insensitively unique hashtags.
pub fn sanitize<S: AsRef<str>>(candidates: &[S], count: usize) -> Vec<String> {
    let mut accepted = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);

    for candidate in candidates {
        if accepted.len() >= count {
            break;
        }

        let Some(tag) = normalize(candidate.as_ref()) else {
            continue;
        };

        if !is_valid_hashtag(&tag) {
            tracing::trace!(candidate = candidate.as_ref(), "dropping invalid hashtag");
            continue;
        }

        if seen.insert(tag.to_lowercase()) {
            accepted.push(tag);
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grammar() {
        assert!(is_valid_hashtag("#sol"));
        assert!(is_valid_hashtag("#DiaDeSol"));
        assert!(is_valid_hashtag("#dia_de_sol"));
        assert!(is_valid_hashtag("#2024"));
        assert!(is_valid_hashtag("#café"));
        assert!(is_valid_hashtag("#東京"));

        assert!(!is_valid_hashtag("#"));
        assert!(!is_valid_hashtag("sol"));
        assert!(!is_valid_hashtag("##sol"));
        assert!(!is_valid_hashtag("#dia de sol"));
        assert!(!is_valid_hashtag("#sol!"));
        assert!(!is_valid_hashtag("#sol-quente"));
        assert!(!is_valid_hashtag("#sol☀️"));
        assert!(!is_valid_hashtag("#😀"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  sol "), Some("#sol".to_string()));
        assert_eq!(normalize("#dia de  sol"), Some("#dia_de_sol".to_string()));
        assert_eq!(normalize("dia\tde\nsol"), Some("#dia_de_sol".to_string()));
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_sanitize_repairs_and_filters() {
        let candidates = vec![
            "#Sol",
            "  ",
            "verão",
            "#dia de sol",
            "#sol",
            "#sol☀️",
            "#praia!",
            "#SOL",
            "#Calor",
        ];
        let result = sanitize(&candidates, 10);
        assert_eq!(result, vec!["#Sol", "#verão", "#dia_de_sol", "#Calor"]);
    }

    #[test]
    fn test_sanitize_scenario_portuguese() {
        let candidates = vec!["#Sol", "#sol", "#lindo dia", "#Hoje😀", "#Verão"];
        let result = sanitize(&candidates, 3);
        assert_eq!(result, vec!["#Sol", "#lindo_dia", "#Verão"]);
    }

    #[test]
    fn test_sanitize_stops_at_count() {
        let candidates = vec!["#a", "#b", "#c", "#d"];
        assert_eq!(sanitize(&candidates, 2), vec!["#a", "#b"]);
    }

    #[test]
    fn test_sanitize_empty_input() {
        let candidates: Vec<String> = Vec::new();
        assert!(sanitize(&candidates, 5).is_empty());
    }

    #[test]
    fn test_sanitize_short_result() {
        let candidates = vec![
            "#um", "#dois", "#um", "#três", "#", "!!", "#quatro", "#cinco", "#seis", "#sete",
        ];
        let result = sanitize(&candidates, 10);
        assert_eq!(result.len(), 7);
    }

    proptest! {
        #[test]
        fn prop_valid_hashtag_is_fixed_point(body in "[a-zA-Z0-9_çãéü]{1,20}") {
            let tag = format!("#{body}");
            prop_assert!(is_valid_hashtag(&tag));
            prop_assert_eq!(normalize(&tag), Some(tag.clone()));
            prop_assert_eq!(sanitize(&[tag.clone()], 1), vec![tag]);
        }

        #[test]
        fn prop_sanitize_output_invariants(
            candidates in proptest::collection::vec(".{0,16}", 0..40),
            count in 1usize..=30,
        ) {
            let result = sanitize(&candidates, count);
            prop_assert!(result.len() <= count);

            let mut lowered = HashSet::new();
            for tag in &result {
                prop_assert!(is_valid_hashtag(tag));
                prop_assert!(!tag.chars().any(char::is_whitespace));
                prop_assert!(lowered.insert(tag.to_lowercase()));
            }

            // sanitizing the output again changes nothing
            prop_assert_eq!(sanitize(&result, count), result);
        }
    }
}
