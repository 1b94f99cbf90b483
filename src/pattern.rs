//! Compilation of a suffix set into one boundary-aware domain pattern.
//!
//! The pattern has four parts:
//!
//! ```text
//! (?:[^D]|^)+                      left boundary
//! (?P<subdomains>(?:[D]+\.)*)      leading labels, dropped from results
//! (?P<name>(?:[D]+\.)?(?:SUFFIXES)) label + suffix, or a bare suffix
//! (?:[^D]|$)+                      right boundary
//! ```
//!
//! where `D` is the domain character class: ASCII letters and digits, the
//! hyphen, and a fixed set of accented Latin letters. Accented letters are
//! word characters here, so `maçã.com.br` is never split at `ç`.
//!
//! The pattern is case-sensitive and only lists lowercase forms; it is meant
//! to run over lowercased text, which is what `DomainMatcher` does. Unicode
//! case folding would otherwise also admit `ſ` (U+017F) and the Kelvin sign
//! into `[a-z]`.
//!
//! The `regex` crate runs in time linear in the input, so the repeated
//! subdomain group next to the mandatory name group cannot backtrack
//! catastrophically.

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::error::{BrDomainError, Result};
use crate::types::SuffixSet;

/// Body of the domain character class
pub const DOMAIN_CHARS: &str = "a-z0-9àáâãéêíóôõúüç-";

/// Accented letters accepted inside labels (lowercase forms)
pub const ACCENTED_CHARS: &str = "àáâãéêíóôõúüç";

/// Capture group holding the discarded leading labels
pub const SUBDOMAINS_GROUP: &str = "subdomains";

/// Capture group holding the label and suffix
pub const NAME_GROUP: &str = "name";

/// Compiled automata above this size are rejected
const PATTERN_SIZE_LIMIT: usize = 32 * (1 << 20);

/// Check whether `c` may appear inside a domain label, once lowercased
pub fn is_domain_char(c: char) -> bool {
    c.to_lowercase().all(|lower| {
        lower.is_ascii_lowercase()
            || lower.is_ascii_digit()
            || lower == '-'
            || ACCENTED_CHARS.contains(lower)
    })
}

/// Build the pattern source for the given suffixes.
///
/// Suffixes are escaped and joined in lexicographic order. Alternation order
/// does not decide which suffix wins; `DomainMatcher` classifies by longest
/// suffix after matching.
pub fn build_pattern(suffixes: &SuffixSet) -> String {
    let alternatives = suffixes
        .iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");

    format!(
        r"(?:[^{d}]|^)+(?P<{sub}>(?:[{d}]+\.)*)(?P<{name}>(?:[{d}]+\.)?(?:{alts}))(?:[^{d}]|$)+",
        d = DOMAIN_CHARS,
        sub = SUBDOMAINS_GROUP,
        name = NAME_GROUP,
        alts = alternatives,
    )
}

/// Compile the pattern for the given suffixes. Input text must be lowercased.
pub fn compile_pattern(suffixes: &SuffixSet) -> Result<Regex> {
    if suffixes.is_empty() {
        return Err(BrDomainError::EmptySuffixSet);
    }

    let source = build_pattern(suffixes);
    debug!(
        "Compiling domain pattern for {} suffixes ({} bytes)",
        suffixes.len(),
        source.len()
    );

    let regex = RegexBuilder::new(&source)
        .unicode(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()?;
    Ok(regex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffixes(items: &[&str]) -> SuffixSet {
        SuffixSet::from_suffixes(items.iter().copied()).unwrap()
    }

    #[test]
    fn test_domain_chars() {
        for c in ['a', 'Z', '0', '9', '-', 'ç', 'Ç', 'ã', 'É', 'ü', '\u{212A}'] {
            assert!(is_domain_char(c), "{:?} should be a domain char", c);
        }
        for c in ['.', ' ', '_', '/', ':', 'ñ', 'è', '\n', 'ſ', 'ı'] {
            assert!(!is_domain_char(c), "{:?} should not be a domain char", c);
        }
    }

    #[test]
    fn test_domain_chars_agree_with_class() {
        // The class sees lowercased text, so compare against the lowercase form.
        let class = Regex::new(&format!("^[{}]+$", DOMAIN_CHARS)).unwrap();
        for c in "abcxyzABCXYZ0189-àáâãéêíóôõúüçÀÃÉÇÜ.,_ /ñèſı\u{212A}".chars() {
            assert_eq!(
                class.is_match(&c.to_lowercase().to_string()),
                is_domain_char(c),
                "disagreement on {:?}",
                c
            );
        }
    }

    #[test]
    fn test_alternatives_sorted_and_escaped() {
        let set = suffixes(&["net.br", "com.br", "adm.br"]).with_root();
        let pattern = build_pattern(&set);
        assert!(
            pattern.contains(r"(?:adm\.br|br|com\.br|net\.br)"),
            "got: {}",
            pattern
        );
    }

    #[test]
    fn test_pattern_is_deterministic() {
        let a = suffixes(&["com.br", "edu.br", "gov.br"]);
        let b = suffixes(&["gov.br", "com.br", "edu.br"]);
        assert_eq!(build_pattern(&a), build_pattern(&b));
    }

    #[test]
    fn test_named_groups_present() {
        let regex = compile_pattern(&suffixes(&["com.br"]).with_root()).unwrap();
        let names: Vec<&str> = regex.capture_names().flatten().collect();
        assert_eq!(names, vec![SUBDOMAINS_GROUP, NAME_GROUP]);
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let result = compile_pattern(&SuffixSet::new());
        assert!(matches!(result, Err(BrDomainError::EmptySuffixSet)));
    }

    #[test]
    fn test_matches_lowercased_text_only() {
        let regex = compile_pattern(&suffixes(&["com.br"]).with_root()).unwrap();
        assert!(regex.is_match("www.exemplo.com.br"));
        assert!(regex.is_match(&"MAÇÃ.COM.BR".to_lowercase()));
        assert!(!regex.is_match("WWW.EXEMPLO.COM.BR"));

        let text = "ſite.com.br";
        let caps = regex.captures(text).unwrap();
        let start = caps.name(SUBDOMAINS_GROUP).unwrap().start();
        assert_eq!(&text[start..caps.name(NAME_GROUP).unwrap().end()], "ite.com.br");
    }

    #[test]
    fn test_long_run_without_dot() {
        let regex = compile_pattern(&suffixes(&["com.br"]).with_root()).unwrap();
        let text = "a".repeat(100_000);
        assert!(!regex.is_match(&text));
        let text = "a.".repeat(50_000);
        assert!(!regex.is_match(&text));
    }
}
