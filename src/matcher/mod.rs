//! Domain extraction from free text.
//!
//! ## Example
//!
//! ```
//! use br_domains::{DomainMatcher, SuffixSet};
//!
//! let suffixes = SuffixSet::from_suffixes(["com.br", "edu.br"]).unwrap();
//! let matcher = DomainMatcher::new(suffixes).unwrap();
//!
//! let found = matcher.find("Veja https://www.exemplo.com.br/pagina e o .edu.br");
//! assert_eq!(found[0].as_pair(), (Some("exemplo.com.br"), "com.br"));
//! assert_eq!(found[1].as_pair(), (None, "edu.br"));
//! ```

mod classify;

use std::borrow::Cow;

use log::debug;
use regex::Regex;

use crate::error::{BrDomainError, Result};
use crate::pattern::{self, NAME_GROUP, SUBDOMAINS_GROUP};
use crate::source::SuffixSource;
use crate::types::{MatchResult, SuffixSet};

use classify::classify;

/// Finds `.br` domains and bare suffix mentions in text.
///
/// Built once from a suffix set and immutable afterwards; `find` takes `&self`
/// and the matcher is `Send + Sync`, so one instance can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    suffixes: SuffixSet,
    regex: Regex,
}

impl DomainMatcher {
    /// Create a matcher for the given suffixes. The root suffix `br` is added
    /// implicitly.
    ///
    /// An empty input set is rejected rather than degrading to root-only
    /// matching.
    pub fn new(suffixes: SuffixSet) -> Result<Self> {
        if suffixes.is_empty() {
            return Err(BrDomainError::EmptySuffixSet);
        }

        let suffixes = suffixes.with_root();
        let regex = pattern::compile_pattern(&suffixes)?;
        Ok(Self { suffixes, regex })
    }

    /// Create a matcher from any suffix source
    pub fn from_source(source: &dyn SuffixSource) -> Result<Self> {
        Self::new(source.load_suffixes()?)
    }

    /// All classified occurrences in `text`, in source order.
    ///
    /// Matching ignores case: the text is lowercased before scanning and
    /// results are reported in lowercase.
    pub fn find(&self, text: &str) -> Vec<MatchResult> {
        let results: Vec<MatchResult> = self.find_iter(text).collect();
        debug!(
            "Scanned {} bytes, {} matches",
            text.len(),
            results.len()
        );
        results
    }

    /// Lazy form of [`find`](Self::find)
    pub fn find_iter<'m, 't>(&'m self, text: &'t str) -> Matches<'m, 't> {
        Matches {
            matcher: self,
            text: lowercase(text),
            pos: 0,
        }
    }

    /// Only the full domains found in `text`, bare mentions skipped
    pub fn domains<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.find_iter(text).filter_map(|result| result.domain)
    }

    /// Working suffix set, root included
    pub fn suffixes(&self) -> &SuffixSet {
        &self.suffixes
    }

    /// Source of the compiled pattern, which expects lowercased text
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

fn lowercase(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| c.to_lowercase().eq(std::iter::once(c))) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.to_lowercase())
    }
}

/// Iterator over classified occurrences, see [`DomainMatcher::find_iter`].
#[derive(Debug)]
pub struct Matches<'m, 't> {
    matcher: &'m DomainMatcher,
    text: Cow<'t, str>,
    pos: usize,
}

impl Iterator for Matches<'_, '_> {
    type Item = MatchResult;

    fn next(&mut self) -> Option<MatchResult> {
        while self.pos < self.text.len() {
            let caps = self.matcher.regex.captures_at(&self.text, self.pos)?;
            let (subdomains, name) = (caps.name(SUBDOMAINS_GROUP)?, caps.name(NAME_GROUP)?);

            // Resume before the right boundary so it can serve as the next
            // match's left boundary.
            self.pos = name.end();

            let candidate = &self.text[subdomains.start()..name.end()];
            if let Some(result) = classify(candidate, &self.matcher.suffixes) {
                return Some(result);
            }
        }
        None
    }
}
