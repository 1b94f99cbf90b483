use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BrDomainError, Result};
use crate::pattern::is_domain_char;

/// Root suffix, always part of a matcher's working set
pub const ROOT_SUFFIX: &str = "br";

/// Ordered set of `.br` suffixes.
///
/// Entries are trimmed, lowercased and stripped of a leading dot on insertion.
/// Iteration is lexicographic, which keeps generated patterns reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixSet {
    suffixes: BTreeSet<String>,
}

impl SuffixSet {
    /// Create an empty suffix set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from suffix strings, rejecting anything that is not a `.br` suffix.
    pub fn from_suffixes<I, S>(suffixes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for suffix in suffixes {
            set.insert(suffix.as_ref())?;
        }
        Ok(set)
    }

    /// Insert a suffix. Returns `false` if it was already present.
    pub fn insert(&mut self, suffix: &str) -> Result<bool> {
        let normalized = normalize_suffix(suffix)?;
        Ok(self.suffixes.insert(normalized))
    }

    /// Return the set with the root suffix added
    pub fn with_root(mut self) -> Self {
        self.suffixes.insert(ROOT_SUFFIX.to_string());
        self
    }

    /// Check membership. Assumes `suffix` is already lowercased.
    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

fn normalize_suffix(suffix: &str) -> Result<String> {
    let trimmed = suffix.trim();
    let normalized = trimmed.strip_prefix('.').unwrap_or(trimmed).to_lowercase();

    let is_br = normalized == ROOT_SUFFIX || normalized.ends_with(".br");
    let labels_ok = normalized
        .split('.')
        .all(|label| !label.is_empty() && label.chars().all(is_domain_char));

    if !is_br || !labels_ok {
        return Err(BrDomainError::InvalidSuffix(suffix.to_string()));
    }
    Ok(normalized)
}

/// One entry of the registro.br categories listing, also the CSV snapshot row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRecord {
    /// Suffix, e.g. "com.br"
    pub tld: String,
    /// Category title
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Audience the category is meant for
    #[serde(default)]
    pub target: Option<String>,
    /// Registration restriction heading the entry was listed under
    #[serde(default)]
    pub restriction: Option<String>,
}

impl SuffixRecord {
    /// Record carrying only a suffix
    pub fn from_tld(tld: impl Into<String>) -> Self {
        Self {
            tld: tld.into(),
            ..Default::default()
        }
    }
}

/// A classified occurrence found in text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchResult {
    /// Registrable domain (`label.tld`), or `None` for a bare suffix mention
    pub domain: Option<String>,
    /// Matched suffix
    pub tld: String,
}

impl MatchResult {
    /// A full domain occurrence
    pub fn full(domain: impl Into<String>, tld: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            tld: tld.into(),
        }
    }

    /// A suffix mentioned without any label
    pub fn bare(tld: impl Into<String>) -> Self {
        Self {
            domain: None,
            tld: tld.into(),
        }
    }

    pub fn is_bare(&self) -> bool {
        self.domain.is_none()
    }

    /// Borrow as a `(domain, tld)` pair
    pub fn as_pair(&self) -> (Option<&str>, &str) {
        (self.domain.as_deref(), self.tld.as_str())
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.domain {
            Some(ref domain) => write!(f, "{}", domain),
            None => write!(f, ".{}", self.tld),
        }
    }
}
