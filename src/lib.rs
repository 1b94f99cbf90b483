//! br-domains - Extract Brazilian (.br) domain names from free text
//!
//! This library provides:
//! - Compilation of a `.br` suffix list into one boundary-aware pattern
//! - Classification of matches into full domains and bare suffix mentions
//! - Suffix sources: in-memory, CSV snapshot, live registro.br scrape, and an
//!   auto-refreshing cached snapshot
//! - A line filter and the `download` / `filter` bodies of the `brdomains`
//!   command
//!
//! # Example
//!
//! ```rust
//! use br_domains::{DomainMatcher, MatchResult};
//! use br_domains::source::MemorySource;
//!
//! let source = MemorySource::new(["com.br", "edu.br", "gov.br"]);
//! let matcher = DomainMatcher::from_source(&source).unwrap();
//!
//! let found = matcher.find("Meu site é www.padaria.com.br, não um .gov.br");
//! assert_eq!(
//!     found,
//!     vec![
//!         MatchResult::full("padaria.com.br", "com.br"),
//!         MatchResult::bare("gov.br"),
//!     ]
//! );
//! ```
//!
//! # Matching rules
//!
//! | Text | Result |
//! |------|--------|
//! | `exemplo.com.br` | `(exemplo.com.br, com.br)` |
//! | `www.a.b.exemplo.com.br` | `(exemplo.com.br, com.br)` |
//! | `olar.br` | `(olar.br, br)` |
//! | `.edu.br` | `(None, edu.br)` |
//! | `olar.bra` | no match |

pub mod args;
pub mod commands;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod pattern;
pub mod source;
pub mod types;

// Re-export commonly used items
pub use encoding::TextEncoding;
pub use error::{BrDomainError, Result, SourceErrorKind};
pub use filter::{filter_lines, FilterStats};
pub use matcher::{DomainMatcher, Matches};
pub use pattern::{build_pattern, compile_pattern};
pub use source::{
    AutoSuffixSource, CsvSource, MemorySource, RegistroSource, SuffixSource,
    DEFAULT_CATEGORIES_URL, DEFAULT_UPDATE_INTERVAL,
};
pub use types::{MatchResult, SuffixRecord, SuffixSet, ROOT_SUFFIX};
