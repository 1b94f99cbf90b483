use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::Encoding;

use crate::error::{BrDomainError, Result};

/// Text encoding of input files and CSV snapshots.
///
/// Any ASCII-compatible encoding known to `encoding_rs` is accepted, looked up
/// by its WHATWG label (`utf-8`, `windows-1252`, `cp1252`, `latin1`,
/// `iso-8859-15`, ...). Python-style spellings such as `latin_1` or `utf_8`
/// are accepted too. Note that `latin1` and `iso-8859-1` resolve to
/// windows-1252.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    pub const UTF_8: TextEncoding = TextEncoding(encoding_rs::UTF_8);
    pub const WINDOWS_1252: TextEncoding = TextEncoding(encoding_rs::WINDOWS_1252);

    /// Look up an encoding by label
    pub fn for_label(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        let encoding = Encoding::for_label(trimmed.as_bytes())
            .or_else(|| {
                let squashed: String = trimmed
                    .chars()
                    .filter(|c| *c != '-' && *c != '_')
                    .collect();
                Encoding::for_label(squashed.as_bytes())
            })
            .ok_or_else(|| BrDomainError::UnsupportedEncoding(label.to_string()))?;

        // Lines are split on b'\n' before decoding.
        if !encoding.is_ascii_compatible() {
            return Err(BrDomainError::UnsupportedEncoding(label.to_string()));
        }
        Ok(TextEncoding(encoding))
    }

    /// Decode raw bytes. Malformed input is an error, never replaced.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        self.0
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| BrDomainError::InvalidInput(format!("not valid {}", self.name())))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::UTF_8
    }
}

impl FromStr for TextEncoding {
    type Err = BrDomainError;

    fn from_str(s: &str) -> Result<Self> {
        TextEncoding::for_label(s)
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
