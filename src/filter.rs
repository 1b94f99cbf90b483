use std::io::{BufRead, Write};

use log::debug;

use crate::encoding::TextEncoding;
use crate::error::{BrDomainError, Result};
use crate::matcher::DomainMatcher;

/// Counters from one [`filter_lines`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Lines read from the input
    pub lines: usize,
    /// Non-blank lines passed to the matcher
    pub scanned: usize,
    /// Domains written to the output
    pub domains: usize,
}

/// Stream `reader` through `matcher`, writing every full domain on its own
/// line. Blank lines are skipped; bare suffix mentions are not written.
pub fn filter_lines<R, W>(
    matcher: &DomainMatcher,
    mut reader: R,
    mut writer: W,
    encoding: TextEncoding,
) -> Result<FilterStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = FilterStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = encoding.decode(&buf).map_err(|e| {
            BrDomainError::InvalidInput(format!("line {}: {}", stats.lines, e))
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.scanned += 1;

        for domain in matcher.domains(line) {
            writeln!(writer, "{}", domain)?;
            stats.domains += 1;
        }
    }

    writer.flush()?;
    debug!(
        "Filtered {} lines ({} scanned), {} domains",
        stats.lines, stats.scanned, stats.domains
    );
    Ok(stats)
}
