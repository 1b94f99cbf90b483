//! Bodies of the `brdomains` subcommands.
//!
//! `main.rs` only parses arguments, sets up logging and hands stdout to these
//! functions.

use std::fs::File;
use std::io::{self, BufReader, Write};

use log::info;

use crate::args::{DownloadArgs, FilterArgs};
use crate::error::{BrDomainError, Result};
use crate::filter::{filter_lines, FilterStats};
use crate::matcher::DomainMatcher;
use crate::pattern::build_pattern;
use crate::source::{AutoSuffixSource, CsvSource, RegistroSource, SuffixSource};
use crate::types::SuffixSet;

/// Save the records of `source` to the output CSV. With `--print-regexp` the
/// pattern for those suffixes, root included, is written to `out`.
pub fn download<W: Write>(
    source: &dyn SuffixSource,
    args: &DownloadArgs,
    mut out: W,
) -> Result<()> {
    let records = source.load_records()?;
    CsvSource::new(&args.output_csv_filename).save(&records)?;

    if args.print_regexp {
        let suffixes = SuffixSet::from_suffixes(records.iter().map(|r| r.tld.as_str()))?;
        writeln!(out, "{}", build_pattern(&suffixes.with_root()))?;
        out.flush()?;
    }
    Ok(())
}

/// Pick the suffix source for `filter`: `--tld-csv`, then `--cache-dir`, then
/// the live registro.br page.
pub fn suffix_source(args: &FilterArgs) -> Box<dyn SuffixSource> {
    match (&args.tld_csv, &args.cache_dir) {
        (Some(path), _) => Box::new(CsvSource::new(path).with_encoding(args.tld_csv_encoding)),
        (None, Some(dir)) => Box::new(AutoSuffixSource::new().with_data_dir(dir)),
        (None, None) => Box::new(RegistroSource::new()),
    }
}

/// Write the domains found in the input file (stdin when not given) to `out`.
///
/// A missing input file is reported before any suffix source is touched.
pub fn filter<W: Write>(args: &FilterArgs, out: W) -> Result<FilterStats> {
    let input = match args.input_filename {
        Some(ref path) => {
            if !path.exists() {
                return Err(BrDomainError::InputNotFound(path.clone()));
            }
            Some(File::open(path)?)
        }
        None => None,
    };

    let source = suffix_source(args);
    let matcher = DomainMatcher::from_source(source.as_ref())?;
    info!("Matcher ready with {} suffixes", matcher.suffixes().len());

    let stats = match input {
        Some(file) => filter_lines(&matcher, BufReader::new(file), out, args.encoding)?,
        None => filter_lines(&matcher, io::stdin().lock(), out, args.encoding)?,
    };
    info!("{} domains found in {} lines", stats.domains, stats.lines);
    Ok(stats)
}
