use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::encoding::TextEncoding;
use crate::source::DEFAULT_CATEGORIES_URL;

/// Extract Brazilian (.br) domains from text
#[derive(Debug, Parser)]
#[command(name = "brdomains", version, about)]
pub struct Cli {
    /// Log filter, e.g. "info" or "br_domains=debug". Overrides RUST_LOG;
    /// with neither set only warnings and errors are logged.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape the registro.br category list into a CSV snapshot
    Download(DownloadArgs),
    /// Print the .br domains found in a text file or stdin
    Filter(FilterArgs),
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Also print the domain pattern built from the downloaded suffixes
    #[arg(long)]
    pub print_regexp: bool,

    /// Categories page URL
    #[arg(long, default_value = DEFAULT_CATEGORIES_URL)]
    pub url: String,

    /// CSV file to save the suffix list to
    pub output_csv_filename: PathBuf,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// CSV with suffixes (when provided, registro.br is not scraped)
    #[arg(long)]
    pub tld_csv: Option<PathBuf>,

    /// Encoding of the suffix CSV
    #[arg(long, default_value = "utf-8", value_parser = parse_encoding)]
    pub tld_csv_encoding: TextEncoding,

    /// Encoding of the input
    #[arg(long, default_value = "utf-8", value_parser = parse_encoding)]
    pub encoding: TextEncoding,

    /// File to read text from (stdin when omitted)
    #[arg(long)]
    pub input_filename: Option<PathBuf>,

    /// Keep an auto-refreshed suffix snapshot in this directory instead of
    /// scraping on every run
    #[arg(long, conflicts_with = "tld_csv")]
    pub cache_dir: Option<PathBuf>,
}

fn parse_encoding(s: &str) -> Result<TextEncoding, String> {
    s.parse().map_err(|e: crate::error::BrDomainError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_args() {
        let cli = Cli::try_parse_from(["brdomains", "download", "--print-regexp", "tlds.csv"]).unwrap();
        match cli.command {
            Command::Download(args) => {
                assert!(args.print_regexp);
                assert_eq!(args.url, DEFAULT_CATEGORIES_URL);
                assert_eq!(args.output_csv_filename, PathBuf::from("tlds.csv"));
            }
            _ => panic!("expected download"),
        }
        assert_eq!(cli.log_level, None);
    }

    #[test]
    fn test_filter_defaults() {
        let cli = Cli::try_parse_from(["brdomains", "filter"]).unwrap();
        match cli.command {
            Command::Filter(args) => {
                assert_eq!(args.tld_csv, None);
                assert_eq!(args.encoding, TextEncoding::UTF_8);
                assert_eq!(args.tld_csv_encoding, TextEncoding::UTF_8);
                assert_eq!(args.input_filename, None);
                assert_eq!(args.cache_dir, None);
            }
            _ => panic!("expected filter"),
        }
    }

    #[test]
    fn test_filter_all_flags() {
        let cli = Cli::try_parse_from([
            "brdomains",
            "filter",
            "--tld-csv",
            "tlds.csv",
            "--tld-csv-encoding",
            "latin-1",
            "--encoding",
            "iso-8859-1",
            "--input-filename",
            "in.txt",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Command::Filter(args) => {
                assert_eq!(args.tld_csv, Some(PathBuf::from("tlds.csv")));
                assert_eq!(args.tld_csv_encoding, TextEncoding::WINDOWS_1252);
                assert_eq!(args.encoding, TextEncoding::WINDOWS_1252);
                assert_eq!(args.input_filename, Some(PathBuf::from("in.txt")));
            }
            _ => panic!("expected filter"),
        }
    }

    #[test]
    fn test_invalid_encoding_rejected() {
        let result = Cli::try_parse_from(["brdomains", "filter", "--encoding", "utf-16"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cache_dir_conflicts_with_tld_csv() {
        let result = Cli::try_parse_from([
            "brdomains",
            "filter",
            "--tld-csv",
            "a.csv",
            "--cache-dir",
            "/tmp/x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_download_requires_output() {
        assert!(Cli::try_parse_from(["brdomains", "download"]).is_err());
    }
}
