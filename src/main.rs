use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use br_domains::args::{Cli, Command};
use br_domains::commands;
use br_domains::source::RegistroSource;

/// Filter used when neither RUST_LOG nor --log-level is given
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER));
    logger.format_timestamp_secs().format_target(false);
    if let Some(ref level) = cli.log_level {
        logger.parse_filters(level);
    }
    logger.init();

    match cli.command {
        Command::Download(args) => {
            let source = RegistroSource::new().with_url(args.url.as_str());
            commands::download(&source, &args, io::stdout().lock()).with_context(|| {
                format!(
                    "Failed to download the suffix list into {}",
                    args.output_csv_filename.display()
                )
            })?;
        }
        Command::Filter(args) => {
            commands::filter(&args, io::BufWriter::new(io::stdout().lock()))?;
        }
    }
    Ok(())
}
