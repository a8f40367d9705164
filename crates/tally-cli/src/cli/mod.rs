//! CLI for tally.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tally_core::config;

use commands::{run_config, run_count, CountSettings};

/// Top-level CLI for tally.
#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "tally: count a stream and report progress, ETE and ETA", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy stdin to stdout, counting lines (or bytes) and printing status to stderr.
    Count {
        /// Expected total (lines, or bytes with --bytes). Enables percentage, ETE and ETA.
        #[arg(long, value_name = "N")]
        total: Option<u64>,
        /// Count bytes instead of lines and render values as KiB/MiB/...
        #[arg(long)]
        bytes: bool,
        /// Locale for digit grouping, e.g. de-DE. Overrides the config file.
        #[arg(long, value_name = "ID")]
        locale: Option<String>,
        /// Minimum milliseconds between status lines (0 = every change).
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
        /// Status line template using ${Counter}, ${TotalCount}, ${PercentageCompleted},
        /// ${ElapsedTime}, ${EstimatedTimeEnroute} and ${EstimatedTimeOfArrival}.
        #[arg(long, value_name = "TEMPLATE")]
        format: Option<String>,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Count {
                total,
                bytes,
                locale,
                interval_ms,
                format,
            } => {
                let settings =
                    CountSettings::resolve(&cfg, total, bytes, locale, interval_ms, format);
                run_count(&settings)?;
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}
