//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "somno",
    version,
    about = "somno - ingest vendor sleep-monitor exports",
    long_about = "Ingest vendor sleep-monitor exports: reconstruct per-sample\n\
                  timestamps from run-length encoded recordings, merge the\n\
                  biosignal streams into one time-indexed table, split\n\
                  multi-night recordings, and resample to a 1-minute grid."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a raw sleep-monitor export folder to CSV.
    Convert(ConvertArgs),

    /// Convert a vendor sleep-summary file to endpoint rows.
    Summary(SummaryArgs),

    /// List the supported biosignal channels.
    Signals,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Folder containing raw_sleep-monitor_*.csv files.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Target timezone: an IANA name (Europe/Berlin) or fixed offset (+01:00).
    #[arg(long = "timezone", value_name = "TZ")]
    pub timezone: String,

    /// Split the recording into nights and resample each to 1 minute.
    #[arg(long = "split-nights")]
    pub split_nights: bool,

    /// Minimum sample gap separating two nights, in hours.
    #[arg(long = "night-gap-hours", value_name = "HOURS", default_value_t = 8)]
    pub night_gap_hours: i64,

    /// Output directory (default: <FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SummaryArgs {
    /// Vendor sleep-summary CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Also write endpoint rows to this CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_args_parse() {
        let cli = Cli::parse_from([
            "somno",
            "convert",
            "/data/export",
            "--timezone",
            "Europe/Berlin",
            "--split-nights",
        ]);
        match cli.command {
            Command::Convert(args) => {
                assert_eq!(args.folder, PathBuf::from("/data/export"));
                assert_eq!(args.timezone, "Europe/Berlin");
                assert!(args.split_nights);
                assert_eq!(args.night_gap_hours, 8);
            }
            _ => panic!("expected convert subcommand"),
        }
    }
}
