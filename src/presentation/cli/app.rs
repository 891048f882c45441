use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ipwatch: external IP change logger
///
/// Polls a public "what is my IP" service, detects when the observed
/// external address changes, and records how long each address was held.
#[derive(Parser, Debug)]
#[command(name = "ipwatch")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the external IP and log change intervals (the default)
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Query the external IP once and print it
    #[command(alias = "q")]
    Query {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the intervals recorded in a CSV journal file
    #[command(alias = "r")]
    Report {
        /// Journal file to read
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options for the watch loop; every flag overrides its config-file field.
#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    /// Seconds to wait between checks
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// URL to query the public IP from
    #[arg(short, long)]
    pub url: Option<String>,

    /// CSV filename prefix (the file is <prefix>_<yyyymmdd_hhmmss>.csv)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Directory to create the CSV file in
    #[arg(short, long)]
    pub directory: Option<String>,

    /// Log records to standard output instead of a CSV file
    #[arg(long)]
    pub stdout: bool,

    /// Do not show per-poll IP updates on the console
    #[arg(long)]
    pub quiet: bool,

    /// Show nothing at all on the console (implies --quiet)
    #[arg(long)]
    pub silent: bool,
}
