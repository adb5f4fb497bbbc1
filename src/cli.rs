use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "aidrank",
    version,
    about = "Aid-program candidate ranking and recipient selection CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute and print the full ranking
    Rank(RankCommand),
    /// Check criteria and candidate assignments without scoring
    Validate(ValidateCommand),
    /// Record the active program's top-K recipients
    Select(SelectCommand),
    /// Show the active program's selection state
    Status(StatusCommand),
}

#[derive(Args)]
pub struct RankCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct SelectCommand {
    pub path: PathBuf,
    /// Print the top-K without recording it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct StatusCommand {
    pub path: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
