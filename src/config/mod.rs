pub mod scenario;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "scoreboard")]
#[command(about = "Replays a match scenario and prints the live summary")]
pub struct CliConfig {
    /// Path to the TOML scenario file
    #[arg(short, long, default_value = "scoreboard.toml")]
    pub scenario: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Validate the scenario without replaying it
    #[arg(long)]
    pub dry_run: bool,
}
